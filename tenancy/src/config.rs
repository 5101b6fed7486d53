use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand, Debug)]
pub enum Commands {
    /// Run the SpaceBinding cleanup controller
    Controller(ControllerArgs),
    /// Print the CustomResourceDefinitions as YAML
    Crdgen,
}

#[derive(Parser, Debug, Clone)]
pub struct ControllerArgs {
    /// Host namespace holding SpaceBindings, Spaces, UserRecords and the TenancyConfig
    #[arg(long, env = "WATCH_NAMESPACE")]
    pub namespace: String,

    /// Metrics and readiness listener
    #[arg(long, default_value = "0.0.0.0:9090")]
    pub metrics_address: SocketAddr,

    /// Kubeconfig context for the host cluster, inferred when unset
    #[arg(long, env = "HOST_CONTEXT")]
    pub context: Option<String>,

    /// Member clusters config path
    #[arg(
        long,
        env = "MEMBER_CLUSTERS_CONFIG",
        default_value = "/etc/tenancy/member-clusters.yaml"
    )]
    pub member_clusters_config: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn test_controller_args() {
        let cli = Cli::parse_from([
            "tenancy",
            "controller",
            "--namespace",
            "tenancy-host",
            "--member-clusters-config",
            "/tmp/members.yaml",
        ]);
        let Commands::Controller(args) = cli.command else {
            panic!("expected controller command");
        };
        assert_eq!(args.namespace, "tenancy-host");
        assert_eq!(args.metrics_address.port(), 9090);
        assert_eq!(args.member_clusters_config.to_str(), Some("/tmp/members.yaml"));
        assert!(args.context.is_none());
    }

    #[test]
    fn test_crdgen() {
        let cli = Cli::parse_from(["tenancy", "crdgen"]);
        assert!(matches!(cli.command, Commands::Crdgen));
    }
}
