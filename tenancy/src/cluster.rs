use std::path::Path;
use std::time::Duration;

use http::Uri;
use kube::config::KubeConfigOptions;
use serde::Deserialize;
use tenancy_cleanup_controller::{KubeAccess, MemberCluster, MemberClusters};
use tracing::{info, warn};

use crate::{Error, Result};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MemberClustersConfig {
    #[serde(default)]
    pub members: Vec<Config>,
}

impl MemberClustersConfig {
    pub async fn try_new_configs(path: impl AsRef<Path>) -> Result<Self> {
        let config = tokio::fs::read_to_string(path).await?;
        Self::from_yaml(&config)
    }

    pub fn from_yaml(config: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(config)?)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Name SpaceBindings use to refer to the cluster
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Builds a client from a kubeconfig context, from the in-cluster config
/// pointed at `endpoint`, or from whatever config the environment provides.
pub async fn client_for(
    name: &str,
    context: Option<String>,
    endpoint: Option<&str>,
) -> Result<kube::Client> {
    let client_config = if context.is_some() {
        kube::Config::from_kubeconfig(&KubeConfigOptions {
            context,
            ..Default::default()
        })
        .await?
    } else if let Some(endpoint) = endpoint {
        let mut client_config = kube::Config::incluster()?;
        client_config.cluster_url = Uri::try_from(endpoint).map_err(|e| Error::InvalidEndpoint {
            name: name.into(),
            reason: e.to_string(),
        })?;
        client_config
    } else {
        kube::Config::infer().await?
    };

    Ok(kube::Client::try_from(client_config)?)
}

/// Connects to every configured member cluster. Clusters that cannot be
/// configured are left out; clusters that do not answer the version probe
/// are registered as not ready.
pub async fn connect_members(config: MemberClustersConfig) -> MemberClusters<KubeAccess> {
    let mut members = Vec::with_capacity(config.members.len());
    for member in config.members {
        let client = match client_for(&member.name, member.context, member.endpoint.as_deref()).await {
            Ok(client) => client,
            Err(e) => {
                warn!("failed to create client for member cluster {}: {}", member.name, e);
                continue;
            }
        };
        let ready = probe(&member.name, &client).await;
        members.push(MemberCluster::new(member.name, ready, KubeAccess::new(client)));
    }
    MemberClusters::new(members)
}

async fn probe(name: &str, client: &kube::Client) -> bool {
    match tokio::time::timeout(PROBE_TIMEOUT, client.apiserver_version()).await {
        Ok(Ok(version)) => {
            info!("member cluster {} is reachable ({})", name, version.git_version);
            true
        }
        Ok(Err(e)) => {
            warn!("member cluster {} is not reachable: {}", name, e);
            false
        }
        Err(_) => {
            warn!("timed out probing member cluster {}", name);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Config, MemberClustersConfig};

    #[test]
    fn test_parse_member_clusters() {
        let config = MemberClustersConfig::from_yaml(
            r#"
members:
  - name: member-1
    context: kind-member-1
  - name: member-2
    endpoint: https://member-2.example.com:6443
"#,
        )
        .unwrap();

        assert_eq!(
            config.members,
            vec![
                Config {
                    name: "member-1".into(),
                    context: Some("kind-member-1".into()),
                    endpoint: None,
                },
                Config {
                    name: "member-2".into(),
                    context: None,
                    endpoint: Some("https://member-2.example.com:6443".into()),
                },
            ]
        );
    }

    #[test]
    fn test_empty_config_has_no_members() {
        let config = MemberClustersConfig::from_yaml("{}").unwrap();
        assert!(config.members.is_empty());
    }

    #[test]
    fn test_member_requires_name() {
        assert!(MemberClustersConfig::from_yaml("members:\n  - context: foo\n").is_err());
    }
}
