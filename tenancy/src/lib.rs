pub mod cluster;
pub mod config;
pub mod controller;
pub mod http;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("kube error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("failed to create config from kubeconfig: {0}")]
    KubeConfig(#[from] kube::config::KubeconfigError),

    #[error("failed to load in-cluster config: {0}")]
    InClusterConfig(#[from] kube::config::InClusterError),

    #[error("failed to infer client config: {0}")]
    InferConfig(#[from] kube::config::InferConfigError),

    #[error("failed to parse member clusters config: {0}")]
    YamlConversion(#[from] serde_yaml::Error),

    #[error("invalid endpoint for member cluster {name}: {reason}")]
    InvalidEndpoint { name: String, reason: String },

    #[error("controller error: {0}")]
    Controller(#[from] tenancy_cleanup_controller::Error),

    #[error("crd error: {0}")]
    Crd(#[from] tenancy_crds::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
