use thiserror::Error;

pub mod v1alpha1;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::CustomResourceExt;

pub const GROUP: &str = "tenancy.dev";

/// Reserved UserRecord name bound by public-viewer SpaceBindings. No
/// UserRecord ever exists under this name.
pub const TENANCY_AUTHENTICATED_USERNAME: &str = "tenancy-authenticated";

pub const SPACE_BINDING_REQUEST_CLUSTER_LABEL: &str = "tenancy.dev/spacebindingrequest-cluster";
pub const SPACE_BINDING_REQUEST_NAMESPACE_LABEL: &str =
    "tenancy.dev/spacebindingrequest-namespace";
pub const SPACE_BINDING_REQUEST_NAME_LABEL: &str = "tenancy.dev/spacebindingrequest-name";

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("yaml error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Two-state view of an object's deletion timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    DeletionRequested,
}

impl From<&ObjectMeta> for Lifecycle {
    fn from(meta: &ObjectMeta) -> Self {
        if meta.deletion_timestamp.is_some() {
            Lifecycle::DeletionRequested
        } else {
            Lifecycle::Active
        }
    }
}

pub fn crd_gen_all() -> Result<()> {
    let crds = vec![
        v1alpha1::space::Space::crd(),
        v1alpha1::spacebinding::SpaceBinding::crd(),
        v1alpha1::spacebindingrequest::SpaceBindingRequest::crd(),
        v1alpha1::userrecord::UserRecord::crd(),
        v1alpha1::config::TenancyConfig::crd(),
    ];
    for crd in crds {
        print!("---\n{}", serde_yaml::to_string(&crd)?);
    }
    Ok(())
}
