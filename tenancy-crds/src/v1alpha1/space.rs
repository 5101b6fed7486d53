use kube::{CustomResource, KubeSchema};
use serde::{Deserialize, Serialize};

pub const NAME_GROUP_SPACE: &str = "spaces.tenancy.dev";

/// A tenant-owned set of namespaces provisioned on a member cluster.
#[derive(
    CustomResource, KubeSchema, Serialize, Deserialize, Default, PartialEq, Eq, Clone, Debug,
)]
#[kube(
    group = "tenancy.dev",
    version = "v1alpha1",
    kind = "Space",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSpec {
    /// Member cluster the Space is provisioned on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_cluster: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tier_name: String,
}
