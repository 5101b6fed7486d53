use kube::{CustomResource, KubeSchema};
use serde::{Deserialize, Serialize};

pub const NAME_GROUP_SPACEBINDINGREQUEST: &str = "spacebindingrequests.tenancy.dev";

/// Lives on member clusters. A SpaceBinding created on behalf of a
/// request is removed once the request is gone.
#[derive(
    CustomResource, KubeSchema, Serialize, Deserialize, Default, PartialEq, Eq, Clone, Debug,
)]
#[kube(
    group = "tenancy.dev",
    version = "v1alpha1",
    kind = "SpaceBindingRequest",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SpaceBindingRequestSpec {
    pub user_record: String,
    pub space_role: String,
}
