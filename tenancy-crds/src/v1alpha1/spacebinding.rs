use kube::{CustomResource, KubeSchema};
use serde::{Deserialize, Serialize};

use crate::{Lifecycle, TENANCY_AUTHENTICATED_USERNAME};

pub const NAME_GROUP_SPACEBINDING: &str = "spacebindings.tenancy.dev";

/// Grants the UserRecord `user_record` the role `space_role` over `space`.
#[derive(
    CustomResource, KubeSchema, Serialize, Deserialize, Default, PartialEq, Eq, Clone, Debug,
)]
#[kube(
    group = "tenancy.dev",
    version = "v1alpha1",
    kind = "SpaceBinding",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SpaceBindingSpec {
    /// Name of the bound UserRecord, or the reserved authenticated identity
    pub user_record: String,
    /// Name of the bound Space
    pub space: String,
    pub space_role: String,
}

impl SpaceBinding {
    /// Builds a binding named `<user_record>-<space>`.
    pub fn for_space(namespace: &str, user_record: &str, space: &str, space_role: &str) -> Self {
        let mut binding = SpaceBinding::new(
            &format!("{user_record}-{space}"),
            SpaceBindingSpec {
                user_record: user_record.into(),
                space: space.into(),
                space_role: space_role.into(),
            },
        );
        binding.metadata.namespace = Some(namespace.into());
        binding
    }

    pub fn is_public_viewer(&self) -> bool {
        self.spec.user_record == TENANCY_AUTHENTICATED_USERNAME
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from(&self.metadata)
    }
}
