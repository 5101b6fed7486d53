use kube::{CustomResource, KubeSchema};
use serde::{Deserialize, Serialize};

pub const NAME_GROUP_TENANCYCONFIG: &str = "tenancyconfigs.tenancy.dev";

/// The singleton TenancyConfig lives under this name in the host namespace.
pub const TENANCY_CONFIG_NAME: &str = "config";

#[derive(
    CustomResource, KubeSchema, Serialize, Deserialize, Default, PartialEq, Eq, Clone, Debug,
)]
#[kube(
    group = "tenancy.dev",
    version = "v1alpha1",
    kind = "TenancyConfig",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct TenancyConfigSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_viewer: Option<PublicViewerConfig>,
}

#[derive(KubeSchema, Serialize, Deserialize, Default, PartialEq, Eq, Clone, Debug)]
pub struct PublicViewerConfig {
    /// Allows SpaceBindings for the authenticated identity to exist
    #[serde(default)]
    pub enabled: bool,
}

impl TenancyConfig {
    pub fn public_viewer_enabled(&self) -> bool {
        self.spec
            .public_viewer
            .as_ref()
            .is_some_and(|pv| pv.enabled)
    }
}

impl TenancyConfigSpec {
    pub fn with_public_viewer(enabled: bool) -> Self {
        Self {
            public_viewer: Some(PublicViewerConfig { enabled }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TENANCY_CONFIG_NAME, TenancyConfig, TenancyConfigSpec};

    #[test]
    fn test_public_viewer_defaults_to_disabled() {
        let config = TenancyConfig::new(TENANCY_CONFIG_NAME, TenancyConfigSpec::default());
        assert!(!config.public_viewer_enabled());
    }

    #[test]
    fn test_public_viewer_enabled() {
        let config =
            TenancyConfig::new(TENANCY_CONFIG_NAME, TenancyConfigSpec::with_public_viewer(true));
        assert!(config.public_viewer_enabled());

        let config =
            TenancyConfig::new(TENANCY_CONFIG_NAME, TenancyConfigSpec::with_public_viewer(false));
        assert!(!config.public_viewer_enabled());
    }

    #[test]
    fn test_public_viewer_deserializes_from_camel_case() {
        let spec: TenancyConfigSpec =
            serde_json::from_value(serde_json::json!({"publicViewer": {"enabled": true}}))
                .expect("spec");
        assert_eq!(spec, TenancyConfigSpec::with_public_viewer(true));
    }
}
