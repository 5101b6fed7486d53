use tenancy_crds::v1alpha1::config::{TENANCY_CONFIG_NAME, TenancyConfig};

use crate::access::ObjectAccess;
use crate::{Error, Result};

/// The slice of the global TenancyConfig consumed by the cleanup controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupConfig {
    pub public_viewer_enabled: bool,
}

/// Reads the TenancyConfig from `namespace`. Not cached: every call goes
/// to the API server so toggles apply on the next reconcile. A missing
/// TenancyConfig means defaults.
pub async fn current_config<A: ObjectAccess>(host: &A, namespace: &str) -> Result<CleanupConfig> {
    let config = host
        .get::<TenancyConfig>(namespace, TENANCY_CONFIG_NAME)
        .await
        .map_err(|e| Error::ConfigUnavailable(Box::new(e)))?;

    Ok(config
        .map(|config| CleanupConfig {
            public_viewer_enabled: config.public_viewer_enabled(),
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{CleanupConfig, current_config};
    use crate::Error;
    use crate::testing::{FakeCluster, tenancy_config};

    fn config(enabled: bool) -> tenancy_crds::v1alpha1::config::TenancyConfig {
        tenancy_config("tenancy-host", enabled)
    }

    #[tokio::test]
    async fn test_reads_public_viewer_flag() {
        let host = FakeCluster::new().with(&config(true));
        let current = current_config(&host, "tenancy-host").await.unwrap();
        assert!(current.public_viewer_enabled);

        // no caching between calls
        host.insert(&config(false));
        let current = current_config(&host, "tenancy-host").await.unwrap();
        assert!(!current.public_viewer_enabled);
    }

    #[tokio::test]
    async fn test_missing_config_uses_defaults() {
        let host = FakeCluster::new();
        let current = current_config(&host, "tenancy-host").await.unwrap();
        assert_eq!(current, CleanupConfig::default());
    }

    #[tokio::test]
    async fn test_retrieval_failure_is_fatal() {
        let host = FakeCluster::new()
            .with(&config(true))
            .fail_get("TenancyConfig", None);
        let err = current_config(&host, "tenancy-host").await.unwrap_err();
        assert!(matches!(err, Error::ConfigUnavailable(_)));
        assert_eq!(err.to_string(), "unable to get the TenancyConfig: mock error");
    }
}
