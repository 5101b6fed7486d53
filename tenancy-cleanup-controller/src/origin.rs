use std::collections::BTreeMap;

use kube::ResourceExt;
use tenancy_crds::v1alpha1::spacebinding::SpaceBinding;
use tenancy_crds::{
    SPACE_BINDING_REQUEST_CLUSTER_LABEL, SPACE_BINDING_REQUEST_NAME_LABEL,
    SPACE_BINDING_REQUEST_NAMESPACE_LABEL,
};

use crate::{Error, Result};

/// Weak reference from a SpaceBinding to the SpaceBindingRequest on a
/// member cluster that caused it to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginRef {
    pub cluster: String,
    pub namespace: String,
    pub name: String,
}

impl OriginRef {
    pub fn new(
        cluster: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Records the reference on `binding` so that [`origin_of`] returns it.
    pub fn apply_to(&self, binding: &mut SpaceBinding) {
        let labels = binding.labels_mut();
        labels.insert(
            SPACE_BINDING_REQUEST_CLUSTER_LABEL.into(),
            self.cluster.clone(),
        );
        labels.insert(
            SPACE_BINDING_REQUEST_NAMESPACE_LABEL.into(),
            self.namespace.clone(),
        );
        labels.insert(SPACE_BINDING_REQUEST_NAME_LABEL.into(), self.name.clone());
    }
}

/// Returns the SpaceBindingRequest the binding was created from, if any.
/// A binding carrying only part of the reference is rejected rather than
/// treated as local.
pub fn origin_of(binding: &SpaceBinding) -> Result<Option<OriginRef>> {
    let labels = binding.labels();
    let cluster = label(labels, SPACE_BINDING_REQUEST_CLUSTER_LABEL);
    let namespace = label(labels, SPACE_BINDING_REQUEST_NAMESPACE_LABEL);
    let name = label(labels, SPACE_BINDING_REQUEST_NAME_LABEL);

    match (cluster, namespace, name) {
        (None, None, None) => Ok(None),
        (Some(cluster), Some(namespace), Some(name)) => {
            Ok(Some(OriginRef::new(cluster, namespace, name)))
        }
        (cluster, namespace, _) => {
            let missing = if cluster.is_none() {
                SPACE_BINDING_REQUEST_CLUSTER_LABEL
            } else if namespace.is_none() {
                SPACE_BINDING_REQUEST_NAMESPACE_LABEL
            } else {
                SPACE_BINDING_REQUEST_NAME_LABEL
            };
            Err(Error::InvalidOriginReference {
                binding: format!(
                    "{}/{}",
                    binding.namespace().unwrap_or_default(),
                    binding.name_any()
                ),
                reason: format!("missing label {missing}"),
            })
        }
    }
}

fn label<'a>(labels: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    labels
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use kube::ResourceExt;
    use tenancy_crds::SPACE_BINDING_REQUEST_NAME_LABEL;
    use tenancy_crds::v1alpha1::spacebinding::SpaceBinding;

    use super::{OriginRef, origin_of};
    use crate::Error;

    #[test]
    fn test_origin_round_trip() {
        let origin = OriginRef::new("member-1", "lara-tenant", "lara-admin");
        let mut binding = SpaceBinding::for_space("tenancy-host", "lara", "lara", "admin");
        origin.apply_to(&mut binding);

        assert_eq!(origin_of(&binding).unwrap(), Some(origin));
    }

    #[test]
    fn test_no_origin() {
        let binding = SpaceBinding::for_space("tenancy-host", "lara", "lara", "admin");
        assert_eq!(origin_of(&binding).unwrap(), None);
    }

    #[test]
    fn test_partial_origin_is_rejected() {
        let mut binding = SpaceBinding::for_space("tenancy-host", "lara", "lara", "admin");
        OriginRef::new("member-1", "lara-tenant", "lara-admin").apply_to(&mut binding);
        binding.labels_mut().remove(SPACE_BINDING_REQUEST_NAME_LABEL);

        let err = origin_of(&binding).unwrap_err();
        assert!(matches!(err, Error::InvalidOriginReference { .. }));
        assert_eq!(
            err.to_string(),
            "invalid origin reference on SpaceBinding tenancy-host/lara-lara: missing label tenancy.dev/spacebindingrequest-name"
        );
    }

    #[test]
    fn test_empty_labels_count_as_absent() {
        let mut binding = SpaceBinding::for_space("tenancy-host", "lara", "lara", "admin");
        OriginRef::new("", "", "").apply_to(&mut binding);
        assert_eq!(origin_of(&binding).unwrap(), None);
    }
}
