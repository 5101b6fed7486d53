//! In-memory stand-in for an API server, used by the reconciler tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use kube::ResourceExt;
use tenancy_crds::v1alpha1::config::{TENANCY_CONFIG_NAME, TenancyConfig, TenancyConfigSpec};
use tenancy_crds::v1alpha1::space::{Space, SpaceSpec};
use tenancy_crds::v1alpha1::spacebindingrequest::{SpaceBindingRequest, SpaceBindingRequestSpec};
use tenancy_crds::v1alpha1::userrecord::{UserRecord, UserRecordSpec};

use crate::access::{NamespacedObject, ObjectAccess};
use crate::{Error, Result};

type ObjectKey = (String, String, String);

fn key_of<K: NamespacedObject>(namespace: &str, name: &str) -> ObjectKey {
    (K::kind(&()).into_owned(), namespace.into(), name.into())
}

#[derive(Default)]
pub(crate) struct FakeCluster {
    objects: Mutex<BTreeMap<ObjectKey, serde_json::Value>>,
    get_failures: Vec<(String, Option<String>)>,
    delete_failures: Vec<String>,
    deleted: Mutex<Vec<ObjectKey>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<K: NamespacedObject>(self, obj: &K) -> Self {
        self.insert(obj);
        self
    }

    /// Gets of `kind` fail, for every name or only for `name`.
    pub fn fail_get(mut self, kind: &str, name: Option<&str>) -> Self {
        self.get_failures
            .push((kind.into(), name.map(ToString::to_string)));
        self
    }

    pub fn fail_delete(mut self, kind: &str) -> Self {
        self.delete_failures.push(kind.into());
        self
    }

    pub fn insert<K: NamespacedObject>(&self, obj: &K) {
        let key = key_of::<K>(&obj.namespace().unwrap_or_default(), &obj.name_any());
        let value = serde_json::to_value(obj).expect("serializable object");
        self.objects.lock().unwrap().insert(key, value);
    }

    pub fn remove<K: NamespacedObject>(&self, namespace: &str, name: &str) {
        self.objects
            .lock()
            .unwrap()
            .remove(&key_of::<K>(namespace, name));
    }

    pub fn contains<K: NamespacedObject>(&self, namespace: &str, name: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&key_of::<K>(namespace, name))
    }

    pub fn delete_count(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }
}

impl ObjectAccess for FakeCluster {
    async fn get<K: NamespacedObject>(&self, namespace: &str, name: &str) -> Result<Option<K>> {
        let kind = K::kind(&());
        let failing = self.get_failures.iter().any(|(k, n)| {
            k.as_str() == kind.as_ref() && n.as_deref().is_none_or(|n| n == name)
        });
        if failing {
            return Err(Error::Other("mock error".into()));
        }

        let value = self
            .objects
            .lock()
            .unwrap()
            .get(&key_of::<K>(namespace, name))
            .cloned();
        value
            .map(|v| serde_json::from_value(v).map_err(|e| Error::Other(e.to_string())))
            .transpose()
    }

    async fn delete<K: NamespacedObject>(&self, obj: &K) -> Result<()> {
        if self
            .delete_failures
            .iter()
            .any(|k| k.as_str() == K::kind(&()).as_ref())
        {
            return Err(Error::Other("mock error".into()));
        }
        let key = key_of::<K>(&obj.namespace().unwrap_or_default(), &obj.name_any());
        self.objects.lock().unwrap().remove(&key);
        self.deleted.lock().unwrap().push(key);
        Ok(())
    }
}

pub(crate) fn space(namespace: &str, name: &str) -> Space {
    let mut space = Space::new(name, SpaceSpec::default());
    space.metadata.namespace = Some(namespace.into());
    space
}

pub(crate) fn user_record(namespace: &str, name: &str) -> UserRecord {
    let mut record = UserRecord::new(name, UserRecordSpec::default());
    record.metadata.namespace = Some(namespace.into());
    record
}

pub(crate) fn space_binding_request(
    namespace: &str,
    name: &str,
    user_record: &str,
    space_role: &str,
) -> SpaceBindingRequest {
    let mut request = SpaceBindingRequest::new(
        name,
        SpaceBindingRequestSpec {
            user_record: user_record.into(),
            space_role: space_role.into(),
        },
    );
    request.metadata.namespace = Some(namespace.into());
    request
}

pub(crate) fn tenancy_config(namespace: &str, public_viewer_enabled: bool) -> TenancyConfig {
    let mut config = TenancyConfig::new(
        TENANCY_CONFIG_NAME,
        TenancyConfigSpec::with_public_viewer(public_viewer_enabled),
    );
    config.metadata.namespace = Some(namespace.into());
    config
}
