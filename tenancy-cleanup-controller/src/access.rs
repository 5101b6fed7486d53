use std::fmt::Debug;
use std::future::Future;

use k8s_openapi::NamespaceResourceScope;
use kube::api::{DeleteParams, Preconditions};
use kube::{Api, Client, Resource, ResourceExt};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tenancy_k8s_utils::{is_conflict, is_not_found};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Namespaced resource types reachable through [`ObjectAccess`].
pub trait NamespacedObject:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + Debug
    + DeserializeOwned
    + Serialize
    + Send
    + Sync
    + 'static
{
}

impl<K> NamespacedObject for K where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + Clone
        + Debug
        + DeserializeOwned
        + Serialize
        + Send
        + Sync
        + 'static
{
}

/// Typed get/delete against one cluster's object store.
pub trait ObjectAccess: Send + Sync + 'static {
    /// `Ok(None)` when the object does not exist.
    fn get<K: NamespacedObject>(
        &self,
        namespace: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<K>>> + Send;

    /// Deleting an object that is already gone succeeds.
    fn delete<K: NamespacedObject>(&self, obj: &K) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Clone)]
pub struct KubeAccess {
    client: Client,
}

impl KubeAccess {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ObjectAccess for KubeAccess {
    async fn get<K: NamespacedObject>(&self, namespace: &str, name: &str) -> Result<Option<K>> {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn delete<K: NamespacedObject>(&self, obj: &K) -> Result<()> {
        let name = obj.name_any();
        let namespace = obj.namespace().ok_or(Error::InvalidResource)?;
        let api: Api<K> = Api::namespaced(self.client.clone(), &namespace);

        // the uid guards against removing a recreated object of the same name
        let params = DeleteParams {
            preconditions: obj.uid().map(|uid| Preconditions {
                uid: Some(uid),
                resource_version: None,
            }),
            ..Default::default()
        };
        match api.delete(&name, &params).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                debug!("{} {}/{} already deleted", K::kind(&()), namespace, name);
                Ok(())
            }
            Err(e) => {
                if is_conflict(&e) {
                    warn!(
                        "{} {}/{} changed before it could be deleted",
                        K::kind(&()),
                        namespace,
                        name
                    );
                }
                Err(e.into())
            }
        }
    }
}
