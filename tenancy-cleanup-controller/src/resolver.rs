use kube::ResourceExt;
use tenancy_crds::v1alpha1::{space::Space, spacebinding::SpaceBinding, userrecord::UserRecord};

use crate::access::{NamespacedObject, ObjectAccess};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectExistence {
    Exists,
    Missing,
    /// The binding is for the authenticated identity, which has no
    /// UserRecord to look up.
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub subject: SubjectExistence,
    pub space_exists: bool,
}

/// Looks up the Space and UserRecord referenced by `binding` on the host.
pub async fn classify<A: ObjectAccess>(binding: &SpaceBinding, host: &A) -> Result<Classification> {
    let namespace = binding.namespace().ok_or(Error::InvalidResource)?;
    let space_exists = exists::<Space, A>(host, &namespace, &binding.spec.space).await?;

    let subject = if binding.is_public_viewer() {
        SubjectExistence::NotApplicable
    } else if exists::<UserRecord, A>(host, &namespace, &binding.spec.user_record).await? {
        SubjectExistence::Exists
    } else {
        SubjectExistence::Missing
    };

    Ok(Classification {
        subject,
        space_exists,
    })
}

async fn exists<K: NamespacedObject, A: ObjectAccess>(
    host: &A,
    namespace: &str,
    name: &str,
) -> Result<bool> {
    let obj = host
        .get::<K>(namespace, name)
        .await
        .map_err(|e| Error::Get {
            kind: K::kind(&()).into_owned(),
            source: Box::new(e),
        })?;
    Ok(obj.is_some())
}
