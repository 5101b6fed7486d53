use std::collections::BTreeMap;

use crate::access::ObjectAccess;
use crate::{Error, Result};

/// A member cluster as registered at startup.
pub struct MemberCluster<A> {
    pub name: String,
    /// Whether the cluster answered the startup probe
    pub ready: bool,
    pub access: A,
}

impl<A: ObjectAccess> MemberCluster<A> {
    pub fn new(name: impl Into<String>, ready: bool, access: A) -> Self {
        Self {
            name: name.into(),
            ready,
            access,
        }
    }
}

/// Read-only mapping from cluster name to member cluster.
pub struct MemberClusters<A> {
    clusters: BTreeMap<String, MemberCluster<A>>,
}

impl<A> Default for MemberClusters<A> {
    fn default() -> Self {
        Self {
            clusters: BTreeMap::new(),
        }
    }
}

impl<A: ObjectAccess> MemberClusters<A> {
    pub fn new(clusters: impl IntoIterator<Item = MemberCluster<A>>) -> Self {
        Self {
            clusters: clusters
                .into_iter()
                .map(|cluster| (cluster.name.clone(), cluster))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&MemberCluster<A>> {
        self.clusters.get(name)
    }

    /// Like [`lookup`](Self::lookup) but only yields clusters that can be
    /// talked to.
    pub fn reachable(&self, name: &str) -> Result<&MemberCluster<A>> {
        let cluster = self
            .lookup(name)
            .ok_or_else(|| Error::UnknownMemberCluster(name.into()))?;
        if !cluster.ready {
            return Err(Error::MemberClusterNotReady(name.into()));
        }
        Ok(cluster)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clusters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}
