use tokio_util::sync::CancellationToken;

use crate::access::ObjectAccess;
use crate::cluster::MemberClusters;
use crate::metrics::ControllerMetrics;

pub struct Context<A: ObjectAccess> {
    /// Access to the host cluster
    pub host: A,
    /// Namespace holding SpaceBindings, Spaces, UserRecords and the
    /// TenancyConfig
    pub namespace: String,
    pub member_clusters: MemberClusters<A>,
    pub metrics: ControllerMetrics,
    /// Cancelling aborts in-flight reconciliations
    pub cancel: CancellationToken,
}
