use tenancy_cleanup_controller::start_cleanup_controller;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    Result,
    cluster::{MemberClustersConfig, client_for, connect_members},
    config::ControllerArgs,
};

pub async fn start(
    args: ControllerArgs,
    ready: CancellationToken,
    cancel: CancellationToken,
) -> Result<()> {
    let client = client_for("host", args.context, None).await?;

    let configs = MemberClustersConfig::try_new_configs(&args.member_clusters_config).await?;
    let member_clusters = connect_members(configs).await;
    for name in member_clusters.names() {
        info!("registered member cluster {}", name);
    }

    let controller =
        start_cleanup_controller(client, args.namespace, member_clusters, cancel.clone());

    ready.cancel();
    tokio::select! {
        _ = cancel.cancelled() => {},
        res = controller => res?,
    }

    Ok(())
}
