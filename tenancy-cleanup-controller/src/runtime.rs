use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use kube::{
    Api, Client, ResourceExt,
    runtime::{Config, Controller, reflector::ObjectRef, reflector::Store, watcher},
};
use tenancy_crds::v1alpha1::{space::Space, spacebinding::SpaceBinding, userrecord::UserRecord};
use tenancy_k8s_utils::create_store_and_subscriber;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    Result,
    access::KubeAccess,
    cluster::MemberClusters,
    context::Context,
    controller::{error_policy, reconcile},
    metrics::ControllerMetrics,
};

const STORE_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn start_cleanup_controller(
    client: Client,
    namespace: String,
    member_clusters: MemberClusters<KubeAccess>,
    cancel: CancellationToken,
) -> Result<()> {
    let (bindings, binding_subscriber) = create_store_and_subscriber(
        Api::<SpaceBinding>::namespaced(client.clone(), &namespace),
        watcher::Config::default(),
        Some(STORE_TIMEOUT),
    )
    .await?;
    let space_api = Api::<Space>::namespaced(client.clone(), &namespace);
    let user_record_api = Api::<UserRecord>::namespaced(client.clone(), &namespace);

    info!(
        "starting SpaceBinding cleanup controller in {} with {} member cluster(s)",
        namespace,
        member_clusters.len()
    );
    let context = Arc::new(Context {
        host: KubeAccess::new(client),
        namespace,
        member_clusters,
        metrics: ControllerMetrics::new("spacebinding_cleanup"),
        cancel: cancel.clone(),
    });

    // Space and UserRecord deletions must trigger the bindings over them
    let space_bindings = bindings.clone();
    let user_record_bindings = bindings.clone();
    let config = Config::default().concurrency(10);
    Controller::for_shared_stream(binding_subscriber, bindings)
        .watches(space_api, watcher::Config::default(), move |space: Space| {
            bindings_for_space(&space_bindings, &space)
        })
        .watches(
            user_record_api,
            watcher::Config::default(),
            move |record: UserRecord| bindings_for_user_record(&user_record_bindings, &record),
        )
        .graceful_shutdown_on(shutdown(cancel))
        .with_config(config)
        .run(reconcile, error_policy, context)
        .filter_map(|x| async move { std::result::Result::ok(x) })
        .for_each(|_| futures::future::ready(()))
        .await;
    Ok(())
}

async fn shutdown(cancel: CancellationToken) {
    cancel.cancelled().await;
}

fn bindings_for_space(store: &Store<SpaceBinding>, space: &Space) -> Vec<ObjectRef<SpaceBinding>> {
    let name = space.name_any();
    bindings_matching(store, space.namespace(), |binding| binding.spec.space == name)
}

fn bindings_for_user_record(
    store: &Store<SpaceBinding>,
    record: &UserRecord,
) -> Vec<ObjectRef<SpaceBinding>> {
    let name = record.name_any();
    bindings_matching(store, record.namespace(), |binding| {
        binding.spec.user_record == name
    })
}

fn bindings_matching(
    store: &Store<SpaceBinding>,
    namespace: Option<String>,
    matches: impl Fn(&SpaceBinding) -> bool,
) -> Vec<ObjectRef<SpaceBinding>> {
    store
        .state()
        .iter()
        .filter_map(|binding| {
            let binding: &SpaceBinding = binding;
            (binding.namespace() == namespace && matches(binding))
                .then(|| ObjectRef::from_obj(binding))
        })
        .collect()
}
