use std::{sync::Arc, time::Duration};

use kube::{ResourceExt, runtime::controller::Action};
use tenancy_crds::Lifecycle;
use tenancy_crds::v1alpha1::spacebinding::SpaceBinding;
use tenancy_crds::v1alpha1::spacebindingrequest::SpaceBindingRequest;
use tracing::{Span, error, field, info};

use crate::access::{NamespacedObject, ObjectAccess};
use crate::config::current_config;
use crate::decision::{Decision, decide};
use crate::origin::{OriginRef, origin_of};
use crate::resolver::classify;
use crate::{Error, Result, context::Context, metrics};

/// How long to wait before checking whether a SpaceBindingRequest whose
/// deletion was requested is gone.
pub const REMOTE_DELETE_REQUEUE: Duration = Duration::from_secs(10);
const ERROR_REQUEUE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The SpaceBinding no longer exists
    AlreadyGone,
    /// The SpaceBinding is already being deleted
    BeingDeleted,
    Kept,
    Deleted,
    /// Deletion of the originating SpaceBindingRequest was requested; the
    /// SpaceBinding is removed on a later pass once the request is gone.
    RemoteDeleteRequested { cluster: String },
}

impl Outcome {
    pub fn requeue_after(&self) -> Option<Duration> {
        match self {
            Outcome::RemoteDeleteRequested { .. } => Some(REMOTE_DELETE_REQUEUE),
            _ => None,
        }
    }

    pub fn metric_label(&self) -> &'static str {
        match self {
            Outcome::AlreadyGone => "already_gone",
            Outcome::BeingDeleted => "being_deleted",
            Outcome::Kept => "kept",
            Outcome::Deleted => "deleted",
            Outcome::RemoteDeleteRequested { .. } => "remote_delete_requested",
        }
    }

    fn action(&self) -> Action {
        match self.requeue_after() {
            Some(delay) => Action::requeue(delay),
            None => Action::await_change(),
        }
    }
}

#[tracing::instrument(skip(binding, ctx), fields(trace_id))]
pub(crate) async fn reconcile<A: ObjectAccess>(
    binding: Arc<SpaceBinding>,
    ctx: Arc<Context<A>>,
) -> Result<Action> {
    let trace_id = metrics::get_trace_id();
    if trace_id != opentelemetry::trace::TraceId::INVALID {
        Span::current().record("trace_id", field::display(&trace_id));
    }
    let _timer = ctx.metrics.count_and_measure(binding.as_ref(), &trace_id);

    let name = binding.name_any();
    let namespace = binding.namespace().ok_or(Error::InvalidResource)?;
    info!("started reconciling SpaceBinding {}/{}", namespace, name);

    let outcome = cleanup(&namespace, &name, &ctx).await?;
    ctx.metrics.count_outcome(&outcome);
    Ok(outcome.action())
}

pub(crate) fn error_policy<A: ObjectAccess>(
    binding: Arc<SpaceBinding>,
    error: &Error,
    ctx: Arc<Context<A>>,
) -> Action {
    let name = binding.name_any();
    let ns = binding.namespace().unwrap_or_default();
    error!(?error, "reconcile error for SpaceBinding {}/{}", ns, name);
    ctx.metrics.count_failure(binding.as_ref(), error);
    Action::requeue(ERROR_REQUEUE)
}

/// Decides whether the SpaceBinding `namespace/name` is still valid and
/// removes it when it is not. Everything is read fresh, so a failed run can
/// be repeated from scratch. Aborts with [`Error::Cancelled`] once the
/// context's token is cancelled.
pub async fn cleanup<A: ObjectAccess>(
    namespace: &str,
    name: &str,
    ctx: &Context<A>,
) -> Result<Outcome> {
    tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => Err(Error::Cancelled),
        outcome = cleanup_binding(namespace, name, ctx) => outcome,
    }
}

async fn cleanup_binding<A: ObjectAccess>(
    namespace: &str,
    name: &str,
    ctx: &Context<A>,
) -> Result<Outcome> {
    let Some(binding) = ctx
        .host
        .get::<SpaceBinding>(namespace, name)
        .await
        .map_err(get_error::<SpaceBinding>)?
    else {
        return Ok(Outcome::AlreadyGone);
    };

    if binding.lifecycle() == Lifecycle::DeletionRequested {
        return Ok(Outcome::BeingDeleted);
    }

    let config = current_config(&ctx.host, &ctx.namespace).await?;
    let classification = classify(&binding, &ctx.host).await?;

    let reason = match decide(&classification, config.public_viewer_enabled) {
        Decision::Keep => return Ok(Outcome::Kept),
        Decision::Delete(reason) => reason,
    };

    if let Some(origin) = origin_of(&binding)? {
        info!(
            "SpaceBinding {}/{} must be removed ({}), cleaning up SpaceBindingRequest {}/{} on {}",
            namespace, name, reason, origin.namespace, origin.name, origin.cluster
        );
        if remove_origin(&origin, ctx).await? {
            return Ok(Outcome::RemoteDeleteRequested {
                cluster: origin.cluster,
            });
        }
    }

    info!("deleting SpaceBinding {}/{}: {}", namespace, name, reason);
    ctx.host
        .delete(&binding)
        .await
        .map_err(|e| Error::Delete {
            kind: kind::<SpaceBinding>(),
            source: Box::new(e),
        })?;
    Ok(Outcome::Deleted)
}

/// Requests deletion of the SpaceBindingRequest behind `origin`. Returns
/// `true` when the request still existed, `false` when the member cluster
/// is already clean.
async fn remove_origin<A: ObjectAccess>(origin: &OriginRef, ctx: &Context<A>) -> Result<bool> {
    let member = ctx.member_clusters.reachable(&origin.cluster)?;

    let request = member
        .access
        .get::<SpaceBindingRequest>(&origin.namespace, &origin.name)
        .await
        .map_err(|e| Error::RemoteGet {
            cluster: member.name.clone(),
            kind: kind::<SpaceBindingRequest>(),
            source: Box::new(e),
        })?;
    let Some(request) = request else {
        return Ok(false);
    };

    if Lifecycle::from(&request.metadata) == Lifecycle::DeletionRequested {
        info!(
            "SpaceBindingRequest {}/{} on {} is already being deleted",
            origin.namespace, origin.name, member.name
        );
        return Ok(true);
    }

    member
        .access
        .delete(&request)
        .await
        .map_err(|e| Error::RemoteDelete {
            cluster: member.name.clone(),
            kind: kind::<SpaceBindingRequest>(),
            source: Box::new(e),
        })?;
    info!(
        "requested deletion of SpaceBindingRequest {}/{} on {}",
        origin.namespace, origin.name, member.name
    );
    Ok(true)
}

fn kind<K: NamespacedObject>() -> String {
    K::kind(&()).into_owned()
}

fn get_error<K: NamespacedObject>(e: Error) -> Error {
    Error::Get {
        kind: kind::<K>(),
        source: Box::new(e),
    }
}
