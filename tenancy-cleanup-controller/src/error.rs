use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("kube error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("utils error: {0}")]
    UtilsError(#[from] tenancy_k8s_utils::Error),

    #[error("unable to get the current {kind}: {source}")]
    Get {
        kind: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to delete the {kind}: {source}")]
    Delete {
        kind: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to get the current {kind} from member cluster '{cluster}': {source}")]
    RemoteGet {
        cluster: String,
        kind: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to delete the {kind} from member cluster '{cluster}': {source}")]
    RemoteDelete {
        cluster: String,
        kind: String,
        #[source]
        source: Box<Error>,
    },

    #[error("unable to get the TenancyConfig: {0}")]
    ConfigUnavailable(#[source] Box<Error>),

    #[error("unknown member cluster '{0}'")]
    UnknownMemberCluster(String),

    #[error("member cluster '{0}' is not ready")]
    MemberClusterNotReady(String),

    #[error("invalid origin reference on SpaceBinding {binding}: {reason}")]
    InvalidOriginReference { binding: String, reason: String },

    #[error("reconciliation cancelled")]
    Cancelled,

    #[error("invalid resource reconciled")]
    InvalidResource,

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn metric_label(&self) -> String {
        let label = match self {
            Error::KubeError(_) => "kube",
            Error::UtilsError(_) => "utils",
            Error::Get { .. } => "get",
            Error::Delete { .. } => "delete",
            Error::RemoteGet { .. } => "remote_get",
            Error::RemoteDelete { .. } => "remote_delete",
            Error::ConfigUnavailable(_) => "config_unavailable",
            Error::UnknownMemberCluster(_) => "unknown_member_cluster",
            Error::MemberClusterNotReady(_) => "member_cluster_not_ready",
            Error::InvalidOriginReference { .. } => "invalid_origin_reference",
            Error::Cancelled => "cancelled",
            Error::InvalidResource => "invalid_resource",
            Error::Other(_) => "other",
        };
        label.into()
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_nested_messages() {
        let err = Error::RemoteDelete {
            cluster: "member-1".into(),
            kind: "SpaceBindingRequest".into(),
            source: Box::new(Error::Other("mock error".into())),
        };
        assert_eq!(
            err.to_string(),
            "unable to delete the SpaceBindingRequest from member cluster 'member-1': mock error"
        );
        assert_eq!(err.metric_label(), "remote_delete");
    }
}
