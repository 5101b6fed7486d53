use std::fmt;

use crate::resolver::{Classification, SubjectExistence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep,
    Delete(DeleteReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReason {
    SpaceMissing,
    UserRecordMissing,
    PublicViewerDisabled,
}

impl fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DeleteReason::SpaceMissing => "Space does not exist",
            DeleteReason::UserRecordMissing => "UserRecord does not exist",
            DeleteReason::PublicViewerDisabled => "public viewer is disabled",
        };
        f.write_str(reason)
    }
}

/// A missing Space always wins. Otherwise user bindings live as long as
/// their UserRecord, and public-viewer bindings live while the flag is on.
pub fn decide(classification: &Classification, public_viewer_enabled: bool) -> Decision {
    if !classification.space_exists {
        return Decision::Delete(DeleteReason::SpaceMissing);
    }
    match classification.subject {
        SubjectExistence::Exists => Decision::Keep,
        SubjectExistence::Missing => Decision::Delete(DeleteReason::UserRecordMissing),
        SubjectExistence::NotApplicable if public_viewer_enabled => Decision::Keep,
        SubjectExistence::NotApplicable => Decision::Delete(DeleteReason::PublicViewerDisabled),
    }
}
