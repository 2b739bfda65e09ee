/// Tracker domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("content module id and endpoint must not be empty")]
    EmptyRequestKey,
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("could not save the EULA version")]
    ConfigInsertFailed(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl TrackerError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyRequestKey => "EMPTY_REQUEST_KEY",
            Self::EmptyUserId => "EMPTY_USER_ID",
            Self::ConfigInsertFailed(_) => "INSERT_RECORD_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}
