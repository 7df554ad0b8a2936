use serenity::http::HttpError;
use serenity::model::error::Error as ModelError;
use thiserror::Error;

/// Outcome of a failed role grant or nickname edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemberEditError {
    /// The bot lacks the permission or role hierarchy to perform the edit.
    #[error("Missing permissions")]
    PermissionDenied,

    #[error("{0}")]
    Failed(String),
}

impl From<serenity::Error> for MemberEditError {
    fn from(err: serenity::Error) -> Self {
        let denied = match &err {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
                response.status_code.as_u16() == 403
            }
            serenity::Error::Model(ModelError::InvalidPermissions { .. }) => true,
            _ => false,
        };

        if denied {
            Self::PermissionDenied
        } else {
            Self::Failed(err.to_string())
        }
    }
}
