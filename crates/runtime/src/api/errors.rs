//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and world commands
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use rpg_core::{CommandError, DataError, EntityId, ErrorSeverity, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("saved player could not be restored: {0}")]
    CorruptSave(#[from] DataError),

    #[error("runtime requires content to be configured before building")]
    MissingContent,

    #[error("player `{0}` is already logged in")]
    AlreadyLoggedIn(String),

    #[error("player `{0}` is not logged in")]
    NotLoggedIn(String),

    #[error("no shop at `{0}`")]
    NoShop(String),

    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),
}

impl RuntimeError {
    /// Severity of the underlying failure; plumbing failures are fatal.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Command(e) => e.severity(),
            Self::CorruptSave(e) => e.severity(),
            Self::AlreadyLoggedIn(_) | Self::NotLoggedIn(_) | Self::NoShop(_) => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownEntity(_) => ErrorSeverity::Validation,
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::MissingContent => ErrorSeverity::Fatal,
        }
    }
}
