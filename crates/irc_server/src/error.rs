use thiserror::Error;

/// Levels 2-5 of the error taxonomy (§7): truly exceptional conditions that
/// are not surfaced as a numeric reply to one client. Level 1 (per-command
/// user errors) is modeled as `Reply`, not `IrcError`.
#[derive(Error, Debug)]
pub enum IrcError {
    #[error("transport error on connection {0}: {1}")]
    Transport(u64, std::io::Error),

    #[error("peer disconnected")]
    PeerDisconnected,

    #[error("invalid server state: {0}")]
    LogicBug(String),

    #[error("unrecoverable setup failure: {0}")]
    Setup(#[source] std::io::Error),
}
