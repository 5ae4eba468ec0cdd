use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum RibbonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("appearance store error: {0}")]
    Store(String),

    #[error("window error: {0}")]
    Window(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = RibbonError> = std::result::Result<T, E>;

/// Failure reported by a host capability (window system, audio, shell).
///
/// These never abort the controller on their own; the caller decides whether
/// the failure is a no-op, a user notice, or (window creation at start-up)
/// fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("operation not supported by host")]
    Unsupported,

    #[error("host rejected operation: {0}")]
    Rejected(String),

    #[error("window handle is no longer valid")]
    Gone,
}
