//! Error types for the guidance server library.

use crate::protocol::ServerResponse;

/// Errors that can occur in the guidance server library.
///
/// Variants map to specific failure modes across the stack:
///
/// - **Protocol**: [`Violation`](Self::Violation) — a robot broke the
///   framing, grammar, state, or login rules.
/// - **Transport**: [`Io`](Self::Io) — socket/network failures.
/// - **Server**: [`NotStarted`](Self::NotStarted),
///   [`AlreadyRunning`](Self::AlreadyRunning).
#[derive(Debug, thiserror::Error)]
pub enum RgpError {
    /// Underlying I/O or socket error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A robot broke the protocol; the session has been (or will be)
    /// closed with the violation's wire response.
    #[error("protocol violation: {0}")]
    Violation(#[from] Violation),

    /// [`Server::start`](crate::Server::start) has not been called yet.
    #[error("server not started")]
    NotStarted,

    /// [`Server::start`](crate::Server::start) was called while already running.
    #[error("server already running")]
    AlreadyRunning,
}

/// The three ways a robot can break the protocol.
///
/// Each carries a fixed response the server sends before closing the
/// session; see [`response`](Self::response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A frame failed the grammar or length check.
    #[error("syntax error")]
    Syntax,

    /// A message that is only legal in another state, such as anything
    /// other than `FULL POWER` while the robot recharges.
    #[error("logic error")]
    Logic,

    /// The challenge/response confirmation did not match the username hash.
    #[error("login failed")]
    LoginFailed,
}

impl Violation {
    /// The wire response this violation terminates the session with.
    pub fn response(self) -> ServerResponse {
        match self {
            Violation::Syntax => ServerResponse::SyntaxError,
            Violation::Logic => ServerResponse::LogicError,
            Violation::LoginFailed => ServerResponse::LoginFailed,
        }
    }
}

/// Convenience alias for `Result<T, RgpError>`.
pub type Result<T> = std::result::Result<T, RgpError>;
