use std::fmt;

use super::framer::TERMINATOR;

/// One server-to-robot message.
///
/// Every variant serializes to a fixed wire literal except
/// [`KeyConfirmation`](Self::KeyConfirmation), which carries the decimal
/// digits of a 16-bit challenge answer. [`serialize`](Self::serialize)
/// appends the frame terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ServerResponse {
    /// Challenge answer derived from the username hash and the server key.
    KeyConfirmation(u16),
    /// `102 MOVE` — advance one cell along the current heading.
    Move,
    /// `103 TURN LEFT` — rotate a quarter turn counter-clockwise.
    TurnLeft,
    /// `104 TURN RIGHT` — rotate a quarter turn clockwise.
    TurnRight,
    /// `105 GET MESSAGE` — probe the current cell for the message.
    GetMessage,
    /// `106 LOGOUT` — message retrieved, session finished.
    Logout,
    /// `200 OK` — authentication succeeded.
    Ok,
    /// `300 LOGIN FAILED` — confirmation code mismatch.
    LoginFailed,
    /// `301 SYNTAX ERROR` — malformed or oversized frame.
    SyntaxError,
    /// `302 LOGIC ERROR` — message legal only in another state.
    LogicError,
}

impl ServerResponse {
    /// Wire bytes: the payload followed by the two-byte terminator.
    pub fn serialize(self) -> Vec<u8> {
        let mut out = self.to_string().into_bytes();
        out.extend_from_slice(&TERMINATOR);
        out
    }
}

impl fmt::Display for ServerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // u16 formatting never produces leading zeros; zero itself is "0".
            Self::KeyConfirmation(code) => write!(f, "{code}"),
            Self::Move => f.write_str("102 MOVE"),
            Self::TurnLeft => f.write_str("103 TURN LEFT"),
            Self::TurnRight => f.write_str("104 TURN RIGHT"),
            Self::GetMessage => f.write_str("105 GET MESSAGE"),
            Self::Logout => f.write_str("106 LOGOUT"),
            Self::Ok => f.write_str("200 OK"),
            Self::LoginFailed => f.write_str("300 LOGIN FAILED"),
            Self::SyntaxError => f.write_str("301 SYNTAX ERROR"),
            Self::LogicError => f.write_str("302 LOGIC ERROR"),
        }
    }
}
