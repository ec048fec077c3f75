use crate::error::Violation;
use crate::grid::Vector2;

/// Literal a robot sends to announce a recharge pause.
pub const RECHARGING: &[u8] = b"RECHARGING";

/// Literal a robot sends to end a recharge pause.
pub const FULL_POWER: &[u8] = b"FULL POWER";

/// What the session is prepared to read next.
///
/// The expectation selects both the grammar a payload is checked against
/// and the frame byte budget handed to the framer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The opening username, up to 18 bytes of free text.
    Username,
    /// A 1-5 digit confirmation code.
    Confirmation,
    /// An `OK x y` position report.
    Position,
    /// The payload picked up off a search cell, up to 98 bytes.
    Pickup,
    /// Nothing but `FULL POWER`; the robot is recharging.
    FullPower,
}

impl Expect {
    /// Maximum frame length in bytes, terminator included.
    pub fn frame_limit(self) -> usize {
        match self {
            Expect::Username => 20,
            // The framed RECHARGING literal (12 bytes) must fit even while
            // a shorter confirmation code is the expected answer.
            Expect::Confirmation => 12,
            Expect::Position => 12,
            Expect::Pickup => 100,
            Expect::FullPower => 12,
        }
    }
}

/// One classified client message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Username(String),
    Confirmation(u16),
    Position(Vector2),
    Recharging,
    FullPower,
    Pickup(String),
}

impl ClientMessage {
    /// Classify a terminator-stripped payload under the given expectation.
    ///
    /// Grammar misses are [`Violation::Syntax`]. Messages that parse but
    /// belong to another state, which is `FULL POWER` outside a recharge
    /// pause and anything but `FULL POWER` inside one, are
    /// [`Violation::Logic`].
    pub fn parse(payload: &[u8], expect: Expect) -> Result<ClientMessage, Violation> {
        match expect {
            Expect::FullPower => {
                if payload == FULL_POWER {
                    Ok(ClientMessage::FullPower)
                } else {
                    Err(Violation::Logic)
                }
            }
            // Before the handshake the power literals are ordinary usernames.
            Expect::Username => parse_username(payload),
            Expect::Confirmation | Expect::Position | Expect::Pickup => {
                if payload == RECHARGING {
                    return Ok(ClientMessage::Recharging);
                }
                if payload == FULL_POWER {
                    return Err(Violation::Logic);
                }
                match expect {
                    Expect::Confirmation => parse_confirmation(payload),
                    Expect::Position => parse_position(payload),
                    _ => parse_pickup(payload),
                }
            }
        }
    }
}

fn parse_username(payload: &[u8]) -> Result<ClientMessage, Violation> {
    // The 20-byte frame cap already bounds the payload to 18 bytes.
    debug_assert!(payload.len() <= 18);
    let name = str::from_utf8(payload).map_err(|_| Violation::Syntax)?;
    Ok(ClientMessage::Username(name.to_string()))
}

fn parse_confirmation(payload: &[u8]) -> Result<ClientMessage, Violation> {
    if payload.is_empty() || payload.len() > 5 || !payload.iter().all(u8::is_ascii_digit) {
        return Err(Violation::Syntax);
    }
    // At most five digits, so the fold cannot overflow a u32.
    let value = payload
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    if value > u32::from(u16::MAX) {
        return Err(Violation::Syntax);
    }
    Ok(ClientMessage::Confirmation(value as u16))
}

fn parse_position(payload: &[u8]) -> Result<ClientMessage, Violation> {
    let text = str::from_utf8(payload).map_err(|_| Violation::Syntax)?;
    position(text)
        .map(ClientMessage::Position)
        .ok_or(Violation::Syntax)
}

/// `OK <int> <int>` with single spaces; integers are `-?[0-9]+`.
fn position(text: &str) -> Option<Vector2> {
    let rest = text.strip_prefix("OK ")?;
    let (x, y) = rest.split_once(' ')?;
    Some(Vector2::new(coordinate(x)?, coordinate(y)?))
}

fn coordinate(token: &str) -> Option<i32> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn parse_pickup(payload: &[u8]) -> Result<ClientMessage, Violation> {
    // The 100-byte frame cap already bounds the payload to 98 bytes.
    debug_assert!(payload.len() <= 98);
    Ok(ClientMessage::Pickup(
        String::from_utf8_lossy(payload).into_owned(),
    ))
}
