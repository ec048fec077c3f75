//! Per-robot protocol session.
//!
//! A session is created when a robot connects and destroyed when its
//! connection closes; nothing survives across connections. It walks the
//! protocol phases:
//!
//! ```text
//! AwaitUsername     -> AwaitConfirmation   (challenge sent)
//! AwaitConfirmation -> AwaitPosition       (200 OK + first MOVE)
//! AwaitPosition     -> AwaitPosition       (MOVE / TURN issued)
//! AwaitPosition     -> AwaitPickup         (GET MESSAGE issued)
//! AwaitPickup       -> AwaitPosition       (cell was empty)
//! AwaitPickup       -> closed              (106 LOGOUT)
//! any (post-login)  -> recharging          (RECHARGING, no reply)
//! recharging        -> interrupted phase   (FULL POWER, no reply)
//! ```
//!
//! Any violation closes the session after its fixed response (`300`,
//! `301`, `302`); timeouts and I/O failures close it silently.
//!
//! The session owns no I/O. The connection loop reads frames sized by
//! [`frame_limit`](Session::frame_limit) under
//! [`read_timeout`](Session::read_timeout), feeds them through
//! [`on_frame`](Session::on_frame), and writes whatever comes back.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Violation;
use crate::grid::Vector2;
use crate::protocol::{ClientMessage, Expect, ServerResponse};
use crate::robot::Robot;
use crate::robot::navigator::{self, Command};
use crate::server::ServerConfig;

/// Protocol phase, named for the message the server waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitUsername,
    AwaitConfirmation,
    AwaitPosition,
    AwaitPickup,
}

impl Phase {
    fn expect(self) -> Expect {
        match self {
            Phase::AwaitUsername => Expect::Username,
            Phase::AwaitConfirmation => Expect::Confirmation,
            Phase::AwaitPosition => Expect::Position,
            Phase::AwaitPickup => Expect::Pickup,
        }
    }
}

/// What the connection loop should do after feeding one frame in.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Send the responses, possibly none, and keep reading.
    Continue(Vec<ServerResponse>),
    /// Send the response, if any, then close the connection.
    Terminate(Option<ServerResponse>),
}

/// State machine for one robot connection.
pub struct Session {
    config: Arc<ServerConfig>,
    phase: Phase,
    charging: bool,
    username_hash: u16,
    authorized: bool,
    robot: Robot,
}

impl Session {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Session {
            config,
            phase: Phase::AwaitUsername,
            charging: false,
            username_hash: 0,
            authorized: false,
            robot: Robot::new(),
        }
    }

    /// Byte budget for the next frame, terminator included.
    pub fn frame_limit(&self) -> usize {
        self.expect().frame_limit()
    }

    /// Read deadline for the next frame; longer while the robot recharges.
    pub fn read_timeout(&self) -> Duration {
        if self.charging {
            self.config.recharge_timeout
        } else {
            self.config.read_timeout
        }
    }

    /// Whether the robot is in a recharge pause.
    pub fn charging(&self) -> bool {
        self.charging
    }

    /// Whether the challenge/response handshake has completed.
    pub fn authorized(&self) -> bool {
        self.authorized
    }

    fn expect(&self) -> Expect {
        if self.charging {
            Expect::FullPower
        } else {
            self.phase.expect()
        }
    }

    /// Feed one framed payload (terminator stripped) through the machine.
    pub fn on_frame(&mut self, payload: &[u8]) -> Step {
        let message = match ClientMessage::parse(payload, self.expect()) {
            Ok(message) => message,
            Err(violation) => return self.fail(violation),
        };

        match message {
            ClientMessage::Recharging => {
                tracing::debug!("robot recharging");
                self.charging = true;
                Step::Continue(Vec::new())
            }
            ClientMessage::FullPower => {
                // The interrupted phase resumes; the pending message is
                // still whatever it was before the pause.
                tracing::debug!("robot back at full power");
                self.charging = false;
                Step::Continue(Vec::new())
            }
            ClientMessage::Username(name) => self.on_username(&name),
            ClientMessage::Confirmation(code) => self.on_confirmation(code),
            ClientMessage::Position(position) => self.on_position(position),
            ClientMessage::Pickup(payload) => self.on_pickup(&payload),
        }
    }

    fn on_username(&mut self, name: &str) -> Step {
        self.username_hash = username_hash(name.as_bytes());
        let answer = self.username_hash.wrapping_add(self.config.server_key);
        tracing::debug!(username = name, hash = self.username_hash, "challenge sent");
        self.phase = Phase::AwaitConfirmation;
        Step::Continue(vec![ServerResponse::KeyConfirmation(answer)])
    }

    fn on_confirmation(&mut self, code: u16) -> Step {
        if code.wrapping_sub(self.config.client_key) != self.username_hash {
            tracing::warn!(code, "confirmation mismatch");
            return self.fail(Violation::LoginFailed);
        }
        self.authorized = true;
        tracing::info!("robot authorized");
        // The position is still unknown, so the first command is a MOVE.
        self.advance(vec![ServerResponse::Ok])
    }

    fn on_position(&mut self, position: Vector2) -> Step {
        self.robot.move_to(position);
        self.advance(Vec::new())
    }

    fn on_pickup(&mut self, payload: &str) -> Step {
        self.robot.mark_searched();
        if !payload.is_empty() {
            tracing::info!(message = payload, "message retrieved");
            return Step::Terminate(Some(ServerResponse::Logout));
        }
        tracing::debug!("cell was empty, sweep continues");
        self.advance(Vec::new())
    }

    /// Run the planner and append its command to `responses`.
    fn advance(&mut self, mut responses: Vec<ServerResponse>) -> Step {
        match navigator::next_command(&mut self.robot) {
            Some(command) => {
                let response = match command {
                    Command::Move => ServerResponse::Move,
                    Command::TurnLeft => ServerResponse::TurnLeft,
                    Command::TurnRight => ServerResponse::TurnRight,
                    Command::GetMessage => ServerResponse::GetMessage,
                };
                self.phase = if command == Command::GetMessage {
                    Phase::AwaitPickup
                } else {
                    Phase::AwaitPosition
                };
                tracing::debug!(%response, "command issued");
                responses.push(response);
                Step::Continue(responses)
            }
            None => {
                // Every cell probed and nothing retrieved; there is no
                // wire literal for this, the connection just closes.
                tracing::info!("search area exhausted, closing");
                Step::Terminate(None)
            }
        }
    }

    fn fail(&self, violation: Violation) -> Step {
        tracing::warn!(%violation, "session failed");
        Step::Terminate(Some(violation.response()))
    }
}

/// `(sum of bytes * 1000) mod 2^16`, the shared secret both sides derive
/// from the username.
fn username_hash(name: &[u8]) -> u16 {
    let sum: u32 = name.iter().copied().map(u32::from).sum();
    // 18 bytes at most, so the product stays far below u32::MAX.
    ((sum * 1000) % 65536) as u16
}
