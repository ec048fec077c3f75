//! The guidance wire protocol.
//!
//! Text messages over TCP, each terminated by the two bytes `0x07 0x08`.
//! The terminator cannot occur inside a payload, and every protocol state
//! puts a hard cap on the frame length so a silent or hostile client
//! cannot grow a buffer without bound.
//!
//! ## Server messages
//!
//! | Wire literal | Meaning |
//! |--------------|---------|
//! | `<digits>` | Challenge answer, decimal of a 16-bit value |
//! | `102 MOVE` | Advance one cell in the current heading |
//! | `103 TURN LEFT` | Rotate a quarter turn counter-clockwise |
//! | `104 TURN RIGHT` | Rotate a quarter turn clockwise |
//! | `105 GET MESSAGE` | Pick up the message at the current cell |
//! | `106 LOGOUT` | Session finished successfully |
//! | `200 OK` | Authentication succeeded |
//! | `300 LOGIN FAILED` | Confirmation mismatch |
//! | `301 SYNTAX ERROR` | Frame failed a grammar or length check |
//! | `302 LOGIC ERROR` | Message out of order |
//!
//! ## Client messages
//!
//! | Form | Cap (framed) | Notes |
//! |------|--------------|-------|
//! | username | 20 | free text, at most 18 bytes |
//! | confirmation | 12 | 1-5 digits, 16-bit value; cap admits `RECHARGING` |
//! | `OK <x> <y>` | 12 | position report, signed integers |
//! | `RECHARGING` | 12 | suspends the session |
//! | `FULL POWER` | 12 | resumes the session |
//! | pickup payload | 100 | opaque, possibly empty |

pub mod framer;
pub mod message;
pub mod response;

pub use framer::{FrameError, Framer, TERMINATOR};
pub use message::{ClientMessage, Expect};
pub use response::ServerResponse;
