//! # rgp — guidance server for remote robot clients
//!
//! A Rust library implementing the server side of a proprietary framed
//! text protocol that steers autonomous "robot" clients across an
//! integer grid. Each robot authenticates with a challenge/response
//! handshake keyed on a hashed username, then reports positions while
//! the server issues move and turn commands until the robot picks up a
//! message somewhere in the five-by-five search area around the origin.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Adapters (CLI)                          │
//! ├──────────────────────────────────────────┤
//! │  Server     — public API, accept loop    │
//! ├──────────────────────────────────────────┤
//! │  Session    — protocol state machine     │
//! │  Robot      — inferred state, navigator  │
//! ├──────────────────────────────────────────┤
//! │  Protocol   — framing, grammar, encoding │
//! │  Transport  — TCP, per-connection thread │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use rgp::Server;
//!
//! let mut server = Server::new("0.0.0.0:2222");
//! server.start().unwrap();
//!
//! // Robots are served on independent threads; wait() blocks until the
//! // accept-idle shutdown (or a stop() call from another place).
//! server.wait().unwrap();
//! ```
//!
//! ## Crate layout
//!
//! - [`server`] — High-level [`Server`] orchestrator and [`ServerConfig`].
//! - [`session`] — Per-robot protocol state machine.
//! - [`robot`] — Inferred robot state and the navigation planner.
//! - [`grid`] — Grid geometry: [`Vector2`], rotations, the search area.
//! - [`protocol`] — Framing, message grammar, and response encoding.
//! - [`transport`] — TCP accept loop and per-connection frame loop.
//! - [`error`] — [`RgpError`], [`Violation`], and the [`Result`] alias.

pub mod error;
pub mod grid;
pub mod protocol;
pub mod robot;
pub mod server;
pub mod session;
pub mod transport;

pub use error::{Result, RgpError, Violation};
pub use grid::Vector2;
pub use protocol::{ClientMessage, ServerResponse};
pub use robot::Robot;
pub use server::{DEFAULT_CLIENT_KEY, DEFAULT_SERVER_KEY, Server, ServerConfig};
pub use session::{Session, Step};
