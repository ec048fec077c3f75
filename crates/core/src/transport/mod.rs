//! TCP transport: the accept loop and the per-connection frame loop.
//!
//! One TCP connection per robot, one thread per connection. Sessions
//! share nothing; the listener socket is the only shared resource and
//! only the accept loop touches it.

pub mod tcp;
