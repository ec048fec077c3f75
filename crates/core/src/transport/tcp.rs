use std::io::{BufReader, ErrorKind, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::protocol::{FrameError, Framer, ServerResponse};
use crate::server::ServerConfig;
use crate::session::{Session, Step};

/// Poll interval of the non-blocking accept loop.
const ACCEPT_POLL: Duration = Duration::from_millis(50);

/// Non-blocking TCP accept loop.
///
/// Checks the `running` flag between accepts with a 50ms poll interval
/// so that [`crate::server::Server::stop`] can terminate it promptly.
/// With an accept-idle timeout configured, the loop also shuts itself
/// down after that long without a new connection.
pub fn accept_loop(listener: TcpListener, config: Arc<ServerConfig>, running: Arc<AtomicBool>) {
    let mut last_accept = Instant::now();
    while running.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, _)) => {
                last_accept = Instant::now();
                if stream.set_nonblocking(false).is_err() {
                    continue;
                }
                let config = config.clone();
                thread::spawn(move || {
                    Connection::handle(stream, config);
                });
            }
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => {
                if let Some(idle) = config.accept_idle_timeout
                    && last_accept.elapsed() >= idle
                {
                    tracing::info!(?idle, "no new connections, shutting down");
                    running.store(false, Ordering::SeqCst);
                    break;
                }
                thread::sleep(ACCEPT_POLL);
            }
            Err(e) => {
                if running.load(Ordering::SeqCst) {
                    tracing::warn!(error = %e, "TCP accept error");
                }
            }
        }
    }
    tracing::debug!("accept loop exited");
}

/// A single robot connection with its own session lifecycle.
struct Connection {
    framer: Framer<BufReader<TcpStream>>,
    writer: TcpStream,
    session: Session,
    peer_addr: SocketAddr,
}

impl Connection {
    /// Entry point: set up a connection and run its frame loop.
    fn handle(stream: TcpStream, config: Arc<ServerConfig>) {
        let peer_addr = match stream.peer_addr() {
            Ok(addr) => addr,
            Err(_) => return,
        };

        tracing::info!(%peer_addr, "robot connected");

        let reader_stream = match stream.try_clone() {
            Ok(s) => s,
            Err(_) => return,
        };

        let mut conn = Connection {
            framer: Framer::new(BufReader::new(reader_stream)),
            writer: stream,
            session: Session::new(config),
            peer_addr,
        };

        let reason = conn.run();

        tracing::info!(peer_addr = %conn.peer_addr, reason, "robot disconnected");
    }

    /// Frame/dispatch/respond loop. Returns the reason for exiting.
    fn run(&mut self) -> &'static str {
        loop {
            // The reader clone shares the socket, so setting the deadline
            // on the writer covers the pending read as well. The deadline
            // follows the session's charging mode.
            if self
                .writer
                .set_read_timeout(Some(self.session.read_timeout()))
                .is_err()
            {
                return "socket configuration error";
            }

            let payload = match self.framer.read_frame(self.session.frame_limit()) {
                Ok(payload) => payload,
                Err(FrameError::Oversize { .. }) => {
                    self.send(ServerResponse::SyntaxError);
                    return "oversized frame";
                }
                Err(FrameError::Io(e))
                    if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut =>
                {
                    return "read timeout";
                }
                Err(FrameError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                    return "connection closed by robot";
                }
                Err(FrameError::Io(_)) => return "read error",
            };

            match self.session.on_frame(&payload) {
                Step::Continue(responses) => {
                    for response in responses {
                        if !self.send(response) {
                            return "write error";
                        }
                    }
                }
                Step::Terminate(response) => {
                    return match response {
                        Some(response) => {
                            self.send(response);
                            match response {
                                ServerResponse::Logout => "message retrieved",
                                ServerResponse::LoginFailed => "login failed",
                                ServerResponse::LogicError => "logic error",
                                _ => "syntax error",
                            }
                        }
                        None => "search exhausted",
                    };
                }
            }
        }
    }

    fn send(&mut self, response: ServerResponse) -> bool {
        tracing::trace!(peer_addr = %self.peer_addr, %response, "send");
        self.writer.write_all(&response.serialize()).is_ok()
    }
}
