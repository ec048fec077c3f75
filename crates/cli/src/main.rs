use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use rgp::{DEFAULT_CLIENT_KEY, DEFAULT_SERVER_KEY, Server, ServerConfig};

#[derive(Parser)]
#[command(
    name = "rgp-server",
    about = "Guidance server steering remote robot clients"
)]
struct Args {
    /// Bind address (host:port)
    #[arg(long, short, default_value = "0.0.0.0:2222")]
    bind: String,

    /// Key folded into the server's challenge answer
    #[arg(long, default_value_t = DEFAULT_SERVER_KEY)]
    server_key: u16,

    /// Key robots fold into their confirmation
    #[arg(long, default_value_t = DEFAULT_CLIENT_KEY)]
    client_key: u16,

    /// Per-robot read timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    read_timeout_ms: u64,

    /// Read timeout while a robot recharges, in milliseconds
    #[arg(long, default_value_t = 5000)]
    recharge_timeout_ms: u64,

    /// Shut down after this long without a new connection, in
    /// milliseconds; 0 runs until killed
    #[arg(long, default_value_t = 15000)]
    accept_idle_ms: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = ServerConfig {
        server_key: args.server_key,
        client_key: args.client_key,
        read_timeout: Duration::from_millis(args.read_timeout_ms),
        recharge_timeout: Duration::from_millis(args.recharge_timeout_ms),
        accept_idle_timeout: (args.accept_idle_ms > 0)
            .then(|| Duration::from_millis(args.accept_idle_ms)),
    };

    let mut server = Server::with_config(&args.bind, config);

    if let Err(e) = server.start() {
        eprintln!("Failed to start server: {}", e);
        return ExitCode::FAILURE;
    }

    if server.wait().is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
