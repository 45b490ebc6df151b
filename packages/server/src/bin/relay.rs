//! Broadcast relay server.
//!
//! Every text or binary frame received from a client is forwarded verbatim to
//! all other connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-relay
//! cargo run --bin hiroba-relay -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::hub::ChannelHub,
    ui::{
        RelayServer,
        state::{DEFAULT_QUEUE_CAPACITY, RelayState},
    },
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-relay")]
#[command(about = "WebSocket broadcast relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Capacity of each connection's outbound queue
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // 1. Spawn the hub coordination task
    let (hub, _hub_task) = ChannelHub::spawn();

    // 2. Create and run the server
    let state = RelayState::new(Arc::new(hub), args.queue_capacity);
    let server = RelayServer::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
