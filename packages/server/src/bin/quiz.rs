//! PIN-based quiz server.
//!
//! A host creates a room and receives a 4-digit PIN, players join with the
//! PIN and a name, and the host drives the questions until the game is over.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-quiz
//! cargo run --bin hiroba-quiz -- --port 3000 --questions questions.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        question_loader::{builtin_questions, load_questions},
        repository::{InMemoryRoomRepository, RandomPinGenerator},
    },
    ui::{
        QuizServer,
        state::{DEFAULT_QUEUE_CAPACITY, QuizState},
    },
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-quiz")]
#[command(about = "WebSocket quiz server with PIN-based rooms", long_about = None)]
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

    /// Directory of static files served for unknown paths
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// JSON file with the question set (defaults to the built-in questions)
    #[arg(long)]
    questions: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Question set
    // 2. Repository
    // 3. MessagePusher
    // 4. UseCases (QuizState)
    // 5. Server

    // 1. Load the question set
    let questions = match &args.questions {
        Some(path) => match load_questions(path).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!("Failed to load questions from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => builtin_questions(),
    };
    tracing::info!("Loaded {} question(s)", questions.len());

    // 2. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new(
        questions,
        Arc::new(RandomPinGenerator),
    ));

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create UseCases
    let state = QuizState::new(repository, message_pusher, args.queue_capacity);

    // 5. Create and run the server
    let server = QuizServer::new(state).with_static_dir(args.static_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
