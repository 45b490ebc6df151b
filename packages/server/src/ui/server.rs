//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{
    handler::{
        get_members, get_room_detail, get_rooms, health_check, quiz_websocket_handler,
        relay_websocket_handler,
    },
    signal::shutdown_signal,
    state::{QuizState, RelayState},
};

/// Bind `router` to `host:port` and serve until Ctrl+C / SIGTERM
async fn serve(
    router: Router,
    name: &str,
    host: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("{} listening on {}", name, listener.local_addr()?);
    tracing::info!("Connect to: ws://{}/ws", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// クイズサーバー
///
/// # Example
///
/// ```ignore
/// let state = QuizState::new(repository, message_pusher, 64);
/// QuizServer::new(state)
///     .with_static_dir("static")
///     .run("127.0.0.1".to_string(), 8080)
///     .await?;
/// ```
pub struct QuizServer {
    state: Arc<QuizState>,
    /// 未定義のパスで配信する静的ファイルのディレクトリ
    static_dir: Option<PathBuf>,
}

impl QuizServer {
    pub fn new(state: QuizState) -> Self {
        Self {
            state: Arc::new(state),
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn router(&self) -> Router {
        let router = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(quiz_websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{pin}", get(get_room_detail))
            .with_state(self.state.clone());

        let router = match &self.static_dir {
            Some(dir) => router.fallback_service(ServeDir::new(dir)),
            None => router,
        };

        router.layer(TraceLayer::new_for_http())
    }

    /// Run the quiz server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        serve(self.router(), "Quiz server", host, port).await
    }
}

/// リレーサーバー
pub struct RelayServer {
    state: Arc<RelayState>,
}

impl RelayServer {
    pub fn new(state: RelayState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/ws", get(relay_websocket_handler))
            .route("/api/health", get(health_check))
            .route("/api/members", get(get_members))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the relay server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        serve(self.router(), "Relay server", host, port).await
    }
}
