use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::{get, post},
};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tracing::{debug, error, info};

use folio_core::form::{
    ContactForm, ContactMessage, Field, FormState, MemoryNotifier, Notice, Submit, SubmitError,
};

/// The placeholder submission collaborator: always succeeds after a fixed
/// delay. Stands in for whatever relay a deployment wires up.
pub struct FixedDelaySubmitter {
    delay: Duration,
}

impl FixedDelaySubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelaySubmitter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait::async_trait]
impl Submit for FixedDelaySubmitter {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;
        info!(from = %message.email, "contact message accepted (placeholder)");
        Ok(())
    }
}

/// Configuration for the live development server
#[derive(Debug, Clone)]
pub struct LiveServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to serve on
    pub port: u16,
    /// Root directory to serve and watch
    pub root: PathBuf,
    /// Auto-open browser
    pub open: bool,
    /// Patterns to ignore when watching
    pub ignore: Vec<String>,
}

impl Default for LiveServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            root: PathBuf::from("."),
            open: false,
            ignore: vec![],
        }
    }
}

/// A live-reload static file server. Besides serving the built site it
/// answers `POST /api/contact`, running the real form controller against
/// the placeholder submitter so the page's form round-trips locally.
pub struct LiveServer {
    config: LiveServerConfig,
}

impl LiveServer {
    /// Create a new live server with the given configuration
    pub fn new(config: LiveServerConfig) -> Self {
        Self { config }
    }

    /// Run the live server
    pub async fn run(self) -> Result<()> {
        // Create broadcast channel for live reload
        let (reload_tx, _) = broadcast::channel::<String>(100);

        // Ensure root directory exists
        if !self.config.root.exists() {
            return Err(anyhow::anyhow!(
                "Root directory does not exist: {}",
                self.config.root.display()
            ));
        }

        let state = AppState {
            reload_tx: reload_tx.clone(),
            submitter: Arc::new(FixedDelaySubmitter::default()),
        };

        // Start file watcher
        let watcher_reload_tx = reload_tx.clone();
        let watch_path = self.config.root.clone();
        let ignore_patterns = self.config.ignore.clone();

        tokio::spawn(async move {
            if let Err(e) = start_file_watcher(watch_path, watcher_reload_tx, ignore_patterns).await
            {
                error!("File watcher error: {}", e);
            }
        });

        // Create router
        let serve_dir = ServeDir::new(&self.config.root);
        let app = Router::new()
            .route("/__livereload", get(websocket_handler))
            .route("/api/contact", post(contact_handler))
            .fallback_service(serve_dir)
            .with_state(state);

        // Build address
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        info!("Serving at http://{}", addr);
        info!("Watching: {}", self.config.root.display());
        info!("Live reload enabled at ws://{}/__livereload", addr);

        // Open browser if requested
        if self.config.open {
            if let Err(e) = open::that(format!("http://{}", addr)) {
                error!("Failed to open browser: {}", e);
            }
        }

        // Start server
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    reload_tx: broadcast::Sender<String>,
    submitter: Arc<FixedDelaySubmitter>,
}

#[derive(Deserialize)]
struct ContactPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ContactResponse {
    Sent {
        notice: Option<Notice>,
    },
    Invalid {
        errors: serde_json::Value,
    },
    Failed {
        notice: Option<Notice>,
    },
}

/// Drives one form controller per request: the browser holds the field
/// state between keystrokes, the controller owns validation and the
/// submission lifecycle.
async fn contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<ContactPayload>,
) -> impl IntoResponse {
    let mut form = ContactForm::new();
    form.update_field(Field::Name, &payload.name);
    form.update_field(Field::Email, &payload.email);
    form.update_field(Field::Message, &payload.message);

    let notifier = MemoryNotifier::new();
    form.submit(state.submitter.as_ref(), &notifier).await;

    let notice = notifier.drain().into_iter().next();
    let response = match form.state() {
        FormState::Succeeded => ContactResponse::Sent { notice },
        FormState::Failed => ContactResponse::Failed { notice },
        FormState::Idle { errors } => ContactResponse::Invalid {
            errors: serde_json::to_value(errors).unwrap_or_default(),
        },
        // submit() always settles before returning.
        FormState::Submitting => ContactResponse::Failed { notice },
    };

    Json(response)
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| websocket_connection(socket, state.reload_tx))
}

async fn websocket_connection(mut socket: WebSocket, reload_tx: broadcast::Sender<String>) {
    let mut rx = reload_tx.subscribe();

    // Send initial connection confirmation
    if socket
        .send(Message::Text("connected".to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Ok(reload_msg) => {
                        if socket.send(Message::Text(reload_msg.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            msg = socket.recv() => {
                if msg.is_none() {
                    break;
                }
            }
        }
    }
}

async fn start_file_watcher(
    watch_path: PathBuf,
    reload_tx: broadcast::Sender<String>,
    ignore_patterns: Vec<String>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    // Check if path should be ignored
                    let path_str = event.path.to_string_lossy();
                    let should_ignore = ignore_patterns
                        .iter()
                        .any(|pattern| path_str.contains(pattern));

                    if !should_ignore {
                        let _ = tx.blocking_send(event.path);
                    }
                }
            }
        },
    )?;

    // Watch the root directory
    debouncer
        .watcher()
        .watch(&watch_path, notify::RecursiveMode::Recursive)?;

    info!("File watcher started for: {}", watch_path.display());

    // Process file change events with simple deduplication
    let mut last_reload = std::time::Instant::now();
    while let Some(path) = rx.recv().await {
        debug!("File changed: {}", path.display());

        // Only send reload if enough time has passed since last reload
        let now = std::time::Instant::now();
        if now.duration_since(last_reload) > Duration::from_millis(1000) {
            // Send reload message to all connected clients
            let _ = reload_tx.send("reload".to_string());
            last_reload = now;
            debug!("Sent reload signal");
        } else {
            debug!("Skipping reload (too soon)");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_submitter_always_succeeds() {
        let submitter = FixedDelaySubmitter::new(Duration::from_millis(1));
        let message = ContactMessage {
            name: "Al".into(),
            email: "al@x.com".into(),
            message: "This message is definitely long enough.".into(),
        };
        assert!(submitter.submit(&message).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_payload_maps_to_field_errors() {
        let state = AppState {
            reload_tx: broadcast::channel(1).0,
            submitter: Arc::new(FixedDelaySubmitter::new(Duration::from_millis(1))),
        };
        let payload = ContactPayload {
            name: "A".into(),
            email: "bad".into(),
            message: "short".into(),
        };

        let mut form = ContactForm::new();
        form.update_field(Field::Name, &payload.name);
        form.update_field(Field::Email, &payload.email);
        form.update_field(Field::Message, &payload.message);
        let notifier = MemoryNotifier::new();
        form.submit(state.submitter.as_ref(), &notifier).await;

        match form.state() {
            FormState::Idle { errors } => {
                assert_eq!(errors.len(), 3);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
