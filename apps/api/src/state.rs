use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm_client::CompletionClient;
use crate::roast::session::RoastSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one completion client, built at startup.
    pub llm: Arc<dyn CompletionClient>,
    /// The interactive roast page. Single-user: one session per process.
    pub session: Arc<Mutex<RoastSession>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self {
            llm,
            session: Arc::new(Mutex::new(RoastSession::new())),
        }
    }
}
