//! Server state and configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::editor::ChequeEditor;
use crate::error::ChequebookError;
use crate::form::{BankDirectory, InMemoryBankDirectory};
use crate::template::TemplateImage;

/// Editor sessions idle for longer than this are dropped (30 minutes).
pub const SESSION_EXPIRATION_SECS: u64 = 30 * 60;

/// Server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Cheque template image: a local path or an http(s) URL
    pub template: Option<String>,
    /// JSON file with the selectable bank accounts
    pub accounts_path: Option<PathBuf>,
}

/// One browser's cheque being edited.
pub struct EditorSession {
    pub editor: ChequeEditor,
    pub last_accessed: Instant,
}

impl EditorSession {
    pub fn new(editor: ChequeEditor) -> Self {
        Self {
            editor,
            last_accessed: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

/// Application state shared across handlers.
pub struct AppState {
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
    /// Template shown behind the fields. `None` prints on a blank page.
    pub template: Option<TemplateImage>,
    pub accounts: Arc<dyn BankDirectory>,
    pub sessions: RwLock<HashMap<Uuid, EditorSession>>,
}

impl AppState {
    pub fn new(template: Option<TemplateImage>, accounts: Arc<dyn BankDirectory>) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            boot_time,
            template,
            accounts,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Load the template and account list named by the configuration.
    ///
    /// An unreadable template is logged and left out so the editor still
    /// works; an unreadable accounts file is a startup error.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, ChequebookError> {
        let template = match &config.template {
            Some(location) => match TemplateImage::load(location).await {
                Ok(template) => Some(template),
                Err(e) => {
                    tracing::warn!(error = %e, "continuing without a cheque template");
                    None
                }
            },
            None => None,
        };

        let accounts = match &config.accounts_path {
            Some(path) => InMemoryBankDirectory::load(path)?,
            None => InMemoryBankDirectory::default(),
        };

        Ok(Self::new(template, Arc::new(accounts)))
    }
}
