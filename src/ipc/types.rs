use std::path::PathBuf;

use serde::Deserialize;

use crate::config::{AdminCredential, Config};
use crate::session::Session;
use crate::store::RecordStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub store: RecordStore,
    pub session: Session,
    pub admin: AdminCredential,
}

impl AppState {
    /// Starts on an in-memory store until a workspace is selected.
    pub fn new(config: &Config) -> Self {
        let store = RecordStore::in_memory();
        let session = Session::restore(&store);
        Self {
            workspace: None,
            store,
            session,
            admin: config.admin.clone(),
        }
    }
}
