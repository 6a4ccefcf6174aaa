use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const DEFAULT_USER: &str = "peteorbase";

const LOCAL_STORAGE_KEY: &str = "repo-widget-config";

/// Widget configuration. Only the GitHub username is configurable; fetched
/// repository data itself is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub user: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn load_from_localstorage() -> Self {
        LocalStorage::get::<Self>(LOCAL_STORAGE_KEY).unwrap_or_default()
    }
}
