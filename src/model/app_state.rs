use super::status::FetchStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How often the host list is re-fetched without user action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RefreshMode {
    Off,
    Slow, // about a minute
    Fast, // about five seconds
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_true")]
    pub show_status: bool,
    #[serde(default = "default_true")]
    pub show_chart: bool,
    #[serde(default = "default_true")]
    pub show_last_update: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_status: true,
            show_chart: true,
            show_last_update: true,
        }
    }
}

/// The part of the view-model that survives restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_row_template")]
    pub row_template: String,
    #[serde(default = "default_refresh_mode")]
    pub refresh: RefreshMode,
    #[serde(default)]
    pub display: DisplaySettings,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_row_template() -> String {
    "[[ hostname ]]".to_string()
}

fn default_refresh_mode() -> RefreshMode {
    RefreshMode::Off
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            row_template: default_row_template(),
            refresh: default_refresh_mode(),
            display: DisplaySettings::default(),
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
pub struct AppState {
    pub settings: Settings,
    /// Verbatim body of the newest applied `/hosts` response, `None` until
    /// the first successful fetch. A failed fetch never touches this.
    #[serde(skip)]
    pub data: Option<Value>,
    #[serde(skip)]
    pub status: FetchStatus,
}
