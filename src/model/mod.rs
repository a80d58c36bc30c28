pub mod app_state;
pub mod data;
pub mod status;
pub mod template;

pub use app_state::{AppState, DisplaySettings, RefreshMode, Settings};
pub use data::host_rows;
pub use status::FetchStatus;
pub use template::Interpolator;
