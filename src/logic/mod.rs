pub mod fetch;

pub use fetch::{
    FetchCommand, FetchError, SharedState, apply_response, compute_interval, fetch_hosts,
    fetch_task, hosts_url, record_failure,
};
