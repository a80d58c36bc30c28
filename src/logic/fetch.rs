use crate::model::{AppState, RefreshMode};
use rand::{Rng, RngExt, SeedableRng, rngs::StdRng};
use reqwest::Client;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error};

pub type SharedState = Arc<Mutex<AppState>>;

/// Requests the UI can hand to the background fetch task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchCommand {
    GetHosts,
}

/// Transport failures and non-success statuses end up here alike; the
/// distinction never reaches the view.
#[derive(Debug, Error)]
#[error("host list request failed: {0}")]
pub struct FetchError(#[from] reqwest::Error);

/// Poll interval for the given refresh mode, jittered ±10% so many viewers
/// pointed at the same server spread out. `None` means manual fetches only.
pub fn compute_interval(mode: RefreshMode, rng: &mut impl Rng) -> Option<Duration> {
    let base = match mode {
        RefreshMode::Off => return None,
        RefreshMode::Slow => 60.0,
        RefreshMode::Fast => 5.0,
    };
    Some(Duration::from_secs_f64(base * rng.random_range(0.9..=1.1)))
}

/// The `/hosts` URL for a configured server base.
pub fn hosts_url(base_url: &str) -> String {
    format!("{}/hosts", base_url.trim_end_matches('/'))
}

/// One GET against `<base_url>/hosts`, body parsed as opaque JSON.
pub async fn fetch_hosts(client: &Client, base_url: &str) -> Result<Value, FetchError> {
    let response = client.get(hosts_url(base_url)).send().await?;
    let response = response.error_for_status()?;
    Ok(response.json::<Value>().await?)
}

/// Stores a successful response on the view-model, unless a newer-issued
/// request already applied. Returns whether the payload was kept.
pub fn apply_response(state: &SharedState, seq: u64, payload: Value, rtt_ms: f64) -> bool {
    let mut state = state.lock().expect("state lock poisoned");
    if seq <= state.status.applied_seq {
        debug!(
            seq,
            newest = state.status.applied_seq,
            "discarding stale host list response"
        );
        return false;
    }
    state.status.applied_seq = seq;
    state.status.add_sample(rtt_ms);
    state.status.last_update = Some(chrono::Local::now());
    state.data = Some(payload);
    true
}

/// Records a failed fetch. Previously fetched data stays as it is.
pub fn record_failure(state: &SharedState) {
    let mut state = state.lock().expect("state lock poisoned");
    state.status.add_sample(f64::NAN);
}

fn spawn_fetch(client: &Client, shared: &SharedState, seq: u64) {
    let client = client.clone();
    let shared = shared.clone();
    let base_url = {
        let state = shared.lock().expect("state lock poisoned");
        state.settings.base_url.clone()
    };

    tokio::spawn(async move {
        let started = Instant::now();
        match fetch_hosts(&client, &base_url).await {
            Ok(payload) => {
                let rtt_ms = started.elapsed().as_secs_f64() * 1000.0;
                apply_response(&shared, seq, payload, rtt_ms);
            }
            Err(err) => {
                error!(%err, url = %hosts_url(&base_url), "host list fetch failed");
                record_failure(&shared);
            }
        }
    });
}

/// Background task owning the HTTP client. Issues one GET per command from
/// the UI, plus timer-driven refreshes when enabled. Every issued request
/// gets a sequence number; `apply_response` drops out-of-order stragglers,
/// so the view always reflects the newest-issued response.
pub async fn fetch_task(state: SharedState, mut commands: mpsc::Receiver<FetchCommand>) {
    let client = Client::new();
    let mut rng = StdRng::from_rng(&mut rand::rng());
    let mut seq: u64 = 0;

    loop {
        let interval = {
            let state = state.lock().expect("state lock poisoned");
            compute_interval(state.settings.refresh, &mut rng)
        };

        let command = match interval {
            Some(delay) => tokio::select! {
                command = commands.recv() => command,
                _ = tokio::time::sleep(delay) => Some(FetchCommand::GetHosts),
            },
            None => commands.recv().await,
        };

        match command {
            Some(FetchCommand::GetHosts) => {
                seq += 1;
                spawn_fetch(&client, &state, seq);
            }
            // UI gone, nothing left to serve
            None => break,
        }
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
