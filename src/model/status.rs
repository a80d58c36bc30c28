use serde::{Deserialize, Serialize};

/// Fetch RTT samples kept for the status chart.
pub const HISTORY_LIMIT: usize = 99;

/// Volatile bookkeeping for the host-list fetches. Nothing here survives a
/// restart; only `Settings` is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchStatus {
    /// Whether the most recent fetch succeeded
    #[serde(skip, default)]
    pub alive: bool,
    /// Round-trip time of the most recent fetch in milliseconds (NaN = failure)
    #[serde(skip, default)]
    pub latency: f64,
    /// Last 99 fetch RTTs in milliseconds (NaN = failure)
    #[serde(skip, default)]
    pub history: Vec<f64>,
    /// Arithmetic mean RTT of the successful fetches in the history window
    #[serde(skip, default)]
    pub mean: f64,
    /// Number of fetches recorded
    #[serde(skip, default)]
    pub sent: u32,
    /// Number of fetches that failed
    #[serde(skip, default)]
    pub lost: u32,
    /// Sequence number of the newest applied response
    #[serde(skip, default)]
    pub applied_seq: u64,
    /// Wall-clock time of the last successful apply
    #[serde(skip, default)]
    pub last_update: Option<chrono::DateTime<chrono::Local>>,
}

impl FetchStatus {
    /// Adds an RTT sample and updates the aggregates.
    pub fn add_sample(&mut self, rtt_ms: f64) {
        self.sent += 1;

        if rtt_ms.is_nan() {
            self.lost += 1;
        }

        self.alive = !rtt_ms.is_nan();
        self.latency = rtt_ms;

        // Keep the window bounded
        self.history.push(rtt_ms);
        if self.history.len() > HISTORY_LIMIT {
            self.history.remove(0);
        }

        let valid: Vec<f64> = self
            .history
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();

        self.mean = if valid.is_empty() {
            0.0
        } else {
            valid.iter().sum::<f64>() / valid.len() as f64
        };
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
