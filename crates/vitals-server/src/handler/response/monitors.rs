use serde::{Deserialize, Serialize};

/// Body of the liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// The only status a running process reports.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}
