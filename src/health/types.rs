use serde::Serialize;

pub const UNSYNCHRONIZED_STRATUM: u8 = 16;

/// One poll cycle of NTP driver and peer figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NtpStatusSnapshot {
    /// Milliseconds.
    pub offset: f64,
    /// Milliseconds.
    pub jitter: f64,
    /// Last eight polls, bit 0 most recent.
    pub reach: u8,
    pub peer_stratum: u8,
    pub peer_ref_id: String,
    pub driver_stratum: u8,
    pub driver_ref_id: String,
    pub poll: u64,
    pub no_reply: u64,
    pub bad_format: u64,
    /// Last raw sentence seen by the GPS driver.
    pub timecode: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthVerdict {
    pub score: f64,
    pub is_frozen: bool,
}

impl HealthVerdict {
    pub fn status(&self) -> HealthStatus {
        HealthStatus::from_verdict(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
    Frozen,
}

impl HealthStatus {
    pub fn from_verdict(verdict: &HealthVerdict) -> Self {
        if verdict.is_frozen {
            HealthStatus::Frozen
        } else if verdict.score > 90.0 {
            HealthStatus::Healthy
        } else if verdict.score > 50.0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Critical
        }
    }
}
