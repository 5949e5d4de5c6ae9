use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

pub const UNKNOWN_HDOP: f64 = 99.9;

/// One decoded RMC sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixRecord {
    pub utc_time: Option<DateTime<Utc>>,
    pub latitude: f64,
    pub longitude: f64,
    pub is_valid: bool,
    pub satellite_count: u32,
    pub hdop: f64,
    pub raw_sentence: String,
}

impl Default for FixRecord {
    fn default() -> Self {
        Self {
            utc_time: None,
            latitude: 0.0,
            longitude: 0.0,
            is_valid: false,
            satellite_count: 0,
            hdop: UNKNOWN_HDOP,
            raw_sentence: String::new(),
        }
    }
}

impl FixRecord {
    pub(crate) fn from_raw(raw: &str) -> Self {
        Self {
            raw_sentence: raw.to_string(),
            ..Self::default()
        }
    }

    /// Copies the accumulated GGA/GSA figures into this record.
    pub fn with_quality(mut self, quality: &SatelliteQualitySnapshot) -> Self {
        self.satellite_count = quality.satellite_count;
        self.hdop = quality.hdop;
        self
    }
}

impl fmt::Display for FixRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.utc_time {
            Some(t) => write!(f, "[{} UTC]", t.format("%H:%M:%S"))?,
            None => write!(f, "[--:--:-- UTC]")?,
        }
        write!(
            f,
            " Valid:{} | Pos: {:.5}, {:.5} | Sats: {}",
            self.is_valid, self.latitude, self.longitude, self.satellite_count
        )
    }
}

/// Satellite figures accumulated across GGA, GSA and GSV sentences.
///
/// `snr_samples` only ever holds one GSV cycle: it is cleared on every
/// "message 1" of a group.
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteQualitySnapshot {
    pub satellite_count: u32,
    pub hdop: f64,
    pub snr_samples: Vec<u32>,
}

impl Default for SatelliteQualitySnapshot {
    fn default() -> Self {
        Self {
            satellite_count: 0,
            hdop: UNKNOWN_HDOP,
            snr_samples: Vec::new(),
        }
    }
}

impl SatelliteQualitySnapshot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SentenceKind {
    Rmc,
    Gga,
    Gsa,
    Gsv,
}

impl SentenceKind {
    /// Exact match on the address field, checksum already stripped.
    pub fn from_address(address: &str) -> Option<Self> {
        match address {
            "$GPRMC" | "$GNRMC" => Some(SentenceKind::Rmc),
            "$GPGGA" => Some(SentenceKind::Gga),
            "$GPGSA" => Some(SentenceKind::Gsa),
            "$GPGSV" => Some(SentenceKind::Gsv),
            _ => None,
        }
    }
}
