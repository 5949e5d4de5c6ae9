mod decoder;
mod parsing;
mod types;

pub use decoder::{decode, update_quality_state};
pub use parsing::{nmea_to_decimal, parse_rmc_datetime, sentence_fields};
pub use types::{FixRecord, SatelliteQualitySnapshot, SentenceKind, UNKNOWN_HDOP};
