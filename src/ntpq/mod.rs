//! Extraction of health inputs from `ntpq` text output.

mod clockvar;
mod error;
mod peers;
mod snapshot;

pub use clockvar::ClockVar;
pub use error::NtpqError;
pub use peers::{PeerLine, PeerTable};

/// Splits a capture holding `ntpq -p` output followed by `ntpq -c clockvar`
/// output. The clockvar part starts at the first line containing `associd=`.
pub fn split_capture(raw: &str) -> (&str, &str) {
    match raw.find("associd=") {
        Some(idx) => {
            let line_start = raw[..idx].rfind('\n').map_or(0, |i| i + 1);
            (&raw[..line_start], &raw[line_start..])
        }
        None => (raw, ""),
    }
}
