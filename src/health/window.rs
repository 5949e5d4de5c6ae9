use super::scorer::score;
use super::types::{HealthVerdict, NtpStatusSnapshot};

/// Depth-1 history of NTP status snapshots.
#[derive(Debug, Clone, Default)]
pub struct HealthWindow {
    previous: Option<NtpStatusSnapshot>,
}

impl HealthWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores `current` against the held snapshot, then keeps `current` for
    /// the next cycle.
    pub fn observe(&mut self, current: NtpStatusSnapshot) -> HealthVerdict {
        let verdict = score(&current, self.previous.as_ref());
        self.previous = Some(current);
        verdict
    }

    pub fn previous(&self) -> Option<&NtpStatusSnapshot> {
        self.previous.as_ref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}
