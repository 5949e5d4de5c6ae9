use std::collections::VecDeque;

use super::score::{round1, IqtResult};

pub const DEFAULT_WINDOW: usize = 10;

/// Rolling mean of the last few composite totals.
#[derive(Debug, Clone)]
pub struct IqtSmoother {
    window: usize,
    totals: VecDeque<f64>,
}

impl Default for IqtSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl IqtSmoother {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            totals: VecDeque::with_capacity(window),
        }
    }

    /// Records a result and returns the smoothed total.
    pub fn push(&mut self, result: &IqtResult) -> f64 {
        if self.totals.len() == self.window {
            self.totals.pop_front();
        }
        self.totals.push_back(result.total_score);
        self.average().unwrap_or(0.0)
    }

    pub fn average(&self) -> Option<f64> {
        if self.totals.is_empty() {
            return None;
        }
        let sum: f64 = self.totals.iter().sum();
        Some(round1(sum / self.totals.len() as f64))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(total: f64) -> IqtResult {
        IqtResult {
            total_score: total,
            snr_score: 0.0,
            hdop_score: 0.0,
            sat_score: 0.0,
            raw_avg_snr: 0.0,
            raw_hdop: 99.9,
            raw_sat_count: 0,
        }
    }

    #[test]
    fn test_average_over_window() {
        let mut smoother = IqtSmoother::new(3);
        assert!(smoother.average().is_none());
        assert_eq!(smoother.push(&result(90.0)), 90.0);
        assert_eq!(smoother.push(&result(60.0)), 75.0);
        assert_eq!(smoother.push(&result(30.0)), 60.0);
        // 90 drops out
        assert_eq!(smoother.push(&result(0.0)), 30.0);
        assert_eq!(smoother.len(), 3);
    }

    #[test]
    fn test_zero_window_is_one() {
        let mut smoother = IqtSmoother::new(0);
        smoother.push(&result(10.0));
        assert_eq!(smoother.push(&result(50.0)), 50.0);
    }
}
