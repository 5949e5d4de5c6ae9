use serde::Serialize;

use crate::nmea::SatelliteQualitySnapshot;

const TOP_SNR_COUNT: usize = 4;
const SNR_FLOOR_DBHZ: f64 = 20.0;
const SNR_SCALE: f64 = 5.0;
const HDOP_CEILING: f64 = 4.0;
const HDOP_SCALE: f64 = 33.33;
const SAT_FLOOR: f64 = 3.0;
const SAT_SCALE: f64 = 20.0;

const SNR_WEIGHT: f64 = 0.5;
const HDOP_WEIGHT: f64 = 0.3;
const SAT_WEIGHT: f64 = 0.2;

/// Composite GPS signal quality index and its parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IqtResult {
    pub total_score: f64,
    pub snr_score: f64,
    pub hdop_score: f64,
    pub sat_score: f64,
    pub raw_avg_snr: f64,
    pub raw_hdop: f64,
    pub raw_sat_count: u32,
}

/// Scores the accumulated satellite state.
///
/// SNR is the mean of the four strongest samples mapped 20..40 dB-Hz to
/// 0..100. HDOP maps 4.0..1.0 to 0..100, satellite count maps 3..8 to 0..100.
/// The total weighs them 50/30/20.
pub fn calculate(state: &SatelliteQualitySnapshot) -> IqtResult {
    let avg_snr = top_snr_average(&state.snr_samples);
    let snr_score = clamp((avg_snr - SNR_FLOOR_DBHZ) * SNR_SCALE, 0.0, 100.0);
    let hdop_score = clamp((HDOP_CEILING - state.hdop) * HDOP_SCALE, 0.0, 100.0);
    let sat_score = clamp(
        (state.satellite_count as f64 - SAT_FLOOR) * SAT_SCALE,
        0.0,
        100.0,
    );

    let total = snr_score * SNR_WEIGHT + hdop_score * HDOP_WEIGHT + sat_score * SAT_WEIGHT;

    IqtResult {
        total_score: round1(total),
        snr_score: round1(snr_score),
        hdop_score: round1(hdop_score),
        sat_score: round1(sat_score),
        raw_avg_snr: round1(avg_snr),
        raw_hdop: state.hdop,
        raw_sat_count: state.satellite_count,
    }
}

fn top_snr_average(samples: &[u32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let top = &sorted[..sorted.len().min(TOP_SNR_COUNT)];
    top.iter().map(|&s| s as f64).sum::<f64>() / top.len() as f64
}

pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Half away from zero.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(snr: &[u32], hdop: f64, sats: u32) -> SatelliteQualitySnapshot {
        SatelliteQualitySnapshot {
            satellite_count: sats,
            hdop,
            snr_samples: snr.to_vec(),
        }
    }

    #[test]
    fn test_perfect_signal() {
        let result = calculate(&snapshot(&[45, 44, 43, 42, 41], 1.0, 10));
        assert_eq!(result.snr_score, 100.0);
        assert_eq!(result.hdop_score, 100.0);
        assert_eq!(result.sat_score, 100.0);
        assert_eq!(result.total_score, 100.0);
        assert_eq!(result.raw_avg_snr, 43.5);
        assert_eq!(result.raw_sat_count, 10);
    }

    #[test]
    fn test_no_signal() {
        let result = calculate(&SatelliteQualitySnapshot::default());
        assert_eq!(result.total_score, 0.0);
        assert_eq!(result.snr_score, 0.0);
        assert_eq!(result.hdop_score, 0.0);
        assert_eq!(result.sat_score, 0.0);
        assert_eq!(result.raw_avg_snr, 0.0);
        assert_eq!(result.raw_hdop, 99.9);
    }

    #[test]
    fn test_partial_scores() {
        // top four of [30, 35, 25] -> mean 30 -> 50%
        // hdop 2.0 -> 2 * 33.33 = 66.66
        // 5 sats -> 40%
        let result = calculate(&snapshot(&[30, 35, 25], 2.0, 5));
        assert_eq!(result.raw_avg_snr, 30.0);
        assert_eq!(result.snr_score, 50.0);
        assert_eq!(result.hdop_score, 66.7);
        assert_eq!(result.sat_score, 40.0);
        // 25 + 19.998 + 8
        assert_eq!(result.total_score, 53.0);
    }

    #[test]
    fn test_only_top_four_snr_count() {
        let result = calculate(&snapshot(&[20, 40, 10, 40, 40, 40], 1.0, 8));
        assert_eq!(result.raw_avg_snr, 40.0);
        assert_eq!(result.snr_score, 100.0);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let state = snapshot(&[38, 36, 29], 1.7, 6);
        let first = calculate(&state);
        let second = calculate(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clamp_and_round() {
        assert_eq!(clamp(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(-12.36), -12.4);
    }
}
