use super::types::{HealthVerdict, NtpStatusSnapshot, UNSYNCHRONIZED_STRATUM};

const BAD_FORMAT_MALUS: f64 = 30.0;
const NO_REPLY_MALUS: f64 = 20.0;
const UNSYNCHRONIZED_MALUS: f64 = 60.0;
const OFFSET_MALUS: f64 = 40.0;
const OFFSET_LIMIT_MS: f64 = 128.0;
const MISSED_POLL_MALUS: f64 = 10.0;

/// Scores the current cycle against the previous one.
///
/// A repeated non-empty timecode means the receiver stopped advancing and
/// always scores 0. Otherwise penalties are summed and subtracted from 100,
/// except that a clean cycle on a stratum 1 peer is reported as 100 outright.
pub fn score(current: &NtpStatusSnapshot, previous: Option<&NtpStatusSnapshot>) -> HealthVerdict {
    let Some(previous) = previous else {
        return HealthVerdict {
            score: 100.0,
            is_frozen: false,
        };
    };

    if !current.timecode.is_empty() && current.timecode == previous.timecode {
        return HealthVerdict {
            score: 0.0,
            is_frozen: true,
        };
    }

    let malus = malus(current, previous);

    let score = if malus == 0.0 && current.peer_stratum > 0 && current.peer_stratum <= 1 {
        100.0
    } else {
        (100.0 - malus).max(0.0)
    };

    HealthVerdict {
        score,
        is_frozen: false,
    }
}

fn malus(current: &NtpStatusSnapshot, previous: &NtpStatusSnapshot) -> f64 {
    let mut malus = 0.0;

    if current.bad_format > previous.bad_format {
        malus += BAD_FORMAT_MALUS;
    }
    if current.no_reply > previous.no_reply {
        malus += NO_REPLY_MALUS;
    }
    if current.peer_stratum >= UNSYNCHRONIZED_STRATUM {
        malus += UNSYNCHRONIZED_MALUS;
    }
    if current.offset.abs() > OFFSET_LIMIT_MS {
        malus += OFFSET_MALUS;
    }
    malus += missed_polls(current.reach) as f64 * MISSED_POLL_MALUS;

    malus
}

/// Failed polls among the last eight.
pub fn missed_polls(reach: u8) -> u32 {
    reach.count_zeros()
}
