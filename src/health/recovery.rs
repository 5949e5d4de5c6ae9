use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::types::{HealthVerdict, NtpStatusSnapshot, UNSYNCHRONIZED_STRATUM};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryPolicy {
    pub poor_threshold: f64,
    pub suspect_cycles: u32,
    pub restart_cycles: u32,
    pub restart_cooldown: Duration,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            poor_threshold: 20.0,
            suspect_cycles: 2,
            restart_cycles: 3,
            restart_cooldown: Duration::minutes(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    Nominal,
    SuspectedStall,
    CoolingDown,
    RestartRecommended,
}

/// Tracks consecutive poor health cycles and says when a service restart
/// would be worth trying. It never acts on its own.
#[derive(Debug, Clone)]
pub struct RecoveryAdvisor {
    policy: RecoveryPolicy,
    poor_streak: u32,
    last_restart: Option<DateTime<Utc>>,
}

impl RecoveryAdvisor {
    pub fn new(policy: RecoveryPolicy) -> Self {
        Self {
            policy,
            poor_streak: 0,
            last_restart: None,
        }
    }

    pub fn poor_streak(&self) -> u32 {
        self.poor_streak
    }

    pub fn assess(
        &mut self,
        verdict: &HealthVerdict,
        current: &NtpStatusSnapshot,
        now: DateTime<Utc>,
    ) -> Advice {
        let poor = verdict.score < self.policy.poor_threshold
            || current.peer_stratum >= UNSYNCHRONIZED_STRATUM;

        if !poor {
            if self.poor_streak > 0 {
                log::info!("Health recovered after {} poor cycles", self.poor_streak);
            }
            self.poor_streak = 0;
            return Advice::Nominal;
        }

        self.poor_streak += 1;

        if self.poor_streak >= self.policy.restart_cycles {
            let cooled = self
                .last_restart
                .map_or(true, |t| now - t > self.policy.restart_cooldown);
            if cooled {
                log::warn!(
                    "Health poor for {} cycles (score {:.0}), restart recommended",
                    self.poor_streak,
                    verdict.score
                );
                self.last_restart = Some(now);
                self.poor_streak = 0;
                return Advice::RestartRecommended;
            }
            return Advice::CoolingDown;
        }

        if self.poor_streak >= self.policy.suspect_cycles {
            Advice::SuspectedStall
        } else {
            Advice::Nominal
        }
    }
}
