mod recovery;
mod scorer;
mod types;
mod window;

pub use recovery::{Advice, RecoveryAdvisor, RecoveryPolicy};
pub use scorer::{missed_polls, score};
pub use types::{HealthStatus, HealthVerdict, NtpStatusSnapshot, UNSYNCHRONIZED_STRATUM};
pub use window::HealthWindow;
