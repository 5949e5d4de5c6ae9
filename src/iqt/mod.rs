mod score;
mod smoother;

pub use score::{calculate, IqtResult};
pub use smoother::{IqtSmoother, DEFAULT_WINDOW};
