pub mod insights;
pub mod overs;
pub mod signals;
pub mod win_probability;

pub use insights::{insights, Insights};
pub use win_probability::{estimate_live, EstimatePhase, MatchState};
