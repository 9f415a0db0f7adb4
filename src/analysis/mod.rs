// Roster analysis: baselines, lineup optimization, grading, and team outlook.

pub mod analyzer;
pub mod baselines;
pub mod grades;
pub mod insights;
pub mod lineup;
pub mod resolve;
pub mod slot;
pub mod team;

pub use analyzer::{analyze, analyze_players, AnalysisResult, StarterAssignment};
pub use baselines::{compute_baselines, Baselines};
pub use grades::Grade;
pub use lineup::{pick_best_lineup, Lineup};
pub use slot::Slot;
pub use team::TeamSummary;
