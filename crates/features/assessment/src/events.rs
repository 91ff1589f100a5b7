use crate::attempt::AttemptStatus;

/// Published on the event bus when an attempt is submitted or runs out of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptSubmitted {
    pub attempt_id: String,
    pub paper_id: String,
    pub status: AttemptStatus,
    pub total_score: u32,
    pub total_possible: u32,
    pub percentage: u32,
}
