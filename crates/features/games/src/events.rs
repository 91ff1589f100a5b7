use crate::session::{GameKind, GameStatus};

/// Published on the event bus when a game is won, lost or solved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFinished {
    pub game_id: String,
    pub kind: GameKind,
    pub status: GameStatus,
    pub score: u32,
}
