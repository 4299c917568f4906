pub mod batter;
pub mod events;
pub mod match_result;
pub mod team;

pub use batter::{Batter, BowlingFigures};
pub use events::{BallEvent, BallKind, OverResult};
pub use match_result::{InningsScorecard, MatchOutcome, MatchResult, TossResult};
pub use team::{TeamSheet, MIN_ROSTER_SIZE};

pub const BALLS_PER_OVER: u8 = 6;

/// Cricket overs notation: completed overs, a dot, balls into the next over.
pub fn overs_notation(balls: u32) -> String {
    let per_over = u32::from(BALLS_PER_OVER);
    format!("{}.{}", balls / per_over, balls % per_over)
}
