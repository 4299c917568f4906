use serde::{Deserialize, Serialize};

use super::overs_notation;

/// 타자 기록 (batting order 순서로 InningsState가 소유)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batter {
    pub name: String,
    pub runs: u32,
    /// Scoring deliveries faced. Dismissal balls are not counted.
    pub balls: u32,
    pub dismissed: bool,
}

impl Batter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: 0,
            balls: 0,
            dismissed: false,
        }
    }

    pub(crate) fn score(&mut self, runs: u8) {
        self.runs += u32::from(runs);
        self.balls += 1;
    }

    pub(crate) fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Runs per 100 balls; `None` before the first scoring ball.
    pub fn strike_rate(&self) -> Option<f32> {
        (self.balls > 0).then(|| self.runs as f32 * 100.0 / self.balls as f32)
    }
}

/// Bowling side attribute update: what one bowler has conceded and taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingFigures {
    pub name: String,
    pub balls: u32,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
}

impl BowlingFigures {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balls: 0,
            maidens: 0,
            runs_conceded: 0,
            wickets: 0,
        }
    }

    pub fn overs(&self) -> String {
        overs_notation(self.balls)
    }

    /// Runs conceded per six balls.
    pub fn economy(&self) -> Option<f32> {
        (self.balls > 0).then(|| self.runs_conceded as f32 * 6.0 / self.balls as f32)
    }
}
