//! Match Result Data Structures
//!
//! Output of the match driver. Everything the narrator and the JSON API
//! render comes from here; nothing in this module touches the random stream.

use serde::{Deserialize, Serialize};

use super::{overs_notation, Batter, BowlingFigures, OverResult};
use crate::engine::innings::InningsEnd;

/// One completed innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsScorecard {
    pub batting_team: String,
    pub bowling_team: String,
    pub total: u32,
    pub wickets: u32,
    /// Legal balls bowled
    pub balls: u32,
    pub end: InningsEnd,
    pub batters: Vec<Batter>,
    pub bowlers: Vec<BowlingFigures>,
    pub overs: Vec<OverResult>,
}

impl InningsScorecard {
    /// Overs in `overs.balls` notation, e.g. "4.3".
    pub fn overs_bowled(&self) -> String {
        overs_notation(self.balls)
    }

    pub fn run_rate(&self) -> Option<f32> {
        (self.balls > 0).then(|| self.total as f32 * 6.0 / self.balls as f32)
    }

    /// Highest individual score; first in batting order wins ties.
    pub fn top_scorer(&self) -> Option<&Batter> {
        self.batters
            .iter()
            .filter(|b| b.balls > 0 || b.dismissed)
            .fold(None, |best: Option<&Batter>, b| match best {
                Some(top) if top.runs >= b.runs => Some(top),
                _ => Some(b),
            })
    }

    /// Best bowling figures: most wickets, then fewest runs.
    pub fn best_bowler(&self) -> Option<&BowlingFigures> {
        self.bowlers
            .iter()
            .filter(|b| b.balls > 0)
            .min_by_key(|b| (std::cmp::Reverse(b.wickets), b.runs_conceded))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossResult {
    pub winner: String,
    /// Toss winner always elects to bat.
    pub batting_first: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MatchOutcome {
    Win { winner: String, margin_runs: u32 },
    Draw,
}

impl MatchOutcome {
    /// Higher total wins; equal totals are a draw.
    pub fn decide(first: &InningsScorecard, second: &InningsScorecard) -> Self {
        use std::cmp::Ordering;

        match first.total.cmp(&second.total) {
            Ordering::Greater => MatchOutcome::Win {
                winner: first.batting_team.clone(),
                margin_runs: first.total - second.total,
            },
            Ordering::Less => MatchOutcome::Win {
                winner: second.batting_team.clone(),
                margin_runs: second.total - first.total,
            },
            Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchOutcome::Win { winner, .. } => Some(winner.as_str()),
            MatchOutcome::Draw => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Seed of the ChaCha8 stream, when the match was played from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub overs_per_side: u32,
    pub toss: TossResult,
    /// Batting order of the match: `innings[0]` batted first.
    pub innings: Vec<InningsScorecard>,
    pub outcome: MatchOutcome,
}

impl MatchResult {
    pub fn innings_for(&self, team: &str) -> Option<&InningsScorecard> {
        self.innings.iter().find(|inn| inn.batting_team == team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorecard(team: &str, total: u32) -> InningsScorecard {
        InningsScorecard {
            batting_team: team.to_string(),
            bowling_team: "Other".to_string(),
            total,
            wickets: 3,
            balls: 27,
            end: InningsEnd::OversComplete,
            batters: Vec::new(),
            bowlers: Vec::new(),
            overs: Vec::new(),
        }
    }

    #[test]
    fn test_higher_total_wins() {
        let outcome = MatchOutcome::decide(&scorecard("Warriors", 61), &scorecard("Knights", 48));
        assert_eq!(
            outcome,
            MatchOutcome::Win {
                winner: "Warriors".to_string(),
                margin_runs: 13
            }
        );

        let outcome = MatchOutcome::decide(&scorecard("Warriors", 10), &scorecard("Knights", 48));
        assert_eq!(outcome.winner(), Some("Knights"));
    }

    #[test]
    fn test_equal_totals_draw() {
        let outcome = MatchOutcome::decide(&scorecard("Warriors", 40), &scorecard("Knights", 40));
        assert_eq!(outcome, MatchOutcome::Draw);
        assert_eq!(outcome.winner(), None);
    }

    #[test]
    fn test_overs_and_run_rate() {
        let card = scorecard("Warriors", 45);
        assert_eq!(card.overs_bowled(), "4.3");
        assert_eq!(card.run_rate(), Some(10.0));
    }

    #[test]
    fn test_top_scorer_prefers_earlier_on_tie() {
        let mut card = scorecard("Warriors", 20);
        let mut a = Batter::new("Alice");
        a.runs = 10;
        a.balls = 4;
        let mut b = Batter::new("Bob");
        b.runs = 10;
        b.balls = 3;
        card.batters = vec![a, b, Batter::new("Charlie")];
        assert_eq!(card.top_scorer().map(|b| b.name.as_str()), Some("Alice"));
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(MatchOutcome::Draw).unwrap();
        assert_eq!(json["result"], "draw");
    }
}
