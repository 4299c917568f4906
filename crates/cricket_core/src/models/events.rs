use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallKind {
    Run,
    Wicket,
}

/// One delivery as reported by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    pub over: u32,
    /// 1..=6 within the over
    pub ball: u8,
    #[serde(rename = "type")]
    pub kind: BallKind,
    /// Always 0 for a wicket.
    pub runs: u8,
    /// Striker who faced the ball (the dismissed batter on a wicket).
    pub batter: String,
    /// New striker after a wicket, if anyone was left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming: Option<String>,
    /// Team total after this ball
    pub total: u32,
    /// Team wickets after this ball
    pub wickets: u32,
}

impl BallEvent {
    pub fn is_wicket(&self) -> bool {
        self.kind == BallKind::Wicket
    }

    pub fn is_boundary(&self) -> bool {
        self.kind == BallKind::Run && self.runs >= 4
    }

    pub fn is_dot(&self) -> bool {
        self.kind == BallKind::Run && self.runs == 0
    }
}

/// Result of one over: up to six events plus the running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverResult {
    pub over: u32,
    pub events: Vec<BallEvent>,
    /// Runs scored in this over
    pub runs: u32,
    /// Wickets fallen in this over
    pub wickets: u32,
    pub total: u32,
    pub total_wickets: u32,
    /// False when the innings went all out mid-over.
    pub completed: bool,
}

impl OverResult {
    pub fn balls(&self) -> usize {
        self.events.len()
    }

    pub fn is_maiden(&self) -> bool {
        self.completed && self.runs == 0
    }
}
