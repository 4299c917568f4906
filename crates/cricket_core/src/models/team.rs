use serde::{Deserialize, Serialize};

/// Minimum roster: a striker and a non-striker.
pub const MIN_ROSTER_SIZE: usize = 2;

const WARRIORS: [&str; 11] = [
    "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Hannah", "Ivan", "Jack", "Karen",
];

const KNIGHTS: [&str; 11] = [
    "Leo", "Mona", "Nina", "Oscar", "Paul", "Quincy", "Rita", "Steve", "Tracy", "Uma", "Victor",
];

/// 팀 구성: 이름 + 타순 (insertion order = batting order)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    pub players: Vec<String>,
}

impl TeamSheet {
    pub fn new<I, S>(name: impl Into<String>, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            players: players.into_iter().map(Into::into).collect(),
        }
    }

    pub fn warriors() -> Self {
        Self::new("Warriors", WARRIORS)
    }

    pub fn knights() -> Self {
        Self::new("Knights", KNIGHTS)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("team name is empty".to_string());
        }
        if self.players.len() < MIN_ROSTER_SIZE {
            return Err(format!(
                "need at least {} players, found {}",
                MIN_ROSTER_SIZE,
                self.players.len()
            ));
        }
        if let Some(blank) = self.players.iter().position(|p| p.trim().is_empty()) {
            return Err(format!("player #{} has an empty name", blank + 1));
        }
        Ok(())
    }

    /// Bowling attack: the last `count` players in the batting order, bowling
    /// in that order. Never empty for a valid sheet.
    pub fn attack(&self, count: usize) -> Vec<String> {
        let count = count.clamp(1, self.players.len().max(1));
        let start = self.players.len().saturating_sub(count);
        self.players[start..].to_vec()
    }
}
