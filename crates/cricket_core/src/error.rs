use thiserror::Error;

use crate::engine::innings::InningsEnd;

/// 이닝 시뮬레이터 계약 위반
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InningsError {
    #[error("Roster too small: need at least {min} batters, found {found}")]
    RosterTooSmall { min: usize, found: usize },

    #[error("Innings already complete: {0}")]
    InningsComplete(InningsEnd),

    #[error("Invalid wicket threshold {threshold}: must be at most {bound}")]
    InvalidThreshold { threshold: u32, bound: u32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Innings(#[from] InningsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid team {team}: {reason}")]
    InvalidTeam { team: String, reason: String },
}

pub type Result<T> = std::result::Result<T, MatchError>;
