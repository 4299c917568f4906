//! # cricket_core - Deterministic Cricket Innings Simulation
//!
//! Ball-by-ball simulation of limited-overs cricket driven by an injected
//! random source, plus the match driver, narrator and JSON API around it.
//!
//! ## Features
//! - Same seed = same match, delivery for delivery
//! - Lazy over-by-over innings iterator for live output
//! - Scripted random source for exact test scenarios
//! - JSON API for embedding

pub mod api;
pub mod commentary;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_match_json, MatchRequest, MatchResponse};
pub use commentary::{Narrator, Transcript};
pub use config::MatchConfig;
pub use engine::{
    simulate_ball, simulate_innings, simulate_over, CricketMatch, InningsEnd, InningsOvers,
    InningsState, InningsStatus, MatchObserver, NoopObserver, RandomSource, RngSource,
    ScriptedSource,
};
pub use error::{ConfigError, InningsError, MatchError, Result};
pub use models::{
    BallEvent, BallKind, Batter, BowlingFigures, InningsScorecard, MatchOutcome, MatchResult,
    OverResult, TeamSheet, TossResult,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
