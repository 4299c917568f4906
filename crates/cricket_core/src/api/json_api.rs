use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::commentary::{Narrator, Transcript};
use crate::config::MatchConfig;
use crate::engine::{CricketMatch, NoopObserver};
use crate::models::{MatchResult, TeamSheet};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamData,
    pub away_team: TeamData,
    /// Over limit per side (default 5, at most 50)
    #[serde(default)]
    pub overs: Option<u32>,
    #[serde(default)]
    pub wicket_threshold: Option<u32>,
    #[serde(default)]
    pub bowlers_per_side: Option<usize>,
    /// Return the ball-by-ball commentary lines alongside the result
    #[serde(default)]
    pub include_commentary: bool,
    #[serde(default)]
    pub flavour_text: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamData {
    pub name: String,
    pub players: Vec<String>,
}

impl From<TeamData> for TeamSheet {
    fn from(data: TeamData) -> Self {
        TeamSheet::new(data.name, data.players)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub result: MatchResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commentary: Vec<String>,
}

impl MatchRequest {
    fn config(&self) -> MatchConfig {
        let defaults = MatchConfig::default();
        MatchConfig {
            overs: self.overs.unwrap_or(defaults.overs),
            wicket_threshold: self.wicket_threshold.unwrap_or(defaults.wicket_threshold),
            bowlers_per_side: self.bowlers_per_side.unwrap_or(defaults.bowlers_per_side),
            seed: Some(self.seed),
            delivery_delay_ms: 0,
            flavour_text: self.flavour_text,
        }
    }
}

/// Plays one match described by a JSON request and returns the JSON response.
///
/// Errors are human-readable strings prefixed with what failed.
pub fn simulate_match_json(request_json: &str) -> Result<String, String> {
    let request: MatchRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;

    if request.schema_version != SCHEMA_VERSION {
        warn!(schema_version = request.schema_version, "rejected match request");
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }

    let config = request.config();
    let seed = request.seed;
    let include_commentary = request.include_commentary;
    let game = CricketMatch::new(request.home_team.into(), request.away_team.into(), config.clone())
        .map_err(|e| format!("Match setup failed: {}", e))?;

    let (result, commentary) = if include_commentary {
        let mut transcript = Transcript::new(Narrator::new(seed, config.flavour_text));
        let result = game
            .play(seed, &mut transcript)
            .map_err(|e| format!("Simulation failed: {}", e))?;
        (result, transcript.into_lines())
    } else {
        let result = game
            .play(seed, &mut NoopObserver)
            .map_err(|e| format!("Simulation failed: {}", e))?;
        (result, Vec::new())
    };

    let response = MatchResponse {
        schema_version: SCHEMA_VERSION,
        result,
        commentary,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {}", e))
}
