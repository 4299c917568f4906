//! Two-innings match driver.
//!
//! Toss → first innings → second innings → result. The innings core only
//! knows about the batting side; this layer credits each over to a bowler
//! from the fielding side's attack and reports progress to a
//! [`MatchObserver`] as overs complete.

use tracing::{debug, info};

use super::innings::{simulate_innings, InningsState};
use super::source::{RandomSource, RngSource};
use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::models::{
    BowlingFigures, InningsScorecard, MatchOutcome, MatchResult, OverResult, TeamSheet, TossResult,
};

/// Live hook for narrators and scoreboards. Every method defaults to a no-op.
pub trait MatchObserver {
    fn on_toss(&mut self, _toss: &TossResult) {}

    /// `number` is 1 for the first innings, 2 for the second.
    fn on_innings_start(&mut self, _number: u8, _batting: &TeamSheet, _bowling: &TeamSheet) {}

    fn on_over(&mut self, _over: &OverResult, _bowler: &str) {}

    fn on_innings_end(&mut self, _scorecard: &InningsScorecard) {}

    fn on_match_end(&mut self, _result: &MatchResult) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

#[derive(Debug, Clone)]
pub struct CricketMatch {
    home: TeamSheet,
    away: TeamSheet,
    config: MatchConfig,
}

impl CricketMatch {
    pub fn new(home: TeamSheet, away: TeamSheet, config: MatchConfig) -> Result<Self> {
        for team in [&home, &away] {
            team.validate().map_err(|reason| MatchError::InvalidTeam {
                team: team.name.clone(),
                reason,
            })?;
        }
        if home.name == away.name {
            return Err(MatchError::InvalidTeam {
                team: away.name.clone(),
                reason: "both sides have the same name".to_string(),
            });
        }
        config.validate()?;

        Ok(Self { home, away, config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn home(&self) -> &TeamSheet {
        &self.home
    }

    pub fn away(&self) -> &TeamSheet {
        &self.away
    }

    /// Plays the whole match from a ChaCha8 stream seeded with `seed`.
    pub fn play(&self, seed: u64, observer: &mut dyn MatchObserver) -> Result<MatchResult> {
        let mut source = RngSource::from_seed(seed);
        let mut result = self.play_with(&mut source, observer)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Plays the whole match from any random source.
    ///
    /// The toss uses one `draw(2)`; every other draw belongs to the innings.
    pub fn play_with<R>(&self, source: &mut R, observer: &mut dyn MatchObserver) -> Result<MatchResult>
    where
        R: RandomSource + ?Sized,
    {
        let (first, second) = if source.draw(2) == 0 {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        };
        let toss = TossResult {
            winner: first.name.clone(),
            batting_first: first.name.clone(),
        };
        info!(winner = %toss.winner, "toss won, elected to bat");
        observer.on_toss(&toss);

        let first_innings = self.play_innings(1, first, second, source, observer)?;
        let second_innings = self.play_innings(2, second, first, source, observer)?;

        let outcome = MatchOutcome::decide(&first_innings, &second_innings);
        info!(
            first = first_innings.total,
            second = second_innings.total,
            winner = outcome.winner().unwrap_or("draw"),
            "match complete"
        );

        let result = MatchResult {
            seed: None,
            overs_per_side: self.config.overs,
            toss,
            innings: vec![first_innings, second_innings],
            outcome,
        };
        observer.on_match_end(&result);
        Ok(result)
    }

    fn play_innings<R>(
        &self,
        number: u8,
        batting: &TeamSheet,
        bowling: &TeamSheet,
        source: &mut R,
        observer: &mut dyn MatchObserver,
    ) -> Result<InningsScorecard>
    where
        R: RandomSource + ?Sized,
    {
        info!(number, batting = %batting.name, bowling = %bowling.name, "innings start");
        observer.on_innings_start(number, batting, bowling);

        let mut state = InningsState::new(batting.players.iter().cloned())?
            .with_wicket_threshold(self.config.wicket_threshold)?;
        let mut bowlers: Vec<BowlingFigures> = bowling
            .attack(self.config.bowlers_per_side)
            .into_iter()
            .map(BowlingFigures::new)
            .collect();
        let mut overs = Vec::new();

        let mut innings = simulate_innings(&mut state, source, self.config.overs);
        for over in innings.by_ref() {
            let slot = (over.over as usize - 1) % bowlers.len();
            let bowler = &mut bowlers[slot];
            credit_over(bowler, &over);
            debug!(over = over.over, bowler = %bowler.name, runs = over.runs, "over credited");

            observer.on_over(&over, &bowler.name);
            overs.push(over);
        }
        let end = innings.finish();

        let scorecard = InningsScorecard {
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            total: state.total(),
            wickets: state.wickets(),
            balls: state.balls_bowled(),
            end,
            batters: state.into_batters(),
            bowlers,
            overs,
        };
        observer.on_innings_end(&scorecard);
        Ok(scorecard)
    }
}

fn credit_over(bowler: &mut BowlingFigures, over: &OverResult) {
    bowler.balls += over.balls() as u32;
    bowler.runs_conceded += over.runs;
    bowler.wickets += over.wickets;
    if over.is_maiden() {
        bowler.maidens += 1;
    }
}
