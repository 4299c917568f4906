//! 해설 (Narrator)
//!
//! Turns simulator output into console lines. Weather and colour phrases
//! come from the narrator's own ChaCha8 stream, so switching flavour text on
//! or off never changes a single delivery.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::engine::MatchObserver;
use crate::models::{
    BallEvent, BallKind, InningsScorecard, MatchOutcome, MatchResult, OverResult, TeamSheet,
    TossResult,
};

/// Mixed into the match seed so flavour text never shares the simulation stream.
const FLAVOUR_STREAM_SALT: u64 = 0x5EED_C0DE_CA11_0001;

const SCOREBOARD_RULE: &str = "----------------------";

const WEATHER: [&str; 6] = ["Sunny", "Cloudy", "Rainy", "Windy", "Humid", "Foggy"];

const WICKET_COLOUR: [&str; 4] = [
    "Spectacular catch!",
    "Close call at the stumps.",
    "The batsman misses it.",
    "{batter} looks nervous at the crease.",
];

const BOUNDARY_COLOUR: [&str; 4] = [
    "What a shot!",
    "The crowd is going wild.",
    "The ball zooms past the slips.",
    "{batter} with an elegant cover drive.",
];

const DOT_COLOUR: [&str; 5] = [
    "Dot ball, good pressure.",
    "Excellent delivery.",
    "{batter} defends carefully.",
    "A brilliant diving stop!",
    "That was close to LBW!",
];

const RUNNING_COLOUR: [&str; 6] = [
    "{batter} tries to sneak a single.",
    "{batter} swings hard!",
    "{batter} dances down the track!",
    "Ball goes to extra cover.",
    "Boundary saved by the fielder.",
    "Brilliant fielding!",
];

#[derive(Debug, Clone)]
pub struct Narrator {
    rng: ChaCha8Rng,
    flavour: bool,
}

impl Narrator {
    pub fn new(seed: u64, flavour: bool) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ FLAVOUR_STREAM_SALT),
            flavour,
        }
    }

    pub fn welcome(&self, home: &TeamSheet, away: &TeamSheet) -> Vec<String> {
        vec![
            "Welcome to the cricket commentary simulator!".to_string(),
            format!("Team 1: {}", home.name),
            format!("Team 2: {}", away.name),
        ]
    }

    pub fn weather_report(&mut self) -> Option<String> {
        if !self.flavour {
            return None;
        }
        WEATHER
            .choose(&mut self.rng)
            .map(|weather| format!("Weather update: {weather}"))
    }

    pub fn toss_line(&self, toss: &TossResult) -> String {
        format!("{} won the toss and elected to bat.", toss.winner)
    }

    pub fn innings_header(&self, number: u8, batting: &TeamSheet) -> String {
        let ordinal = if number == 1 { "First" } else { "Second" };
        format!("--- {ordinal} Innings: {} ---", batting.name)
    }

    pub fn over_start(&self, over: u32, bowler: &str) -> String {
        format!("Over {over} begins. {bowler} to bowl.")
    }

    pub fn ball_line(&self, event: &BallEvent) -> String {
        match event.kind {
            BallKind::Wicket => match &event.incoming {
                Some(next) => format!(
                    "Ball {}: {} is OUT! {} comes to the crease.",
                    event.ball, event.batter, next
                ),
                None => format!("Ball {}: {} is OUT!", event.ball, event.batter),
            },
            BallKind::Run => {
                let plural = if event.runs == 1 { "" } else { "s" };
                format!(
                    "Ball {}: {} scores {} run{}",
                    event.ball, event.batter, event.runs, plural
                )
            }
        }
    }

    /// Occasional colour phrase after a ball (about one in three).
    pub fn colour_line(&mut self, event: &BallEvent) -> Option<String> {
        if !self.flavour || !self.rng.gen_ratio(1, 3) {
            return None;
        }

        if event.kind == BallKind::Run && event.runs == 6 {
            return Some("Massive six!".to_string());
        }

        let table: &[&str] = if event.is_wicket() {
            &WICKET_COLOUR
        } else if event.is_boundary() {
            &BOUNDARY_COLOUR
        } else if event.is_dot() {
            &DOT_COLOUR
        } else {
            &RUNNING_COLOUR
        };
        table
            .choose(&mut self.rng)
            .map(|phrase| phrase.replace("{batter}", &event.batter))
    }

    pub fn over_end(&self, over: &OverResult) -> String {
        let mut line = format!(
            "Over {} ends. Total: {}/{}",
            over.over, over.total, over.total_wickets
        );
        if over.is_maiden() {
            line.push_str(" (maiden)");
        }
        line
    }

    pub fn innings_end(&self, card: &InningsScorecard) -> String {
        format!(
            "Innings ended ({}). Final score: {}/{} in {} overs",
            card.end,
            card.total,
            card.wickets,
            card.overs_bowled()
        )
    }

    /// Batting card: team line, one `name: runs(balls)` line per batter, rule.
    pub fn scoreboard(&self, card: &InningsScorecard) -> Vec<String> {
        let mut lines = Vec::with_capacity(card.batters.len() + 2);
        lines.push(format!(
            "Team: {} | Runs: {} | Wickets: {}",
            card.batting_team, card.total, card.wickets
        ));
        for batter in &card.batters {
            lines.push(format!("{}: {}({})", batter.name, batter.runs, batter.balls));
        }
        lines.push(SCOREBOARD_RULE.to_string());
        lines
    }

    pub fn player_stats(&self, card: &InningsScorecard) -> Vec<String> {
        card.batters
            .iter()
            .map(|b| {
                let status = if b.dismissed { "" } else { " (not out)" };
                format!("{}: {} runs in {} balls.{}", b.name, b.runs, b.balls, status)
            })
            .collect()
    }

    /// `name: overs-maidens-runs-wickets` for everyone who bowled.
    pub fn bowling_figures(&self, card: &InningsScorecard) -> Vec<String> {
        card.bowlers
            .iter()
            .filter(|b| b.balls > 0)
            .map(|b| {
                format!(
                    "{}: {}-{}-{}-{}",
                    b.name,
                    b.overs(),
                    b.maidens,
                    b.runs_conceded,
                    b.wickets
                )
            })
            .collect()
    }

    pub fn match_summary(&self, result: &MatchResult) -> Vec<String> {
        let mut lines = vec!["Match Summary:".to_string()];
        for card in &result.innings {
            lines.push(format!(
                "{}: {}/{} ({} overs)",
                card.batting_team,
                card.total,
                card.wickets,
                card.overs_bowled()
            ));
        }
        for card in &result.innings {
            if let Some(top) = card.top_scorer() {
                lines.push(format!(
                    "Top scorer for {}: {} {}({})",
                    card.batting_team, top.name, top.runs, top.balls
                ));
            }
            if let Some(best) = card.best_bowler() {
                lines.push(format!(
                    "Best bowling for {}: {} {}/{}",
                    card.bowling_team, best.name, best.wickets, best.runs_conceded
                ));
            }
        }
        lines.push(match &result.outcome {
            MatchOutcome::Win {
                winner,
                margin_runs,
            } => {
                let plural = if *margin_runs == 1 { "" } else { "s" };
                format!("{winner} won the match by {margin_runs} run{plural}!")
            }
            MatchOutcome::Draw => "Match drawn!".to_string(),
        });
        lines
    }
}

/// Observer that records the full commentary in memory.
#[derive(Debug, Clone)]
pub struct Transcript {
    narrator: Narrator,
    lines: Vec<String>,
}

impl Transcript {
    pub fn new(narrator: Narrator) -> Self {
        Self {
            narrator,
            lines: Vec::new(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl MatchObserver for Transcript {
    fn on_toss(&mut self, toss: &TossResult) {
        if let Some(weather) = self.narrator.weather_report() {
            self.lines.push(weather);
        }
        self.lines.push(self.narrator.toss_line(toss));
    }

    fn on_innings_start(&mut self, number: u8, batting: &TeamSheet, _bowling: &TeamSheet) {
        self.lines.push(self.narrator.innings_header(number, batting));
    }

    fn on_over(&mut self, over: &OverResult, bowler: &str) {
        self.lines.push(self.narrator.over_start(over.over, bowler));
        for event in &over.events {
            self.lines.push(self.narrator.ball_line(event));
            if let Some(colour) = self.narrator.colour_line(event) {
                self.lines.push(colour);
            }
        }
        self.lines.push(self.narrator.over_end(over));
    }

    fn on_innings_end(&mut self, card: &InningsScorecard) {
        self.lines.push(self.narrator.innings_end(card));
        self.lines.extend(self.narrator.player_stats(card));
        self.lines.extend(self.narrator.bowling_figures(card));
    }

    fn on_match_end(&mut self, result: &MatchResult) {
        for card in &result.innings {
            self.lines.extend(self.narrator.scoreboard(card));
        }
        self.lines.extend(self.narrator.match_summary(result));
    }
}
