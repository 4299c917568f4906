//! Cricket CLI
//!
//! `play`: two-innings match with live commentary on stdout
//! `json`: JSON request file → JSON response

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cricket_core::{
    simulate_match_json, CricketMatch, InningsScorecard, MatchConfig, MatchObserver, MatchResult,
    Narrator, OverResult, TeamSheet, TossResult,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Ball-by-ball cricket match simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play Warriors vs Knights with live commentary
    Play(PlayArgs),

    /// Run a JSON match request
    Json {
        /// Input request JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output response file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct PlayArgs {
    /// Config file (YAML, or JSON by extension); falls back to CRICKET_CONFIG_PATH
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the match stream (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Overs per innings
    #[arg(long)]
    overs: Option<u32>,

    /// Wicket chance per ball, out of 100
    #[arg(long)]
    wicket_threshold: Option<u32>,

    /// Pause between deliveries in milliseconds (0 disables)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Skip weather and colour commentary
    #[arg(long, default_value = "false")]
    no_flavour: bool,
}

impl PlayArgs {
    fn resolve_config(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => MatchConfig::from_env().context("failed to load config from environment")?,
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(overs) = self.overs {
            config.overs = overs;
        }
        if let Some(threshold) = self.wicket_threshold {
            config.wicket_threshold = threshold;
        }
        if let Some(delay) = self.delay_ms {
            config.delivery_delay_ms = delay;
        }
        if self.no_flavour {
            config.flavour_text = false;
        }

        config.validate().context("invalid match config")?;
        Ok(config)
    }
}

/// Prints commentary as each over arrives, pacing deliveries for a human reader.
struct ConsoleObserver {
    narrator: Narrator,
    delay: Duration,
}

impl ConsoleObserver {
    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl MatchObserver for ConsoleObserver {
    fn on_toss(&mut self, toss: &TossResult) {
        if let Some(weather) = self.narrator.weather_report() {
            println!("{weather}");
        }
        println!("{}", self.narrator.toss_line(toss));
    }

    fn on_innings_start(&mut self, number: u8, batting: &TeamSheet, _bowling: &TeamSheet) {
        println!();
        println!("{}", self.narrator.innings_header(number, batting));
    }

    fn on_over(&mut self, over: &OverResult, bowler: &str) {
        println!("{}", self.narrator.over_start(over.over, bowler));
        for event in &over.events {
            println!("{}", self.narrator.ball_line(event));
            if let Some(colour) = self.narrator.colour_line(event) {
                println!("  {colour}");
            }
            self.pause();
        }
        println!("{}", self.narrator.over_end(over));
    }

    fn on_innings_end(&mut self, card: &InningsScorecard) {
        println!("{}", self.narrator.innings_end(card));
        for line in self.narrator.player_stats(card) {
            println!("{line}");
        }
        println!("Bowling:");
        for line in self.narrator.bowling_figures(card) {
            println!("  {line}");
        }
    }

    fn on_match_end(&mut self, result: &MatchResult) {
        println!();
        println!("Match Ended!");
        for card in &result.innings {
            for line in self.narrator.scoreboard(card) {
                println!("{line}");
            }
        }
        for line in self.narrator.match_summary(result) {
            println!("{line}");
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play(args: &PlayArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, overs = config.overs, "starting match");

    let home = TeamSheet::warriors();
    let away = TeamSheet::knights();
    let mut observer = ConsoleObserver {
        narrator: Narrator::new(seed, config.flavour_text),
        delay: Duration::from_millis(config.delivery_delay_ms),
    };
    for line in observer.narrator.welcome(&home, &away) {
        println!("{line}");
    }
    println!("Seed: {seed}");

    let game = CricketMatch::new(home, away, config).context("failed to set up match")?;
    game.play(seed, &mut observer).context("match simulation failed")?;
    Ok(())
}

fn run_json(input: &Path, out: Option<&Path>) -> Result<()> {
    let request = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let response = simulate_match_json(&request).map_err(anyhow::Error::msg)?;

    match out {
        Some(path) => {
            let pretty: serde_json::Value = serde_json::from_str(&response)?;
            std::fs::write(path, serde_json::to_string_pretty(&pretty)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{response}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(&args),
        Commands::Json { r#in, out } => run_json(&r#in, out.as_deref()),
    }
}
