pub mod innings;
pub mod match_runner;
pub mod source;


pub use innings::{
    simulate_ball, simulate_innings, simulate_over, InningsEnd, InningsOvers, InningsState,
    InningsStatus, DEFAULT_WICKET_THRESHOLD, MAX_RUNS_PER_BALL, WICKET_ROLL_BOUND,
};
pub use match_runner::{CricketMatch, MatchObserver, NoopObserver};
pub use source::{RandomSource, RngSource, ScriptedSource};
