//! Ball-by-ball innings simulation.
//!
//! ## 상태 전이
//!
//! ```text
//! Active ──(delivery)──► Active
//! Active ──(wickets == roster - 1)──► Complete(AllOut)
//! Active ──(over counter > limit)──► Complete(OversComplete)
//! ```
//!
//! Each delivery makes one wicket roll in `0..100`; below the threshold the
//! striker is out, otherwise a second roll in `0..7` gives the runs. Nothing
//! else here consumes the random stream, so a seeded source replays exactly.

use std::fmt;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::source::RandomSource;
use crate::error::InningsError;
use crate::models::{BallEvent, BallKind, Batter, OverResult, BALLS_PER_OVER, MIN_ROSTER_SIZE};

/// Wicket roll is uniform in `0..WICKET_ROLL_BOUND`.
pub const WICKET_ROLL_BOUND: u32 = 100;
/// Roll below this is a dismissal (15% per ball).
pub const DEFAULT_WICKET_THRESHOLD: u32 = 15;
pub const MAX_RUNS_PER_BALL: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InningsEnd {
    AllOut,
    OversComplete,
}

impl fmt::Display for InningsEnd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InningsEnd::AllOut => write!(f, "all out"),
            InningsEnd::OversComplete => write!(f, "overs complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InningsStatus {
    Active,
    Complete(InningsEnd),
}

/// At-bat state for one batting side.
///
/// Invariants while `Active`:
/// - `striker != non_striker`, both point at batters who are not out
/// - `wickets` equals the number of dismissed batters
/// - `total` equals the sum of individual runs
#[derive(Debug, Clone)]
pub struct InningsState {
    batters: Vec<Batter>,
    total: u32,
    wickets: u32,
    striker: usize,
    non_striker: usize,
    /// Current over, 1-based
    over: u32,
    /// Deliveries since the last over ended
    ball_in_over: u8,
    balls_bowled: u32,
    wicket_threshold: u32,
    status: InningsStatus,
}

impl InningsState {
    /// Opens an innings with the first two names of the batting order on strike.
    pub fn new<I, S>(names: I) -> Result<Self, InningsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let batters: Vec<Batter> = names.into_iter().map(Batter::new).collect();
        if batters.len() < MIN_ROSTER_SIZE {
            return Err(InningsError::RosterTooSmall {
                min: MIN_ROSTER_SIZE,
                found: batters.len(),
            });
        }

        Ok(Self {
            batters,
            total: 0,
            wickets: 0,
            striker: 0,
            non_striker: 1,
            over: 1,
            ball_in_over: 0,
            balls_bowled: 0,
            wicket_threshold: DEFAULT_WICKET_THRESHOLD,
            status: InningsStatus::Active,
        })
    }

    pub fn with_wicket_threshold(mut self, threshold: u32) -> Result<Self, InningsError> {
        if threshold > WICKET_ROLL_BOUND {
            return Err(InningsError::InvalidThreshold {
                threshold,
                bound: WICKET_ROLL_BOUND,
            });
        }
        self.wicket_threshold = threshold;
        Ok(self)
    }

    pub fn batters(&self) -> &[Batter] {
        &self.batters
    }

    pub fn into_batters(self) -> Vec<Batter> {
        self.batters
    }

    pub fn striker(&self) -> usize {
        self.striker
    }

    pub fn non_striker(&self) -> usize {
        self.non_striker
    }

    pub fn striker_name(&self) -> &str {
        &self.batters[self.striker].name
    }

    pub fn non_striker_name(&self) -> &str {
        &self.batters[self.non_striker].name
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    pub fn over(&self) -> u32 {
        self.over
    }

    pub fn balls_bowled(&self) -> u32 {
        self.balls_bowled
    }

    pub fn wicket_threshold(&self) -> u32 {
        self.wicket_threshold
    }

    pub fn roster_size(&self) -> usize {
        self.batters.len()
    }

    /// Wickets at which the side is all out (no partner left).
    pub fn all_out_wickets(&self) -> u32 {
        (self.batters.len() - 1) as u32
    }

    pub fn status(&self) -> InningsStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == InningsStatus::Active
    }

    pub fn end(&self) -> Option<InningsEnd> {
        match self.status {
            InningsStatus::Active => None,
            InningsStatus::Complete(end) => Some(end),
        }
    }

    fn ensure_active(&self) -> Result<(), InningsError> {
        match self.status {
            InningsStatus::Active => Ok(()),
            InningsStatus::Complete(end) => Err(InningsError::InningsComplete(end)),
        }
    }

    fn rotate_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    /// First batter in order who is not out and not already at the crease.
    fn next_batter(&self) -> Option<usize> {
        self.batters
            .iter()
            .enumerate()
            .position(|(i, b)| !b.dismissed && i != self.striker && i != self.non_striker)
    }

    fn close(&mut self, end: InningsEnd) {
        self.status = InningsStatus::Complete(end);
        info!(
            total = self.total,
            wickets = self.wickets,
            balls = self.balls_bowled,
            %end,
            "innings complete"
        );
    }
}

/// Bowls one delivery to the current striker.
///
/// Balls bowled one at a time outside [`simulate_over`] are numbered 1..=6
/// and wrap; only `simulate_over` advances the over counter.
pub fn simulate_ball<R>(state: &mut InningsState, source: &mut R) -> Result<BallEvent, InningsError>
where
    R: RandomSource + ?Sized,
{
    state.ensure_active()?;

    if state.ball_in_over >= BALLS_PER_OVER {
        state.ball_in_over = 0;
    }
    state.ball_in_over += 1;
    state.balls_bowled += 1;
    let over = state.over;
    let ball = state.ball_in_over;

    let wicket_roll = source.draw(WICKET_ROLL_BOUND);
    if wicket_roll < state.wicket_threshold {
        let out = state.striker;
        state.batters[out].dismiss();
        state.wickets += 1;
        let batter = state.batters[out].name.clone();

        let incoming = match state.next_batter() {
            Some(next) => {
                state.striker = next;
                Some(state.batters[next].name.clone())
            }
            None => None,
        };

        debug!(
            over,
            ball,
            batter = %batter,
            incoming = incoming.as_deref().unwrap_or("-"),
            total = state.total,
            wickets = state.wickets,
            "wicket"
        );

        if incoming.is_none() {
            state.close(InningsEnd::AllOut);
        }

        return Ok(BallEvent {
            over,
            ball,
            kind: BallKind::Wicket,
            runs: 0,
            batter,
            incoming,
            total: state.total,
            wickets: state.wickets,
        });
    }

    let runs = source.draw(u32::from(MAX_RUNS_PER_BALL) + 1) as u8;
    let striker = state.striker;
    state.batters[striker].score(runs);
    state.total += u32::from(runs);
    let batter = state.batters[striker].name.clone();

    if runs % 2 == 1 {
        state.rotate_strike();
    }

    trace!(over, ball, batter = %batter, runs, total = state.total, "runs");

    Ok(BallEvent {
        over,
        ball,
        kind: BallKind::Run,
        runs,
        batter,
        incoming: None,
        total: state.total,
        wickets: state.wickets,
    })
}

/// Bowls up to six deliveries, stopping early only when the side is all out.
///
/// Strike changes ends after the over whether or not it was completed, and
/// the over counter always advances.
pub fn simulate_over<R>(state: &mut InningsState, source: &mut R) -> Result<OverResult, InningsError>
where
    R: RandomSource + ?Sized,
{
    state.ensure_active()?;

    let over = state.over;
    let start_total = state.total;
    let start_wickets = state.wickets;
    let mut events = Vec::with_capacity(usize::from(BALLS_PER_OVER));
    state.ball_in_over = 0;

    for _ in 0..BALLS_PER_OVER {
        events.push(simulate_ball(state, source)?);
        if !state.is_active() {
            break;
        }
    }

    let completed = events.len() == usize::from(BALLS_PER_OVER);
    state.rotate_strike();
    state.over += 1;
    state.ball_in_over = 0;

    debug!(
        over,
        runs = state.total - start_total,
        total = state.total,
        wickets = state.wickets,
        completed,
        "over complete"
    );

    Ok(OverResult {
        over,
        events,
        runs: state.total - start_total,
        wickets: state.wickets - start_wickets,
        total: state.total,
        total_wickets: state.wickets,
        completed,
    })
}

/// Lazily plays overs until the side is all out or `over_limit` overs are bowled.
///
/// Dropping the iterator early leaves every applied delivery in place; the
/// innings can be resumed with another call.
pub fn simulate_innings<'a, R>(
    state: &'a mut InningsState,
    source: &'a mut R,
    over_limit: u32,
) -> InningsOvers<'a, R>
where
    R: RandomSource + ?Sized,
{
    InningsOvers {
        state,
        source,
        over_limit,
    }
}

pub struct InningsOvers<'a, R: RandomSource + ?Sized> {
    state: &'a mut InningsState,
    source: &'a mut R,
    over_limit: u32,
}

impl<'a, R: RandomSource + ?Sized> InningsOvers<'a, R> {
    pub fn state(&self) -> &InningsState {
        &*self.state
    }

    pub fn over_limit(&self) -> u32 {
        self.over_limit
    }

    /// `None` while overs remain to be played.
    pub fn end(&self) -> Option<InningsEnd> {
        self.state.end()
    }

    /// Plays out the rest of the innings and reports why it ended.
    pub fn finish(mut self) -> InningsEnd {
        self.by_ref().for_each(drop);
        self.state.end().unwrap_or(InningsEnd::OversComplete)
    }

    fn check_overs(&mut self) {
        if self.state.is_active() && self.state.over > self.over_limit {
            self.state.close(InningsEnd::OversComplete);
        }
    }
}

impl<'a, R: RandomSource + ?Sized> Iterator for InningsOvers<'a, R> {
    type Item = OverResult;

    fn next(&mut self) -> Option<OverResult> {
        self.check_overs();
        if !self.state.is_active() {
            return None;
        }

        let result = match simulate_over(self.state, self.source) {
            Ok(over) => Some(over),
            Err(err) => {
                warn!(error = %err, over = self.state.over, "innings stopped early");
                None
            }
        };
        self.check_overs();
        result
    }
}

impl<'a, R: RandomSource + ?Sized> FusedIterator for InningsOvers<'a, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::source::{RngSource, ScriptedSource};

    fn lineup(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Player{i}")).collect()
    }

    fn state(n: usize) -> InningsState {
        InningsState::new(lineup(n)).unwrap()
    }

    #[test]
    fn test_new_puts_first_two_on_strike() {
        let s = state(11);
        assert_eq!(s.striker(), 0);
        assert_eq!(s.non_striker(), 1);
        assert_eq!(s.over(), 1);
        assert_eq!(s.status(), InningsStatus::Active);
        assert_eq!(s.all_out_wickets(), 10);
    }

    #[test]
    fn test_roster_too_small() {
        let err = InningsState::new(["Solo"]).unwrap_err();
        assert_eq!(err, InningsError::RosterTooSmall { min: 2, found: 1 });
        assert!(InningsState::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_threshold_above_bound_rejected() {
        let err = state(3).with_wicket_threshold(101).unwrap_err();
        assert!(matches!(err, InningsError::InvalidThreshold { threshold: 101, .. }));
        assert_eq!(state(3).with_wicket_threshold(100).unwrap().wicket_threshold(), 100);
    }

    #[test]
    fn test_scripted_three_balls() {
        let mut s = InningsState::new(["Alice", "Bob", "Charlie", "David"]).unwrap();
        let mut source = ScriptedSource::new([50, 4, 50, 1, 5]);

        let first = simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!((first.kind, first.runs, first.batter.as_str()), (BallKind::Run, 4, "Alice"));
        assert_eq!(s.striker_name(), "Alice", "even runs keep strike");

        let second = simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!((second.kind, second.runs, second.batter.as_str()), (BallKind::Run, 1, "Alice"));
        assert_eq!(s.striker_name(), "Bob", "odd runs rotate strike");

        let third = simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!(third.kind, BallKind::Wicket);
        assert_eq!(third.runs, 0);
        assert_eq!(third.batter, "Bob");
        assert_eq!(third.incoming.as_deref(), Some("Charlie"));
        assert_eq!((third.total, third.wickets), (5, 1));

        assert_eq!(s.striker_name(), "Charlie");
        assert_eq!(s.non_striker_name(), "Alice");
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_dismissal_does_not_count_ball_faced() {
        let mut s = state(3);
        let mut source = ScriptedSource::new([0]);
        simulate_ball(&mut s, &mut source).unwrap();
        assert!(s.batters()[0].dismissed);
        assert_eq!(s.batters()[0].balls, 0);
        assert_eq!(s.balls_bowled(), 1);
    }

    #[test]
    fn test_wicket_threshold_is_exclusive() {
        let mut s = state(3);
        // 15 is not below 15: scoring ball.
        let mut source = ScriptedSource::new([15, 2, 14]);
        let event = simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!(event.kind, BallKind::Run);
        let event = simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!(event.kind, BallKind::Wicket);
    }

    #[test]
    fn test_next_batter_skips_both_at_crease() {
        let mut s = state(4);
        // Player1 scores 1 -> Player2 on strike; Player2 out -> Player3 in.
        // Player3 out -> Player4 in (Player1 still at the other end).
        let mut source = ScriptedSource::new([50, 1, 0, 0]);
        simulate_ball(&mut s, &mut source).unwrap();
        simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!(s.striker_name(), "Player3");
        let event = simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!(event.incoming.as_deref(), Some("Player4"));
        assert_eq!(s.non_striker_name(), "Player1");
    }

    #[test]
    fn test_over_is_six_balls_and_changes_ends() {
        let mut s = state(11);
        // Six dot balls: no odd-run rotation, only the end-of-over one.
        let mut source = ScriptedSource::new([50, 0].repeat(6));
        let over = simulate_over(&mut s, &mut source).unwrap();
        assert_eq!(over.balls(), 6);
        assert!(over.completed);
        assert!(over.is_maiden());
        assert_eq!(over.over, 1);
        assert_eq!(s.over(), 2);
        assert_eq!(s.striker_name(), "Player2");
        assert_eq!(
            over.events.iter().map(|e| e.ball).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_odd_single_then_end_of_over_rotation() {
        let mut s = state(11);
        // One single, then five dots: rotated once mid-over and once at the end.
        let mut draws = vec![50, 1];
        draws.extend([50, 0].repeat(5));
        let mut source = ScriptedSource::new(draws);
        let over = simulate_over(&mut s, &mut source).unwrap();
        assert_eq!(over.runs, 1);
        assert_eq!(s.striker_name(), "Player1");
        assert_eq!(s.batters()[1].balls, 5);
    }

    #[test]
    fn test_standalone_balls_wrap_within_over() {
        let mut s = state(2).with_wicket_threshold(0).unwrap();
        let mut source = ScriptedSource::new([50, 0].repeat(8));
        let balls: Vec<u8> = (0..8)
            .map(|_| simulate_ball(&mut s, &mut source).unwrap().ball)
            .collect();
        assert_eq!(balls, vec![1, 2, 3, 4, 5, 6, 1, 2]);
        assert_eq!(s.balls_bowled(), 8);
        assert_eq!(s.over(), 1, "only simulate_over advances the over");
    }

    #[test]
    fn test_many_standalone_balls_stay_in_range() {
        let mut s = state(2).with_wicket_threshold(0).unwrap();
        let mut source = RngSource::from_seed(5);
        for _ in 0..300 {
            let event = simulate_ball(&mut s, &mut source).unwrap();
            assert!((1..=BALLS_PER_OVER).contains(&event.ball), "ball {}", event.ball);
        }
        assert_eq!(s.balls_bowled(), 300);
        assert!(s.is_active());
    }

    #[test]
    fn test_over_after_partial_standalone_balls_numbers_from_one() {
        let mut s = state(11).with_wicket_threshold(0).unwrap();
        let mut source = ScriptedSource::new([50, 0].repeat(9));
        for _ in 0..3 {
            simulate_ball(&mut s, &mut source).unwrap();
        }
        let over = simulate_over(&mut s, &mut source).unwrap();
        assert_eq!(
            over.events.iter().map(|e| e.ball).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
        assert_eq!(s.balls_bowled(), 9);
    }

    #[test]
    fn test_all_out_mid_over_stops_early() {
        let mut s = state(3);
        // Two wickets end a three-player innings on the third ball.
        let mut source = ScriptedSource::new([50, 2, 3, 3]);
        let over = simulate_over(&mut s, &mut source).unwrap();
        assert_eq!(over.balls(), 3);
        assert!(!over.completed);
        assert_eq!(over.wickets, 2);
        assert_eq!(s.end(), Some(InningsEnd::AllOut));
        assert_eq!(s.over(), 2);

        let mut unused = ScriptedSource::new([50, 4]);
        let err = simulate_ball(&mut s, &mut unused).unwrap_err();
        assert_eq!(err, InningsError::InningsComplete(InningsEnd::AllOut));
        assert_eq!(unused.consumed(), 0, "terminal innings must not draw");
    }

    #[test]
    fn test_simulate_over_on_complete_innings_errors() {
        let mut s = state(2);
        let mut source = ScriptedSource::new([0]);
        simulate_ball(&mut s, &mut source).unwrap();
        assert!(matches!(
            simulate_over(&mut s, &mut source),
            Err(InningsError::InningsComplete(InningsEnd::AllOut))
        ));
    }

    #[test]
    fn test_zero_over_limit_ends_immediately() {
        let mut s = state(11);
        let mut source = ScriptedSource::new([]);
        let mut overs = simulate_innings(&mut s, &mut source, 0);
        assert!(overs.next().is_none());
        assert_eq!(overs.end(), Some(InningsEnd::OversComplete));

        assert_eq!(s.total(), 0);
        assert_eq!(s.wickets(), 0);
        assert_eq!(s.over(), 1);
        assert_eq!(s.balls_bowled(), 0);
        assert_eq!((s.striker(), s.non_striker()), (0, 1));
    }

    #[test]
    fn test_innings_stops_at_over_limit() {
        let mut s = state(11).with_wicket_threshold(0).unwrap();
        let mut source = RngSource::from_seed(7);
        let overs: Vec<OverResult> = simulate_innings(&mut s, &mut source, 3).collect();
        assert_eq!(overs.len(), 3);
        assert!(overs.iter().all(|o| o.completed));
        assert_eq!(s.end(), Some(InningsEnd::OversComplete));
        assert_eq!(s.balls_bowled(), 18);
    }

    #[test]
    fn test_innings_marked_complete_after_last_over_without_extra_poll() {
        let mut s = state(11).with_wicket_threshold(0).unwrap();
        let mut source = RngSource::from_seed(1);
        let mut overs = simulate_innings(&mut s, &mut source, 1);
        assert!(overs.next().is_some());
        assert_eq!(overs.end(), Some(InningsEnd::OversComplete));
    }

    #[test]
    fn test_every_ball_a_wicket_goes_all_out() {
        let mut s = state(11).with_wicket_threshold(100).unwrap();
        let mut source = RngSource::from_seed(3);
        let end = simulate_innings(&mut s, &mut source, 50).finish();
        assert_eq!(end, InningsEnd::AllOut);
        assert_eq!(s.wickets(), 10);
        assert_eq!(s.balls_bowled(), 10);
        assert_eq!(s.total(), 0);
        // Last man standing is never dismissed.
        assert_eq!(s.batters().iter().filter(|b| !b.dismissed).count(), 1);
    }

    #[test]
    fn test_early_stop_then_resume() {
        let mut s = state(11).with_wicket_threshold(0).unwrap();
        let mut source = RngSource::from_seed(11);
        {
            let mut overs = simulate_innings(&mut s, &mut source, 4);
            overs.next();
            overs.next();
        }
        assert!(s.is_active());
        assert_eq!(s.over(), 3);
        let rest: Vec<_> = simulate_innings(&mut s, &mut source, 4).collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].over, 3);
    }

    #[test]
    fn test_finish_on_terminal_state_reports_existing_end() {
        let mut s = state(2);
        let mut source = ScriptedSource::new([0]);
        simulate_ball(&mut s, &mut source).unwrap();
        assert_eq!(simulate_innings(&mut s, &mut source, 20).finish(), InningsEnd::AllOut);
    }
}
