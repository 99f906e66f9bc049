//! Adversarial search: minimax, alpha-beta pruning and best-move selection
//! over a caller-supplied two-player, zero-sum, perfect-information game.
//!
//! The engine never mutates a shared board: [`GameState::apply`] produces a
//! fresh value per ply, so recursive branches cannot alias each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::resources::ResourceTracker;
use crate::search::{SearchError, SearchOptions};

pub mod tictactoe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Terminal verdict of a game state.
pub enum Outcome {
    MaxWins,
    MinWins,
    Draw,
}

impl Outcome {
    /// Signed score seen by the maximizer: +1 / -1 / 0.
    pub fn score(self) -> i32 {
        match self {
            Outcome::MaxWins => 1,
            Outcome::MinWins => -1,
            Outcome::Draw => 0,
        }
    }
}

/// A two-player, zero-sum, perfect-information game position.
///
/// Contract: a state with no legal moves must be terminal
/// (`outcome()` returns `Some`); the engine scores a moveless non-terminal
/// state as a draw. `legal_moves` must enumerate deterministically; its
/// order defines the tie-break of [`best_move`].
pub trait GameState: Sized {
    type Move: Copy + fmt::Debug;

    fn legal_moves(&self) -> Vec<Self::Move>;
    /// Play `mv` (which must come from `legal_moves`) and return the
    /// resulting position as a new value.
    fn apply(&self, mv: Self::Move) -> Self;
    fn outcome(&self) -> Option<Outcome>;
}

/// Full-tree minimax value of `state`.
///
/// `maximizing` says whose turn it is at the root. No pruning: cost is
/// branching-factor^depth. Depth is checked against
/// `SearchLimits::max_depth` each ply.
pub fn minimax<S: GameState>(
    state: &S,
    maximizing: bool,
    opts: &SearchOptions<'_>,
) -> Result<i32, SearchError> {
    let mut tracker = ResourceTracker::new(opts);
    minimax_value(state, maximizing, 0, &mut tracker)
}

fn minimax_value<S: GameState>(
    state: &S,
    maximizing: bool,
    depth: u32,
    tracker: &mut ResourceTracker<'_>,
) -> Result<i32, SearchError> {
    if let Some(outcome) = state.outcome() {
        return Ok(outcome.score());
    }
    tracker.check_depth(depth)?;
    tracker.bump_expansions("minimax", 1)?;

    let moves = state.legal_moves();
    if moves.is_empty() {
        return Ok(0);
    }

    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in moves {
        let value = minimax_value(&state.apply(mv), !maximizing, depth + 1, tracker)?;
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }
    Ok(best)
}

/// Alpha-beta value of `state`: numerically identical to [`minimax`] on
/// every reachable position, with siblings pruned once `beta <= alpha`.
///
/// `alpha` is the value the maximizer is already guaranteed along the
/// current line, `beta` the minimizer's counterpart; start a fresh search
/// with `(i32::MIN, i32::MAX)`.
pub fn alpha_beta<S: GameState>(
    state: &S,
    maximizing: bool,
    alpha: i32,
    beta: i32,
    opts: &SearchOptions<'_>,
) -> Result<i32, SearchError> {
    let mut tracker = ResourceTracker::new(opts);
    alpha_beta_value(state, maximizing, alpha, beta, 0, &mut tracker)
}

fn alpha_beta_value<S: GameState>(
    state: &S,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    depth: u32,
    tracker: &mut ResourceTracker<'_>,
) -> Result<i32, SearchError> {
    if let Some(outcome) = state.outcome() {
        return Ok(outcome.score());
    }
    tracker.check_depth(depth)?;
    tracker.bump_expansions("alpha_beta", 1)?;

    let moves = state.legal_moves();
    if moves.is_empty() {
        return Ok(0);
    }

    if maximizing {
        let mut best = i32::MIN;
        for mv in moves {
            let value =
                alpha_beta_value(&state.apply(mv), false, alpha, beta, depth + 1, tracker)?;
            best = best.max(value);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let value = alpha_beta_value(&state.apply(mv), true, alpha, beta, depth + 1, tracker)?;
            best = best.min(value);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// A chosen root move and its alpha-beta score.
pub struct BestMove<M> {
    pub mv: M,
    pub score: i32,
}

/// Evaluate every legal root move with a fresh `(MIN, MAX)` alpha-beta
/// window and keep the extremal one.
///
/// Ties keep the first move in `legal_moves` enumeration order (for the
/// shipped board that is row-major, then column), so repeated runs pick the
/// same move. Returns `None` when there are no legal moves.
pub fn best_move<S: GameState>(
    state: &S,
    maximizing: bool,
    opts: &SearchOptions<'_>,
) -> Result<Option<BestMove<S::Move>>, SearchError> {
    let mut tracker = ResourceTracker::new(opts);
    let mut best: Option<BestMove<S::Move>> = None;

    for mv in state.legal_moves() {
        let value = alpha_beta_value(
            &state.apply(mv),
            !maximizing,
            i32::MIN,
            i32::MAX,
            1,
            &mut tracker,
        )?;
        let better = match &best {
            None => true,
            Some(b) if maximizing => value > b.score,
            Some(b) => value < b.score,
        };
        if better {
            best = Some(BestMove { mv, score: value });
        }
    }

    Ok(best)
}
