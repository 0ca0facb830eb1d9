//! Turn structure for the worker-placement loop.
//!
//! This module handles:
//! - The per-turn step machine (placement, pending action, shop windows)
//! - Turn rotation, honoring extra turns and skipping exhausted players
//! - Round boundaries (occupancy reset, worker refresh, game end)

use crate::game_state::{GameState, GameStatus};
use crate::ids::{PlayerId, SpaceId};
use crate::trace::TraceEvent;

/// Errors that can occur during turn progression and step validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// The intent is not legal in the current step.
    WrongStep { step: TurnStep },
    /// A worker was already placed this turn.
    WorkerAlreadyPlaced,
    /// The player has no workers left to place.
    NoWorkersLeft,
    /// A placed action is waiting to be resolved.
    ActionPending,
    /// There is no placed action to resolve.
    NoActionPending,
    /// The game has already finished.
    GameOver,
}

impl std::fmt::Display for TurnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnError::WrongStep { step } => write!(f, "Not allowed during {}", step),
            TurnError::WorkerAlreadyPlaced => {
                write!(f, "You already placed a worker this turn")
            }
            TurnError::NoWorkersLeft => write!(f, "You have no workers left"),
            TurnError::ActionPending => write!(f, "Resolve your placed action first"),
            TurnError::NoActionPending => write!(f, "No placed action to resolve"),
            TurnError::GameOver => write!(f, "The game is over"),
        }
    }
}

impl std::error::Error for TurnError {}

/// The steps a turn moves through.
///
/// Regular shop purchases are legal in the pre window
/// (`AwaitingWorkerPlacement`) and the post window (`AwaitingShopOrEndTurn`).
/// While an action is pending (`WorkerPlaced`) only bypass-tagged and
/// victory entries may be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    AwaitingWorkerPlacement,
    WorkerPlaced,
    AwaitingShopOrEndTurn,
    TurnEnded,
}

impl TurnStep {
    /// True for the pre/post windows in which regular purchases are legal.
    pub fn is_shop_window(self) -> bool {
        matches!(
            self,
            TurnStep::AwaitingWorkerPlacement | TurnStep::AwaitingShopOrEndTurn
        )
    }
}

impl std::fmt::Display for TurnStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnStep::AwaitingWorkerPlacement => "worker placement (pre-shop window)",
            TurnStep::WorkerPlaced => "action resolution",
            TurnStep::AwaitingShopOrEndTurn => "the post-shop window",
            TurnStep::TurnEnded => "the end of the game",
        };
        f.write_str(name)
    }
}

/// Mutable turn/phase state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub active_player: PlayerId,
    /// Current round, 1-based.
    pub round: u8,
    pub step: TurnStep,
    /// A placed but not yet resolved action.
    pub pending_action: Option<SpaceId>,
    pub worker_placed_this_turn: bool,
    /// Regular purchases made in the current shop window.
    pub regular_purchases_this_window: u32,
    /// Index into the intent history where this turn began.
    pub history_mark: usize,
}

impl TurnState {
    pub fn new(active_player: PlayerId) -> Self {
        Self {
            active_player,
            round: 1,
            step: TurnStep::AwaitingWorkerPlacement,
            pending_action: None,
            worker_placed_this_turn: false,
            regular_purchases_this_window: 0,
            history_mark: 0,
        }
    }

    /// Open a fresh shop window (resets the per-window purchase count).
    pub fn begin_window(&mut self) {
        self.regular_purchases_this_window = 0;
    }
}

/// Start a turn for the given player.
pub fn begin_turn(game: &mut GameState, player: PlayerId) {
    game.turn.active_player = player;
    game.turn.step = TurnStep::AwaitingWorkerPlacement;
    game.turn.pending_action = None;
    game.turn.worker_placed_this_turn = false;
    game.turn.begin_window();
    game.turn.history_mark = game.history.len();
}

/// Advance past the end of the active player's turn.
///
/// Honors pending extra turns (forfeited if the owner has no workers left),
/// skips exhausted players, and triggers the round boundary when nobody can
/// place any more workers.
pub fn advance_turn(game: &mut GameState) {
    let current = game.turn.active_player;

    let takes_extra_turn = match game.player_mut(current) {
        Some(player) if player.pending_extra_turns > 0 => {
            player.pending_extra_turns -= 1;
            if player.has_workers() {
                true
            } else {
                // Useless without workers, and they don't survive the round
                // boundary either.
                player.pending_extra_turns = 0;
                false
            }
        }
        _ => false,
    };
    if takes_extra_turn {
        game.trace.push(TraceEvent::ExtraTurnTaken { player: current });
        begin_turn(game, current);
        return;
    }

    // A saturated board ends the round even if workers are left over;
    // they have nowhere to go and cannot be discarded.
    let board_open = game.board.available(game.turn.round).next().is_some();
    if board_open {
        let count = game.players.len();
        for offset in 1..=count {
            let index = (current.index() + offset) % count;
            if game.players[index].has_workers() {
                begin_turn(game, PlayerId::from_index(index as u8));
                return;
            }
        }
    }

    end_round(game);
}

/// Close the current round: either refresh for the next one or finish the
/// game after the final round.
fn end_round(game: &mut GameState) {
    if game.turn.round >= game.config.rounds {
        let winner = game.compute_winner();
        game.status = GameStatus::Finished { winner };
        game.turn.step = TurnStep::TurnEnded;
        game.turn.pending_action = None;
        game.trace.push(TraceEvent::GameFinished { winner });
        return;
    }

    game.turn.round += 1;
    game.board.reset_for_round();
    for player in &mut game.players {
        player.workers_left = game.config.workers_per_round;
        player.pending_extra_turns = 0;
    }
    // Occupancy is gone; snapshots from the previous round are meaningless.
    game.history.clear();
    game.trace.push(TraceEvent::RoundAdvanced {
        round: game.turn.round,
    });

    let start = (game.turn.round as usize - 1) % game.players.len();
    begin_turn(game, PlayerId::from_index(start as u8));
}
