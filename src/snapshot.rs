//! Game state snapshots.
//!
//! A snapshot captures everything the rules can mutate — players, board
//! occupancy, turn state, status — but not the intent history (which holds
//! snapshots itself) and not the trace (observability survives rewinds).
//!
//! Snapshots back the rewind effect: each committed intent records the state
//! it started from, and `RewindLastAction` restores one of those records.

use crate::board::Board;
use crate::game_state::{GameState, GameStatus};
use crate::player::Player;
use crate::turn::TurnState;

/// A restorable copy of the mutable game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    players: Vec<Player>,
    board: Board,
    turn: TurnState,
    status: GameStatus,
}

impl GameSnapshot {
    /// Capture the current state.
    pub fn capture(game: &GameState) -> Self {
        Self {
            players: game.players.clone(),
            board: game.board.clone(),
            turn: game.turn.clone(),
            status: game.status,
        }
    }

    /// Restore this snapshot into the game, leaving history and trace alone.
    pub fn restore(&self, game: &mut GameState) {
        game.players = self.players.clone();
        game.board = self.board.clone();
        game.turn = self.turn.clone();
        game.status = self.status;
    }
}
