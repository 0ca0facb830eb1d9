//! Central game state container.

use crate::board::Board;
use crate::catalog::{Catalog, ROUNDS};
use crate::ids::PlayerId;
use crate::player::Player;
use crate::snapshot::GameSnapshot;
use crate::trace::Trace;
use crate::turn::TurnState;

/// Most players a single board supports.
pub const MAX_PLAYERS: usize = 4;

/// Rule knobs fixed at game creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Workers each player receives at the start of every round.
    pub workers_per_round: u32,
    /// Rounds played before the game ends.
    pub rounds: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            workers_per_round: 2,
            rounds: ROUNDS,
        }
    }
}

/// Errors from game creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    NoPlayers,
    TooManyPlayers { count: usize },
    NoWorkers,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::NoPlayers => write!(f, "A game needs at least one player"),
            SetupError::TooManyPlayers { count } => {
                write!(f, "A game supports at most {} players, got {}", MAX_PLAYERS, count)
            }
            SetupError::NoWorkers => write!(f, "Players need at least one worker per round"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Whether the game is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished { winner: PlayerId },
}

/// One committed intent plus the state snapshot taken just before it.
///
/// The rewind effect restores these snapshots; history is bounded to the
/// current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub intent: crate::game_loop::Intent,
    pub before: GameSnapshot,
}

/// The complete mutable state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub players: Vec<Player>,
    pub board: Board,
    pub turn: TurnState,
    pub status: GameStatus,
    pub config: GameConfig,
    /// Committed intents this round, oldest first.
    pub history: Vec<HistoryEntry>,
    pub trace: Trace,
}

impl GameState {
    /// Create a game with the given players, starting with the first.
    pub fn new(
        names: &[impl AsRef<str>],
        config: GameConfig,
        catalog: &Catalog,
    ) -> Result<Self, SetupError> {
        if names.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if names.len() > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers { count: names.len() });
        }
        if config.workers_per_round == 0 {
            return Err(SetupError::NoWorkers);
        }

        let players = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                Player::new(
                    PlayerId::from_index(index as u8),
                    name.as_ref(),
                    config.workers_per_round,
                )
            })
            .collect();

        Ok(Self {
            players,
            board: Board::from_catalog(catalog),
            turn: TurnState::new(PlayerId::from_index(0)),
            status: GameStatus::InProgress,
            config,
            history: Vec::new(),
            trace: Trace::new(),
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.turn.active_player.index()]
    }

    /// All players other than `id`, in cyclic seating order starting after it.
    pub fn other_players(&self, id: PlayerId) -> Vec<PlayerId> {
        let count = self.players.len();
        (1..count)
            .map(|offset| PlayerId::from_index(((id.index() + offset) % count) as u8))
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    /// Decide the winner: most victory points, then most total resources,
    /// then earliest in turn order.
    pub fn compute_winner(&self) -> PlayerId {
        let mut best = &self.players[0];
        for player in &self.players[1..] {
            let better = (player.victory_points, player.ledger.total())
                > (best.victory_points, best.ledger.total());
            if better {
                best = player;
            }
        }
        best.id
    }

    /// One-screen human-readable summary, used by the CLI's `state` command.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Round {}/{}, {} to move ({})\n",
            self.turn.round,
            self.config.rounds,
            self.active_player().name,
            self.turn.step
        ));
        for player in &self.players {
            out.push_str(&format!(
                "  {}: {} VP, {} workers, modifier {:+}, holds {}\n",
                player.name,
                player.victory_points,
                player.workers_left,
                player.shop_cost_modifier,
                player.ledger
            ));
        }
        if let GameStatus::Finished { winner } = self.status {
            out.push_str(&format!(
                "  winner: {}\n",
                self.players[winner.index()].name
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn game_with(names: &[&str]) -> GameState {
        GameState::new(names, GameConfig::default(), Catalog::standard()).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = game_with(&["Alice", "Bob"]);
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.turn.active_player, PlayerId::from_index(0));
        assert_eq!(game.status, GameStatus::InProgress);
        assert!(game.players.iter().all(|p| p.workers_left == 2));
    }

    #[test]
    fn test_new_game_validates_player_count() {
        let names: [&str; 0] = [];
        assert_eq!(
            GameState::new(&names, GameConfig::default(), Catalog::standard()).unwrap_err(),
            SetupError::NoPlayers
        );
        let too_many = ["a", "b", "c", "d", "e"];
        assert_eq!(
            GameState::new(&too_many, GameConfig::default(), Catalog::standard()).unwrap_err(),
            SetupError::TooManyPlayers { count: 5 }
        );
    }

    #[test]
    fn test_new_game_validates_workers() {
        let config = GameConfig {
            workers_per_round: 0,
            rounds: 3,
        };
        assert_eq!(
            GameState::new(&["Alice"], config, Catalog::standard()).unwrap_err(),
            SetupError::NoWorkers
        );
    }

    #[test]
    fn test_other_players_cyclic_order() {
        let game = game_with(&["a", "b", "c"]);
        assert_eq!(
            game.other_players(PlayerId::from_index(1)),
            vec![PlayerId::from_index(2), PlayerId::from_index(0)]
        );
    }

    #[test]
    fn test_compute_winner_by_victory_points() {
        let mut game = game_with(&["Alice", "Bob"]);
        game.players[1].victory_points = 3;
        assert_eq!(game.compute_winner(), PlayerId::from_index(1));
    }

    #[test]
    fn test_compute_winner_resource_tiebreak() {
        let mut game = game_with(&["Alice", "Bob"]);
        game.players[0].victory_points = 3;
        game.players[1].victory_points = 3;
        game.players[1].ledger.add(Color::Green, 2);
        assert_eq!(game.compute_winner(), PlayerId::from_index(1));
    }

    #[test]
    fn test_compute_winner_seat_order_tiebreak() {
        let game = game_with(&["Alice", "Bob"]);
        assert_eq!(game.compute_winner(), PlayerId::from_index(0));
    }

    #[test]
    fn test_summary_mentions_players() {
        let game = game_with(&["Alice", "Bob"]);
        let summary = game.summary();
        assert!(summary.contains("Alice"));
        assert!(summary.contains("Bob"));
        assert!(summary.contains("Round 1/3"));
    }
}
