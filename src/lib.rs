pub mod board;
pub mod catalog;
pub mod color;
pub mod cost;
pub mod decision;
pub mod effect;
pub mod executor;
pub mod game_loop;
pub mod game_state;
pub mod ids;
pub mod player;
pub mod shop;
pub mod snapshot;
pub mod trace;
pub mod turn;

#[cfg(test)]
mod tests;

pub use board::{ActionSpace, Board, PlacementError};
pub use catalog::{
    ActionDefinition, Catalog, ROUNDS, ShopEntry, VICTORY_COST, VICTORY_POINTS,
};
pub use color::{Color, ColorSet};
pub use cost::ShopCost;
pub use decision::{
    AutoDecisionMaker, CliDecisionMaker, DecisionMaker, RandomDecisionMaker,
    ScriptedDecisionMaker,
};
pub use effect::{Effect, EffectResult, describe_effects};
pub use executor::{
    ExecutionError, MAX_REPEAT_DEPTH, can_rewind, execute_effect, execute_effects,
};
pub use game_loop::{Intent, IntentOutcome, RulesError, apply_intent, legal_intents};
pub use game_state::{
    GameConfig, GameState, GameStatus, HistoryEntry, MAX_PLAYERS, SetupError,
};
pub use ids::{PlayerId, ShopId, SpaceId};
pub use player::{Player, ResourceLedger};
pub use shop::ShopError;
pub use snapshot::GameSnapshot;
pub use trace::{Trace, TraceEvent};
pub use turn::{TurnError, TurnState, TurnStep, advance_turn, begin_turn};
