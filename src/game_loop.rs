//! Intent dispatch: the request/validate/apply loop.
//!
//! The UI (or any other driver) submits an `Intent` for the active player;
//! `apply_intent` validates it, applies it, and advances the turn state.
//! Application is all-or-nothing: on any rejection the game state is
//! restored to exactly what it was before the intent, and the only mark
//! left behind is an `IntentRejected` trace event carrying the
//! user-visible message.

use crate::board::PlacementError;
use crate::catalog::Catalog;
use crate::decision::DecisionMaker;
use crate::effect::Effect;
use crate::executor::{ExecutionError, execute_effects};
use crate::game_state::{GameState, GameStatus, HistoryEntry};
use crate::ids::{PlayerId, ShopId, SpaceId};
use crate::shop::{self, ShopError};
use crate::snapshot::GameSnapshot;
use crate::trace::TraceEvent;
use crate::turn::{TurnError, TurnStep, advance_turn};

/// An intent submitted on behalf of the active player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Place a worker on an action space.
    PlaceWorker { space: SpaceId },
    /// Resolve the pending placed action.
    ResolveAction,
    /// Buy a shop entry (regular or victory).
    BuyShop { shop: ShopId },
    /// End the turn.
    EndTurn,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::PlaceWorker { space } => {
                write!(f, "place a worker on space {}", space.raw())
            }
            Intent::ResolveAction => write!(f, "resolve the placed action"),
            Intent::BuyShop { shop } => write!(f, "buy the {}", shop),
            Intent::EndTurn => write!(f, "end the turn"),
        }
    }
}

/// Any rules-level rejection, with a user-displayable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesError {
    Placement(PlacementError),
    Turn(TurnError),
    Shop(ShopError),
    Execution(ExecutionError),
}

impl std::fmt::Display for RulesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesError::Placement(e) => e.fmt(f),
            RulesError::Turn(e) => e.fmt(f),
            RulesError::Shop(e) => e.fmt(f),
            RulesError::Execution(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for RulesError {}

impl From<PlacementError> for RulesError {
    fn from(e: PlacementError) -> Self {
        RulesError::Placement(e)
    }
}

impl From<TurnError> for RulesError {
    fn from(e: TurnError) -> Self {
        RulesError::Turn(e)
    }
}

impl From<ShopError> for RulesError {
    fn from(e: ShopError) -> Self {
        RulesError::Shop(e)
    }
}

impl From<ExecutionError> for RulesError {
    fn from(e: ExecutionError) -> Self {
        RulesError::Execution(e)
    }
}

/// What a successfully applied intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Placed { space: SpaceId },
    Resolved { space: SpaceId },
    Purchased { shop: ShopId },
    TurnPassed,
    GameFinished { winner: PlayerId },
}

/// Validate and apply one intent for the active player.
pub fn apply_intent(
    game: &mut GameState,
    catalog: &Catalog,
    intent: Intent,
    decision_maker: &mut dyn DecisionMaker,
) -> Result<IntentOutcome, RulesError> {
    let acting = game.turn.active_player;
    if game.is_finished() {
        let err = RulesError::Turn(TurnError::GameOver);
        game.trace.push(TraceEvent::IntentRejected {
            player: acting,
            reason: err.to_string(),
        });
        return Err(err);
    }

    let saved = game.clone();
    match dispatch(game, catalog, intent, decision_maker) {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            *game = saved;
            game.trace.push(TraceEvent::IntentRejected {
                player: acting,
                reason: err.to_string(),
            });
            Err(err)
        }
    }
}

fn dispatch(
    game: &mut GameState,
    catalog: &Catalog,
    intent: Intent,
    decision_maker: &mut dyn DecisionMaker,
) -> Result<IntentOutcome, RulesError> {
    let acting = game.turn.active_player;
    let before = GameSnapshot::capture(game);

    match intent {
        Intent::PlaceWorker { space } => {
            match game.turn.step {
                TurnStep::AwaitingWorkerPlacement => {}
                TurnStep::WorkerPlaced => return Err(TurnError::ActionPending.into()),
                TurnStep::AwaitingShopOrEndTurn => {
                    return Err(TurnError::WorkerAlreadyPlaced.into());
                }
                TurnStep::TurnEnded => return Err(TurnError::GameOver.into()),
            }
            if game.turn.worker_placed_this_turn {
                return Err(TurnError::WorkerAlreadyPlaced.into());
            }
            let player = game
                .player(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?;
            if !player.has_workers() {
                return Err(TurnError::NoWorkersLeft.into());
            }

            game.board.occupy(space, acting, game.turn.round)?;
            game.player_mut(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?
                .workers_left -= 1;
            game.turn.pending_action = Some(space);
            game.turn.worker_placed_this_turn = true;
            game.turn.step = TurnStep::WorkerPlaced;
            game.history.push(HistoryEntry { intent, before });
            game.trace.push(TraceEvent::WorkerPlaced {
                player: acting,
                space,
            });
            Ok(IntentOutcome::Placed { space })
        }

        Intent::ResolveAction => {
            if game.turn.step != TurnStep::WorkerPlaced {
                return Err(TurnError::NoActionPending.into());
            }
            let space = game
                .turn
                .pending_action
                .ok_or(TurnError::NoActionPending)?;
            let definition = catalog
                .action(space)
                .ok_or(ExecutionError::UnknownAction(space))?;

            execute_effects(
                game,
                catalog,
                acting,
                &definition.effects,
                decision_maker,
                0,
            )?;

            game.turn.pending_action = None;
            // An extra-worker effect clears the placed flag, re-opening
            // placement; otherwise move on to the post window.
            game.turn.step = if game.turn.worker_placed_this_turn {
                TurnStep::AwaitingShopOrEndTurn
            } else {
                TurnStep::AwaitingWorkerPlacement
            };
            game.turn.begin_window();
            game.history.push(HistoryEntry { intent, before });
            game.trace.push(TraceEvent::ActionResolved {
                player: acting,
                space,
            });
            Ok(IntentOutcome::Resolved { space })
        }

        Intent::BuyShop { shop } => {
            shop::purchase(game, catalog, shop, decision_maker)?;
            game.history.push(HistoryEntry { intent, before });
            Ok(IntentOutcome::Purchased { shop })
        }

        Intent::EndTurn => {
            if game.turn.step == TurnStep::WorkerPlaced {
                return Err(TurnError::ActionPending.into());
            }
            game.trace.push(TraceEvent::TurnEnded { player: acting });
            game.history.push(HistoryEntry { intent, before });
            advance_turn(game);
            match game.status {
                GameStatus::Finished { winner } => Ok(IntentOutcome::GameFinished { winner }),
                GameStatus::InProgress => Ok(IntentOutcome::TurnPassed),
            }
        }
    }
}

/// Everything the active player could legally do right now.
///
/// This is the UI boundary: placements on open round-eligible spaces, the
/// pending resolution, affordable phase-legal purchases, and ending the
/// turn.
pub fn legal_intents(game: &GameState, catalog: &Catalog) -> Vec<Intent> {
    if game.is_finished() {
        return Vec::new();
    }

    let mut intents = Vec::new();
    let turn = &game.turn;
    let player = game.active_player();

    if turn.step == TurnStep::AwaitingWorkerPlacement
        && !turn.worker_placed_this_turn
        && player.has_workers()
    {
        for space in game.board.available(turn.round) {
            intents.push(Intent::PlaceWorker { space: space.id });
        }
    }

    if turn.step == TurnStep::WorkerPlaced {
        intents.push(Intent::ResolveAction);
    }

    for color in crate::color::Color::ALL {
        if let Some(entry) = catalog.regular_shop(color, turn.round) {
            let window_open =
                turn.step.is_shop_window() && turn.regular_purchases_this_window < 1;
            let bypass_open = turn.step == TurnStep::WorkerPlaced && entry.bypass;
            let resolvable = !entry.effects.contains(&Effect::Unspecified)
                && (!entry.effects.contains(&Effect::RewindLastAction)
                    || crate::executor::can_rewind(game));
            if (window_open || bypass_open)
                && resolvable
                && entry.cost.can_pay(&player.ledger, player.shop_cost_modifier)
            {
                intents.push(Intent::BuyShop { shop: entry.id });
            }
        }
        if let Some(entry) = catalog.victory_shop(color) {
            if entry.cost.can_pay(&player.ledger, player.shop_cost_modifier) {
                intents.push(Intent::BuyShop { shop: entry.id });
            }
        }
    }

    if turn.step != TurnStep::WorkerPlaced {
        intents.push(Intent::EndTurn);
    }

    intents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::decision::AutoDecisionMaker;
    use crate::game_state::GameConfig;

    fn test_game() -> GameState {
        GameState::new(&["Alice", "Bob"], GameConfig::default(), Catalog::standard()).unwrap()
    }

    fn place_and_resolve(game: &mut GameState, raw: u32) {
        apply_intent(
            game,
            Catalog::standard(),
            Intent::PlaceWorker {
                space: SpaceId::from_raw(raw),
            },
            &mut AutoDecisionMaker,
        )
        .unwrap();
        apply_intent(
            game,
            Catalog::standard(),
            Intent::ResolveAction,
            &mut AutoDecisionMaker,
        )
        .unwrap();
    }

    #[test]
    fn test_place_and_resolve_flow() {
        let mut game = test_game();
        place_and_resolve(&mut game, 1);
        assert_eq!(game.players[0].ledger.amount(Color::Red), 2);
        assert_eq!(game.players[0].workers_left, 1);
        assert_eq!(game.turn.step, TurnStep::AwaitingShopOrEndTurn);
    }

    #[test]
    fn test_placement_on_occupied_space_is_a_noop() {
        let mut game = test_game();
        place_and_resolve(&mut game, 1);
        apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::EndTurn,
            &mut AutoDecisionMaker,
        )
        .unwrap();

        let before_players = game.players.clone();
        let before_board = game.board.clone();
        let err = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::PlaceWorker {
                space: SpaceId::from_raw(1),
            },
            &mut AutoDecisionMaker,
        )
        .unwrap_err();
        assert_eq!(
            err,
            RulesError::Placement(PlacementError::AlreadyOccupied {
                space: SpaceId::from_raw(1)
            })
        );
        assert_eq!(game.players, before_players);
        assert_eq!(game.board, before_board);
    }

    #[test]
    fn test_second_placement_in_turn_rejected() {
        let mut game = test_game();
        place_and_resolve(&mut game, 1);
        let err = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::PlaceWorker {
                space: SpaceId::from_raw(3),
            },
            &mut AutoDecisionMaker,
        )
        .unwrap_err();
        assert_eq!(err, RulesError::Turn(TurnError::WorkerAlreadyPlaced));
    }

    #[test]
    fn test_resolve_without_pending_action_rejected() {
        let mut game = test_game();
        let err = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::ResolveAction,
            &mut AutoDecisionMaker,
        )
        .unwrap_err();
        assert_eq!(err, RulesError::Turn(TurnError::NoActionPending));
    }

    #[test]
    fn test_end_turn_with_pending_action_rejected() {
        let mut game = test_game();
        apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::PlaceWorker {
                space: SpaceId::from_raw(1),
            },
            &mut AutoDecisionMaker,
        )
        .unwrap();
        let err = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::EndTurn,
            &mut AutoDecisionMaker,
        )
        .unwrap_err();
        assert_eq!(err, RulesError::Turn(TurnError::ActionPending));
    }

    #[test]
    fn test_end_turn_rotates_to_next_player() {
        let mut game = test_game();
        let outcome = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::EndTurn,
            &mut AutoDecisionMaker,
        )
        .unwrap();
        assert_eq!(outcome, IntentOutcome::TurnPassed);
        assert_eq!(game.turn.active_player, PlayerId::from_index(1));
    }

    #[test]
    fn test_rejection_records_trace_event() {
        let mut game = test_game();
        let _ = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::ResolveAction,
            &mut AutoDecisionMaker,
        );
        let last = game.trace.events().last().unwrap();
        assert!(matches!(last, TraceEvent::IntentRejected { .. }));
    }

    #[test]
    fn test_legal_intents_at_turn_start() {
        let game = test_game();
        let intents = legal_intents(&game, Catalog::standard());
        // All round-1 spaces are open, no shop is affordable, end turn is
        // always possible.
        let placements = intents
            .iter()
            .filter(|i| matches!(i, Intent::PlaceWorker { .. }))
            .count();
        assert_eq!(placements, game.board.available(1).count());
        assert!(intents.contains(&Intent::EndTurn));
        assert!(!intents.iter().any(|i| matches!(i, Intent::BuyShop { .. })));
    }

    #[test]
    fn test_legal_intents_while_action_pending() {
        let mut game = test_game();
        game.players[0].ledger.add(Color::Yellow, 2);
        apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::PlaceWorker {
                space: SpaceId::from_raw(1),
            },
            &mut AutoDecisionMaker,
        )
        .unwrap();
        let intents = legal_intents(&game, Catalog::standard());
        assert!(intents.contains(&Intent::ResolveAction));
        assert!(!intents.contains(&Intent::EndTurn));
        // Only bypass (Blue) regular entries are offered mid-placement.
        for intent in &intents {
            if let Intent::BuyShop {
                shop: ShopId::Regular { color, .. },
            } = intent
            {
                assert_eq!(*color, Color::Blue);
            }
        }
    }

    #[test]
    fn test_no_intents_after_game_over() {
        let mut game = test_game();
        game.status = GameStatus::Finished {
            winner: PlayerId::from_index(0),
        };
        assert!(legal_intents(&game, Catalog::standard()).is_empty());
        let err = apply_intent(
            &mut game,
            Catalog::standard(),
            Intent::EndTurn,
            &mut AutoDecisionMaker,
        )
        .unwrap_err();
        assert_eq!(err, RulesError::Turn(TurnError::GameOver));
    }
}
