//! Effect execution engine.
//!
//! Applies an effect list to the game state on behalf of an acting player.
//! Player choices go through the `DecisionMaker` seam and every answer is
//! validated here. Execution errors void the whole intent: the dispatch
//! layer restores the pre-intent state, so nothing in this module needs to
//! clean up after itself on the error path.

use crate::catalog::Catalog;
use crate::decision::DecisionMaker;
use crate::effect::{Effect, EffectResult};
use crate::game_loop::Intent;
use crate::game_state::{GameState, HistoryEntry};
use crate::ids::{PlayerId, SpaceId};
use crate::snapshot::GameSnapshot;
use crate::trace::TraceEvent;
use crate::turn::TurnStep;

/// Maximum repeat-chain depth. A sixth link is rejected.
pub const MAX_REPEAT_DEPTH: usize = 5;

/// Errors that can occur during effect execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionError {
    /// A repeat chain would exceed `MAX_REPEAT_DEPTH`.
    RecursionLimit,
    /// The decision maker declined a mandatory choice.
    DecisionDeclined { what: &'static str },
    /// The decision maker answered outside the offered options.
    InvalidChoice { what: &'static str },
    /// Referenced player does not exist.
    PlayerNotFound(PlayerId),
    /// Referenced action space is not in the catalog.
    UnknownAction(SpaceId),
    /// Nothing this turn can be rewound (raised when buying a rewind).
    NothingToRewind,
    /// Replaying the current placement after a rewind was illegal.
    RewindReplayFailed,
    /// The effect is an explicit design placeholder and cannot resolve.
    UnspecifiedEffect,
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionError::RecursionLimit => write!(
                f,
                "Repeat chain exceeds the maximum depth of {}",
                MAX_REPEAT_DEPTH
            ),
            ExecutionError::DecisionDeclined { what } => {
                write!(f, "Choice declined: {}", what)
            }
            ExecutionError::InvalidChoice { what } => {
                write!(f, "Invalid choice: {}", what)
            }
            ExecutionError::PlayerNotFound(id) => write!(f, "Player {} not found", id.0),
            ExecutionError::UnknownAction(id) => {
                write!(f, "Unknown action space {}", id.raw())
            }
            ExecutionError::NothingToRewind => {
                write!(f, "Nothing to rewind this turn")
            }
            ExecutionError::RewindReplayFailed => {
                write!(f, "Rewinding would make your placement illegal")
            }
            ExecutionError::UnspecifiedEffect => {
                write!(f, "This benefit is not defined yet")
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

/// Apply an effect list in order. Stops at the first error.
pub fn execute_effects(
    game: &mut GameState,
    catalog: &Catalog,
    acting: PlayerId,
    effects: &[Effect],
    decision_maker: &mut dyn DecisionMaker,
    depth: usize,
) -> Result<(), ExecutionError> {
    for effect in effects {
        execute_effect(game, catalog, acting, effect, decision_maker, depth)?;
    }
    Ok(())
}

/// Apply a single effect.
pub fn execute_effect(
    game: &mut GameState,
    catalog: &Catalog,
    acting: PlayerId,
    effect: &Effect,
    decision_maker: &mut dyn DecisionMaker,
    depth: usize,
) -> Result<EffectResult, ExecutionError> {
    match *effect {
        Effect::GainResource { color, amount } => {
            let player = game
                .player_mut(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?;
            player.ledger.add(color, amount);
            game.trace.push(TraceEvent::ResourcesGained {
                player: acting,
                color,
                amount,
            });
            Ok(EffectResult::Count(amount))
        }

        Effect::StealResource { color, amount } => {
            let candidates = game.other_players(acting);
            if candidates.is_empty() {
                return Ok(EffectResult::Count(0));
            }
            let target = decision_maker
                .choose_steal_target(game, acting, &candidates)
                .ok_or(ExecutionError::DecisionDeclined {
                    what: "steal target",
                })?;
            if !candidates.contains(&target) {
                return Err(ExecutionError::InvalidChoice {
                    what: "steal target",
                });
            }
            let available = game
                .player(target)
                .ok_or(ExecutionError::PlayerNotFound(target))?
                .ledger
                .amount(color);
            // Clamp to what the target actually holds.
            let taken = amount.min(available);
            if taken > 0 {
                game.player_mut(target)
                    .ok_or(ExecutionError::PlayerNotFound(target))?
                    .ledger
                    .remove(color, taken);
                game.player_mut(acting)
                    .ok_or(ExecutionError::PlayerNotFound(acting))?
                    .ledger
                    .add(color, taken);
            }
            game.trace.push(TraceEvent::ResourcesStolen {
                player: acting,
                from: target,
                color,
                amount: taken,
            });
            Ok(EffectResult::Count(taken))
        }

        Effect::RepeatAction => {
            if depth >= MAX_REPEAT_DEPTH {
                return Err(ExecutionError::RecursionLimit);
            }
            let round = game.turn.round;
            let options: Vec<SpaceId> = catalog
                .actions()
                .iter()
                .filter(|a| a.available_in(round))
                .map(|a| a.id)
                .collect();
            let choice = decision_maker
                .choose_action_to_repeat(game, acting, &options)
                .ok_or(ExecutionError::DecisionDeclined {
                    what: "action to repeat",
                })?;
            if !options.contains(&choice) {
                return Err(ExecutionError::InvalidChoice {
                    what: "action to repeat",
                });
            }
            let definition = catalog
                .action(choice)
                .ok_or(ExecutionError::UnknownAction(choice))?;
            game.trace.push(TraceEvent::ActionRepeated {
                player: acting,
                space: choice,
                depth: depth + 1,
            });
            execute_effects(
                game,
                catalog,
                acting,
                &definition.effects,
                decision_maker,
                depth + 1,
            )?;
            Ok(EffectResult::Resolved)
        }

        Effect::GrantExtraWorker => {
            let player = game
                .player_mut(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?;
            player.workers_left += 1;
            game.turn.worker_placed_this_turn = false;
            // A fresh placement opportunity re-opens the pre window.
            if game.turn.step == TurnStep::AwaitingShopOrEndTurn {
                game.turn.step = TurnStep::AwaitingWorkerPlacement;
                game.turn.begin_window();
            }
            game.trace
                .push(TraceEvent::ExtraWorkerGranted { player: acting });
            Ok(EffectResult::Resolved)
        }

        Effect::GrantExtraTurn => {
            let player = game
                .player_mut(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?;
            player.pending_extra_turns += 1;
            game.trace
                .push(TraceEvent::ExtraTurnGranted { player: acting });
            Ok(EffectResult::Resolved)
        }

        Effect::AdjustShopCosts { delta } => {
            let player = game
                .player_mut(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?;
            player.shop_cost_modifier += delta;
            game.trace.push(TraceEvent::ShopCostsAdjusted {
                player: acting,
                delta,
            });
            Ok(EffectResult::Resolved)
        }

        Effect::RewindLastAction => rewind_last_action(game, acting),

        Effect::GainVictory { amount } => {
            let player = game
                .player_mut(acting)
                .ok_or(ExecutionError::PlayerNotFound(acting))?;
            player.victory_points += amount;
            game.trace.push(TraceEvent::VictoryAwarded {
                player: acting,
                amount,
            });
            Ok(EffectResult::Count(amount))
        }

        Effect::Unspecified => Err(ExecutionError::UnspecifiedEffect),
    }
}

/// Where a rewind would cut the history, and whether the current pending
/// placement must be replayed afterwards.
fn rewind_bounds(game: &GameState) -> (usize, Option<SpaceId>) {
    let mark = game.turn.history_mark;
    let mut end = game.history.len();
    let mut replay = None;

    // A pending placement's own history entry is not a rewind target.
    if let Some(space) = game.turn.pending_action {
        if end > mark
            && matches!(
                game.history[end - 1].intent,
                Intent::PlaceWorker { space: placed } if placed == space
            )
        {
            end -= 1;
            replay = Some(space);
        }
    }

    (end, replay)
}

/// Whether the acting player has anything to rewind this turn.
pub fn can_rewind(game: &GameState) -> bool {
    let (end, _) = rewind_bounds(game);
    end > game.turn.history_mark
}

/// Revert the acting player's most recent committed intent this turn.
///
/// When this runs while resolving a placed action, the placement is replayed
/// on top of the restored state so the rewinding worker stays spent. With no
/// target the effect resolves as a no-op: failing the resolution here would
/// leave the pending action permanently unresolvable.
fn rewind_last_action(
    game: &mut GameState,
    acting: PlayerId,
) -> Result<EffectResult, ExecutionError> {
    let mark = game.turn.history_mark;
    let (end, replay) = rewind_bounds(game);

    if end <= mark {
        return Ok(EffectResult::Count(0));
    }

    let target = game.history[end - 1].before.clone();
    game.history.truncate(end - 1);
    target.restore(game);

    if let Some(space) = replay {
        replay_placement(game, acting, space)?;
    }

    game.trace.push(TraceEvent::ActionRewound { player: acting });
    Ok(EffectResult::Resolved)
}

/// Re-apply the placement that carried a rewind, on the restored state.
fn replay_placement(
    game: &mut GameState,
    acting: PlayerId,
    space: SpaceId,
) -> Result<(), ExecutionError> {
    if game.turn.step != TurnStep::AwaitingWorkerPlacement
        || game.turn.worker_placed_this_turn
        || game.turn.active_player != acting
    {
        return Err(ExecutionError::RewindReplayFailed);
    }
    let round = game.turn.round;
    let before = GameSnapshot::capture(game);
    if game.board.occupy(space, acting, round).is_err() {
        return Err(ExecutionError::RewindReplayFailed);
    }
    let player = game
        .player_mut(acting)
        .ok_or(ExecutionError::PlayerNotFound(acting))?;
    if !player.has_workers() {
        return Err(ExecutionError::RewindReplayFailed);
    }
    player.workers_left -= 1;
    game.turn.pending_action = Some(space);
    game.turn.worker_placed_this_turn = true;
    game.turn.step = TurnStep::WorkerPlaced;
    game.history.push(HistoryEntry {
        intent: Intent::PlaceWorker { space },
        before,
    });
    game.trace.push(TraceEvent::WorkerPlaced {
        player: acting,
        space,
    });
    Ok(())
}
