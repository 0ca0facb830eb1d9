//! Shop purchase validation and resolution.
//!
//! Regular entries are tied to their round and to the pre/post shop windows
//! (one purchase per window), except bypass-tagged entries which may also be
//! bought while an action is pending. Victory entries ignore phases and
//! limits entirely.
//!
//! Payment normally precedes the benefit, so a purchase can never fund
//! itself. Rewind entries invert that order: their effect restores an older
//! state, so the (re-checked) deduction has to land on whatever the rewind
//! left behind.

use crate::catalog::Catalog;
use crate::color::Color;
use crate::cost::ShopCost;
use crate::decision::DecisionMaker;
use crate::effect::Effect;
use crate::executor::{ExecutionError, can_rewind, execute_effects};
use crate::game_loop::RulesError;
use crate::game_state::GameState;
use crate::ids::{PlayerId, ShopId};
use crate::trace::TraceEvent;
use crate::turn::TurnStep;

/// Errors from attempting a shop purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopError {
    /// No such entry in the catalog.
    UnknownShop(ShopId),
    /// Regular entries are only purchasable during their round.
    WrongRound { shop: ShopId, round: u8 },
    /// Regular purchases need a shop window (or a bypass tag).
    WrongPhase,
    /// Only one regular purchase per shop window.
    AlreadyPurchasedThisWindow,
    /// The buyer cannot cover the cost.
    CannotAfford { shop: ShopId },
    /// The entry's benefit was never defined; buying it is refused.
    EffectUndefined { shop: ShopId },
}

impl std::fmt::Display for ShopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopError::UnknownShop(shop) => write!(f, "Unknown shop entry: {}", shop),
            ShopError::WrongRound { shop, round } => {
                write!(f, "The {} cannot be bought in round {}", shop, round)
            }
            ShopError::WrongPhase => {
                write!(f, "Shops are only open before and after placing your worker")
            }
            ShopError::AlreadyPurchasedThisWindow => {
                write!(f, "You already bought from a shop in this window")
            }
            ShopError::CannotAfford { shop } => {
                write!(f, "You cannot afford the {}", shop)
            }
            ShopError::EffectUndefined { shop } => {
                write!(f, "The {} has no defined benefit yet", shop)
            }
        }
    }
}

impl std::error::Error for ShopError {}

/// Validate and resolve a purchase by the active player.
pub fn purchase(
    game: &mut GameState,
    catalog: &Catalog,
    shop_id: ShopId,
    decision_maker: &mut dyn DecisionMaker,
) -> Result<(), RulesError> {
    let acting = game.turn.active_player;
    let entry = catalog
        .shop(shop_id)
        .ok_or(ShopError::UnknownShop(shop_id))?;

    let step = game.turn.step;
    let counts_against_window = if let ShopId::Regular { round, .. } = shop_id {
        if round != game.turn.round {
            return Err(ShopError::WrongRound {
                shop: shop_id,
                round: game.turn.round,
            }
            .into());
        }
        if step.is_shop_window() {
            if game.turn.regular_purchases_this_window >= 1 {
                return Err(ShopError::AlreadyPurchasedThisWindow.into());
            }
            true
        } else if step == TurnStep::WorkerPlaced && entry.bypass {
            // Bypass benefits slip past the placement phase uncounted.
            false
        } else {
            return Err(ShopError::WrongPhase.into());
        }
    } else {
        false
    };

    if entry.effects.contains(&Effect::Unspecified) {
        return Err(ShopError::EffectUndefined { shop: shop_id }.into());
    }
    // Nobody pays for a rewind that has nothing to rewind.
    if entry.effects.contains(&Effect::RewindLastAction) && !can_rewind(game) {
        return Err(ExecutionError::NothingToRewind.into());
    }

    let buyer = game
        .player(acting)
        .ok_or(ExecutionError::PlayerNotFound(acting))?;
    // Modifier captured up front: a discount bought this very purchase must
    // not apply to itself.
    let modifier = buyer.shop_cost_modifier;
    if !entry.cost.can_pay(&buyer.ledger, modifier) {
        return Err(ShopError::CannotAfford { shop: shop_id }.into());
    }

    // Count the purchase before effects run: an extra-worker benefit that
    // reopens a window must start that window with a fresh allowance.
    if counts_against_window {
        game.turn.regular_purchases_this_window += 1;
    }
    if entry.effects.contains(&Effect::RewindLastAction) {
        execute_effects(game, catalog, acting, &entry.effects, decision_maker, 0)?;
        pay_cost(game, acting, shop_id, &entry.cost, modifier, decision_maker)?;
    } else {
        pay_cost(game, acting, shop_id, &entry.cost, modifier, decision_maker)?;
        execute_effects(game, catalog, acting, &entry.effects, decision_maker, 0)?;
    }

    game.trace.push(TraceEvent::ShopPurchased {
        player: acting,
        shop: shop_id,
    });
    Ok(())
}

/// Deduct a cost from the buyer's ledger, fully checked.
fn pay_cost(
    game: &mut GameState,
    acting: PlayerId,
    shop_id: ShopId,
    cost: &ShopCost,
    modifier: i32,
    decision_maker: &mut dyn DecisionMaker,
) -> Result<(), RulesError> {
    let cannot_afford = RulesError::from(ShopError::CannotAfford { shop: shop_id });

    let player = game
        .player_mut(acting)
        .ok_or(ExecutionError::PlayerNotFound(acting))?;
    for color in Color::ALL {
        let need = cost.amount(color);
        if need > 0 && !player.ledger.remove(color, need) {
            return Err(cannot_afford);
        }
    }

    let any = cost.effective_any(modifier);
    if any == 0 {
        return Ok(());
    }

    if let Some(colors) = decision_maker.choose_any_payment(game, acting, any) {
        if colors.len() != any as usize {
            return Err(ExecutionError::InvalidChoice { what: "payment" }.into());
        }
        let player = game
            .player_mut(acting)
            .ok_or(ExecutionError::PlayerNotFound(acting))?;
        for color in colors {
            if !player.ledger.remove(color, 1) {
                return Err(ExecutionError::InvalidChoice { what: "payment" }.into());
            }
        }
        return Ok(());
    }

    // No explicit choice: pay from the most plentiful colors, ties broken in
    // `Color::ALL` order.
    let player = game
        .player_mut(acting)
        .ok_or(ExecutionError::PlayerNotFound(acting))?;
    for _ in 0..any {
        // rev() so that ties land on the earliest color in `Color::ALL`.
        let richest = Color::ALL
            .into_iter()
            .rev()
            .max_by_key(|c| player.ledger.amount(*c))
            .filter(|c| player.ledger.amount(*c) > 0)
            .ok_or(cannot_afford)?;
        player.ledger.remove(richest, 1);
    }
    Ok(())
}
