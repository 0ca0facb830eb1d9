//! Effect vocabulary for action spaces and shop entries.
//!
//! Effects are one-shot, declarative descriptions of what an action space or
//! shop purchase does. The catalog composes them into lists; the executor
//! applies them to the game state. Executing an effect produces an
//! `EffectResult` describing what actually happened (used for tracing and
//! tests), or an execution error that voids the whole intent.

use crate::color::Color;

/// A single declarative effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The acting player gains a fixed amount of a resource.
    GainResource { color: Color, amount: u32 },

    /// Transfer up to `amount` of `color` from a chosen player to the acting
    /// player. Clamped to what the target actually holds.
    StealResource { color: Color, amount: u32 },

    /// Re-invoke another action space's effect list. Chain depth is capped;
    /// exceeding the cap rejects the whole intent.
    RepeatAction,

    /// Grant an additional worker this round and allow another placement
    /// this turn.
    GrantExtraWorker,

    /// The acting player takes another turn after this one ends.
    GrantExtraTurn,

    /// Adjust the acting player's personal shop cost modifier.
    AdjustShopCosts { delta: i32 },

    /// Revert the acting player's most recent committed intent this turn.
    RewindLastAction,

    /// The acting player gains victory points.
    GainVictory { amount: u32 },

    /// Placeholder for an effect the game's design never pinned down.
    /// Resolving it is always an error.
    Unspecified,
}

impl Effect {
    /// Human-readable description, used by the catalog docs and the CLI.
    pub fn describe(&self) -> String {
        match self {
            Effect::GainResource { color, amount } => format!("Gain {} {}", amount, color),
            Effect::StealResource { color, amount } => {
                format!("Steal {} {} from another patron", amount, color)
            }
            Effect::RepeatAction => "Repeat another action space's effect".to_string(),
            Effect::GrantExtraWorker => "Gain an extra worker and placement".to_string(),
            Effect::GrantExtraTurn => "Take an extra turn".to_string(),
            Effect::AdjustShopCosts { delta } => {
                if *delta <= 0 {
                    format!("Your shop costs are reduced by {}", -delta)
                } else {
                    format!("Your shop costs are increased by {}", delta)
                }
            }
            Effect::RewindLastAction => "Rewind your previous move this turn".to_string(),
            Effect::GainVictory { amount } => format!("Gain {} victory points", amount),
            Effect::Unspecified => "(effect not yet defined)".to_string(),
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// What happened when an effect executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectResult {
    /// Effect produced a numeric count (resources gained/stolen, points
    /// awarded). `Count(0)` means the effect executed but moved nothing,
    /// e.g. a steal against an empty ledger.
    Count(u32),

    /// Effect resolved with no meaningful count.
    Resolved,
}

impl EffectResult {
    /// Returns true when the effect actually changed something.
    pub fn something_happened(self) -> bool {
        match self {
            EffectResult::Count(n) => n > 0,
            EffectResult::Resolved => true,
        }
    }
}

/// Render a full effect list the way the catalog docs show it.
pub fn describe_effects(effects: &[Effect]) -> String {
    effects
        .iter()
        .map(Effect::describe)
        .collect::<Vec<_>>()
        .join(", then ")
}
