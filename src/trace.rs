//! Action tracing.
//!
//! Every rules-relevant occurrence is appended to an ordered, append-only
//! trace. The trace is pure observability: the rules never read it back, and
//! external tooling (the CLI, tests, a future UI) can inspect it without any
//! way of mutating game state through it.

use crate::color::Color;
use crate::ids::{PlayerId, ShopId, SpaceId};

/// A single traced occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    WorkerPlaced { player: PlayerId, space: SpaceId },
    ActionResolved { player: PlayerId, space: SpaceId },
    ResourcesGained { player: PlayerId, color: Color, amount: u32 },
    ResourcesStolen { player: PlayerId, from: PlayerId, color: Color, amount: u32 },
    ShopPurchased { player: PlayerId, shop: ShopId },
    VictoryAwarded { player: PlayerId, amount: u32 },
    ShopCostsAdjusted { player: PlayerId, delta: i32 },
    ExtraWorkerGranted { player: PlayerId },
    ExtraTurnGranted { player: PlayerId },
    ExtraTurnTaken { player: PlayerId },
    ActionRepeated { player: PlayerId, space: SpaceId, depth: usize },
    ActionRewound { player: PlayerId },
    TurnEnded { player: PlayerId },
    RoundAdvanced { round: u8 },
    GameFinished { winner: PlayerId },
    IntentRejected { player: PlayerId, reason: String },
}

impl std::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::WorkerPlaced { player, space } => {
                write!(f, "player {} placed a worker on space {}", player.0, space.raw())
            }
            TraceEvent::ActionResolved { player, space } => {
                write!(f, "player {} resolved space {}", player.0, space.raw())
            }
            TraceEvent::ResourcesGained { player, color, amount } => {
                write!(f, "player {} gained {} {}", player.0, amount, color)
            }
            TraceEvent::ResourcesStolen { player, from, color, amount } => write!(
                f,
                "player {} stole {} {} from player {}",
                player.0, amount, color, from.0
            ),
            TraceEvent::ShopPurchased { player, shop } => {
                write!(f, "player {} bought the {}", player.0, shop)
            }
            TraceEvent::VictoryAwarded { player, amount } => {
                write!(f, "player {} gained {} victory points", player.0, amount)
            }
            TraceEvent::ShopCostsAdjusted { player, delta } => {
                write!(f, "player {} shop cost modifier changed by {}", player.0, delta)
            }
            TraceEvent::ExtraWorkerGranted { player } => {
                write!(f, "player {} gained an extra worker", player.0)
            }
            TraceEvent::ExtraTurnGranted { player } => {
                write!(f, "player {} will take an extra turn", player.0)
            }
            TraceEvent::ExtraTurnTaken { player } => {
                write!(f, "player {} takes an extra turn", player.0)
            }
            TraceEvent::ActionRepeated { player, space, depth } => write!(
                f,
                "player {} repeated space {} (depth {})",
                player.0,
                space.raw(),
                depth
            ),
            TraceEvent::ActionRewound { player } => {
                write!(f, "player {} rewound their previous move", player.0)
            }
            TraceEvent::TurnEnded { player } => write!(f, "player {} ended their turn", player.0),
            TraceEvent::RoundAdvanced { round } => write!(f, "round {} begins", round),
            TraceEvent::GameFinished { winner } => {
                write!(f, "game over, player {} wins", winner.0)
            }
            TraceEvent::IntentRejected { player, reason } => {
                write!(f, "player {} intent rejected: {}", player.0, reason)
            }
        }
    }
}

/// Append-only event log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop events past `len`. Used when an intent is rejected so the trace
    /// reflects only committed occurrences plus the rejection itself.
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }
}
