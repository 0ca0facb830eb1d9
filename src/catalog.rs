//! Static catalog of action spaces and shop entries.
//!
//! Definitions are declared programmatically and built exactly once at
//! process start; nothing at runtime ever mutates them. Each color layer
//! bundles two action spaces, one regular shop entry per round, and one
//! victory shop entry.
//!
//! Catalog invariants:
//! - every color has a regular shop entry for each round 1..=3 and exactly
//!   one victory entry;
//! - every Blue shop entry is bypass-tagged;
//! - rewind entries carry `RewindLastAction` as their only effect;
//! - the Purple round-2 entry is the lone `Unspecified` placeholder.

use std::sync::OnceLock;

use crate::color::Color;
use crate::cost::ShopCost;
use crate::effect::{Effect, describe_effects};
use crate::ids::{ShopId, SpaceId};

/// Rounds played in a full game.
pub const ROUNDS: u8 = 3;

/// A complete action space definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDefinition {
    pub id: SpaceId,
    pub name: &'static str,
    pub color: Color,
    /// First round in which this space may be used.
    pub min_round: u8,
    pub effects: Vec<Effect>,
}

impl ActionDefinition {
    /// Whether this space may be used during the given round.
    pub fn available_in(&self, round: u8) -> bool {
        round >= self.min_round
    }

    /// Human-readable description of what the space does.
    pub fn describe(&self) -> String {
        describe_effects(&self.effects)
    }
}

/// A complete shop entry definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopEntry {
    pub id: ShopId,
    pub name: &'static str,
    pub cost: ShopCost,
    pub effects: Vec<Effect>,
    /// Bypass-tagged entries may also be bought while an action is pending.
    pub bypass: bool,
}

impl ShopEntry {
    /// Human-readable description of the purchased benefit.
    pub fn describe(&self) -> String {
        describe_effects(&self.effects)
    }
}

/// Registry of all action space and shop definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    actions: Vec<ActionDefinition>,
    shops: Vec<ShopEntry>,
}

impl Catalog {
    /// The canonical catalog, built once at first use.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(|| Catalog {
            actions: standard_actions(),
            shops: standard_shops(),
        })
    }

    /// Look up an action space definition.
    pub fn action(&self, id: SpaceId) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Look up an action space by its display name (case-insensitive).
    pub fn action_by_name(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Look up any shop entry by ID.
    pub fn shop(&self, id: ShopId) -> Option<&ShopEntry> {
        self.shops.iter().find(|s| s.id == id)
    }

    /// The regular shop entry for a color and round.
    pub fn regular_shop(&self, color: Color, round: u8) -> Option<&ShopEntry> {
        self.shop(ShopId::Regular { color, round })
    }

    /// The victory shop entry for a color.
    pub fn victory_shop(&self, color: Color) -> Option<&ShopEntry> {
        self.shop(ShopId::Victory { color })
    }

    /// All action space definitions, in board order.
    pub fn actions(&self) -> &[ActionDefinition] {
        &self.actions
    }

    /// All shop entries.
    pub fn shops(&self) -> &[ShopEntry] {
        &self.shops
    }
}

fn action(
    id: u32,
    name: &'static str,
    color: Color,
    min_round: u8,
    effects: Vec<Effect>,
) -> ActionDefinition {
    ActionDefinition {
        id: SpaceId::from_raw(id),
        name,
        color,
        min_round,
        effects,
    }
}

fn standard_actions() -> Vec<ActionDefinition> {
    use Effect::*;

    vec![
        action(
            1,
            "Forge",
            Color::Red,
            1,
            vec![GainResource {
                color: Color::Red,
                amount: 2,
            }],
        ),
        action(2, "Warpath", Color::Red, 2, vec![RepeatAction]),
        action(
            3,
            "Harbor",
            Color::Blue,
            1,
            vec![GainResource {
                color: Color::Blue,
                amount: 2,
            }],
        ),
        action(4, "Guildhall", Color::Blue, 2, vec![GrantExtraWorker]),
        action(
            5,
            "Grove",
            Color::Green,
            1,
            vec![GainResource {
                color: Color::Green,
                amount: 2,
            }],
        ),
        action(
            6,
            "Terrace",
            Color::Green,
            2,
            vec![
                GainResource {
                    color: Color::Green,
                    amount: 2,
                },
                GainResource {
                    color: Color::Yellow,
                    amount: 1,
                },
            ],
        ),
        action(
            7,
            "Market",
            Color::Yellow,
            1,
            vec![GainResource {
                color: Color::Yellow,
                amount: 2,
            }],
        ),
        action(
            8,
            "Mint",
            Color::Yellow,
            3,
            vec![GainResource {
                color: Color::Yellow,
                amount: 4,
            }],
        ),
        action(
            9,
            "Shrine",
            Color::Purple,
            1,
            vec![
                GainResource {
                    color: Color::Purple,
                    amount: 1,
                },
                AdjustShopCosts { delta: -1 },
            ],
        ),
        action(
            10,
            "Observatory",
            Color::Purple,
            2,
            vec![GainResource {
                color: Color::Purple,
                amount: 2,
            }],
        ),
        action(
            11,
            "Camp",
            Color::Orange,
            1,
            vec![GainResource {
                color: Color::Orange,
                amount: 2,
            }],
        ),
        action(12, "Beacon", Color::Orange, 3, vec![GrantExtraTurn]),
        action(
            13,
            "Archive",
            Color::White,
            1,
            vec![GainResource {
                color: Color::White,
                amount: 2,
            }],
        ),
        action(14, "Tribunal", Color::White, 2, vec![RewindLastAction]),
        action(
            15,
            "Alley",
            Color::Black,
            1,
            vec![StealResource {
                color: Color::Yellow,
                amount: 1,
            }],
        ),
        action(
            16,
            "Crypt",
            Color::Black,
            2,
            vec![StealResource {
                color: Color::Yellow,
                amount: 2,
            }],
        ),
    ]
}

fn regular(
    color: Color,
    round: u8,
    name: &'static str,
    cost: ShopCost,
    effects: Vec<Effect>,
) -> ShopEntry {
    ShopEntry {
        id: ShopId::Regular { color, round },
        name,
        cost,
        effects,
        // Blue shop benefits bypass the worker-placement restriction.
        bypass: color == Color::Blue,
    }
}

fn victory(color: Color) -> ShopEntry {
    ShopEntry {
        id: ShopId::Victory { color },
        name: "Patronage",
        cost: ShopCost::of(color, VICTORY_COST),
        effects: vec![Effect::GainVictory {
            amount: VICTORY_POINTS,
        }],
        bypass: false,
    }
}

/// Fixed cost of every victory shop entry, in its own color.
pub const VICTORY_COST: u32 = 5;
/// Fixed award of every victory shop entry.
pub const VICTORY_POINTS: u32 = 3;

fn standard_shops() -> Vec<ShopEntry> {
    use Effect::*;

    let gain = |color, amount| GainResource { color, amount };

    let mut shops = vec![
        // Red: tempo.
        regular(Color::Red, 1, "Smithy", ShopCost::any(2), vec![gain(Color::Red, 2)]),
        regular(
            Color::Red,
            2,
            "War Council",
            ShopCost::of(Color::Red, 2).plus_any(1),
            vec![RepeatAction],
        ),
        regular(
            Color::Red,
            3,
            "Conquest",
            ShopCost::of(Color::Red, 3).plus_any(2),
            vec![RepeatAction, gain(Color::Red, 1)],
        ),
        // Blue: placement-phase bypass benefits.
        regular(Color::Blue, 1, "Wharf", ShopCost::any(2), vec![gain(Color::Blue, 2)]),
        regular(
            Color::Blue,
            2,
            "Guild Charter",
            ShopCost::of(Color::Blue, 2).plus_any(1),
            vec![GrantExtraWorker],
        ),
        regular(
            Color::Blue,
            3,
            "Admiralty",
            ShopCost::of(Color::Blue, 3).plus_any(2),
            vec![GrantExtraTurn],
        ),
        // Green: growth.
        regular(Color::Green, 1, "Nursery", ShopCost::any(1), vec![gain(Color::Green, 2)]),
        regular(
            Color::Green,
            2,
            "Plantation",
            ShopCost::of(Color::Green, 2),
            vec![gain(Color::Green, 3), gain(Color::Yellow, 1)],
        ),
        regular(
            Color::Green,
            3,
            "Estate",
            ShopCost::of(Color::Green, 3).plus_any(1),
            vec![gain(Color::Green, 4), gain(Color::Yellow, 2)],
        ),
        // Yellow: wealth.
        regular(Color::Yellow, 1, "Bazaar", ShopCost::any(2), vec![gain(Color::Yellow, 2)]),
        regular(
            Color::Yellow,
            2,
            "Counting House",
            ShopCost::of(Color::Yellow, 2).plus_any(1),
            vec![gain(Color::Yellow, 4)],
        ),
        regular(
            Color::Yellow,
            3,
            "Treasury",
            ShopCost::of(Color::Yellow, 4).plus_any(1),
            vec![gain(Color::Yellow, 6), gain(Color::Green, 1)],
        ),
        // Purple: discounts. The round-2 benefit was never defined.
        regular(
            Color::Purple,
            1,
            "Augur's Tent",
            ShopCost::of(Color::Purple, 1).plus_any(1),
            vec![AdjustShopCosts { delta: -1 }],
        ),
        regular(
            Color::Purple,
            2,
            "Veiled Parlor",
            ShopCost::of(Color::Purple, 2).plus_any(1),
            vec![Unspecified],
        ),
        regular(
            Color::Purple,
            3,
            "Sanctum",
            ShopCost::of(Color::Purple, 3),
            vec![AdjustShopCosts { delta: -2 }],
        ),
        // Orange: momentum.
        regular(Color::Orange, 1, "Waystation", ShopCost::any(2), vec![gain(Color::Orange, 2)]),
        regular(
            Color::Orange,
            2,
            "Courier Post",
            ShopCost::of(Color::Orange, 2).plus_any(1),
            vec![GrantExtraTurn],
        ),
        regular(
            Color::Orange,
            3,
            "Grand Relay",
            ShopCost::of(Color::Orange, 3).plus_any(1),
            vec![GrantExtraWorker, gain(Color::Orange, 1)],
        ),
        // White: order.
        regular(
            Color::White,
            1,
            "Clerk's Office",
            ShopCost::of(Color::White, 1).plus_any(1),
            vec![RewindLastAction],
        ),
        regular(Color::White, 2, "Scriptorium", ShopCost::any(3), vec![gain(Color::White, 3)]),
        regular(
            Color::White,
            3,
            "High Court",
            ShopCost::of(Color::White, 3).plus_any(1),
            vec![gain(Color::White, 4), gain(Color::Blue, 1)],
        ),
        // Black: theft.
        regular(
            Color::Black,
            1,
            "Fence",
            ShopCost::of(Color::Black, 1).plus_any(1),
            vec![StealResource {
                color: Color::Yellow,
                amount: 1,
            }],
        ),
        regular(
            Color::Black,
            2,
            "Smugglers' Den",
            ShopCost::of(Color::Black, 2).plus_any(1),
            vec![StealResource {
                color: Color::Yellow,
                amount: 2,
            }],
        ),
        regular(
            Color::Black,
            3,
            "Thieves' Guild",
            ShopCost::of(Color::Black, 3).plus_any(1),
            vec![
                StealResource {
                    color: Color::Black,
                    amount: 2,
                },
                gain(Color::Black, 1),
            ],
        ),
    ];

    for color in Color::ALL {
        shops.push(victory(color));
    }

    shops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_color_has_two_action_spaces() {
        let catalog = Catalog::standard();
        for color in Color::ALL {
            let count = catalog.actions().iter().filter(|a| a.color == color).count();
            assert_eq!(count, 2, "{} should have two action spaces", color);
        }
    }

    #[test]
    fn test_action_ids_are_unique() {
        let catalog = Catalog::standard();
        for a in catalog.actions() {
            let matches = catalog.actions().iter().filter(|b| b.id == a.id).count();
            assert_eq!(matches, 1, "duplicate space id {:?}", a.id);
        }
    }

    #[test]
    fn test_every_color_round_has_a_regular_shop() {
        let catalog = Catalog::standard();
        for color in Color::ALL {
            for round in 1..=ROUNDS {
                assert!(
                    catalog.regular_shop(color, round).is_some(),
                    "missing {} shop for round {}",
                    color,
                    round
                );
            }
        }
    }

    #[test]
    fn test_every_color_has_a_victory_shop() {
        let catalog = Catalog::standard();
        for color in Color::ALL {
            let entry = catalog.victory_shop(color).expect("missing victory entry");
            assert_eq!(entry.cost, ShopCost::of(color, VICTORY_COST));
            assert_eq!(
                entry.effects,
                vec![Effect::GainVictory {
                    amount: VICTORY_POINTS
                }]
            );
        }
    }

    #[test]
    fn test_blue_shops_are_bypass_tagged() {
        let catalog = Catalog::standard();
        for entry in catalog.shops() {
            if entry.id.is_victory() {
                continue;
            }
            assert_eq!(
                entry.bypass,
                entry.id.color() == Color::Blue,
                "bypass tag wrong on {}",
                entry.id
            );
        }
    }

    #[test]
    fn test_purple_round_two_is_unspecified() {
        let catalog = Catalog::standard();
        let entry = catalog.regular_shop(Color::Purple, 2).unwrap();
        assert_eq!(entry.effects, vec![Effect::Unspecified]);
    }

    #[test]
    fn test_rewind_entries_carry_only_rewind() {
        let catalog = Catalog::standard();
        for entry in catalog.shops() {
            if entry.effects.contains(&Effect::RewindLastAction) {
                assert_eq!(entry.effects, vec![Effect::RewindLastAction]);
            }
        }
    }

    #[test]
    fn test_round_availability() {
        let catalog = Catalog::standard();
        let warpath = catalog.action_by_name("Warpath").unwrap();
        assert!(!warpath.available_in(1));
        assert!(warpath.available_in(2));
        assert!(warpath.available_in(3));
    }

    #[test]
    fn test_action_lookup_by_name() {
        let catalog = Catalog::standard();
        assert!(catalog.action_by_name("forge").is_some());
        assert!(catalog.action_by_name("Fortress").is_none());
    }
}
