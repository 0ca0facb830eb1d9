//! Shop cost system.
//!
//! A shop cost is a conjunction of fixed per-color amounts plus an `any`
//! component payable with any mix of resources. The buyer's personal
//! `shop_cost_modifier` adjusts the `any` component only, clamped at zero;
//! colored components are never modified.

use crate::color::Color;
use crate::player::ResourceLedger;

/// A complete shop cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShopCost {
    amounts: [u32; Color::COUNT],
    /// Resources of any color, payable with any mix.
    pub any: u32,
}

impl ShopCost {
    /// An empty cost (free).
    pub const fn free() -> Self {
        Self {
            amounts: [0; Color::COUNT],
            any: 0,
        }
    }

    /// A cost of `amount` resources of a single color.
    pub fn of(color: Color, amount: u32) -> Self {
        Self::free().plus(color, amount)
    }

    /// A cost of `amount` resources of any color.
    pub fn any(amount: u32) -> Self {
        let mut cost = Self::free();
        cost.any = amount;
        cost
    }

    /// Add a colored component, returning the new cost.
    pub fn plus(mut self, color: Color, amount: u32) -> Self {
        self.amounts[color.index()] += amount;
        self
    }

    /// Add an any-color component, returning the new cost.
    pub fn plus_any(mut self, amount: u32) -> Self {
        self.any += amount;
        self
    }

    /// The required amount of a specific color.
    pub fn amount(&self, color: Color) -> u32 {
        self.amounts[color.index()]
    }

    /// Sum of all colored components (excluding `any`).
    pub fn colored_total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    /// The `any` component after applying a buyer's modifier, clamped at zero.
    pub fn effective_any(&self, modifier: i32) -> u32 {
        let adjusted = self.any as i64 + modifier as i64;
        adjusted.max(0) as u32
    }

    /// Total resources the buyer must part with under the given modifier.
    pub fn total(&self, modifier: i32) -> u32 {
        self.colored_total() + self.effective_any(modifier)
    }

    /// Whether a ledger can cover this cost under the given modifier.
    ///
    /// Colored components must each be covered by their own color; whatever
    /// is left over across all colors must cover the adjusted `any` part.
    pub fn can_pay(&self, ledger: &ResourceLedger, modifier: i32) -> bool {
        let mut leftover: u32 = 0;
        for color in Color::ALL {
            let have = ledger.amount(color);
            let need = self.amount(color);
            if have < need {
                return false;
            }
            leftover += have - need;
        }
        leftover >= self.effective_any(modifier)
    }
}

impl std::fmt::Display for ShopCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for color in Color::ALL {
            let amount = self.amount(color);
            if amount == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{} {}", amount, color)?;
            first = false;
        }
        if self.any > 0 {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{} any", self.any)?;
            first = false;
        }
        if first {
            write!(f, "free")?;
        }
        Ok(())
    }
}
