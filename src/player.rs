use crate::color::Color;
use crate::ids::PlayerId;

/// Per-player resource counts, one entry per color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    pub red: u32,
    pub blue: u32,
    pub green: u32,
    pub yellow: u32,
    pub purple: u32,
    pub orange: u32,
    pub white: u32,
    pub black: u32,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds resources of the specified color.
    pub fn add(&mut self, color: Color, amount: u32) {
        *self.slot_mut(color) += amount;
    }

    /// Removes resources of the specified color. Returns true if successful.
    pub fn remove(&mut self, color: Color, amount: u32) -> bool {
        let slot = self.slot_mut(color);
        if *slot >= amount {
            *slot -= amount;
            true
        } else {
            false
        }
    }

    /// Returns the amount of a specific color.
    pub fn amount(&self, color: Color) -> u32 {
        match color {
            Color::Red => self.red,
            Color::Blue => self.blue,
            Color::Green => self.green,
            Color::Yellow => self.yellow,
            Color::Purple => self.purple,
            Color::Orange => self.orange,
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Returns the total amount of resources in the ledger.
    pub fn total(&self) -> u32 {
        Color::ALL.into_iter().map(|c| self.amount(c)).sum()
    }

    /// Returns true if the ledger holds no resources at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// All entries in `Color::ALL` order.
    pub fn entries(&self) -> [(Color, u32); Color::COUNT] {
        Color::ALL.map(|c| (c, self.amount(c)))
    }

    fn slot_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::Red => &mut self.red,
            Color::Blue => &mut self.blue,
            Color::Green => &mut self.green,
            Color::Yellow => &mut self.yellow,
            Color::Purple => &mut self.purple,
            Color::Orange => &mut self.orange,
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

impl std::fmt::Display for ResourceLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (color, amount) in self.entries() {
            if amount == 0 {
                continue;
            }
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", amount, color)?;
            first = false;
        }
        if first {
            write!(f, "nothing")?;
        }
        Ok(())
    }
}

/// A player in the game.
///
/// The ledger and the shop cost modifier live inside the player by value;
/// mutating one player can never touch another's counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub ledger: ResourceLedger,
    /// Workers remaining to place this round.
    pub workers_left: u32,
    /// Personal adjustment to the `any` component of shop costs.
    pub shop_cost_modifier: i32,
    pub victory_points: u32,
    /// Extra turns granted but not yet taken.
    pub pending_extra_turns: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, workers: u32) -> Self {
        Self {
            id,
            name: name.into(),
            ledger: ResourceLedger::new(),
            workers_left: workers,
            shop_cost_modifier: 0,
            victory_points: 0,
            pending_extra_turns: 0,
        }
    }

    pub fn has_workers(&self) -> bool {
        self.workers_left > 0
    }
}
