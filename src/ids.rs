use crate::color::Color;

/// Player identifier, index-based for efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a player ID from a seat index.
    pub fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Action space identifier, references static catalog data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceId(pub u32);

impl SpaceId {
    /// Create a space ID from a specific value (catalog entries are static).
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Shop entry identifier.
///
/// Regular shops are keyed by color and round; the victory shop has one
/// fixed entry per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopId {
    /// A regular shop entry, purchasable during its round.
    Regular { color: Color, round: u8 },
    /// A victory shop entry, purchasable in any round.
    Victory { color: Color },
}

impl ShopId {
    /// The color whose layer this shop belongs to.
    pub fn color(self) -> Color {
        match self {
            ShopId::Regular { color, .. } => color,
            ShopId::Victory { color } => color,
        }
    }

    /// Returns true for victory shop entries.
    pub fn is_victory(self) -> bool {
        matches!(self, ShopId::Victory { .. })
    }
}

impl std::fmt::Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShopId::Regular { color, round } => write!(f, "{} shop (round {})", color, round),
            ShopId::Victory { color } => write!(f, "{} victory shop", color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_from_index() {
        let p1 = PlayerId::from_index(0);
        let p2 = PlayerId::from_index(3);
        assert_ne!(p1, p2);
        assert_eq!(p1.index(), 0);
        assert_eq!(p2.index(), 3);
    }

    #[test]
    fn test_space_id_from_raw() {
        let s1 = SpaceId::from_raw(7);
        let s2 = SpaceId::from_raw(9);
        assert_ne!(s1, s2);
        assert_eq!(s1.raw(), 7);
    }

    #[test]
    fn test_shop_id_color_and_kind() {
        let regular = ShopId::Regular {
            color: Color::Red,
            round: 2,
        };
        let victory = ShopId::Victory { color: Color::Red };
        assert_eq!(regular.color(), Color::Red);
        assert_eq!(victory.color(), Color::Red);
        assert!(!regular.is_victory());
        assert!(victory.is_victory());
    }

    #[test]
    fn test_shop_id_display() {
        let regular = ShopId::Regular {
            color: Color::Blue,
            round: 1,
        };
        assert_eq!(regular.to_string(), "Blue shop (round 1)");
        let victory = ShopId::Victory { color: Color::Black };
        assert_eq!(victory.to_string(), "Black victory shop");
    }
}
