#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    White,
    Black,
}

impl Color {
    /// Number of resource colors in the game.
    pub const COUNT: usize = 8;

    pub const ALL: [Color; Color::COUNT] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::White,
        Color::Black,
    ];

    /// Stable index of this color within `Color::ALL`.
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Purple => 4,
            Color::Orange => 5,
            Color::White => 6,
            Color::Black => 7,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
            Color::Orange => "Orange",
            Color::White => "White",
            Color::Black => "Black",
        }
    }

    /// Parse a color from a case-insensitive name.
    pub fn from_name(name: &str) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of colors represented as bitflags for efficient operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const EMPTY: Self = Self(0);

    /// Creates a new empty ColorSet.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates a ColorSet from a single color.
    pub const fn from_color(color: Color) -> Self {
        Self(1 << color.index())
    }

    /// Returns true if this set contains no colors.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this set contains the given color.
    pub const fn contains(self, color: Color) -> bool {
        self.0 & Self::from_color(color).0 != 0
    }

    /// Returns the union of two color sets.
    pub const fn union(self, other: ColorSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of two color sets.
    pub const fn intersection(self, other: ColorSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the number of colors in this set.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Adds a color to this set, returning the new set.
    pub const fn with(self, color: Color) -> Self {
        self.union(Self::from_color(color))
    }

    /// Removes a color from this set, returning the new set.
    pub const fn without(self, color: Color) -> Self {
        Self(self.0 & !Self::from_color(color).0)
    }

    /// Iterates the colors in this set in `Color::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Color> for ColorSet {
    fn from(color: Color) -> Self {
        Self::from_color(color)
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        iter.into_iter()
            .fold(ColorSet::EMPTY, |set, color| set.with(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_indices_are_distinct() {
        for (i, color) in Color::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("red"), Some(Color::Red));
        assert_eq!(Color::from_name("PURPLE"), Some(Color::Purple));
        assert_eq!(Color::from_name("mauve"), None);
    }

    #[test]
    fn test_color_set_empty() {
        let set = ColorSet::new();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_color_set_single_color() {
        let set = ColorSet::from_color(Color::Red);
        assert!(!set.is_empty());
        assert!(set.contains(Color::Red));
        assert!(!set.contains(Color::Blue));
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn test_color_set_union_intersection() {
        let warm = ColorSet::from_color(Color::Red).with(Color::Orange);
        let bright = ColorSet::from_color(Color::Orange).with(Color::Yellow);
        let union = warm.union(bright);
        assert_eq!(union.count(), 3);
        let common = warm.intersection(bright);
        assert!(common.contains(Color::Orange));
        assert_eq!(common.count(), 1);
    }

    #[test]
    fn test_color_set_with_without() {
        let set = ColorSet::new().with(Color::Green).with(Color::White);
        assert_eq!(set.count(), 2);
        let set = set.without(Color::Green);
        assert!(set.contains(Color::White));
        assert!(!set.contains(Color::Green));
    }

    #[test]
    fn test_color_set_from_iter() {
        let set: ColorSet = [Color::Red, Color::Blue, Color::Black].into_iter().collect();
        assert_eq!(set.count(), 3);
        assert!(set.contains(Color::Black));
        let colors: Vec<Color> = set.iter().collect();
        assert_eq!(colors, vec![Color::Red, Color::Blue, Color::Black]);
    }
}
