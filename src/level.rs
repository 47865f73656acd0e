/// Closed set of map layouts. Per-level behavior lives in the methods below
/// so adding a level touches only this enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Level {
    First,
    Second,
}

impl Level {
    /// Returns true when an interior cell carries an obstacle on this level.
    #[must_use]
    pub fn is_obstacle(self, row: u16, col: u16) -> bool {
        match self {
            Self::First => false,
            Self::Second => row % 3 == 0 && col % 5 == 0,
        }
    }

    /// Returns true when eating shortens the tick delay.
    #[must_use]
    pub fn ramps_speed(self) -> bool {
        matches!(self, Self::Second)
    }

    /// Level entered once the actor reaches the score threshold, if any.
    #[must_use]
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
        }
    }
}
