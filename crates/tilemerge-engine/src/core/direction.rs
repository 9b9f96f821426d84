/// A direction in which tiles can be slid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
    #[display("right")]
    Right,
}

/// The pair of involutions that map a direction onto a leftward move.
///
/// Applying the transform, moving left, and applying the transform again in reverse order
/// is equivalent to moving in the original direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub transpose: bool,
    pub invert: bool,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the transforms to apply around a leftward move.
    ///
    /// | direction | transpose | invert |
    /// |-----------|-----------|--------|
    /// | left      | no        | no     |
    /// | right     | no        | yes    |
    /// | up        | yes       | no     |
    /// | down      | yes       | yes    |
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left => Orientation {
                transpose: false,
                invert: false,
            },
            Self::Right => Orientation {
                transpose: false,
                invert: true,
            },
            Self::Up => Orientation {
                transpose: true,
                invert: false,
            },
            Self::Down => Orientation {
                transpose: true,
                invert: true,
            },
        }
    }
}
