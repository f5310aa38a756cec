use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid axis index {0}; expected 0, 1 or 2")]
pub struct InvalidAxis(pub i64);

/// One of the three Cartesian axes of the simulation cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "i64")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two remaining axes, in increasing order.
    pub fn others(self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Axis ordering used for 3-D fields: the two other axes first, `self` last.
    pub fn ordering_last(self) -> [Axis; 3] {
        let [a, b] = self.others();
        [a, b, self]
    }
}

impl TryFrom<i64> for Axis {
    type Error = InvalidAxis;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(InvalidAxis(other)),
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = InvalidAxis;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Axis::try_from(value as i64)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        write!(f, "{}", name)
    }
}
