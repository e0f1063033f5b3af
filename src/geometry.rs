//! Grid coordinates and headings.
//!
//! `y` grows towards the South: moving North decrements `y`, moving East
//! increments `x`. Headings are measured clockwise from North in 45° steps;
//! walls only exist on the four cardinal sides, the intercardinal headings
//! are used to cut corners diagonally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One square of the labyrinth, addressed by column (`x`) and row (`y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away along `heading`.
    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn delta_to(self, other: Cell) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// True when `other` touches this cell by a corner only.
    pub fn is_diagonal_to(self, other: Cell) -> bool {
        let (dx, dy) = self.delta_to(other);
        dx.abs() == 1 && dy.abs() == 1
    }

    /// True for the 8 surrounding cells, false for the cell itself.
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        let (dx, dy) = self.delta_to(other);
        self != other && dx.abs() <= 1 && dy.abs() <= 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of the player, serialized as degrees on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Heading {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Heading {
    /// All headings, clockwise from North.
    pub const ALL: [Heading; 8] = [
        Heading::North,
        Heading::NorthEast,
        Heading::East,
        Heading::SouthEast,
        Heading::South,
        Heading::SouthWest,
        Heading::West,
        Heading::NorthWest,
    ];

    /// The four sides a wall can sit on.
    pub const CARDINALS: [Heading; 4] =
        [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn degrees(self) -> u16 {
        match self {
            Heading::North => 0,
            Heading::NorthEast => 45,
            Heading::East => 90,
            Heading::SouthEast => 135,
            Heading::South => 180,
            Heading::SouthWest => 225,
            Heading::West => 270,
            Heading::NorthWest => 315,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.degrees() == degrees)
    }

    /// Unit offset of one move along this heading.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::NorthEast => (1, -1),
            Heading::East => (1, 0),
            Heading::SouthEast => (1, 1),
            Heading::South => (0, 1),
            Heading::SouthWest => (-1, 1),
            Heading::West => (-1, 0),
            Heading::NorthWest => (-1, -1),
        }
    }

    /// Heading matching a unit offset; `None` for `(0, 0)` and longer jumps.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.delta() == (dx, dy))
    }

    /// Heading needed to move from `from` into the adjacent cell `to`.
    pub fn between(from: Cell, to: Cell) -> Option<Self> {
        let (dx, dy) = from.delta_to(to);
        Self::from_delta(dx, dy)
    }

    pub fn is_cardinal(self) -> bool {
        self.degrees() % 90 == 0
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl From<Heading> for u16 {
    fn from(heading: Heading) -> Self {
        heading.degrees()
    }
}

impl TryFrom<u16> for Heading {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Heading::from_degrees(degrees)
            .ok_or_else(|| format!("{degrees} is not a multiple of 45 below 360"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_follows_screen_axes() {
        let c = Cell::new(3, 3);
        assert_eq!(c.step(Heading::North), Cell::new(3, 2));
        assert_eq!(c.step(Heading::East), Cell::new(4, 3));
        assert_eq!(c.step(Heading::South), Cell::new(3, 4));
        assert_eq!(c.step(Heading::West), Cell::new(2, 3));
        assert_eq!(c.step(Heading::NorthEast), Cell::new(4, 2));
        assert_eq!(c.step(Heading::SouthWest), Cell::new(2, 4));
    }

    #[test]
    fn test_from_delta_covers_the_eight_neighbours() {
        for heading in Heading::ALL {
            let (dx, dy) = heading.delta();
            assert_eq!(Heading::from_delta(dx, dy), Some(heading));
        }
        assert_eq!(Heading::from_delta(0, 0), None);
        assert_eq!(Heading::from_delta(2, 0), None);
    }

    #[test]
    fn test_diagonal_and_adjacent() {
        let c = Cell::new(1, 1);
        assert!(c.is_diagonal_to(Cell::new(0, 0)));
        assert!(c.is_diagonal_to(Cell::new(2, 0)));
        assert!(!c.is_diagonal_to(Cell::new(1, 0)));
        assert!(c.is_adjacent_to(Cell::new(1, 0)));
        assert!(!c.is_adjacent_to(c));
        assert!(!c.is_adjacent_to(Cell::new(3, 1)));
    }

    #[test]
    fn test_heading_wire_format() {
        assert_eq!(serde_json::to_string(&Heading::West).unwrap(), "270");
        let h: Heading = serde_json::from_str("135").unwrap();
        assert_eq!(h, Heading::SouthEast);
        assert!(serde_json::from_str::<Heading>("100").is_err());
        assert!(Heading::South.is_cardinal());
        assert!(!Heading::NorthWest.is_cardinal());
    }
}
