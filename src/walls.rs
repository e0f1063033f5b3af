use crate::error::{LabyError, Result};
use crate::geometry::Heading;

const NORTH_BIT: u8 = 0b1000;
const EAST_BIT: u8 = 0b0100;
const SOUTH_BIT: u8 = 0b0010;
const WEST_BIT: u8 = 0b0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Open,
    Wall,
}

impl Wall {
    fn from_bit(mask: u8, bit: u8) -> Self {
        if mask & bit != 0 {
            Wall::Wall
        } else {
            Wall::Open
        }
    }
}

/// The four sides of a single cell, as revealed while standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub north: Wall,
    pub east: Wall,
    pub south: Wall,
    pub west: Wall,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            north: Wall::Wall,
            east: Wall::Wall,
            south: Wall::Wall,
            west: Wall::Wall,
        }
    }
}

impl Walls {
    /// Decodes the 4-bit square value sent by the game.
    /// A set bit blocks that side: 0x8 North, 0x4 East, 0x2 South, 0x1 West.
    pub fn from_mask(mask: u8) -> Result<Self> {
        if mask > 0b1111 {
            return Err(LabyError::MalformedInput(format!(
                "wall mask {mask} does not fit in 4 bits"
            )));
        }
        Ok(Self {
            north: Wall::from_bit(mask, NORTH_BIT),
            east: Wall::from_bit(mask, EAST_BIT),
            south: Wall::from_bit(mask, SOUTH_BIT),
            west: Wall::from_bit(mask, WEST_BIT),
        })
    }

    pub fn to_mask(&self) -> u8 {
        [
            (self.north, NORTH_BIT),
            (self.east, EAST_BIT),
            (self.south, SOUTH_BIT),
            (self.west, WEST_BIT),
        ]
        .into_iter()
        .filter(|(wall, _)| *wall == Wall::Wall)
        .fold(0, |mask, (_, bit)| mask | bit)
    }

    /// Diagonal headings have no wall of their own and always report `Wall`.
    pub fn get(&self, heading: Heading) -> Wall {
        match heading {
            Heading::North => self.north,
            Heading::East => self.east,
            Heading::South => self.south,
            Heading::West => self.west,
            _ => Wall::Wall,
        }
    }

    pub fn set(&mut self, heading: Heading, wall: Wall) {
        match heading {
            Heading::North => self.north = wall,
            Heading::East => self.east = wall,
            Heading::South => self.south = wall,
            Heading::West => self.west = wall,
            _ => {}
        }
    }

    pub fn is_open(&self, heading: Heading) -> bool {
        self.get(heading) == Wall::Open
    }

    /// Open sides in North, East, South, West order.
    pub fn open_headings(&self) -> Vec<Heading> {
        Heading::CARDINALS
            .into_iter()
            .filter(|h| self.is_open(*h))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_bits() {
        let walls = Walls::from_mask(0b1010).unwrap();
        assert_eq!(walls.north, Wall::Wall);
        assert_eq!(walls.east, Wall::Open);
        assert_eq!(walls.south, Wall::Wall);
        assert_eq!(walls.west, Wall::Open);
        assert_eq!(walls.open_headings(), vec![Heading::East, Heading::West]);
        assert_eq!(walls.to_mask(), 0b1010);
    }

    #[test]
    fn test_fully_open_and_closed() {
        assert_eq!(Walls::from_mask(0).unwrap().open_headings().len(), 4);
        assert!(Walls::from_mask(15).unwrap().open_headings().is_empty());
        assert_eq!(Walls::default().to_mask(), 15);
    }

    #[test]
    fn test_mask_out_of_range_is_rejected() {
        assert!(matches!(
            Walls::from_mask(16),
            Err(LabyError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_diagonals_are_never_open() {
        let walls = Walls::from_mask(0).unwrap();
        assert!(!walls.is_open(Heading::NorthEast));
        assert!(walls.is_open(Heading::North));
    }
}
