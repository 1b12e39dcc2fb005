use crate::model::seat::Seat;
use core::fmt;

/// Unique per game: `seat.index() * 4 + marble_index`, 16 in total.
pub type MarbleId = u8;

/// Where a marble stands. Home depths are private to the owning seat; the
/// flat integer encoding exists only at the view boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    House,
    Track(u8),
    Home(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marble {
    pub id: MarbleId,
    pub position: Position,
}

impl Marble {
    pub const fn new(id: MarbleId) -> Self {
        Self {
            id,
            position: Position::House,
        }
    }

    pub const fn owner(self) -> Seat {
        match Seat::from_index((self.id / 4) as usize) {
            Some(seat) => seat,
            None => Seat::Red, // unreachable: ids are 0..16
        }
    }

    pub const fn is_in_house(self) -> bool {
        matches!(self.position, Position::House)
    }

    pub const fn is_home(self) -> bool {
        matches!(self.position, Position::Home(_))
    }

    pub const fn track_offset(self) -> Option<u8> {
        match self.position {
            Position::Track(offset) => Some(offset),
            _ => None,
        }
    }

    /// The flat integer clients see: the original per-marble house slot
    /// `-(id + 1)`, the ring offset, or `1000 + depth` for the owner's home.
    pub const fn encoded_position(self) -> i32 {
        match self.position {
            Position::House => -(self.id as i32 + 1),
            Position::Track(offset) => offset as i32,
            Position::Home(depth) => 1000 + depth as i32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::House => f.write_str("house"),
            Position::Track(offset) => write!(f, "track {offset}"),
            Position::Home(depth) => write!(f, "home {depth}"),
        }
    }
}
