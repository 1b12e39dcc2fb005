use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the four fixed seats, named after its marble color. The seat
/// index doubles as the seating-order position and fixes the track entry
/// offset, the house slots, and the team pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    Red = 0,
    Yellow = 1,
    Green = 2,
    Blue = 3,
}

/// Seats 0 and 2 play against seats 1 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    RedGreen,
    YellowBlue,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::Red, Seat::Yellow, Seat::Green, Seat::Blue];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::Red),
            1 => Some(Seat::Yellow),
            2 => Some(Seat::Green),
            3 => Some(Seat::Blue),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::Red => Seat::Yellow,
            Seat::Yellow => Seat::Green,
            Seat::Green => Seat::Blue,
            Seat::Blue => Seat::Red,
        }
    }

    /// The teammate sitting across, also the swap-phase partner.
    pub const fn partner(self) -> Seat {
        self.next().next()
    }

    pub const fn team(self) -> Team {
        match self {
            Seat::Red | Seat::Green => Team::RedGreen,
            Seat::Yellow | Seat::Blue => Team::YellowBlue,
        }
    }

    /// Where this seat's marbles enter the shared 64-slot ring.
    pub const fn entry_offset(self) -> u8 {
        (self as u8) * 16
    }

    /// Marble ids for this seat are `base..base + 4`.
    pub const fn marble_base(self) -> u8 {
        (self as u8) * 4
    }

    pub const fn color(self) -> &'static str {
        match self {
            Seat::Red => "red",
            Seat::Yellow => "yellow",
            Seat::Green => "green",
            Seat::Blue => "blue",
        }
    }
}

impl Team {
    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Team::RedGreen => [Seat::Red, Seat::Green],
            Team::YellowBlue => [Seat::Yellow, Seat::Blue],
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::RedGreen => "red/green",
            Team::YellowBlue => "yellow/blue",
        };
        f.write_str(label)
    }
}
