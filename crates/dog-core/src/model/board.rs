use crate::model::marble::Position;
use crate::model::seat::Seat;
use core::fmt;

/// Slots on the shared circular track.
pub const RING_LEN: u8 = 64;
/// Depth of each seat's private home stretch.
pub const HOME_LEN: u8 = 4;

/// Where a legal travel ends up. Occupancy rules (kicks, own-marble
/// blocking) are the game state's business; this module is pure geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Track(u8),
    Home(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelError {
    /// Only an exit (action 0) moves a marble out of the house.
    FromHouse,
    /// The travel would run past the last home slot.
    OvershootsHome,
    /// Backward travel is defined on the ring only.
    BackwardOutsideTrack,
}

impl fmt::Display for TravelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TravelError::FromHouse => "the marble is still in its house",
            TravelError::OvershootsHome => "the move overshoots the home stretch",
            TravelError::BackwardOutsideTrack => "backward moves need a marble on the track",
        };
        f.write_str(text)
    }
}

impl std::error::Error for TravelError {}

/// Steps forward until the mover would cross its own entry offset, counting
/// a marble standing exactly on the entry as a full lap away (it just came
/// out and must go around once).
fn steps_to_entry(seat: Seat, offset: u8) -> u8 {
    let entry = seat.entry_offset() as i32;
    (((entry - offset as i32 - 1).rem_euclid(RING_LEN as i32)) + 1) as u8
}

/// Destination of a forward move of `steps` (1..=13). Travel that crosses
/// the mover's own entry offset diverts into the home stretch: the steps
/// remaining past the entry become the depth, counted from 1.
pub fn forward(seat: Seat, from: Position, steps: u8) -> Result<Landing, TravelError> {
    debug_assert!(steps >= 1);
    match from {
        Position::House => Err(TravelError::FromHouse),
        Position::Track(offset) => {
            let boundary = steps_to_entry(seat, offset);
            if steps <= boundary {
                Ok(Landing::Track((offset + steps) % RING_LEN))
            } else {
                let depth = steps - boundary;
                if depth > HOME_LEN {
                    Err(TravelError::OvershootsHome)
                } else {
                    Ok(Landing::Home(depth))
                }
            }
        }
        Position::Home(depth) => {
            let target = depth + steps;
            if target > HOME_LEN {
                Err(TravelError::OvershootsHome)
            } else {
                Ok(Landing::Home(target))
            }
        }
    }
}

/// Destination of a backward move; never enters the home stretch.
pub fn backward(from: Position, steps: u8) -> Result<u8, TravelError> {
    match from {
        Position::Track(offset) => {
            Ok((offset as i32 - steps as i32).rem_euclid(RING_LEN as i32) as u8)
        }
        Position::House | Position::Home(_) => Err(TravelError::BackwardOutsideTrack),
    }
}
