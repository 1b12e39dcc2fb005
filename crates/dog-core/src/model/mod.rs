pub mod board;
pub mod card;
pub mod deck;
pub mod face;
pub mod hand;
pub mod marble;
pub mod player;
pub mod seat;
pub mod suit;
pub mod swap;
