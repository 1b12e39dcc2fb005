pub mod action;
pub mod error;
pub mod registry;
pub mod state;
pub mod view;
