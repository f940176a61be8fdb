//! Game rules for noughts & crosses.
//!
//! Pure functions evaluating a [`Board`](crate::Board). They never mutate,
//! so [`Game`](crate::Game) can compose them around its own state changes.

mod draw;
mod moves;
mod win;

pub use draw::is_full;
pub use moves::available_moves;
pub use win::{LINES, check_winner};
