//! Pure data structures exchanged between the two contexts.

pub mod listing;
pub mod message;
pub mod place;

pub use listing::*;
pub use message::*;
pub use place::*;
