//! Generic actor framework shared by both execution contexts.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait for the state an actor owns and the messages it handles
//! - [`MessageActor`] - Generic actor that drains a mailbox sequentially
//! - [`Mailbox`] - Cloneable fire-and-forget sender
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for a mailbox that captures messages instead of running an actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
