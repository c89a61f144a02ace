//! Type-safe wrappers around [`Mailbox`](crate::framework::Mailbox), plus the
//! network collaborator used by the lookup service.

pub mod actor_client;
pub mod background_client;
pub mod fetcher;
pub mod mock;
pub mod presentation_client;

pub use actor_client::*;
pub use background_client::*;
pub use fetcher::*;
pub use presentation_client::*;
