//! Inbox of the presentation context.

use crate::model::ContentMessage;

/// Everything the place tracker reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    /// The page observer saw a mutation. No payload: the page is re-read.
    DomChanged,
    /// A message from the background context.
    Channel(ContentMessage),
    /// Stop the background context once every lookup sent so far is queued there.
    StopLookups,
}

impl From<ContentMessage> for PresentationEvent {
    fn from(message: ContentMessage) -> Self {
        PresentationEvent::Channel(message)
    }
}
