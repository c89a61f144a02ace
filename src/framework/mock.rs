//! # Mock Framework
//!
//! Utilities for testing a context in isolation from the actor on the other side.
//!
//! Use [`MockMailbox::new`] to get a [`Mailbox`] whose messages are captured
//! instead of processed. Then queue expectations with [`MockMailbox::expect_message`]
//! and check them with [`MockMailbox::verify`].

use crate::framework::{Envelope, Mailbox};
use std::collections::VecDeque;
use std::fmt::Debug;
use tokio::sync::mpsc;

type Matcher<M> = Box<dyn Fn(&M) -> bool + Send>;

/// A mailbox that records what was sent to it.
///
/// # Example
/// ```ignore
/// let mut mock = MockMailbox::<BackgroundRequest>::new();
/// mock.expect_message()
///     .matching(|m| matches!(m, BackgroundRequest::FetchTabelog(r) if r.name == "Sushi Dai"));
///
/// let client = BackgroundClient::new(mock.mailbox());
/// // Exercise code that sends through `client`...
/// mock.verify(); // Ensures every expectation matched, in order, and nothing extra was sent
/// ```
pub struct MockMailbox<M> {
    mailbox: Mailbox<M>,
    receiver: mpsc::Receiver<Envelope<M>>,
    expectations: VecDeque<(String, Matcher<M>)>,
    stopped: bool,
}

impl<M: Debug + Send + 'static> MockMailbox<M> {
    /// Creates a new mock mailbox with no expectations.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(100);
        Self {
            mailbox: Mailbox::new(sender),
            receiver,
            expectations: VecDeque::new(),
            stopped: false,
        }
    }

    /// Returns a mailbox for use in tests.
    pub fn mailbox(&self) -> Mailbox<M> {
        self.mailbox.clone()
    }

    /// Drains and returns every message delivered so far.
    pub fn received(&mut self) -> Vec<M> {
        let mut out = Vec::new();
        while let Ok(envelope) = self.receiver.try_recv() {
            match envelope {
                Envelope::Deliver(msg) => out.push(msg),
                Envelope::Stop => self.stopped = true,
            }
        }
        out
    }

    /// Whether a stop envelope has been observed by [`MockMailbox::received`].
    pub fn stop_requested(&self) -> bool {
        self.stopped
    }

    /// Expects one more message.
    pub fn expect_message(&mut self) -> MessageExpectationBuilder<'_, M> {
        MessageExpectationBuilder { mock: self }
    }

    /// Verifies that the delivered messages match the expectations one to one.
    pub fn verify(&mut self) {
        let received = self.received();
        if received.len() != self.expectations.len() {
            panic!(
                "Expected {} message(s), received {}: {:?}",
                self.expectations.len(),
                received.len(),
                received
            );
        }
        for msg in received {
            if let Some((label, matcher)) = self.expectations.pop_front() {
                if !matcher(&msg) {
                    panic!("Message {:?} did not match expectation '{}'", msg, label);
                }
            }
        }
    }

    /// Panics if anything was delivered.
    pub fn assert_no_messages(&mut self) {
        let received = self.received();
        if !received.is_empty() {
            panic!("Expected no messages, received {:?}", received);
        }
    }
}

impl<M: Debug + Send + 'static> Default for MockMailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for message expectations.
pub struct MessageExpectationBuilder<'a, M> {
    mock: &'a mut MockMailbox<M>,
}

impl<M: Debug + Send + 'static> MessageExpectationBuilder<'_, M> {
    /// Accepts any message.
    pub fn any(self) {
        self.mock
            .expectations
            .push_back(("any".to_string(), Box::new(|_| true)));
    }

    /// Accepts a message for which `predicate` holds.
    pub fn matching(self, predicate: impl Fn(&M) -> bool + Send + 'static) {
        let label = format!("predicate #{}", self.mock.expectations.len() + 1);
        self.mock.expectations.push_back((label, Box::new(predicate)));
    }
}
