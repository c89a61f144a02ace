//! # Core Actor Framework
//!
//! This module defines the generic building blocks both execution contexts are built on.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that the state owned by an actor must implement.
//! - [`MessageActor`]: The generic actor that owns the entity and processes its mailbox.
//! - [`Mailbox`]: The cloneable, fire-and-forget sender used to talk to an actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, MailboxFull).

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait implemented by the state that lives inside a [`MessageActor`].
///
/// # Architecture Note
/// The presentation context (place tracking) and the background context (lookups)
/// are both "one owner, one inbox, sequential processing". By defining that contract
/// once we write the message loop once and reuse it for both.
///
/// # Async & Context
/// This trait is `#[async_trait]` so handlers can await other actors or the network.
/// The `Context` type is injected into every hook, which allows "Late Binding"
/// of dependencies (passing clients to `run()` instead of `new()`). The two contexts
/// of this crate reference each other, so late binding is what makes wiring possible.
///
/// # Provided Methods (Hooks)
/// - [`ActorEntity::on_start`]
/// - [`ActorEntity::on_stop`]
///
/// The defaults do nothing.
#[async_trait]
pub trait ActorEntity: Send + 'static {
    /// The message type accepted by this actor's mailbox.
    type Message: Send + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type reported by message handlers.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the first message is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a single message. Errors are logged by the actor loop; they never stop it.
    async fn handle_message(
        &mut self,
        msg: Self::Message,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called once after the loop exits.
    async fn on_stop(&mut self, _ctx: &Self::Context) {}
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor mailbox full")]
    MailboxFull,
}

/// What actually travels through an actor's channel.
///
/// `Stop` exists because the two contexts hold each other's mailboxes: with a
/// cyclic dependency graph, dropping the clients never closes the channels, so
/// shutdown has to be requested explicitly.
#[derive(Debug)]
pub enum Envelope<M> {
    Deliver(M),
    Stop,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns one [`ActorEntity`] and drains its mailbox.
///
/// **Concurrency Model**:
/// Messages are processed *sequentially*, one `handle_message` at a time, so the
/// entity's state needs no `Mutex`. Entities that want concurrent work (the lookup
/// service does) spawn tasks from their handler.
pub struct MessageActor<T: ActorEntity> {
    receiver: mpsc::Receiver<Envelope<T::Message>>,
    entity: T,
    handled: u64,
}

impl<T: ActorEntity> MessageActor<T> {
    /// Creates the actor and the [`Mailbox`] used to reach it.
    ///
    /// `buffer_size` is the capacity of the underlying MPSC channel. When it is
    /// full, [`Mailbox::send`] waits and [`Mailbox::try_send`] fails.
    pub fn new(entity: T, buffer_size: usize) -> (Self, Mailbox<T::Message>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entity,
            handled: 0,
        };
        (actor, Mailbox::new(sender))
    }

    /// Runs the actor's event loop until a stop envelope arrives or every
    /// mailbox has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, "Actor started");

        if let Err(e) = self.entity.on_start(&context).await {
            warn!(entity_type, error = %e, "on_start failed");
        }

        while let Some(envelope) = self.receiver.recv().await {
            match envelope {
                Envelope::Deliver(msg) => {
                    debug!(entity_type, ?msg, "Message");
                    self.handled += 1;
                    if let Err(e) = self.entity.handle_message(msg, &context).await {
                        warn!(entity_type, error = %e, "Message failed");
                    }
                }
                Envelope::Stop => {
                    debug!(entity_type, "Stop requested");
                    break;
                }
            }
        }

        self.entity.on_stop(&context).await;
        info!(entity_type, handled = self.handled, "Shutdown");
    }
}

/// Short type name for log fields ("PlaceTracker" rather than the full path with generics).
fn entity_type<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or("Unknown")
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Sending half of an actor's channel. Fire-and-forget: there is no reply slot,
/// answers (if any) travel back through another mailbox.
pub struct Mailbox<M> {
    sender: mpsc::Sender<Envelope<M>>,
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<M: Send + 'static> Mailbox<M> {
    pub fn new(sender: mpsc::Sender<Envelope<M>>) -> Self {
        Self { sender }
    }

    /// Queue a message, waiting for buffer space if necessary.
    pub async fn send(&self, msg: M) -> Result<(), FrameworkError> {
        self.sender
            .send(Envelope::Deliver(msg))
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    /// Queue a message without waiting.
    pub fn try_send(&self, msg: M) -> Result<(), FrameworkError> {
        self.sender
            .try_send(Envelope::Deliver(msg))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => FrameworkError::MailboxFull,
                mpsc::error::TrySendError::Closed(_) => FrameworkError::ActorClosed,
            })
    }

    /// Ask the actor to finish after the messages already queued.
    pub async fn stop(&self) -> Result<(), FrameworkError> {
        self.sender
            .send(Envelope::Stop)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
