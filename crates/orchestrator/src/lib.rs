//! Action router for the Errand assistant.
//!
//! This crate provides the [`Assistant`] type which coordinates one request
//! end to end: classify the text, normalize the parameters the target
//! intent needs, dispatch the matching domain action and compose a
//! transport-agnostic response.
//!
//! # Architecture
//!
//! ```text
//! Free-form text
//!       ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │                      ASSISTANT                          │
//! │                                                         │
//! │  1. Classify (cloud → local → rule fallback chain)      │
//! │         ↓                                               │
//! │  2. Normalize slots for the recognized intent           │
//! │     (description, date-time, recipients, expression,    │
//! │      reservation window)                                │
//! │         ↓                                               │
//! │  3. Route:                                              │
//! │     • missing slot     → clarification message          │
//! │     • task/reminder/   → DomainActions collaborator     │
//! │       email                                             │
//! │     • room.reserve     → BookingService resolver        │
//! │     • math.evaluate    → sanitize + evaluate            │
//! │         ↓                                               │
//! │  4. Compose { intent, parameters, message, result }     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures degrade: a classifier provider error falls through the chain, a
//! missing slot becomes a clarification, a busy room becomes a not-found
//! result carrying alternatives, and a secondary action failure (calendar)
//! is folded into the primary action's success message.
//!
//! The recurrence engine is intentionally absent from this flow: it runs
//! out-of-band on a timer (see the `recurrence` crate).
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use orchestrator::{Assistant, InMemoryActions};
//! use room_booking::BookingService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let actions = Arc::new(InMemoryActions::new());
//!     let booking = Arc::new(BookingService::with_default_rooms());
//!     let assistant = Assistant::from_env(actions, booking);
//!
//!     let response = assistant.handle("alice", "remind me to stretch tomorrow at 9:00").await;
//!     println!("{}", response.message.unwrap_or_default());
//! }
//! ```

mod actions;
mod assistant;

pub use actions::{
    ActionError, DomainActions, EmailDraft, EmailReceipt, EventDraft, EventRecord,
    InMemoryActions, ReminderDraft, ReminderRecord, TaskDraft, TaskRecord,
};
pub use assistant::{Assistant, ParameterBag};

// Re-export commonly used types from the pipeline crates
pub use assistant_core::{
    AssistantResponse, ClassifierChain, IntentClassifier, IntentLabel, IntentResult,
};
pub use room_booking::{BookingError, BookingOutcome, BookingService};
