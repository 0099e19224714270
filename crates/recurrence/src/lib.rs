//! Recurring-task engine.
//!
//! Runs out-of-band on a timer, never in the request path. Each tick
//! selects the active rules whose fire time has been reached, clones every
//! template task referencing them into a fresh open instance, and advances
//! the rule by its own frequency step - or retires it when the grammar
//! yields no further occurrence.
//!
//! Firing is at-least-once: an instance is spawned before the rule is
//! advanced, and the two store writes are not transactional.

mod engine;
mod error;
mod rule;
mod store;

pub use engine::{RecurrenceEngine, TickReport};
pub use error::RecurrenceError;
pub use rule::{Frequency, RecurrenceRule};
pub use store::{InMemoryRecurrenceStore, RecurrenceStore, TaskInstance, TaskTemplate};
