//! Parameter normalization.
//!
//! The classifier hands over a raw, string-keyed parameter bag plus the
//! original text; this crate turns that into the concrete slot each intent
//! needs. Every function here follows the same candidate order: the most
//! specific structured field first, then known synonym fields, then
//! extraction from the free text - first non-empty, trimmed candidate wins.
//!
//! Nothing reads the clock or the environment: time-dependent extraction
//! takes `now` as a parameter, which keeps every path unit-testable.
//! Missing slots are `None`/error values, never panics.

mod datetime;
mod description;
mod error;
mod math;
pub mod params;
mod recipients;
mod reservation;

pub use datetime::extract_datetime;
pub use description::{clean_description, description};
pub use error::SlotError;
pub use math::{evaluate, evaluate_with_precision, expression, MathResult};
pub use recipients::{email_routing, first_email_in, parse_recipients, EmailRouting};
pub use reservation::reservation_request;
