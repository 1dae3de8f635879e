//! Core types for the Recall review scheduler.
//!
//! Everything here is synchronous and free of I/O. Persistence backends
//! (e.g. `recall-store-sqlite`) implement [`persist::ReviewPersistence`];
//! front ends drive a [`store::ReviewStore`] and save what it returns.

pub mod card;
pub mod error;
pub mod persist;
pub mod quality;
pub mod schedule;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod timestamp;

pub use card::{CardId, CardReviewRecord};
pub use error::{Error, Result};
pub use quality::Quality;
pub use schedule::{FailurePolicy, Scheduler};
pub use snapshot::Snapshot;
pub use store::ReviewStore;
