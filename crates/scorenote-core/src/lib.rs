//! scorenote-core: Exam records, goals, and score analytics.
//!
//! This crate defines the data model, the key-value storage seam, and the
//! trend/goal analysis that the scorenote front ends build on.

pub mod analysis;
pub mod backup;
pub mod balance;
pub mod book;
pub mod curve;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod traits;

pub use book::{AddExamResponse, ScoreBook};
pub use error::{Result, ScoreNoteError};
pub use store::MemoryStore;
pub use traits::KeyValueStore;
