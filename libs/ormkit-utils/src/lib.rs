//! Small shared utilities for the ormkit workspace.
//!
//! The model layer never calls `Utc::now()` or `Uuid::new_v4()` directly;
//! everything goes through this crate so all timestamps and identifiers come
//! from a single place.

pub mod clock;
pub mod id;

pub use clock::utc_now;
pub use id::generate_uuid;
