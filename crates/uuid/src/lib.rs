//! Identifier generation for medtrack records.
//!
//! Medicines and reminders are identified by opaque strings. When the system itself allocates
//! an identifier it uses a *canonical* UUID representation: **32 lowercase hexadecimal
//! characters** (no hyphens), the same value you would get from
//! `Uuid::new_v4().simple().to_string()`.
//!
//! This crate provides:
//! - [`RecordId`], a freshly generated identifier that always renders in canonical form.
//! - [`IdGenerator`], the seam through which the store and the REST layer allocate ids, with a
//!   random implementation ([`UuidGenerator`]) and a deterministic one
//!   ([`SequentialIdGenerator`]) for tests and reproducible sessions.

mod generator;
mod record_id;

pub use generator::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use record_id::RecordId;
