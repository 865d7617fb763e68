//! Base entity layer for `SeaORM` entities.
//!
//! This crate provides the declarative plumbing shared by application
//! entities, without touching query execution, transactions, migrations, or
//! connection lifecycle (those belong to the surrounding data-access layer):
//!
//! - [`EnumCol`]: a column adapter storing an application enum as an integer
//!   or text primitive, with strict decode errors for unknown values.
//! - [`metadata`] / [`register_entity`]: explicit schema injection into
//!   table arguments plus a process-wide registry with deterministic
//!   constraint naming ([`NamingConventions`]).
//! - [`TimestampedEntity`] / [`RecordEntity`] and their active-model
//!   counterparts: created/modified/soft-deleted bookkeeping and
//!   client-generated UUID identity with defensive representation.
//!
//! # Features
//! - `pg`, `sqlite`: enable the corresponding `SQLx` backend of `SeaORM`
//!   (default: `sqlite` for local development and tests).
//!
//! # Example
//! ```rust,ignore
//! use ormkit_db::{EnumCol, RecordActiveModel, TableArgs, metadata};
//!
//! // Once, at startup:
//! metadata().register("widgets", "widgets_schema", TableArgs::options())?;
//!
//! // Per new row:
//! let mut am = widget::ActiveModel::new_record(); // id assigned client-side
//! am.status = Set(EnumCol(WidgetStatus::Draft));
//! let model = am.insert(&conn).await?;            // created_at stamped
//! ```

pub mod enums;
pub mod error;
pub mod naming;
pub mod record;
pub mod schema;

pub use enums::{EnumCol, EnumRepr, StoredEnum};
pub use error::{ModelError, Result};
pub use naming::NamingConventions;
pub use record::{
    RecordActiveModel, RecordEntity, RecordIdentity, TimestampedActiveModel, TimestampedEntity,
    record_repr,
};
pub use schema::{
    ConstraintDef, Metadata, RegisteredTable, TableArg, TableArgs, metadata, register_entity,
};
