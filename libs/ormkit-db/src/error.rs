use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors produced by the model kit.
///
/// Everything here is a programming or configuration error surfaced
/// immediately; nothing is transient or worth retrying.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("entity '{entity}' declares no schema")]
    MissingSchema { entity: String },

    #[error("table '{0}' is already registered with different arguments")]
    DuplicateTable(String),

    #[error("no {enum_type} member has value {value}")]
    UnknownEnumValue {
        enum_type: &'static str,
        value: String,
    },

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),
}
