//! Schema injection and the process-wide model metadata registry.
//!
//! Every concrete entity must end up with table arguments that carry a
//! `schema` key. Instead of a hidden class-definition hook, the injection is
//! an explicit builder step: call [`register_entity`] (or
//! [`Metadata::register`], which also resolves constraint names) once per
//! entity, at startup.
//!
//! The schema policy is eager and explicit: the declared schema string is
//! respected as-is, no `<name>_schema` default is synthesized, and a blank
//! schema is a configuration error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::naming::NamingConventions;

/// A table-level constraint declaration.
///
/// Declarations carry no names of their own; deterministic names are
/// resolved at registration time through [`NamingConventions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintDef {
    PrimaryKey { columns: Vec<String> },
    ForeignKey { columns: Vec<String>, references: String },
    Unique { columns: Vec<String> },
    Check { name: String, expr: String },
    Index { columns: Vec<String> },
}

impl ConstraintDef {
    /// Deterministic constraint name under the given conventions.
    #[must_use]
    pub fn resolved_name(&self, table: &str, naming: &NamingConventions) -> String {
        match self {
            Self::PrimaryKey { .. } => naming.primary_key(table),
            Self::ForeignKey { columns, .. } => naming.foreign_key(table, &as_strs(columns)),
            Self::Unique { columns } => naming.unique(table, &as_strs(columns)),
            Self::Check { name, .. } => naming.check(table, name),
            Self::Index { columns } => naming.index(table, &as_strs(columns)),
        }
    }
}

fn as_strs(columns: &[String]) -> Vec<&str> {
    columns.iter().map(String::as_str).collect()
}

/// One entry of the ordered table-argument form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableArg {
    Constraint(ConstraintDef),
    Options(BTreeMap<String, String>),
}

/// Table-level arguments attached to an entity.
///
/// Either a bare options map, or an ordered list of constraint declarations
/// with at most one trailing options map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableArgs {
    Options(BTreeMap<String, String>),
    Items(Vec<TableArg>),
}

impl TableArgs {
    /// Empty options-map form.
    #[must_use]
    pub fn options() -> Self {
        Self::Options(BTreeMap::new())
    }

    /// Ordered form.
    #[must_use]
    pub fn items(items: Vec<TableArg>) -> Self {
        Self::Items(items)
    }

    /// The effective options map, if any.
    #[must_use]
    pub fn options_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Options(map) => Some(map),
            Self::Items(items) => items.iter().rev().find_map(|arg| match arg {
                TableArg::Options(map) => Some(map),
                TableArg::Constraint(_) => None,
            }),
        }
    }

    /// The injected schema, if present.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.options_map()
            .and_then(|map| map.get("schema"))
            .map(String::as_str)
    }
}

/// Inject the schema into an entity's table arguments.
///
/// The options-map form gets its `schema` key inserted or overwritten. The
/// ordered form gets the key merged into its trailing options map; when the
/// list is empty or ends in a constraint, a one-entry options map is
/// appended instead.
///
/// # Errors
/// [`ModelError::MissingSchema`] if `schema` is blank. The policy is
/// deliberately eager: no default schema is ever synthesized.
pub fn register_entity(table: &str, schema: &str, base: TableArgs) -> Result<TableArgs> {
    if schema.trim().is_empty() {
        return Err(ModelError::MissingSchema {
            entity: table.to_owned(),
        });
    }

    Ok(match base {
        TableArgs::Options(mut map) => {
            map.insert("schema".to_owned(), schema.to_owned());
            TableArgs::Options(map)
        }
        TableArgs::Items(mut items) => {
            if let Some(TableArg::Options(map)) = items.last_mut() {
                map.insert("schema".to_owned(), schema.to_owned());
            } else {
                let mut map = BTreeMap::new();
                map.insert("schema".to_owned(), schema.to_owned());
                items.push(TableArg::Options(map));
            }
            TableArgs::Items(items)
        }
    })
}

/// A table as recorded in the metadata registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredTable {
    pub table: String,
    pub schema: String,
    /// Final arguments with the schema key injected.
    pub args: TableArgs,
    /// Constraint names resolved through the naming conventions, in
    /// declaration order.
    pub constraint_names: Vec<String>,
}

/// Process-wide model metadata: naming conventions plus every registered
/// table.
///
/// Created once on first access and never recreated. Registration is a
/// startup-time operation; the registry is read-mostly afterwards and must
/// not be mutated per-request.
#[derive(Debug)]
pub struct Metadata {
    naming: NamingConventions,
    tables: RwLock<BTreeMap<String, RegisteredTable>>,
}

static METADATA: LazyLock<Metadata> = LazyLock::new(Metadata::new);

/// The shared metadata instance.
#[must_use]
pub fn metadata() -> &'static Metadata {
    &METADATA
}

impl Metadata {
    fn new() -> Self {
        Self {
            naming: NamingConventions,
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn naming(&self) -> &NamingConventions {
        &self.naming
    }

    /// Register an entity's table, injecting the schema and resolving
    /// deterministic constraint names.
    ///
    /// Re-registering a table with identical arguments is idempotent.
    ///
    /// # Errors
    /// [`ModelError::MissingSchema`] for a blank schema,
    /// [`ModelError::DuplicateTable`] for a conflicting re-registration.
    pub fn register(&self, table: &str, schema: &str, base: TableArgs) -> Result<RegisteredTable> {
        let args = register_entity(table, schema, base)?;
        let constraint_names = self.resolve_constraint_names(table, &args);
        let entry = RegisteredTable {
            table: table.to_owned(),
            schema: schema.to_owned(),
            args,
            constraint_names,
        };

        let mut tables = self.tables.write();
        if let Some(existing) = tables.get(table) {
            if *existing == entry {
                return Ok(entry);
            }
            return Err(ModelError::DuplicateTable(table.to_owned()));
        }
        debug!(table, schema, "registered entity table");
        tables.insert(table.to_owned(), entry.clone());
        Ok(entry)
    }

    /// Look up a registered table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<RegisteredTable> {
        self.tables.read().get(name).cloned()
    }

    /// Names of all registered tables.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    fn resolve_constraint_names(&self, table: &str, args: &TableArgs) -> Vec<String> {
        match args {
            TableArgs::Options(_) => Vec::new(),
            TableArgs::Items(items) => items
                .iter()
                .filter_map(|arg| match arg {
                    TableArg::Constraint(c) => Some(c.resolved_name(table, &self.naming)),
                    TableArg::Options(_) => None,
                })
                .collect(),
        }
    }
}
