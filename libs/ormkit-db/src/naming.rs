//! Deterministic naming for generated constraints and indexes.
//!
//! The templates follow the PostgreSQL server defaults (`_pkey`, `_fkey`,
//! `_key`), so hand-written DDL and generated migrations agree on names and
//! repeated migration generation is diff-stable across runs.

/// Naming templates, pure functions of table and column names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingConventions;

impl NamingConventions {
    /// `ix_{table}_{column}` joined over all columns.
    #[must_use]
    pub fn index(&self, table: &str, columns: &[&str]) -> String {
        let labels: Vec<String> = columns.iter().map(|c| format!("{table}_{c}")).collect();
        format!("ix_{}", labels.join("_"))
    }

    /// `{table}_{columns}_key`
    #[must_use]
    pub fn unique(&self, table: &str, columns: &[&str]) -> String {
        format!("{table}_{}_key", columns.join("_"))
    }

    /// `{table}_{constraint}_check`
    #[must_use]
    pub fn check(&self, table: &str, constraint: &str) -> String {
        format!("{table}_{constraint}_check")
    }

    /// `{table}_{columns}_fkey`
    #[must_use]
    pub fn foreign_key(&self, table: &str, columns: &[&str]) -> String {
        format!("{table}_{}_fkey", columns.join("_"))
    }

    /// `{table}_pkey`
    #[must_use]
    pub fn primary_key(&self, table: &str) -> String {
        format!("{table}_pkey")
    }
}
