//! Config migration: add fields introduced by newer versions.
//!
//! Works on the TOML document rather than the deserialized struct so
//! comments, ordering and unknown keys in the user's file survive.

use anyhow::{Context, Result};
use toml_edit::{DocumentMut, Item};

use super::Config;

/// Outcome of a migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateResult {
    /// Migrated file content
    pub content: String,
    /// Added fields as `section.key`
    pub added_fields: Vec<String>,
    /// Sections that were missing entirely
    pub sections_added: Vec<String>,
}

impl MigrateResult {
    pub fn has_changes(&self) -> bool {
        !self.added_fields.is_empty()
    }
}

/// Add every field of the default config missing from `content`.
pub fn migrate_config(content: &str) -> Result<MigrateResult> {
    let mut doc: DocumentMut = content
        .parse()
        .context("Failed to parse existing config file")?;
    let defaults: DocumentMut = toml::to_string_pretty(&Config::default())?
        .parse()
        .context("Failed to build default config document")?;

    let mut added_fields = Vec::new();
    let mut sections_added = Vec::new();

    for (section, default_item) in defaults.iter() {
        let Some(default_table) = default_item.as_table() else {
            continue;
        };
        match doc.get_mut(section).and_then(Item::as_table_mut) {
            Some(table) => {
                for (key, value) in default_table.iter() {
                    if !table.contains_key(key) {
                        table.insert(key, value.clone());
                        added_fields.push(format!("{}.{}", section, key));
                    }
                }
            }
            None => {
                // Present but not a table: leave the user's value alone.
                if doc.contains_key(section) {
                    continue;
                }
                doc.insert(section, default_item.clone());
                sections_added.push(section.to_string());
                added_fields.extend(
                    default_table
                        .iter()
                        .map(|(key, _)| format!("{}.{}", section, key)),
                );
            }
        }
    }

    Ok(MigrateResult {
        content: doc.to_string(),
        added_fields,
        sections_added,
    })
}
