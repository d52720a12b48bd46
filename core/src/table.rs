//! Option tables: validation, canonical lookup and loading.
//!
//! A table is an ordered list of [`OptionDef`] entries. Order matters twice:
//! an alias belongs to the real option right before it, and the help listing
//! follows table order. [`OptionTable::new`] checks those structural rules
//! once, so the parser and the help renderer can trust the table.
//!
//! # Examples
//!
//! ```
//! use argp_core::{OptionDef, OptionTable};
//!
//! let table = OptionTable::new(vec![
//!     OptionDef::new('f', "file").with_arg("<file>"),
//!     OptionDef::long("ffff").alias(),
//!     OptionDef::short('F').alias(),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.find_long("ffff").unwrap().long.as_deref(), Some("file"));
//! assert_eq!(table.find_short('F').unwrap().long.as_deref(), Some("file"));
//! assert!(table.find_long("nope").is_none());
//! ```

use std::collections::HashSet;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::OptionDef;

/// Errors raised while building or loading an option table.
#[derive(Debug, Error)]
pub enum TableError {
    /// An alias is not preceded by a real option with an identifier.
    #[error("alias at entry {0} has no preceding option")]
    OrphanAlias(usize),
    /// An alias names neither a short nor a long identifier.
    #[error("alias at entry {0} must define a short or long name")]
    NamelessAlias(usize),
    /// The same short identifier appears twice.
    #[error("duplicate short option: -{0}")]
    DuplicateShort(char),
    /// The same long identifier appears twice.
    #[error("duplicate long option: --{0}")]
    DuplicateLong(String),
    /// The table file could not be read.
    #[error("failed to read option table: {0}")]
    Io(#[from] std::io::Error),
    /// The table file is not valid YAML.
    #[error("invalid YAML option table: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The table file is not valid JSON.
    #[error("invalid JSON option table: {0}")]
    Json(#[from] serde_json::Error),
}

/// A validated, read-only option table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionDef>", into = "Vec<OptionDef>")]
pub struct OptionTable {
    entries: Vec<OptionDef>,
    /// For every entry, the index of the real option it resolves to.
    canonical: Vec<usize>,
}

impl OptionTable {
    /// Builds a table, normalizing blank identifiers and validating aliases
    /// and duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OrphanAlias`], [`TableError::NamelessAlias`],
    /// [`TableError::DuplicateShort`] or [`TableError::DuplicateLong`] when the
    /// table is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use argp_core::{OptionDef, OptionTable, TableError};
    ///
    /// let err = OptionTable::new(vec![
    ///     OptionDef::header("OPTIONS:"),
    ///     OptionDef::short('q').alias(),
    /// ])
    /// .unwrap_err();
    /// assert!(matches!(err, TableError::OrphanAlias(1)));
    /// ```
    pub fn new(entries: Vec<OptionDef>) -> Result<Self, TableError> {
        let entries: Vec<OptionDef> = entries.into_iter().map(OptionDef::normalized).collect();
        let mut canonical = Vec::with_capacity(entries.len());
        let mut current: Option<usize> = None;
        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.is_alias() {
                if entry.is_doc_entry() {
                    return Err(TableError::NamelessAlias(index));
                }
                let owner = current
                    .filter(|&i| !entries[i].is_doc_entry())
                    .ok_or(TableError::OrphanAlias(index))?;
                canonical.push(owner);
            } else {
                current = Some(index);
                canonical.push(index);
            }

            if let Some(short) = entry.short {
                if !shorts.insert(short) {
                    return Err(TableError::DuplicateShort(short));
                }
            }
            if let Some(long) = &entry.long {
                if !longs.insert(long.as_str()) {
                    return Err(TableError::DuplicateLong(long.clone()));
                }
            }
        }

        debug!(entries = entries.len(), "built option table");
        Ok(Self { entries, canonical })
    }

    /// Parses a table from YAML text (a sequence of option definitions).
    ///
    /// # Examples
    ///
    /// ```
    /// use argp_core::OptionTable;
    ///
    /// let table = OptionTable::from_yaml_str(r#"
    /// - doc: "OPTIONS:"
    /// - short: v
    ///   long: verbose
    ///   doc: talk more
    /// - short: o
    ///   long: output
    ///   arg_name: <file>
    /// "#).unwrap();
    /// assert_eq!(table.len(), 3);
    /// assert!(table.find_short('o').unwrap().takes_arg());
    /// ```
    pub fn from_yaml_str(text: &str) -> Result<Self, TableError> {
        let entries: Vec<OptionDef> = serde_yaml::from_str(text)?;
        Self::new(entries)
    }

    /// Parses a table from JSON text (an array of option definitions).
    pub fn from_json_str(text: &str) -> Result<Self, TableError> {
        let entries: Vec<OptionDef> = serde_json::from_str(text)?;
        Self::new(entries)
    }

    /// Loads a table from a file. A `.json` extension selects JSON; anything
    /// else is read as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Io`] if the file cannot be opened, a parse error
    /// variant if the content is malformed, or a validation variant if the
    /// table breaks the alias or duplicate rules.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), is_json, "loading option table");
        let entries: Vec<OptionDef> = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Self::new(entries)
    }

    /// Returns the entries in table order.
    pub fn entries(&self) -> &[OptionDef] {
        &self.entries
    }

    /// Returns the number of entries, documentation lines included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the canonical (non-alias) entry for the entry at `index`.
    pub fn canonical_of(&self, index: usize) -> Option<&OptionDef> {
        self.canonical.get(index).map(|&i| &self.entries[i])
    }

    /// Finds the canonical option whose entry, or one of its aliases, has the
    /// long identifier `long`.
    pub fn find_long(&self, long: &str) -> Option<&OptionDef> {
        self.find_canonical(|entry| entry.long.as_deref() == Some(long))
    }

    /// Finds the canonical option whose entry, or one of its aliases, has the
    /// short identifier `short`.
    pub fn find_short(&self, short: char) -> Option<&OptionDef> {
        self.find_canonical(|entry| entry.short == Some(short))
    }

    fn find_canonical(&self, matches: impl Fn(&OptionDef) -> bool) -> Option<&OptionDef> {
        self.entries
            .iter()
            .position(matches)
            .and_then(|index| self.canonical_of(index))
    }
}

impl TryFrom<Vec<OptionDef>> for OptionTable {
    type Error = TableError;

    fn try_from(entries: Vec<OptionDef>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<OptionTable> for Vec<OptionDef> {
    fn from(table: OptionTable) -> Self {
        table.entries
    }
}
