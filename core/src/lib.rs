//! GNU argp style command-line option parsing.
//!
//! This crate turns a declarative option table and an argument vector into
//! matched options and positional arguments, and renders a help listing from
//! the same table:
//!
//! - [`OptionDef`]: one table entry: short/long identifiers, argument name,
//!   [`OptionFlags`] and documentation.
//! - [`OptionTable`]: a validated, ordered table. Aliases follow the option
//!   they belong to; entries without identifiers are header lines.
//! - [`parse`] / [`Parser`]: the one-shot and incremental parsers.
//! - [`write_usage`] / [`write_option_list`]: the help renderer.
//!
//! # Example
//!
//! ```
//! use argp_core::*;
//!
//! let table = OptionTable::new(vec![
//!     OptionDef::header("OPTIONS:"),
//!     OptionDef::new('s', "silent").with_doc("run in silent mode"),
//!     OptionDef::short('q').alias(),
//!     OptionDef::new('o', "output").with_arg("<file>").with_doc("specify the file to output"),
//! ])
//! .unwrap();
//!
//! let outcome = parse(&table, &["-qo", "out.txt", "input.txt"]).unwrap();
//! assert_eq!(outcome.options[0].option.long.as_deref(), Some("silent"));
//! assert_eq!(outcome.options[0].input, "q");
//! assert_eq!(outcome.get_opt("output").unwrap().arg, "out.txt");
//! assert_eq!(outcome.args, vec!["input.txt"]);
//!
//! let help = render_option_list(&table);
//! assert_eq!(help.lines().nth(1), Some(" -s, -q, --silent          run in silent mode"));
//! ```

mod error;
mod help;
mod parser;
mod table;
mod types;

pub use error::{ParseError, ParseErrorKind, ParseFailure};
pub use help::{LEFT_COLUMN_WIDTH, render_option_list, write_option_list, write_usage};
pub use parser::{MatchedOption, ParseOutcome, Parser, Token, parse};
pub use table::{OptionTable, TableError};
pub use types::{Identifier, OptionDef, OptionFlags};
