//! Help rendering.
//!
//! Produces a GNU argp style listing from an option table:
//!
//! ```text
//! Usage: prog [options...] FILE...
//! OPTIONS:
//!  -s, -q, --silent          run in silent mode
//!  -o, --output <file>       specify the file to output
//!      --kind[=<kind>]       specify kind
//! ```
//!
//! Aliases are folded into the row of the option they belong to, hidden
//! entries are skipped together with their aliases, and entries without
//! identifiers print their doc text as a header line.

use std::io::{self, Write};

use crate::{OptionDef, OptionTable};

/// Width the left column is padded to before the two-space gap.
pub const LEFT_COLUMN_WIDTH: usize = 25;

/// Writes the usage banner followed by the option list.
///
/// # Examples
///
/// ```
/// use argp_core::{write_usage, OptionDef, OptionTable};
///
/// let table = OptionTable::new(vec![OptionDef::new('h', "help").with_doc("print help")]).unwrap();
/// let mut out = Vec::new();
/// write_usage(&mut out, &table, "prog", "FILE").unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.lines().next(), Some("Usage: prog [options...] FILE"));
/// assert_eq!(text.lines().nth(1), Some(" -h, --help                print help"));
/// ```
pub fn write_usage<W: Write>(
    out: &mut W,
    table: &OptionTable,
    program: &str,
    positional_usage: &str,
) -> io::Result<()> {
    let banner = format!("Usage: {program} [options...] {positional_usage}");
    writeln!(out, "{}", banner.trim_end_matches(' '))?;
    write_option_list(out, table)
}

/// Writes the option list only.
pub fn write_option_list<W: Write>(out: &mut W, table: &OptionTable) -> io::Result<()> {
    for line in option_list_lines(table) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Renders the option list into a string, one `\n`-terminated line per row.
pub fn render_option_list(table: &OptionTable) -> String {
    option_list_lines(table)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}

fn option_list_lines(table: &OptionTable) -> Vec<String> {
    let entries = table.entries();
    let mut lines = Vec::new();
    let mut index = 0;

    while index < entries.len() {
        let entry = &entries[index];
        let run_end = entries[index + 1..]
            .iter()
            .position(|e| !e.is_alias())
            .map_or(entries.len(), |offset| index + 1 + offset);
        let aliases = &entries[index + 1..run_end];
        index = run_end;

        if entry.is_alias() || entry.is_hidden() {
            continue;
        }

        if entry.is_doc_entry() {
            lines.push(entry.doc.trim_end_matches(' ').to_string());
            continue;
        }

        let mut left = left_column(entry, aliases);
        for row in entry.doc.split('\n') {
            let line = format!("{:<width$}  {}", left, row, width = LEFT_COLUMN_WIDTH);
            lines.push(line.trim_end_matches(' ').to_string());
            left.clear();
        }
    }

    lines
}

/// Builds ` -s, -q, --long ARG` for an option and its aliases.
fn left_column(option: &OptionDef, aliases: &[OptionDef]) -> String {
    let group = || std::iter::once(option).chain(aliases);
    let shorts: Vec<char> = group().filter_map(|o| o.short).collect();
    let longs: Vec<&str> = group().filter_map(|o| o.long.as_deref()).collect();
    let arg = option.arg_name.as_deref();
    let optional = option.arg_is_optional();

    let mut left = String::from(" ");

    if shorts.is_empty() {
        left.push_str("    ");
    } else {
        let tokens: Vec<String> = shorts
            .iter()
            .map(|c| match arg {
                Some(arg) if longs.is_empty() && optional => format!("-{c}[{arg}]"),
                Some(arg) if longs.is_empty() => format!("-{c} {arg}"),
                _ => format!("-{c}"),
            })
            .collect();
        left.push_str(&tokens.join(", "));
    }

    if !shorts.is_empty() && !longs.is_empty() {
        left.push_str(", ");
    }

    let tokens: Vec<String> = longs
        .iter()
        .map(|l| match arg {
            Some(arg) if optional => format!("--{l}[={arg}]"),
            Some(arg) => format!("--{l} {arg}"),
            None => format!("--{l}"),
        })
        .collect();
    left.push_str(&tokens.join(", "));

    left
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(option: OptionDef) -> String {
        render_option_list(&OptionTable::new(vec![option]).unwrap())
    }

    #[test]
    fn test_left_column_variants() {
        assert_eq!(left_column(&OptionDef::short('a'), &[]), " -a");
        assert_eq!(left_column(&OptionDef::long("aaa"), &[]), "     --aaa");
        assert_eq!(
            left_column(&OptionDef::short('a').with_arg("ARG"), &[]),
            " -a ARG"
        );
        assert_eq!(
            left_column(&OptionDef::short('a').with_arg("ARG").optional(), &[]),
            " -a[ARG]"
        );
        assert_eq!(
            left_column(&OptionDef::new('a', "aaa").with_arg("ARG").optional(), &[]),
            " -a, --aaa[=ARG]"
        );
    }

    #[test]
    fn test_aliases_share_the_row() {
        let option = OptionDef::new('f', "file").with_arg("<file>");
        let aliases = [
            OptionDef::long("ffff").alias(),
            OptionDef::short('F').alias(),
        ];

        assert_eq!(
            left_column(&option, &aliases),
            " -f, -F, --file <file>, --ffff <file>"
        );
    }

    #[test]
    fn test_multi_line_doc_keeps_alignment() {
        let text = single(OptionDef::new('v', "verbose").with_doc("talk more\nand more"));

        assert_eq!(
            text,
            " -v, --verbose             talk more\n                           and more\n"
        );
    }

    #[test]
    fn test_long_left_column_is_not_truncated() {
        let text = single(OptionDef::long("a-very-long-option-name").with_arg("<value>"));

        assert_eq!(text, "     --a-very-long-option-name <value>\n");
    }

    #[test]
    fn test_hidden_entry_swallows_its_aliases() {
        let table = OptionTable::new(vec![
            OptionDef::long("secret").hidden().with_doc("hidden option"),
            OptionDef::short('S').alias(),
            OptionDef::short('x').with_doc("visible"),
        ])
        .unwrap();

        assert_eq!(render_option_list(&table), " -x                        visible\n");
    }

    #[test]
    fn test_empty_usage_text_has_no_trailing_space() {
        let table = OptionTable::new(Vec::new()).unwrap();
        let mut out = Vec::new();
        write_usage(&mut out, &table, "prog", "").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Usage: prog [options...]\n");
    }

    #[test]
    fn test_header_keeps_trailing_newline() {
        let table = OptionTable::new(vec![
            OptionDef::header("GENERAL:  \n"),
            OptionDef::short('a'),
        ])
        .unwrap();

        assert_eq!(render_option_list(&table), "GENERAL:  \n\n -a\n");
    }
}
