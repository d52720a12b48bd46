//! Incremental argument parser.
//!
//! [`Parser`] walks an argument vector one token at a time: a matched option,
//! or a positional argument. [`parse`] drains it into a [`ParseOutcome`].
//!
//! Scanning rules:
//!
//! - `-abc` is a bundle of short options; `-oVALUE` attaches an argument.
//! - `--name=value` attaches an argument to a long option.
//! - A required argument that is not attached is taken from the next element.
//! - An optional argument is only ever attached.
//! - A lone `-` is positional; `--` ends option scanning.
//! - Options and positional arguments may be interleaved freely.

use serde::Serialize;
use tracing::{debug, trace};

use crate::{Identifier, OptionDef, OptionTable, ParseError, ParseFailure};

/// One successfully matched option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedOption {
    /// The canonical option, never an alias entry.
    pub option: OptionDef,
    /// The identifier as typed, e.g. `"ffff"` for `--ffff` or `"F"` for `-F`.
    pub input: String,
    /// The argument text; empty when the option has none.
    pub arg: String,
}

impl MatchedOption {
    /// Returns the argument, or `default` when the argument is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use argp_core::{parse, OptionDef, OptionTable};
    ///
    /// let table = OptionTable::new(vec![
    ///     OptionDef::new('k', "kind").with_arg("<kind>").optional(),
    /// ])
    /// .unwrap();
    ///
    /// let outcome = parse(&table, &["-k"]).unwrap();
    /// assert_eq!(outcome.get_opt("kind").unwrap().arg_or("auto"), "auto");
    ///
    /// let outcome = parse(&table, &["--kind=fast"]).unwrap();
    /// assert_eq!(outcome.get_opt("kind").unwrap().arg_or("auto"), "fast");
    /// ```
    pub fn arg_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.arg.is_empty() { default } else { &self.arg }
    }
}

/// The result of a successful [`parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    /// Matched options in the order they were encountered.
    pub options: Vec<MatchedOption>,
    /// Positional arguments in the order they were encountered.
    pub args: Vec<String>,
}

impl ParseOutcome {
    /// Returns `true` if an option with the given short or long name was
    /// matched.
    pub fn has_opt(&self, name: &str) -> bool {
        self.options.iter().any(|m| m.option.is(name))
    }

    /// Returns the first match for the given short or long name.
    pub fn get_opt(&self, name: &str) -> Option<&MatchedOption> {
        self.options.iter().find(|m| m.option.is(name))
    }

    /// Returns every match for the given short or long name.
    pub fn get_opts(&self, name: &str) -> Vec<&MatchedOption> {
        self.options.iter().filter(|m| m.option.is(name)).collect()
    }
}

/// A single step of the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A matched option.
    Option(MatchedOption),
    /// A positional argument.
    Positional(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    /// `--` was seen; everything left is positional.
    Terminated,
    /// An error was returned.
    Failed,
}

/// Incremental parser over an argument vector.
///
/// Yields one [`Token`] per step. After an error the iterator is exhausted.
///
/// # Examples
///
/// ```
/// use argp_core::{OptionDef, OptionTable, Parser, Token};
///
/// let table = OptionTable::new(vec![OptionDef::short('a'), OptionDef::short('b')]).unwrap();
/// let args = ["-ab", "file"];
/// let tokens: Vec<Token> = Parser::new(&table, &args).collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(&tokens[2], Token::Positional(p) if p == "file"));
/// ```
#[derive(Debug)]
pub struct Parser<'a, S> {
    table: &'a OptionTable,
    args: &'a [S],
    /// Index of the current element.
    optidx: usize,
    /// Byte offset inside a short option bundle; 0 when not inside one.
    subopt: usize,
    state: State,
}

impl<'a, S: AsRef<str>> Parser<'a, S> {
    /// Creates a parser over `args` (program name excluded).
    pub fn new(table: &'a OptionTable, args: &'a [S]) -> Self {
        Self {
            table,
            args,
            optidx: 0,
            subopt: 0,
            state: State::Scanning,
        }
    }

    /// Returns the elements not yet consumed.
    pub fn remaining(&self) -> &'a [S] {
        let args = self.args;
        &args[self.optidx.min(args.len())..]
    }

    fn scan(&mut self) -> Option<Result<Token, ParseError>> {
        let args = self.args;
        loop {
            let element = args.get(self.optidx)?.as_ref();

            if self.subopt > 0 {
                match element[self.subopt..].chars().next() {
                    Some(c) => return Some(self.short(element, c)),
                    None => {
                        self.subopt = 0;
                        self.optidx += 1;
                        continue;
                    }
                }
            }

            if element.len() < 2 || !element.starts_with('-') {
                self.optidx += 1;
                return Some(Ok(Token::Positional(element.to_string())));
            }

            if element == "--" {
                debug!(index = self.optidx, "option terminator");
                self.optidx += 1;
                self.state = State::Terminated;
                return self.rest();
            }

            if element.starts_with("--") {
                return Some(self.long(element));
            }

            self.subopt = 1;
        }
    }

    fn rest(&mut self) -> Option<Result<Token, ParseError>> {
        let element = self.args.get(self.optidx)?.as_ref();
        self.optidx += 1;
        Some(Ok(Token::Positional(element.to_string())))
    }

    fn short(&mut self, element: &str, c: char) -> Result<Token, ParseError> {
        let table = self.table;
        let option = table
            .find_short(c)
            .ok_or(ParseError::InvalidOption(Identifier::Short(c)))?;
        let after = self.subopt + c.len_utf8();

        if !option.takes_arg() {
            self.subopt = after;
            if self.subopt >= element.len() {
                self.subopt = 0;
                self.optidx += 1;
            }
            return Ok(matched(option, c.to_string(), ""));
        }

        let attached = &element[after..];
        self.subopt = 0;
        self.optidx += 1;

        if option.arg_is_optional() || !attached.is_empty() {
            return Ok(matched(option, c.to_string(), attached));
        }
        let arg = self.take_next(option)?;
        Ok(matched(option, c.to_string(), arg))
    }

    fn long(&mut self, element: &str) -> Result<Token, ParseError> {
        let table = self.table;
        let body = &element[2..];
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let option = table
            .find_long(name)
            .ok_or_else(|| ParseError::InvalidOption(Identifier::Long(name.to_string())))?;
        self.optidx += 1;

        if !option.takes_arg() {
            if attached.is_some() {
                return Err(ParseError::UnexpectedArgument(option.clone()));
            }
            return Ok(matched(option, name.to_string(), ""));
        }

        match attached {
            Some(value) => Ok(matched(option, name.to_string(), value)),
            None if option.arg_is_optional() => Ok(matched(option, name.to_string(), "")),
            None => {
                let arg = self.take_next(option)?;
                Ok(matched(option, name.to_string(), arg))
            }
        }
    }

    /// Consumes the next element as the argument of `option`.
    fn take_next(&mut self, option: &OptionDef) -> Result<&'a str, ParseError> {
        let args = self.args;
        let arg = args
            .get(self.optidx)
            .ok_or_else(|| ParseError::MissingArgument(option.clone()))?;
        self.optidx += 1;
        Ok(arg.as_ref())
    }
}

impl<S: AsRef<str>> Iterator for Parser<'_, S> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.state {
            State::Failed => return None,
            State::Terminated => self.rest(),
            State::Scanning => self.scan(),
        };
        if let Some(Err(err)) = &step {
            debug!(error = %err, "parse failed");
            self.state = State::Failed;
        }
        step
    }
}

fn matched(option: &OptionDef, input: String, arg: &str) -> Token {
    trace!(input = %input, arg, "matched option");
    Token::Option(MatchedOption {
        option: option.clone(),
        input,
        arg: arg.to_string(),
    })
}

/// Parses `args` against `table`.
///
/// # Errors
///
/// Returns a [`ParseFailure`] on the first unknown option, missing argument
/// or unexpected argument. It keeps the positional arguments seen so far;
/// options matched so far are dropped.
///
/// # Examples
///
/// ```
/// use argp_core::{parse, OptionDef, OptionTable};
///
/// let table = OptionTable::new(vec![
///     OptionDef::short('v'),
///     OptionDef::new('o', "output").with_arg("<file>"),
/// ])
/// .unwrap();
///
/// let outcome = parse(&table, &["in.txt", "-v", "--output", "out.txt"]).unwrap();
/// assert!(outcome.has_opt("v"));
/// assert_eq!(outcome.get_opt("output").unwrap().arg, "out.txt");
/// assert_eq!(outcome.args, vec!["in.txt"]);
/// ```
pub fn parse<S: AsRef<str>>(table: &OptionTable, args: &[S]) -> Result<ParseOutcome, ParseFailure> {
    let mut outcome = ParseOutcome::default();
    for token in Parser::new(table, args) {
        match token {
            Ok(Token::Option(m)) => outcome.options.push(m),
            Ok(Token::Positional(arg)) => outcome.args.push(arg),
            Err(error) => {
                return Err(ParseFailure {
                    error,
                    args: outcome.args,
                });
            }
        }
    }
    Ok(outcome)
}
