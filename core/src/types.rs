//! Option definition types.
//!
//! This module defines the entries of an option table. An entry is either a
//! real option, an alias of the nearest preceding real option, or a pure
//! documentation line (category header or spacer). The types round-trip
//! through [`serde`] so tables can live in YAML or JSON files.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Behavioral flags attached to an [`OptionDef`].
///
/// A tiny bitset; combine flags with `|`.
///
/// # Examples
///
/// ```
/// use argp_core::OptionFlags;
///
/// let flags = OptionFlags::ARG_OPTIONAL | OptionFlags::HIDDEN;
/// assert!(flags.contains(OptionFlags::HIDDEN));
/// assert!(!flags.contains(OptionFlags::ALIAS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OptionFlags(u8);

impl OptionFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// The argument may be omitted. An optional argument must be attached
    /// (`-oARG` or `--option=ARG`); it is never taken from the next element.
    pub const ARG_OPTIONAL: Self = Self(0x1);
    /// Leave the option out of the help listing.
    pub const HIDDEN: Self = Self(0x2);
    /// The entry is an alias of the nearest preceding non-alias entry.
    pub const ALIAS: Self = Self(0x4);

    const NAMED: [(Self, FlagName); 3] = [
        (Self::ARG_OPTIONAL, FlagName::ArgOptional),
        (Self::HIDDEN, FlagName::Hidden),
        (Self::ALIAS, FlagName::Alias),
    ];

    /// Returns the raw bit pattern.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flag is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for OptionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OptionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Serialized spelling of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum FlagName {
    ArgOptional,
    Hidden,
    Alias,
}

impl Serialize for OptionFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names: Vec<FlagName> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        names.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OptionFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<FlagName>::deserialize(deserializer)?;
        Ok(names.into_iter().fold(Self::NONE, |acc, name| {
            let flag = Self::NAMED
                .iter()
                .find(|(_, n)| *n == name)
                .map_or(Self::NONE, |(flag, _)| *flag);
            acc | flag
        }))
    }
}

/// One entry in an option table.
///
/// Use the constructors [`short`](OptionDef::short), [`long`](OptionDef::long)
/// and [`new`](OptionDef::new) for real options, [`header`](OptionDef::header)
/// and [`spacer`](OptionDef::spacer) for documentation lines, then chain
/// builder methods like [`with_arg`](OptionDef::with_arg).
///
/// # Examples
///
/// ```
/// use argp_core::OptionDef;
///
/// let output = OptionDef::new('o', "output")
///     .with_arg("<file>")
///     .with_doc("write the result to <file>");
/// assert!(output.is("o"));
/// assert!(output.is("output"));
/// assert!(output.takes_arg());
/// assert!(!output.arg_is_optional());
///
/// let header = OptionDef::header("GENERAL:");
/// assert!(header.is_doc_entry());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionDef {
    /// Short identifier (e.g., `'o'` for `-o`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Long identifier without dashes (e.g., `"output"` for `--output`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    /// Name of the argument shown in help; `None` means no argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_name: Option<String>,
    /// Behavioral flags.
    #[serde(default, skip_serializing_if = "OptionFlags::is_empty")]
    pub flags: OptionFlags,
    /// Description, or the text of a header line.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,
}

impl OptionDef {
    /// Creates an option with both a short and a long identifier.
    pub fn new(short: char, long: &str) -> Self {
        Self {
            short: Some(short),
            long: Some(long.to_string()),
            ..Default::default()
        }
    }

    /// Creates an option with only a short identifier.
    pub fn short(short: char) -> Self {
        Self {
            short: Some(short),
            ..Default::default()
        }
    }

    /// Creates an option with only a long identifier.
    pub fn long(long: &str) -> Self {
        Self {
            long: Some(long.to_string()),
            ..Default::default()
        }
    }

    /// Creates a category header line.
    ///
    /// # Examples
    ///
    /// ```
    /// use argp_core::OptionDef;
    ///
    /// let header = OptionDef::header("OUTPUT OPTIONS:");
    /// assert_eq!(header.doc, "OUTPUT OPTIONS:");
    /// assert!(header.short.is_none() && header.long.is_none());
    /// ```
    pub fn header(text: &str) -> Self {
        Self {
            doc: text.to_string(),
            ..Default::default()
        }
    }

    /// Creates a blank documentation line, rendered as an empty line.
    pub fn spacer() -> Self {
        Self::default()
    }

    /// Sets the argument name; the option then requires an argument.
    pub fn with_arg(mut self, name: &str) -> Self {
        self.arg_name = Some(name.to_string());
        self
    }

    /// Marks the argument as optional.
    pub fn optional(mut self) -> Self {
        self.flags |= OptionFlags::ARG_OPTIONAL;
        self
    }

    /// Hides the option from the help listing.
    pub fn hidden(mut self) -> Self {
        self.flags |= OptionFlags::HIDDEN;
        self
    }

    /// Marks the entry as an alias of the preceding real option.
    pub fn alias(mut self) -> Self {
        self.flags |= OptionFlags::ALIAS;
        self
    }

    /// Sets the documentation text.
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = doc.to_string();
        self
    }

    /// Returns `true` if the short or long identifier equals `name`.
    ///
    /// A short identifier is compared as a one-character string. Blank input
    /// never matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use argp_core::OptionDef;
    ///
    /// let opt = OptionDef::new('a', "aaa");
    /// assert!(opt.is("a"));
    /// assert!(opt.is("aaa"));
    /// assert!(!opt.is(""));
    /// ```
    pub fn is(&self, name: &str) -> bool {
        if is_blank(name) {
            return false;
        }
        let mut chars = name.chars();
        let short_match = match (chars.next(), chars.next()) {
            (Some(c), None) => self.short == Some(c),
            _ => false,
        };
        short_match || self.long.as_deref() == Some(name)
    }

    /// Returns `true` if the option takes an argument (required or optional).
    pub fn takes_arg(&self) -> bool {
        self.arg_name.is_some()
    }

    /// Returns `true` if the argument is optional.
    pub fn arg_is_optional(&self) -> bool {
        self.flags.contains(OptionFlags::ARG_OPTIONAL)
    }

    /// Returns `true` if the entry is hidden from help.
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(OptionFlags::HIDDEN)
    }

    /// Returns `true` if the entry is an alias.
    pub fn is_alias(&self) -> bool {
        self.flags.contains(OptionFlags::ALIAS)
    }

    /// Returns `true` if the entry has neither a short nor a long identifier.
    pub fn is_doc_entry(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }

    /// Returns the name used in messages: `--long (-s)`, `--long` or `-s`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argp_core::OptionDef;
    ///
    /// assert_eq!(OptionDef::new('f', "file").display_name(), "--file (-f)");
    /// assert_eq!(OptionDef::long("file").display_name(), "--file");
    /// assert_eq!(OptionDef::short('f').display_name(), "-f");
    /// ```
    pub fn display_name(&self) -> String {
        match (self.short, self.long.as_deref()) {
            (Some(s), Some(l)) => format!("--{l} (-{s})"),
            (None, Some(l)) => format!("--{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, None) => String::new(),
        }
    }

    /// Turns blank identifiers and argument names into `None`.
    ///
    /// A short identifier of `' '` and whitespace-only strings count as blank.
    pub(crate) fn normalized(mut self) -> Self {
        self.short = self.short.filter(|c| *c != ' ' && *c != '\0');
        self.long = self.long.filter(|l| !is_blank(l));
        self.arg_name = self.arg_name.filter(|a| !is_blank(a));
        self
    }
}

/// Identifier as typed on the command line, used for unknown options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identifier {
    /// A short identifier, e.g. `x` for `-x`.
    Short(char),
    /// A long identifier without dashes.
    Long(String),
}

impl Identifier {
    /// Builds the placeholder definition carrying only this identifier.
    pub fn placeholder(&self) -> OptionDef {
        match self {
            Self::Short(c) => OptionDef {
                short: Some(*c),
                ..Default::default()
            },
            Self::Long(name) => OptionDef {
                long: Some(name.clone()),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(c) => write!(f, "-{c}"),
            Self::Long(name) => write!(f, "--{name}"),
        }
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim_matches(' ').is_empty()
}
