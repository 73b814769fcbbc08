//! Locale-aware message formatting applied to resolved translations.
//!
//! The default [`MessageFormatter`] understands a small ICU-like syntax:
//!
//! - `{0}`, `{1}`: positional arguments
//! - `{0, plural, one {# file} other {# files}}`: CLDR plural selection on a
//!   numeric argument, with `=N` exact matches and `#` printing the number
//! - `{{` and `}}`: literal braces
//!
//! ```rust
//! use langcache::formatter::{Arg, Formatter, MessageFormatter};
//!
//! let formatter = MessageFormatter;
//! let text = formatter.format("en", "{0, plural, one {# file} other {# files}}", &[Arg::from(3)])?;
//! assert_eq!(text, "3 files");
//! # Ok::<(), langcache::Error>(())
//! ```

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    plural_rules::{PluralCategory, category_for_str},
};

lazy_static! {
    static ref POSITIONAL: Regex = Regex::new(r"^\s*(\d+)\s*$").unwrap();
    static ref PLURAL: Regex = Regex::new(r"(?s)^\s*(\d+)\s*,\s*plural\s*,(.*)$").unwrap();
}

/// A formatting argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Arg {
    /// Numeric value of the argument, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Arg::Int(i) => Some(*i as f64),
            Arg::Float(f) => Some(*f),
            Arg::Str(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Str(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Str(value.clone())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value.into())
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Arg::Int(value.into())
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Arg::Int(value as i64)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Arg::Float(value)
    }
}

/// Formats a resolved message with caller-supplied arguments.
pub trait Formatter: Send + Sync {
    fn format(&self, locale: &str, pattern: &str, args: &[Arg]) -> Result<String, Error>;
}

/// The default formatter. See the module docs for the syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, locale: &str, pattern: &str, args: &[Arg]) -> Result<String, Error> {
        if !pattern.contains(['{', '}']) {
            return Ok(pattern.to_string());
        }
        render(locale, pattern, args, None)
    }
}

/// Renders `pattern`; `number` is what `#` prints inside a plural branch.
fn render(locale: &str, pattern: &str, args: &[Arg], number: Option<&Arg>) -> Result<String, Error> {
    let bytes = pattern.as_bytes();
    let mut out = String::with_capacity(pattern.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'}' | b'#' => out.push_str(&pattern[literal_start..i]),
            _ => {
                i += 1;
                continue;
            }
        }

        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push('{');
                i += 2;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push('}');
                i += 2;
            }
            b'{' => {
                let end = matching_brace(bytes, i)
                    .ok_or_else(|| Error::format_error(format!("unclosed `{{` at {}", i)))?;
                out.push_str(&placeholder(locale, &pattern[i + 1..end], args)?);
                i = end + 1;
            }
            b'}' => {
                return Err(Error::format_error(format!("unmatched `}}` at {}", i)));
            }
            _ => {
                match number {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => out.push('#'),
                }
                i += 1;
            }
        }
        literal_start = i;
    }
    out.push_str(&pattern[literal_start..]);
    Ok(out)
}

/// Index of the `}` closing the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, b) in bytes[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn argument(args: &[Arg], index: &str) -> Result<(usize, Arg), Error> {
    let index: usize = index
        .parse()
        .map_err(|_| Error::format_error(format!("invalid argument index `{}`", index)))?;
    let arg = args.get(index).ok_or_else(|| {
        Error::format_error(format!(
            "argument {} requested but {} supplied",
            index,
            args.len()
        ))
    })?;
    Ok((index, arg.clone()))
}

fn placeholder(locale: &str, inner: &str, args: &[Arg]) -> Result<String, Error> {
    if let Some(caps) = POSITIONAL.captures(inner) {
        let (_, arg) = argument(args, &caps[1])?;
        return Ok(arg.to_string());
    }

    if let Some(caps) = PLURAL.captures(inner) {
        let (index, arg) = argument(args, &caps[1])?;
        let n = arg.as_f64().ok_or_else(|| {
            Error::format_error(format!("argument {} is not a number: `{}`", index, arg))
        })?;
        let branches = plural_branches(caps.get(2).map_or("", |m| m.as_str()))?;
        let body = select_branch(locale, n, &branches)?;
        return render(locale, body, args, Some(&arg));
    }

    Err(Error::format_error(format!("unsupported placeholder `{{{}}}`", inner)))
}

#[derive(Debug, PartialEq)]
enum Selector {
    Exact(f64),
    Category(PluralCategory),
}

fn plural_branches(spec: &str) -> Result<Vec<(Selector, &str)>, Error> {
    let bytes = spec.as_bytes();
    let mut branches = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let start = i;
        while i < bytes.len() && bytes[i] != b'{' && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name = &spec[start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'{' {
            return Err(Error::format_error(format!(
                "plural selector `{}` has no branch",
                name
            )));
        }
        let end = matching_brace(bytes, i)
            .ok_or_else(|| Error::format_error("unclosed plural branch"))?;

        let selector = match name.strip_prefix('=') {
            Some(exact) => Selector::Exact(exact.parse::<f64>().map_err(|_| {
                Error::format_error(format!("invalid exact selector `{}`", name))
            })?),
            None => Selector::Category(name.parse::<PluralCategory>().map_err(Error::Format)?),
        };
        branches.push((selector, &spec[i + 1..end]));
        i = end + 1;
    }

    if !branches
        .iter()
        .any(|(s, _)| *s == Selector::Category(PluralCategory::Other))
    {
        return Err(Error::format_error("plural is missing the `other` branch"));
    }
    Ok(branches)
}

fn select_branch<'a>(locale: &str, n: f64, branches: &[(Selector, &'a str)]) -> Result<&'a str, Error> {
    let exact = branches.iter().find_map(|(selector, body)| match selector {
        Selector::Exact(v) if *v == n => Some(*body),
        _ => None,
    });
    if let Some(body) = exact {
        return Ok(body);
    }

    let category = category_for_str(locale, n);
    let pick = |wanted: PluralCategory| {
        branches.iter().find_map(|(selector, body)| match selector {
            Selector::Category(c) if *c == wanted => Some(*body),
            _ => None,
        })
    };
    pick(category)
        .or_else(|| pick(PluralCategory::Other))
        .ok_or_else(|| Error::format_error("plural is missing the `other` branch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(locale: &str, pattern: &str, args: &[Arg]) -> Result<String, Error> {
        MessageFormatter.format(locale, pattern, args)
    }

    #[test]
    fn test_plain_text_ignores_args() {
        assert_eq!(fmt("en", "Hello", &["extra".into()]).unwrap(), "Hello");
        assert_eq!(fmt("en", "# of items", &[]).unwrap(), "# of items");
    }

    #[test]
    fn test_positional() {
        assert_eq!(fmt("en", "Hello {0}", &["World".into()]).unwrap(), "Hello World");
        assert_eq!(
            fmt("en", "{1} before {0}", &["a".into(), "b".into()]).unwrap(),
            "b before a"
        );
        assert_eq!(fmt("en", "{ 0 }!", &[Arg::from(7)]).unwrap(), "7!");
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        let err = fmt("en", "Hello {0}", &[]).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(fmt("en", "{{0}} is {0}", &["zero".into()]).unwrap(), "{0} is zero");
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(fmt("en", "Hello {0", &["x".into()]).is_err());
        assert!(fmt("en", "Hello 0}", &["x".into()]).is_err());
        assert!(fmt("en", "Hello {name}", &["x".into()]).is_err());
    }

    #[test]
    fn test_plural_english() {
        let pattern = "You have {0, plural, one {# message} other {# messages}}";
        assert_eq!(fmt("en-US", pattern, &[Arg::from(1)]).unwrap(), "You have 1 message");
        assert_eq!(fmt("en-US", pattern, &[Arg::from(4)]).unwrap(), "You have 4 messages");
        assert_eq!(fmt("en-US", pattern, &["4".into()]).unwrap(), "You have 4 messages");
    }

    #[test]
    fn test_plural_exact_match_wins() {
        let pattern = "{0, plural, =0 {no files} one {# file} other {# files}}";
        assert_eq!(fmt("en", pattern, &[Arg::from(0)]).unwrap(), "no files");
        assert_eq!(fmt("en", pattern, &[Arg::from(1)]).unwrap(), "1 file");
    }

    #[test]
    fn test_plural_russian() {
        let pattern = "{0, plural, one {# файл} few {# файла} many {# файлов} other {# файла}}";
        assert_eq!(fmt("ru", pattern, &[Arg::from(21)]).unwrap(), "21 файл");
        assert_eq!(fmt("ru", pattern, &[Arg::from(3)]).unwrap(), "3 файла");
        assert_eq!(fmt("ru", pattern, &[Arg::from(11)]).unwrap(), "11 файлов");
    }

    #[test]
    fn test_plural_nested_positional() {
        let pattern = "{0, plural, one {{1} has # item} other {{1} has # items}}";
        assert_eq!(
            fmt("en", pattern, &[Arg::from(2), "Ann".into()]).unwrap(),
            "Ann has 2 items"
        );
    }

    #[test]
    fn test_plural_errors() {
        assert!(fmt("en", "{0, plural, one {x}}", &[Arg::from(1)]).is_err());
        assert!(fmt("en", "{0, plural, one {x} other {y}}", &["many".into()]).is_err());
        assert!(fmt("en", "{0, plural, lots {x} other {y}}", &[Arg::from(1)]).is_err());
        assert!(fmt("en", "{0, plural, one x other {y}}", &[Arg::from(1)]).is_err());
    }

    #[test]
    fn test_arg_display() {
        assert_eq!(Arg::from(2.5).to_string(), "2.5");
        assert_eq!(Arg::from(-3i64).to_string(), "-3");
        assert_eq!(Arg::from("x").as_f64(), None);
        assert_eq!(Arg::from(" 12 ").as_f64(), Some(12.0));
    }
}
