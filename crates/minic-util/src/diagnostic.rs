//! Diagnostic construction and rendering.
//!
//! Every fatal condition in the interpreter (lex error, redefinition,
//! out-of-scope use, `#if` without a matching `#endif`, ...) is reported
//! through a [`Diagnostic`] rendered as `"<file>:<line>:<column>: <message>"`.
//! Message text supports a minimal substitution grammar: `%s` (string),
//! `%d` (signed integer), `%c` (byte as a character), `%t` (a type, already
//! rendered to a string by the caller — this crate has no notion of types).

use crate::span::{SourceMap, Span};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
        };
        f.write_str(s)
    }
}

/// One argument to be substituted into a diagnostic message template.
#[derive(Clone, Debug)]
pub enum Arg {
    Str(String),
    Int(i64),
    Char(u8),
    /// A type, pre-rendered to text by the caller (the type registry lives
    /// in `minic-value`, which this crate does not depend on).
    Type(String),
}

/// A fully-constructed diagnostic, ready to render against a [`SourceMap`].
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    /// Render as `"<file>:<line>:<column>: <message>"`.
    pub fn render(&self, map: &SourceMap) -> String {
        let (line, col) = map.line_col(self.span);
        format!("{}:{}:{}: {}", map.file_name(self.span.file), line, col, self.message)
    }
}

/// Fluent constructor for [`Diagnostic`]s, substituting `%s`/`%d`/`%c`/`%t`
/// placeholders in the template with the supplied [`Arg`]s in order.
pub struct DiagnosticBuilder {
    level: Level,
    template: String,
    args: Vec<Arg>,
    span: Option<Span>,
}

impl DiagnosticBuilder {
    pub fn error(template: impl Into<String>) -> Self {
        Self { level: Level::Error, template: template.into(), args: Vec::new(), span: None }
    }

    pub fn warning(template: impl Into<String>) -> Self {
        Self { level: Level::Warning, template: template.into(), args: Vec::new(), span: None }
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            span: self.span.expect("DiagnosticBuilder::build called without a span"),
            message: substitute(&self.template, &self.args),
        }
    }
}

fn substitute(template: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut arg_iter = args.iter();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => match arg_iter.next() {
                Some(Arg::Str(s)) => out.push_str(s),
                Some(other) => out.push_str(&format!("{other:?}")),
                None => out.push_str("%s"),
            },
            Some('d') => match arg_iter.next() {
                Some(Arg::Int(i)) => out.push_str(&i.to_string()),
                Some(other) => out.push_str(&format!("{other:?}")),
                None => out.push_str("%d"),
            },
            Some('c') => match arg_iter.next() {
                Some(Arg::Char(b)) => out.push(*b as char),
                Some(other) => out.push_str(&format!("{other:?}")),
                None => out.push_str("%c"),
            },
            Some('t') => match arg_iter.next() {
                Some(Arg::Type(t)) => out.push_str(t),
                Some(other) => out.push_str(&format!("{other:?}")),
                None => out.push_str("%t"),
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        let s = substitute(
            "'%s' has type %t, expected %d args, got %c",
            &[
                Arg::Str("foo".into()),
                Arg::Type("int".into()),
                Arg::Int(3),
                Arg::Char(b'x'),
            ],
        );
        assert_eq!(s, "'foo' has type int, expected 3 args, got x");
    }

    #[test]
    fn renders_file_line_column() {
        let mut map = SourceMap::new();
        let file = map.add_file("t.c", "int a\nint b = x;\n");
        let span = Span::point(file, 14);
        let diag = DiagnosticBuilder::error("'%s' is undefined")
            .arg(Arg::Str("x".into()))
            .span(span)
            .build();
        assert_eq!(diag.render(&map), "t.c:2:9: 'x' is undefined");
    }
}
