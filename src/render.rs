use std::fmt;

use crate::ast::*;

/// Line terminator used when joining rendered statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// How a whole document is joined back into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub line_ending: LineEnding,
    /// Emit a terminator after the last statement as well.
    pub trailing_newline: bool,
}

/// Render a document with `\n` between statements and no trailing newline.
pub fn render(document: &Document) -> String {
    render_with(document, &RenderOptions::default())
}

pub fn render_with(document: &Document, options: &RenderOptions) -> String {
    let separator = options.line_ending.as_str();
    let mut buf = String::new();
    for (i, stmt) in document.iter().enumerate() {
        if i > 0 {
            buf.push_str(separator);
        }
        buf.push_str(&stmt.to_string());
    }
    if options.trailing_newline && !document.is_empty() {
        buf.push_str(separator);
    }
    buf
}

impl Statement {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Document {
    pub fn render(&self) -> String {
        render(self)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Opaque(text) => f.write_str(text),
            Statement::StringDefine { name, value } => {
                write!(f, "#define {} \"{}\"", name, escape_string(value))
            }
            Statement::IntegerDefine { name, value } => write!(f, "#define {} {}", name, value),
            Statement::Float(decl) => fmt::Display::fmt(decl, f),
            Statement::Include(argument) => write!(f, "#include {}", argument),
        }
    }
}

impl fmt::Display for FloatConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.type_name();
        write!(f, "const {} {} = ", type_name, self.name())?;
        // Uniformity is judged on the printed digits so the output re-parses
        // to something that prints the same way.
        let components: Vec<String> = self.values().iter().map(|v| format_float(*v)).collect();
        if components.iter().all(|c| *c == components[0]) {
            f.write_str(&components[0])?;
        } else {
            write!(f, "{}({})", type_name, components.join(", "))?;
        }
        f.write_str(";")
    }
}

/// Escape a string for a `#define` literal. Inverse of the lexer's decoding.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\u{0007}' => out.push_str("\\a"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{000B}' => out.push_str("\\v"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

/// Fixed-point with one to six fractional digits: `1.0`, `0.5`, `0.333333`.
pub fn format_float(value: f32) -> String {
    let mut text = format!("{:.6}", value);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    // -0.0 and tiny negatives that round to zero
    if text == "-0.0" {
        text.remove(0);
    }
    text
}
