use crate::ast::*;
use crate::error::LineError;
use crate::render::format_float;

/// JSON formatting style.
#[derive(Clone, Copy)]
pub enum JsonStyle {
    /// Compact: no whitespace between tokens.
    Compact,
    /// Pretty: 2-space indented, one entry per line.
    Pretty,
}

struct JsonWriter {
    buf: String,
    style: JsonStyle,
    depth: usize,
}

impl JsonWriter {
    fn new(style: JsonStyle) -> Self {
        JsonWriter {
            buf: String::new(),
            style,
            depth: 0,
        }
    }

    fn is_pretty(&self) -> bool {
        matches!(self.style, JsonStyle::Pretty)
    }

    fn newline(&mut self) {
        if self.is_pretty() {
            self.buf.push('\n');
            for _ in 0..self.depth {
                self.buf.push_str("  ");
            }
        }
    }

    fn space(&mut self) {
        if self.is_pretty() {
            self.buf.push(' ');
        }
    }

    fn write_document(&mut self, document: &Document) {
        self.buf.push('[');
        self.depth += 1;

        for (line, stmt) in document.iter().enumerate() {
            if line > 0 {
                self.buf.push(',');
            }
            self.newline();
            self.write_statement(line, stmt);
        }

        self.depth -= 1;
        if !document.is_empty() {
            self.newline();
        }
        self.buf.push(']');
    }

    fn write_statement(&mut self, line: usize, stmt: &Statement) {
        self.buf.push('{');
        self.depth += 1;
        let mut first = true;

        self.entry_sep(&mut first);
        self.write_key("line");
        self.buf.push_str(&line.to_string());

        self.entry_sep(&mut first);
        self.write_key("kind");
        self.write_string_value(kind_name(stmt));

        match stmt {
            Statement::Opaque(text) => {
                self.entry_sep(&mut first);
                self.write_key("text");
                self.write_string_value(text);
            }
            Statement::StringDefine { name, value } => {
                self.entry_sep(&mut first);
                self.write_key("name");
                self.write_string_value(name);
                self.entry_sep(&mut first);
                self.write_key("value");
                self.write_string_value(value);
            }
            Statement::IntegerDefine { name, value } => {
                self.entry_sep(&mut first);
                self.write_key("name");
                self.write_string_value(name);
                self.entry_sep(&mut first);
                self.write_key("value");
                self.buf.push_str(&value.to_string());
            }
            Statement::Float(decl) => {
                self.entry_sep(&mut first);
                self.write_key("name");
                self.write_string_value(decl.name());
                self.entry_sep(&mut first);
                self.write_key("type");
                self.write_string_value(decl.type_name());
                self.entry_sep(&mut first);
                self.write_key("values");
                self.write_float_array(decl.values());
            }
            Statement::Include(argument) => {
                self.entry_sep(&mut first);
                self.write_key("argument");
                self.write_string_value(argument);
            }
        }

        self.depth -= 1;
        self.newline();
        self.buf.push('}');
    }

    // Always inline: four numbers at most.
    fn write_float_array(&mut self, values: &[f32]) {
        self.buf.push('[');
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
                self.space();
            }
            self.buf.push_str(&format_float(*v));
        }
        self.buf.push(']');
    }

    fn entry_sep(&mut self, first: &mut bool) {
        if *first {
            *first = false;
        } else {
            self.buf.push(',');
        }
        self.newline();
    }

    fn write_key(&mut self, key: &str) {
        self.write_string_value(key);
        self.buf.push(':');
        self.space();
    }

    fn write_string_value(&mut self, s: &str) {
        self.buf.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.buf.push_str("\\\""),
                '\\' => self.buf.push_str("\\\\"),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                '\u{0008}' => self.buf.push_str("\\b"),
                '\u{000C}' => self.buf.push_str("\\f"),
                c if c < '\u{0020}' => {
                    self.buf.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }
}

fn kind_name(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Opaque(_) => "opaque",
        Statement::StringDefine { .. } => "stringDefine",
        Statement::IntegerDefine { .. } => "integerDefine",
        Statement::Float(_) => "float",
        Statement::Include(_) => "include",
    }
}

/// Serialize a document to a compact JSON array, one object per line.
/// `line` fields are 0-based.
pub fn to_json(document: &Document) -> String {
    let mut w = JsonWriter::new(JsonStyle::Compact);
    w.write_document(document);
    w.buf
}

/// Serialize a document to pretty-printed JSON (2-space indent).
pub fn to_json_pretty(document: &Document) -> String {
    let mut w = JsonWriter::new(JsonStyle::Pretty);
    w.write_document(document);
    w.buf
}

/// Serialize `(line, error)` pairs from [`crate::parser::explain`] to a JSON array.
pub fn line_errors_to_json(errors: &[(usize, LineError)]) -> String {
    let mut w = JsonWriter::new(JsonStyle::Compact);
    w.buf.push('[');
    for (i, (line, err)) in errors.iter().enumerate() {
        if i > 0 {
            w.buf.push(',');
        }
        w.buf.push('{');
        w.write_key("line");
        w.buf.push_str(&line.to_string());
        w.buf.push(',');
        w.write_key("column");
        w.buf.push_str(&err.column.to_string());
        w.buf.push(',');
        w.write_key("message");
        w.write_string_value(&err.kind.to_string());
        w.buf.push('}');
    }
    w.buf.push(']');
    w.buf
}
