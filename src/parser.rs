use log::{debug, trace};

use crate::ast::*;
use crate::error::{LineError, LineErrorKind};
use crate::lexer::Cursor;

/// Parser state for one line.
struct Parser<'a> {
    cursor: Cursor<'a>,
}

/// Parse a whole material file, one statement per line.
///
/// Lines are split by [`split_lines`]. A trailing line terminator does not
/// add an empty statement, and an empty input gives an empty document.
pub fn parse(input: &str) -> Document {
    split_lines(input).map(parse_line).collect()
}

/// Classify a single line. Never fails: anything that is not fully
/// recognized comes back as [`Statement::Opaque`] holding the original line.
pub fn parse_line(line: &str) -> Statement {
    match try_parse_line(line) {
        Ok(stmt) => {
            trace!("{:?}", stmt);
            stmt
        }
        Err(err) => {
            if !err.is_unrecognized() {
                debug!("kept verbatim ({}): {:?}", err, line);
            }
            Statement::Opaque(line.to_string())
        }
    }
}

/// Classify a single line, reporting why it is not a statement.
pub fn try_parse_line(line: &str) -> Result<Statement, LineError> {
    let mut parser = Parser {
        cursor: Cursor::new(line),
    };
    let stmt = parser.parse_statement()?;
    parser.cursor.skip_ws();
    if !parser.cursor.is_at_end() {
        return Err(parser.error(LineErrorKind::TrailingText));
    }
    Ok(stmt)
}

/// Lines of `input` that were kept verbatim even though they started to look
/// like a directive or declaration, with 0-based line numbers.
pub fn explain(input: &str) -> Vec<(usize, LineError)> {
    split_lines(input)
        .enumerate()
        .filter_map(|(n, line)| match try_parse_line(line) {
            Err(err) if !err.is_unrecognized() => Some((n, err)),
            _ => None,
        })
        .collect()
}

/// Split text into lines at `\r\n`, `\n` or a lone `\r`. Terminators are
/// dropped, so no line ever contains `\r` or `\n`.
pub fn split_lines(input: &str) -> SplitLines<'_> {
    SplitLines { rest: input }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(&['\r', '\n'][..]) {
            Some(end) => {
                let line = &self.rest[..end];
                let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[end + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

impl<'a> Parser<'a> {
    // ── Helpers ──────────────────────────────────────────────────────

    fn error(&self, kind: LineErrorKind) -> LineError {
        LineError::new(kind, self.cursor.column())
    }

    fn expect_char(&mut self, ch: char) -> Result<(), LineError> {
        self.cursor.skip_ws();
        if self.cursor.eat_char(ch) {
            Ok(())
        } else {
            Err(self.error(LineErrorKind::ExpectedChar(ch)))
        }
    }

    fn parse_name(&mut self) -> Result<String, LineError> {
        self.cursor.skip_ws();
        let name = self.cursor.identifier();
        if name.is_empty() {
            return Err(self.error(LineErrorKind::ExpectedName));
        }
        Ok(name.to_string())
    }

    fn parse_float(&mut self) -> Result<f32, LineError> {
        self.cursor.skip_ws();
        self.cursor
            .float_literal()
            .ok_or_else(|| self.error(LineErrorKind::ExpectedFloat))
    }

    // ── Statement Dispatch ──────────────────────────────────────────

    fn parse_statement(&mut self) -> Result<Statement, LineError> {
        self.cursor.skip_ws();
        if self.cursor.eat_char('#') {
            self.parse_directive()
        } else {
            self.parse_float_const()
        }
    }

    // ── Directives ──────────────────────────────────────────────────

    fn parse_directive(&mut self) -> Result<Statement, LineError> {
        self.cursor.skip_ws();
        let directive_column = self.cursor.column();
        match self.cursor.identifier() {
            "define" => self.parse_define(),
            "include" => {
                self.cursor.skip_ws();
                Ok(Statement::Include(self.cursor.take_rest().to_string()))
            }
            other => Err(LineError::new(
                LineErrorKind::UnknownDirective(other.to_string()),
                directive_column,
            )),
        }
    }

    fn parse_define(&mut self) -> Result<Statement, LineError> {
        let name = self.parse_name()?;
        self.cursor.skip_ws();

        if self.cursor.peek_char() == Some('"') {
            let value = self
                .cursor
                .string_literal()
                .ok_or_else(|| self.error(LineErrorKind::UnterminatedString))?;
            return Ok(Statement::StringDefine { name, value });
        }

        let value = self
            .cursor
            .integer_literal()
            .ok_or_else(|| self.error(LineErrorKind::ExpectedInteger))?;
        Ok(Statement::IntegerDefine { name, value })
    }

    // ── Constant Declarations ───────────────────────────────────────

    /// `const floatN NAME = x;` or `const floatN NAME = floatN(x, ...);`
    fn parse_float_const(&mut self) -> Result<Statement, LineError> {
        if self.cursor.identifier() != "const" {
            return Err(LineError::new(LineErrorKind::Unrecognized, 0));
        }

        self.cursor.skip_ws();
        let type_column = self.cursor.column();
        let type_name = self.cursor.identifier();
        let dimension = dimension_of(type_name).ok_or_else(|| {
            LineError::new(
                LineErrorKind::UnknownType(type_name.to_string()),
                type_column,
            )
        })?;

        let name = self.parse_name()?;
        self.expect_char('=')?;
        self.cursor.skip_ws();

        let values = if self.cursor.starts_with("float") {
            self.parse_constructor(type_name, dimension)?
        } else {
            vec![self.parse_float()?; dimension]
        };

        self.expect_char(';')?;
        Ok(Statement::Float(FloatConst::new(name, values)))
    }

    fn parse_constructor(
        &mut self,
        type_name: &str,
        dimension: usize,
    ) -> Result<Vec<f32>, LineError> {
        let ctor_column = self.cursor.column();
        let ctor = self.cursor.identifier();
        if ctor != type_name {
            return Err(LineError::new(
                LineErrorKind::ConstructorMismatch {
                    expected: type_name.to_string(),
                    found: ctor.to_string(),
                },
                ctor_column,
            ));
        }

        self.expect_char('(')?;
        let mut values = vec![self.parse_float()?];
        loop {
            self.cursor.skip_ws();
            if self.cursor.eat_char(')') {
                break;
            }
            self.expect_char(',')?;
            values.push(self.parse_float()?);
        }

        if values.len() != dimension {
            return Err(LineError::new(
                LineErrorKind::ComponentCount {
                    expected: type_name.to_string(),
                    expected_count: dimension,
                    found: values.len(),
                },
                ctor_column,
            ));
        }
        Ok(values)
    }
}
