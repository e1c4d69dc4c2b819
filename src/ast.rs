//! Statement model produced by the parser, one entry per physical line.

use std::ops::Index;

/// A single line of a material file.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A line kept verbatim: anything the parser did not fully recognize.
    /// Holds the original text including leading whitespace.
    Opaque(String),
    /// `#define NAME "value"` with escapes already decoded.
    StringDefine { name: String, value: String },
    /// `#define NAME 123`; the radix and suffix of the source are not kept.
    IntegerDefine { name: String, value: i64 },
    /// `const floatN NAME = ...;`
    Float(FloatConst),
    /// `#include ...`; the argument is the rest of the line, untouched.
    Include(String),
}

impl Statement {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Statement::Opaque(_))
    }

    /// The declared name, for statements that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Statement::StringDefine { name, .. } | Statement::IntegerDefine { name, .. } => {
                Some(name)
            }
            Statement::Float(decl) => Some(decl.name()),
            Statement::Opaque(_) | Statement::Include(_) => None,
        }
    }
}

/// A `float`..`float4` constant. Always holds between one and four values.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatConst {
    name: String,
    values: Vec<f32>,
}

impl FloatConst {
    /// Panics unless `values` has between one and four components; the parser
    /// never builds anything else.
    pub fn new(name: impl Into<String>, values: Vec<f32>) -> Self {
        assert!(
            (1..=4).contains(&values.len()),
            "float constant needs 1 to 4 components, got {}",
            values.len()
        );
        FloatConst {
            name: name.into(),
            values,
        }
    }

    pub fn try_new(name: impl Into<String>, values: Vec<f32>) -> Option<Self> {
        if (1..=4).contains(&values.len()) {
            Some(FloatConst::new(name, values))
        } else {
            None
        }
    }

    /// Same scalar in every slot of a `dimension`-wide vector.
    pub fn splat(name: impl Into<String>, value: f32, dimension: usize) -> Self {
        FloatConst::new(name, vec![value; dimension])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// `float`, `float2`, `float3` or `float4`.
    pub fn type_name(&self) -> &'static str {
        type_name_for(self.values.len())
    }

    pub fn is_uniform(&self) -> bool {
        self.values.iter().all(|v| *v == self.values[0])
    }
}

pub(crate) fn type_name_for(dimension: usize) -> &'static str {
    match dimension {
        1 => "float",
        2 => "float2",
        3 => "float3",
        _ => "float4",
    }
}

pub(crate) fn dimension_of(type_name: &str) -> Option<usize> {
    match type_name {
        "float" => Some(1),
        "float2" => Some(2),
        "float3" => Some(3),
        "float4" => Some(4),
        _ => None,
    }
}

/// The statements of a whole file, in line order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    statements: Vec<Statement>,
}

impl Document {
    pub fn new(statements: Vec<Statement>) -> Self {
        Document { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    /// Number of lines that were recognized as something other than opaque text.
    pub fn recognized_count(&self) -> usize {
        self.statements.iter().filter(|s| !s.is_opaque()).count()
    }
}

impl Index<usize> for Document {
    type Output = Statement;

    fn index(&self, line: usize) -> &Statement {
        &self.statements[line]
    }
}

impl FromIterator<Statement> for Document {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Document {
            statements: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
