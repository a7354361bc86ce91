//! Syntax tree nodes: type literals and input value literals.

use std::fmt;

use arcstr::ArcStr;

use crate::{
    schema::{
        meta::{EnumMeta, InputObjectMeta, MetaType, ScalarMeta},
        model::{SchemaType, TypeType},
    },
    value::{DefaultScalarValue, Object, Value},
};

/// A type literal in the syntax tree.
///
/// This enum carries no semantic information and might refer to types that do
/// not exist.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    /// A nullable named type, e.g. `String`
    Named(ArcStr),
    /// A nullable list type, e.g. `[String]`
    ///
    /// The list itself is what's nullable, the containing type might be non-null.
    List(Box<Type>),
    /// A non-null named type, e.g. `String!`
    NonNullNamed(ArcStr),
    /// A non-null list type, e.g. `[String]!`.
    ///
    /// The list itself is what's non-null, the containing type might be null.
    NonNullList(Box<Type>),
}

impl Type {
    /// Returns the name of this named type.
    ///
    /// Only applies to named types; lists will return `None`.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => Some(n),
            Self::List(..) | Self::NonNullList(..) => None,
        }
    }

    /// Returns the innermost name by unpacking lists.
    ///
    /// All type literals contain exactly one named type.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named(n) | Self::NonNullNamed(n) => n,
            Self::List(l) | Self::NonNullList(l) => l.innermost_name(),
        }
    }

    /// Indicates whether this type can only represent non-`null` values.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNullNamed(..) | Self::NonNullList(..))
    }

    /// Wraps this type into a nullable list of it.
    pub fn wrap_list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Makes this type non-`null`, if it isn't already.
    pub fn wrap_non_null(self) -> Self {
        match self {
            Self::Named(n) => Self::NonNullNamed(n),
            Self::List(l) => Self::NonNullList(l),
            t => t,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::NonNullNamed(n) => write!(f, "{n}!"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNullList(t) => write!(f, "[{t}]!"),
        }
    }
}

/// A literal value node of the query language.
///
/// Printing it with [`fmt::Display`] renders it in the surface syntax of the
/// language, e.g. `{name: "R2", friends: [LUKE, 3]}`.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum InputValue {
    Null,
    Scalar(DefaultScalarValue),
    Enum(String),
    Variable(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
}

impl InputValue {
    /// Constructs a `null` literal.
    pub fn null() -> Self {
        Self::Null
    }

    /// Constructs a scalar literal.
    pub fn scalar<T: Into<DefaultScalarValue>>(v: T) -> Self {
        Self::Scalar(v.into())
    }

    /// Constructs an enum literal.
    pub fn enum_value<T: AsRef<str>>(s: T) -> Self {
        Self::Enum(s.as_ref().into())
    }

    /// Constructs a variable reference.
    pub fn variable<T: AsRef<str>>(v: T) -> Self {
        Self::Variable(v.as_ref().into())
    }

    /// Constructs a list literal.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Constructs an object literal.
    pub fn object<K: AsRef<str>>(o: Vec<(K, Self)>) -> Self {
        Self::Object(o.into_iter().map(|(k, v)| (k.as_ref().into(), v)).collect())
    }

    /// Does this literal represent `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(DefaultScalarValue::String(s)) => write_escaped(f, s),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Variable(v) => write!(f, "${v}"),
            Self::List(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    item.fmt(f)?;
                    if i < v.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Self::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    write!(f, "{k}: ")?;
                    v.fmt(f)?;
                    if i < o.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

/// Writes a quoted string literal, escaping everything the language's lexer
/// wouldn't accept verbatim.
fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in s.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            '\u{8}' => write!(f, "\\b")?,
            '\u{c}' => write!(f, "\\f")?,
            c if c.is_control() => write!(f, "\\u{:04X}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

/// Produces a literal node representing the given raw `value` of the given
/// input type.
///
/// Returns `None` when the value cannot be represented as a literal of this
/// type, e.g. `null` for a non-`null` type, a name not among an enum's values,
/// or a non-finite float.
pub fn ast_from_value(value: &Value, ty: &TypeType<'_>, schema: &SchemaType) -> Option<InputValue> {
    match ty {
        TypeType::NonNull(inner) => {
            ast_from_value(value, inner, schema).filter(|ast| !ast.is_null())
        }
        _ if value.is_null() => Some(InputValue::Null),
        TypeType::List(item_ty) => match value {
            Value::List(items) => Some(InputValue::List(
                items
                    .iter()
                    .filter_map(|item| ast_from_value(item, item_ty, schema))
                    .collect(),
            )),
            single => ast_from_value(single, item_ty, schema),
        },
        TypeType::Concrete(meta) => match meta {
            MetaType::InputObject(InputObjectMeta { input_fields, .. }) => {
                let obj = value.as_object_value()?;
                Some(InputValue::Object(
                    input_fields
                        .iter()
                        .filter_map(|field| {
                            let field_value = obj.get_field_value(&field.name)?;
                            let field_ty = schema.make_type(&field.arg_type)?;
                            let ast = ast_from_value(field_value, &field_ty, schema)?;
                            Some((field.name.to_string(), ast))
                        })
                        .collect(),
                ))
            }
            MetaType::Enum(EnumMeta { values, .. }) => {
                let name = value.as_string_value()?;
                values
                    .iter()
                    .any(|v| v.name.as_str() == name)
                    .then(|| InputValue::enum_value(name))
            }
            MetaType::Scalar(ScalarMeta { name, .. }) => {
                scalar_literal(name, value.as_scalar()?)
            }
            MetaType::Object(..) | MetaType::Interface(..) | MetaType::Union(..) => None,
        },
    }
}

fn scalar_literal(type_name: &str, scalar: &DefaultScalarValue) -> Option<InputValue> {
    use DefaultScalarValue as S;

    match (type_name, scalar) {
        ("Boolean", S::Boolean(b)) => Some(InputValue::scalar(*b)),
        ("Int", S::Int(i)) => Some(InputValue::scalar(*i)),
        ("Int", S::Float(f)) => integral(*f).map(InputValue::scalar),
        ("Float", s) => {
            let f = s.as_float().filter(|f| f.is_finite())?;
            Some(integral(f).map_or_else(|| InputValue::scalar(f), InputValue::scalar))
        }
        ("String", S::String(s)) => Some(InputValue::scalar(s.as_str())),
        ("ID", S::String(s)) => Some(
            canonical_int(s).map_or_else(|| InputValue::scalar(s.as_str()), InputValue::scalar),
        ),
        ("ID", S::Int(i)) => Some(InputValue::scalar(*i)),
        ("Boolean" | "Int" | "String" | "ID", _) => None,
        // Custom scalars are rendered as they are stored.
        (_, S::Float(f)) if !f.is_finite() => None,
        (_, s) => Some(InputValue::Scalar(s.clone())),
    }
}

/// Returns the integer an integral float is equal to, if it fits an `Int`.
fn integral(f: f64) -> Option<i32> {
    (f.is_finite() && f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX))
        .then_some(f as i32)
}

/// Parses a string that is an integer written in its canonical form (no
/// leading zeros, no `+` sign, no `-0`).
fn canonical_int(s: &str) -> Option<i32> {
    s.parse::<i32>().ok().filter(|i| i.to_string() == s)
}

/// Coerces a literal node into a raw value of the given input type.
///
/// This is the inverse of [`ast_from_value()`]: printing a value and then
/// coercing the re-parsed literal yields the original value. Input object
/// fields absent from the literal stay absent, their declared defaults are not
/// filled in. Returns `None` if the literal is not valid for the type.
/// Variables are never valid here, as no variable values are in scope.
pub fn value_from_ast(ast: &InputValue, ty: &TypeType<'_>, schema: &SchemaType) -> Option<Value> {
    match ty {
        TypeType::NonNull(_) if ast.is_null() => None,
        TypeType::NonNull(inner) => value_from_ast(ast, inner, schema),
        _ if ast.is_null() => Some(Value::Null),
        _ if matches!(ast, InputValue::Variable(..)) => None,
        TypeType::List(item_ty) => match ast {
            InputValue::List(items) => items
                .iter()
                .map(|item| value_from_ast(item, item_ty, schema))
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            single => value_from_ast(single, item_ty, schema).map(|v| Value::List(vec![v])),
        },
        TypeType::Concrete(meta) => match (meta, ast) {
            (MetaType::InputObject(InputObjectMeta { input_fields, .. }), InputValue::Object(o)) => {
                if o
                    .iter()
                    .any(|(k, _)| !input_fields.iter().any(|f| f.name.as_str() == k.as_str()))
                {
                    return None;
                }
                let mut obj = Object::with_capacity(input_fields.len());
                for field in input_fields {
                    let field_ty = schema.make_type(&field.arg_type)?;
                    match o.iter().find(|(k, _)| field.name.as_str() == k.as_str()) {
                        Some((_, v)) => {
                            obj.add_field(field.name.as_str(), value_from_ast(v, &field_ty, schema)?);
                        }
                        None if field.arg_type.is_non_null() && field.default_value.is_none() => {
                            return None;
                        }
                        None => {}
                    }
                }
                Some(Value::Object(obj))
            }
            (MetaType::Enum(EnumMeta { values, .. }), InputValue::Enum(name)) => values
                .iter()
                .any(|v| v.name.as_str() == name.as_str())
                .then(|| Value::scalar(name.as_str())),
            (MetaType::Scalar(ScalarMeta { name, .. }), InputValue::Scalar(s)) => {
                scalar_value(name, s)
            }
            _ => None,
        },
    }
}

fn scalar_value(type_name: &str, scalar: &DefaultScalarValue) -> Option<Value> {
    use DefaultScalarValue as S;

    match (type_name, scalar) {
        ("Boolean", S::Boolean(b)) => Some(Value::scalar(*b)),
        ("Int", S::Int(i)) => Some(Value::scalar(*i)),
        ("Float", S::Int(..) | S::Float(..)) => scalar.as_float().map(Value::scalar),
        ("String", S::String(s)) => Some(Value::scalar(s.as_str())),
        ("ID", S::String(s)) => Some(Value::scalar(s.as_str())),
        ("ID", S::Int(i)) => Some(Value::scalar(i.to_string())),
        ("Boolean" | "Int" | "Float" | "String" | "ID", _) => None,
        (_, s) => Some(Value::Scalar(s.clone())),
    }
}
