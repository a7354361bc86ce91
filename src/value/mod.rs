mod macros;
mod object;
mod scalar;

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap as _};

pub use self::{object::Object, scalar::DefaultScalarValue};

/// Serializable runtime value.
///
/// This is what coerced argument values and raw default values of arguments
/// and input fields are represented with. Unlike [`InputValue`], it carries
/// no syntax: there are no enum literals or variables in here, an enum value
/// is simply the string of its name.
///
/// [`InputValue`]: crate::InputValue
#[derive(Clone, Debug, Default, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum Value {
    #[default]
    Null,
    Scalar(DefaultScalarValue),
    List(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Constructs a `null` value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Constructs a scalar value.
    pub fn scalar<T: Into<DefaultScalarValue>>(s: T) -> Self {
        Self::Scalar(s.into())
    }

    /// Constructs a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Constructs an object value.
    pub fn object(o: Object) -> Self {
        Self::Object(o)
    }

    /// Does this value represent `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Views the underlying scalar value, if present.
    pub fn as_scalar(&self) -> Option<&DefaultScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Views the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        self.as_scalar().and_then(DefaultScalarValue::as_str)
    }

    /// Views the underlying boolean value, if present.
    pub fn as_boolean_value(&self) -> Option<bool> {
        self.as_scalar().and_then(DefaultScalarValue::as_bool)
    }

    /// Views the underlying list, if present.
    pub fn as_list_value(&self) -> Option<&Vec<Self>> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Views the underlying object, if present.
    pub fn as_object_value(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => match s.as_str() {
                Some(s) => write!(f, "\"{s}\""),
                None => write!(f, "{s}"),
            },
            Self::List(list) => {
                write!(f, "[")?;
                for (idx, item) in list.iter().enumerate() {
                    write!(f, "{item}")?;
                    if idx < list.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Self::Object(obj) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in obj.iter().enumerate() {
                    write!(f, "\"{key}\": {value}")?;
                    if idx < obj.field_count() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => ser.serialize_unit(),
            Self::Scalar(s) => s.serialize(ser),
            Self::List(l) => l.serialize(ser),
            Self::Object(o) => {
                let mut map = ser.serialize_map(Some(o.field_count()))?;
                for (k, v) in o.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl From<DefaultScalarValue> for Value {
    fn from(s: DefaultScalarValue) -> Self {
        Self::Scalar(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Self::scalar(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

impl<T> From<Option<T>> for Value
where
    Self: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    Self: From<T>,
{
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::graphql_value;

    #[test]
    fn display_null() {
        assert_eq!(graphql_value!(null).to_string(), "null");
    }

    #[test]
    fn display_scalars() {
        assert_eq!(graphql_value!(123).to_string(), "123");
        assert_eq!(graphql_value!(123.456).to_string(), "123.456");
        assert_eq!(graphql_value!("foo").to_string(), "\"foo\"");
        assert_eq!(graphql_value!(true).to_string(), "true");
    }

    #[test]
    fn display_nested() {
        let v = graphql_value!({"int": 1, "list": [1, null, "two"], "obj": {"a": false}});
        assert_eq!(
            v.to_string(),
            r#"{"int": 1, "list": [1, null, "two"], "obj": {"a": false}}"#,
        );
    }

    #[test]
    fn serializes_as_json() {
        let v = graphql_value!({"kind": "OBJECT", "fields": [{"name": "id"}]});
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"kind":"OBJECT","fields":[{"name":"id"}]}"#,
        );
    }
}
