//! Type kinds and resolved field arguments.

use derive_more::with_trait::Display;
use serde::Serialize;

use crate::{
    schema::{meta::Argument, model::FnvIndexMap},
    value::Value,
};

/// GraphQL type kind
///
/// The GraphQL specification defines a number of type kinds - the meta type
/// of a type.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    /// ## Scalar types
    ///
    /// Scalar types appear as the leaf nodes of GraphQL queries. Strings,
    /// numbers, and booleans are the built in types, and while it's possible
    /// to define your own, it's relatively uncommon.
    #[display("SCALAR")]
    Scalar,

    /// ## Object types
    ///
    /// The most common type to be implemented by users. Objects have fields
    /// and can implement interfaces.
    #[display("OBJECT")]
    Object,

    /// ## Interface types
    ///
    /// Interface types are used to represent overlapping fields between
    /// multiple types, and can be queried for their concrete type.
    #[display("INTERFACE")]
    Interface,

    /// ## Union types
    ///
    /// Unions are similar to interfaces but can not contain any fields on
    /// their own.
    #[display("UNION")]
    Union,

    /// ## Enum types
    ///
    /// Like scalars, enum types appear as the leaf nodes of GraphQL queries.
    #[display("ENUM")]
    Enum,

    /// ## Input objects
    ///
    /// Represents complex values provided in queries _into_ the system.
    #[display("INPUT_OBJECT")]
    InputObject,

    /// ## List types
    ///
    /// Represent lists of other types. Lists are never named: they only wrap
    /// another type.
    #[display("LIST")]
    List,

    /// ## Non-null types
    ///
    /// In GraphQL, nullable types are the default. By putting a `!` after a
    /// type, it becomes non-nullable.
    #[display("NON_NULL")]
    NonNull,
}

impl TypeKind {
    /// All the kinds, in the order the introspection system lists them.
    pub const ALL: [Self; 8] = [
        Self::Scalar,
        Self::Object,
        Self::Interface,
        Self::Union,
        Self::Enum,
        Self::InputObject,
        Self::List,
        Self::NonNull,
    ];
}

/// Field argument container
///
/// Every argument declared by a field is present here: arguments omitted or
/// given as `null` take their declared default value, or `null` if there is
/// none.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    args: FnvIndexMap<String, Value>,
}

impl Arguments {
    /// Collects the provided `args`, applying the defaults of `meta_args`.
    pub fn new<K: Into<String>>(
        args: impl IntoIterator<Item = (K, Value)>,
        meta_args: Option<&[Argument]>,
    ) -> Self {
        let mut args = args
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<FnvIndexMap<_, _>>();

        for arg in meta_args.into_iter().flatten() {
            if args.get(arg.name.as_str()).is_none_or(Value::is_null) {
                args.insert(
                    arg.name.to_string(),
                    arg.default_value.clone().unwrap_or_default(),
                );
            }
        }

        Self { args }
    }

    /// Returns the value of the argument, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Returns the value of a `Boolean` argument, if present and not `null`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_boolean_value)
    }

    /// Returns the value of a `String` argument, if present and not `null`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_string_value)
    }
}
