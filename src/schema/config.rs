//! Inputs a [`SchemaType`] is assembled from.
//!
//! [`SchemaType`]: crate::SchemaType

use std::{borrow::Cow, fmt, sync::Arc};

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};
use itertools::Itertools as _;

use crate::schema::{
    legacy::{self, TypeResolution},
    meta::{MetaType, ObjectMeta},
    model::DirectiveType,
};

/// Function resolving a named type lazily, returning `None` if there is no
/// type of this name.
pub type TypeLoader = Arc<dyn Fn(&str) -> Option<MetaType> + Send + Sync>;

/// Function producing the types of a schema on demand.
pub type TypeSupplier = Arc<dyn Fn() -> Vec<MetaType> + Send + Sync>;

/// Additional types of a schema.
#[derive(Clone)]
pub enum Types {
    /// Fixed list of types.
    List(Vec<MetaType>),
    /// Types built only when the schema is assembled.
    Deferred(TypeSupplier),
}

impl fmt::Debug for Types {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(types) => f.debug_tuple("List").field(types).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Validated configuration of a schema.
///
/// Either built directly with its typed builder methods, or validated out of
/// loosely typed [`SchemaOptions`] with [`SchemaConfig::create()`].
#[derive(Clone, Default)]
pub struct SchemaConfig {
    query: Option<ObjectMeta>,
    mutation: Option<ObjectMeta>,
    subscription: Option<ObjectMeta>,
    types: Option<Types>,
    directives: Vec<DirectiveType>,
    type_loader: Option<TypeLoader>,
}

/// Error of validating [`SchemaOptions`], naming the offending option.
#[derive(Clone, Debug, Display, Error, PartialEq)]
#[display("Schema {option} must be {expected} if provided but got: {got}")]
pub struct SchemaConfigError {
    /// Name of the invalid option.
    pub option: &'static str,
    /// What the option is expected to be.
    pub expected: &'static str,
    /// Printable form of the provided value.
    pub got: String,
}

impl SchemaConfigError {
    fn new(option: &'static str, expected: &'static str, got: &ConfigValue) -> Self {
        Self {
            option,
            expected,
            got: got.print_safe(),
        }
    }
}

/// Loosely typed value of a schema option.
#[derive(Clone)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum ConfigValue {
    Null,
    Boolean(bool),
    Int(i32),
    Float(f64),
    String(ArcStr),
    Type(MetaType),
    Directive(DirectiveType),
    List(Vec<ConfigValue>),
    TypeSupplier(TypeSupplier),
    TypeLoader(TypeLoader),
    TypeResolution(Arc<dyn TypeResolution>),
}

impl ConfigValue {
    /// Wraps the provided function into a [`ConfigValue::TypeSupplier`].
    pub fn type_supplier(f: impl Fn() -> Vec<MetaType> + Send + Sync + 'static) -> Self {
        Self::TypeSupplier(Arc::new(f))
    }

    /// Wraps the provided function into a [`ConfigValue::TypeLoader`].
    pub fn type_loader(f: impl Fn(&str) -> Option<MetaType> + Send + Sync + 'static) -> Self {
        Self::TypeLoader(Arc::new(f))
    }

    /// Wraps the provided strategy into a [`ConfigValue::TypeResolution`].
    pub fn type_resolution(strategy: impl TypeResolution + 'static) -> Self {
        Self::TypeResolution(Arc::new(strategy))
    }

    /// Indicates whether this value is `null`, which is the same as not
    /// providing it at all.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders this value in a form safe to be put into error messages.
    ///
    /// Types render as their names, directives with a leading `@`, and
    /// functions as a placeholder.
    pub fn print_safe(&self) -> String {
        match self {
            Self::Null => "null".into(),
            Self::Boolean(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => format!("{s:?}"),
            Self::Type(t) => t.name().to_string(),
            Self::Directive(d) => format!("@{}", d.name),
            Self::List(l) => format!("[{}]", l.iter().map(Self::print_safe).join(", ")),
            Self::TypeSupplier(_) => "<type supplier>".into(),
            Self::TypeLoader(_) => "<type loader>".into(),
            Self::TypeResolution(_) => "<type resolution strategy>".into(),
        }
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print_safe())
    }
}

impl From<MetaType> for ConfigValue {
    fn from(t: MetaType) -> Self {
        Self::Type(t)
    }
}

impl From<ObjectMeta> for ConfigValue {
    fn from(t: ObjectMeta) -> Self {
        Self::Type(t.into_meta())
    }
}

impl From<DirectiveType> for ConfigValue {
    fn from(d: DirectiveType) -> Self {
        Self::Directive(d)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(l: Vec<T>) -> Self {
        Self::List(l.into_iter().map(Into::into).collect())
    }
}

/// Options a [`SchemaConfig`] is created from.
///
/// Absent and [`ConfigValue::Null`] options are treated the same way.
#[derive(Clone, Debug, Default)]
pub struct SchemaOptions {
    /// Type query operations are rooted at. Must be an object type.
    pub query: Option<ConfigValue>,
    /// Type mutation operations are rooted at. Must be an object type.
    pub mutation: Option<ConfigValue>,
    /// Type subscription operations are rooted at. Must be an object type.
    pub subscription: Option<ConfigValue>,
    /// Additional types: a list of types or a type supplier.
    pub types: Option<ConfigValue>,
    /// Supported directives: a list of directives.
    pub directives: Option<ConfigValue>,
    /// Deprecated type resolution strategy.
    ///
    /// Adapted into a type loader, unless `type_loader` is provided as well.
    pub type_resolution: Option<ConfigValue>,
    /// Function loading types by their names.
    pub type_loader: Option<ConfigValue>,
}

fn present(value: Option<ConfigValue>) -> Option<ConfigValue> {
    value.filter(|v| !v.is_null())
}

fn object_type(option: &'static str, value: ConfigValue) -> Result<ObjectMeta, SchemaConfigError> {
    match value {
        ConfigValue::Type(MetaType::Object(o)) => Ok(o),
        other => Err(SchemaConfigError::new(option, "an Object type", &other)),
    }
}

impl SchemaConfig {
    /// Creates a new empty [`SchemaConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the provided [`SchemaOptions`] into a new [`SchemaConfig`].
    ///
    /// Options are checked one by one in their declaration order, failing
    /// on the first invalid one.
    ///
    /// # Errors
    ///
    /// If any of the provided options is not of its expected shape.
    pub fn create(options: SchemaOptions) -> Result<Self, SchemaConfigError> {
        let SchemaOptions {
            query,
            mutation,
            subscription,
            types,
            directives,
            type_resolution,
            mut type_loader,
        } = options;
        let mut config = Self::new();

        if let Some(v) = present(query) {
            config.query = Some(object_type("query", v)?);
        }
        if let Some(v) = present(mutation) {
            config.mutation = Some(object_type("mutation", v)?);
        }
        if let Some(v) = present(subscription) {
            config.subscription = Some(object_type("subscription", v)?);
        }
        if let Some(v) = present(types) {
            config.types = Some(match v {
                ConfigValue::TypeSupplier(f) => Types::Deferred(f),
                ConfigValue::List(l) if l.iter().all(|t| matches!(t, ConfigValue::Type(_))) => {
                    Types::List(
                        l.into_iter()
                            .filter_map(|t| match t {
                                ConfigValue::Type(t) => Some(t),
                                _ => None,
                            })
                            .collect(),
                    )
                }
                other => {
                    return Err(SchemaConfigError::new(
                        "types",
                        "a list of types or a type supplier",
                        &other,
                    ));
                }
            });
        }
        if let Some(v) = present(directives) {
            config.directives = match v {
                ConfigValue::List(l)
                    if l.iter().all(|d| matches!(d, ConfigValue::Directive(_))) =>
                {
                    l.into_iter()
                        .filter_map(|d| match d {
                            ConfigValue::Directive(d) => Some(d),
                            _ => None,
                        })
                        .collect()
                }
                other => {
                    return Err(SchemaConfigError::new(
                        "directives",
                        "a list of directives",
                        &other,
                    ));
                }
            };
        }
        if let Some(v) = present(type_resolution) {
            crate::__juniper_trace_warn!(
                "Type resolution strategies are deprecated, provide a `type_loader` instead"
            );
            if let ConfigValue::TypeResolution(strategy) = v {
                if type_loader.as_ref().is_none_or(ConfigValue::is_null) {
                    type_loader = Some(ConfigValue::TypeLoader(legacy::into_type_loader(strategy)));
                }
            }
        }
        if let Some(v) = present(type_loader) {
            config.type_loader = Some(match v {
                ConfigValue::TypeLoader(f) => f,
                other => return Err(SchemaConfigError::new("type loader", "a function", &other)),
            });
        }

        Ok(config)
    }

    /// Sets the type query operations are rooted at.
    #[must_use]
    pub fn query(mut self, query: ObjectMeta) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the type mutation operations are rooted at.
    #[must_use]
    pub fn mutation(mut self, mutation: ObjectMeta) -> Self {
        self.mutation = Some(mutation);
        self
    }

    /// Sets the type subscription operations are rooted at.
    #[must_use]
    pub fn subscription(mut self, subscription: ObjectMeta) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Sets the additional types of the schema.
    #[must_use]
    pub fn types(mut self, types: Vec<MetaType>) -> Self {
        self.types = Some(Types::List(types));
        self
    }

    /// Sets a supplier of the additional types of the schema, called once
    /// the schema is assembled.
    #[must_use]
    pub fn deferred_types(mut self, f: impl Fn() -> Vec<MetaType> + Send + Sync + 'static) -> Self {
        self.types = Some(Types::Deferred(Arc::new(f)));
        self
    }

    /// Sets the directives supported by the schema.
    #[must_use]
    pub fn directives(mut self, directives: Vec<DirectiveType>) -> Self {
        self.directives = directives;
        self
    }

    /// Sets the function loading referenced types by their names.
    #[must_use]
    pub fn type_loader(mut self, f: impl Fn(&str) -> Option<MetaType> + Send + Sync + 'static) -> Self {
        self.type_loader = Some(Arc::new(f));
        self
    }
}

impl SchemaConfig {
    /// Returns the type query operations are rooted at, if set.
    pub fn get_query(&self) -> Option<&ObjectMeta> {
        self.query.as_ref()
    }

    /// Returns the type mutation operations are rooted at, if set.
    pub fn get_mutation(&self) -> Option<&ObjectMeta> {
        self.mutation.as_ref()
    }

    /// Returns the type subscription operations are rooted at, if set.
    pub fn get_subscription(&self) -> Option<&ObjectMeta> {
        self.subscription.as_ref()
    }

    /// Returns the additional types, calling the supplier if they are
    /// deferred.
    ///
    /// Empty if none are set.
    pub fn get_types(&self) -> Cow<'_, [MetaType]> {
        match &self.types {
            None => Cow::Borrowed(&[]),
            Some(Types::List(types)) => Cow::Borrowed(types),
            Some(Types::Deferred(f)) => Cow::Owned(f()),
        }
    }

    /// Returns the supported directives.
    ///
    /// Empty if none are set.
    pub fn get_directives(&self) -> &[DirectiveType] {
        &self.directives
    }

    /// Returns the function loading types by their names, if set.
    pub fn get_type_loader(&self) -> Option<&TypeLoader> {
        self.type_loader.as_ref()
    }
}

impl fmt::Debug for SchemaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaConfig")
            .field("query", &self.query)
            .field("mutation", &self.mutation)
            .field("subscription", &self.subscription)
            .field("types", &self.types)
            .field("directives", &self.directives)
            .field("type_loader", &self.type_loader.as_ref().map(|_| ".."))
            .finish()
    }
}
