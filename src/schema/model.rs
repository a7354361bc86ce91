//! Assembled schema: its types, root operation types and directives.

use std::fmt;

use arcstr::{ArcStr, literal};
use derive_more::with_trait::{Display, Error, From};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    ast::Type,
    introspection::MetaSchema,
    schema::{
        config::{SchemaConfig, SchemaConfigError, TypeLoader},
        meta::{Argument, DeprecationStatus, InterfaceMeta, MetaType, ObjectMeta, ScalarMeta, UnionMeta},
    },
    types::base::TypeKind,
};

/// [`IndexMap`] hashing its keys with [FNV].
///
/// [FNV]: https://en.wikipedia.org/wiki/Fowler–Noll–Vo_hash_function
pub type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

/// Metadata for a schema
///
/// Holds every named type reachable from the root operation types, in
/// registration order, together with the directives the schema supports.
#[derive(Debug)]
pub struct SchemaType {
    types: FnvIndexMap<ArcStr, MetaType>,
    query_type_index: usize,
    mutation_type_index: Option<usize>,
    subscription_type_index: Option<usize>,
    directives: Vec<DirectiveType>,
}

/// View of a type as seen by the introspection system: either a named type
/// of the schema or one of the two wrapping types around another type.
#[derive(Clone, Debug)]
pub enum TypeType<'a> {
    /// Named type, defined in the schema.
    Concrete(&'a MetaType),
    /// Non-`null` wrapper around another type.
    NonNull(Box<TypeType<'a>>),
    /// List wrapper around another type.
    List(Box<TypeType<'a>>),
}

/// Metadata for a directive
#[derive(Clone, Debug)]
pub struct DirectiveType {
    /// Name of the directive, without the leading `@`.
    pub name: ArcStr,
    /// Description of the directive.
    pub description: Option<ArcStr>,
    /// Places in a document this directive may appear at.
    pub locations: Vec<DirectiveLocation>,
    /// Arguments this directive accepts.
    pub arguments: Vec<Argument>,
}

/// Location a directive may be placed at.
///
/// The first seven are executable locations (within a query document), the
/// rest are type system locations (within a schema definition).
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum DirectiveLocation {
    #[display("QUERY")]
    Query,
    #[display("MUTATION")]
    Mutation,
    #[display("SUBSCRIPTION")]
    Subscription,
    #[display("FIELD")]
    Field,
    #[display("FRAGMENT_DEFINITION")]
    FragmentDefinition,
    #[display("FRAGMENT_SPREAD")]
    FragmentSpread,
    #[display("INLINE_FRAGMENT")]
    InlineFragment,
    #[display("SCHEMA")]
    Schema,
    #[display("SCALAR")]
    Scalar,
    #[display("OBJECT")]
    Object,
    #[display("FIELD_DEFINITION")]
    FieldDefinition,
    #[display("ARGUMENT_DEFINITION")]
    ArgumentDefinition,
    #[display("INTERFACE")]
    Interface,
    #[display("UNION")]
    Union,
    #[display("ENUM")]
    Enum,
    #[display("ENUM_VALUE")]
    EnumValue,
    #[display("INPUT_OBJECT")]
    InputObject,
    #[display("INPUT_FIELD_DEFINITION")]
    InputFieldDefinition,
}

impl DirectiveLocation {
    /// All the locations, in the order the introspection system lists them.
    pub const ALL: [Self; 18] = [
        Self::Query,
        Self::Mutation,
        Self::Subscription,
        Self::Field,
        Self::FragmentDefinition,
        Self::FragmentSpread,
        Self::InlineFragment,
        Self::Schema,
        Self::Scalar,
        Self::Object,
        Self::FieldDefinition,
        Self::ArgumentDefinition,
        Self::Interface,
        Self::Union,
        Self::Enum,
        Self::EnumValue,
        Self::InputObject,
        Self::InputFieldDefinition,
    ];

    /// Indicates whether this location is an operation definition.
    pub fn is_operation(self) -> bool {
        matches!(self, Self::Query | Self::Mutation | Self::Subscription)
    }

    /// Indicates whether this location is a fragment definition, spread or
    /// inline fragment.
    pub fn is_fragment(self) -> bool {
        matches!(
            self,
            Self::FragmentSpread | Self::InlineFragment | Self::FragmentDefinition,
        )
    }
}

/// Error of assembling a [`SchemaType`] out of a [`SchemaConfig`].
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum SchemaError {
    /// No query root type was configured.
    #[display("Schema query type must be provided")]
    MissingQueryType,

    /// A type is referenced by name, but neither defined nor loadable.
    #[display("Type `{_0}` is referenced but not defined in the schema")]
    UnknownType(#[error(not(source))] ArcStr),

    /// The type loader returned a type of another name than requested.
    #[display("Type loader was asked for `{requested}` but returned `{loaded}`")]
    TypeLoaderMismatch {
        /// Name of the type asked for.
        requested: ArcStr,
        /// Name of the type returned.
        loaded: ArcStr,
    },

    /// The configuration itself is invalid.
    #[display("{_0}")]
    #[from]
    Config(#[error(source)] SchemaConfigError),
}

impl SchemaType {
    /// Assembles a new schema out of the provided [`SchemaConfig`].
    ///
    /// Registers the built-in scalars, the introspection types, the root
    /// types, and the configured types (calling a deferred supplier once).
    /// Afterwards, every type name referenced but not registered yet is
    /// requested from the configured [`TypeLoader`], so only reachable types
    /// are ever loaded.
    ///
    /// # Errors
    ///
    /// - If no query type is configured.
    /// - If a referenced type can neither be found nor loaded.
    pub fn new(config: &SchemaConfig) -> Result<Self, SchemaError> {
        Self::with_registry(MetaSchema::global(), config)
    }

    /// Assembles a new schema out of the provided [`SchemaConfig`], taking
    /// the introspection types from the given `registry` rather than the
    /// process-wide one.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaType::new()`].
    pub fn with_registry(
        registry: &MetaSchema,
        config: &SchemaConfig,
    ) -> Result<Self, SchemaError> {
        let query = config.get_query().ok_or(SchemaError::MissingQueryType)?;

        let mut types = FnvIndexMap::default();
        for scalar in builtin_scalars() {
            register(&mut types, scalar);
        }
        for meta in registry.types().values() {
            register(&mut types, meta.as_meta_type().clone());
        }
        let query_type_index = register(&mut types, query.clone().into_meta());
        let mutation_type_index = config
            .get_mutation()
            .map(|m| register(&mut types, m.clone().into_meta()));
        let subscription_type_index = config
            .get_subscription()
            .map(|s| register(&mut types, s.clone().into_meta()));
        for t in config.get_types().iter() {
            register(&mut types, t.clone());
        }

        let directives = if config.get_directives().is_empty() {
            vec![
                DirectiveType::new_include(),
                DirectiveType::new_skip(),
                DirectiveType::new_deprecated(),
            ]
        } else {
            config.get_directives().to_vec()
        };

        load_referenced_types(&mut types, &directives, config.get_type_loader())?;

        Ok(Self {
            types,
            query_type_index,
            mutation_type_index,
            subscription_type_index,
            directives,
        })
    }

    /// Returns all the named types of this schema, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &MetaType> {
        self.types.values()
    }

    /// Returns all the named types of this schema as [`TypeType`]s, in
    /// registration order.
    pub fn type_list(&self) -> Vec<TypeType<'_>> {
        self.types.values().map(TypeType::Concrete).collect()
    }

    /// Looks up a named type.
    pub fn type_by_name(&self, name: &str) -> Option<TypeType<'_>> {
        self.types.get(name).map(TypeType::Concrete)
    }

    /// Looks up a named type, returning its [`MetaType`].
    pub fn concrete_type_by_name(&self, name: &str) -> Option<&MetaType> {
        self.types.get(name)
    }

    /// Returns the type query operations are rooted at.
    pub fn query_type(&self) -> TypeType<'_> {
        TypeType::Concrete(self.concrete_query_type())
    }

    /// Returns the [`MetaType`] query operations are rooted at.
    pub fn concrete_query_type(&self) -> &MetaType {
        &self.types[self.query_type_index]
    }

    /// Returns the type mutation operations are rooted at, if any.
    pub fn mutation_type(&self) -> Option<TypeType<'_>> {
        self.mutation_type_index
            .map(|idx| TypeType::Concrete(&self.types[idx]))
    }

    /// Returns the type subscription operations are rooted at, if any.
    pub fn subscription_type(&self) -> Option<TypeType<'_>> {
        self.subscription_type_index
            .map(|idx| TypeType::Concrete(&self.types[idx]))
    }

    /// Returns the directives supported by this schema.
    pub fn directives(&self) -> &[DirectiveType] {
        &self.directives
    }

    /// Looks up a directive by its name.
    pub fn directive_by_name(&self, name: &str) -> Option<&DirectiveType> {
        self.directives.iter().find(|d| d.name.as_str() == name)
    }

    /// Resolves a [`Type`] literal against this schema.
    ///
    /// Returns `None` if the literal's innermost name is not a type of this
    /// schema.
    pub fn make_type(&self, t: &Type) -> Option<TypeType<'_>> {
        Some(match t {
            Type::Named(n) => self.type_by_name(n)?,
            Type::NonNullNamed(n) => TypeType::NonNull(Box::new(self.type_by_name(n)?)),
            Type::List(inner) => TypeType::List(Box::new(self.make_type(inner)?)),
            Type::NonNullList(inner) => TypeType::NonNull(Box::new(TypeType::List(Box::new(
                self.make_type(inner)?,
            )))),
        })
    }

    /// Returns the object types possible at runtime for the given abstract
    /// type.
    ///
    /// Union members come in their declaration order, interface implementers
    /// in registration order. Non-abstract types have no possible types.
    pub fn possible_types(&self, t: &MetaType) -> Vec<&MetaType> {
        match t {
            MetaType::Union(UnionMeta { of_type_names, .. }) => of_type_names
                .iter()
                .filter_map(|n| self.concrete_type_by_name(n))
                .collect(),
            MetaType::Interface(InterfaceMeta { name, .. }) => self
                .types
                .values()
                .filter(|t| match t {
                    MetaType::Object(ObjectMeta {
                        interface_names, ..
                    }) => interface_names.contains(name),
                    _ => false,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Checks whether the `possible_type` is one of the possible types of the
    /// `abstract_type`.
    pub fn is_possible_type(&self, abstract_type: &MetaType, possible_type: &MetaType) -> bool {
        self.possible_types(abstract_type)
            .into_iter()
            .any(|t| t.name() == possible_type.name())
    }
}

/// Registers the `meta` type, returning its index in the `types` registry.
///
/// The first definition of a name wins: later duplicates are skipped.
fn register(types: &mut FnvIndexMap<ArcStr, MetaType>, meta: MetaType) -> usize {
    let name = meta.name().clone();
    if let Some(idx) = types.get_index_of(&name) {
        crate::__juniper_trace_debug!("skipping duplicate definition of type `{}`", name);
        return idx;
    }
    types.insert_full(name, meta).0
}

/// Makes sure every type referenced by a registered type or a directive is
/// registered too, loading missing ones with the `loader`.
fn load_referenced_types(
    types: &mut FnvIndexMap<ArcStr, MetaType>,
    directives: &[DirectiveType],
    loader: Option<&TypeLoader>,
) -> Result<(), SchemaError> {
    let mut pending: Vec<ArcStr> = directives
        .iter()
        .flat_map(|d| &d.arguments)
        .map(|a| a.arg_type.innermost_name().into())
        .collect();
    let mut checked = 0;

    while checked < types.len() || !pending.is_empty() {
        if let Some((_, meta)) = types.get_index(checked) {
            pending.extend(meta.referenced_type_names().into_iter().map(ArcStr::from));
            checked += 1;
        }

        while let Some(name) = pending.pop() {
            if types.contains_key(&name) {
                continue;
            }
            let loaded = loader
                .and_then(|load| load(name.as_str()))
                .ok_or_else(|| SchemaError::UnknownType(name.clone()))?;
            if loaded.name() != &name {
                return Err(SchemaError::TypeLoaderMismatch {
                    requested: name,
                    loaded: loaded.name().clone(),
                });
            }
            crate::__juniper_trace_debug!("type loader resolved type `{}`", name);
            types.insert(name, loaded);
        }
    }
    Ok(())
}

fn builtin_scalars() -> [MetaType; 5] {
    [
        ScalarMeta::new(literal!("String"))
            .description(
                "The `String` scalar type represents textual data, represented as UTF-8 \
                 character sequences. The String type is most often used by GraphQL to \
                 represent free-form human-readable text.",
            )
            .into_meta(),
        ScalarMeta::new(literal!("Boolean"))
            .description("The `Boolean` scalar type represents `true` or `false`.")
            .into_meta(),
        ScalarMeta::new(literal!("Int"))
            .description(
                "The `Int` scalar type represents non-fractional signed whole numeric values. \
                 Int can represent values between -(2^31) and 2^31 - 1.",
            )
            .into_meta(),
        ScalarMeta::new(literal!("Float"))
            .description(
                "The `Float` scalar type represents signed double-precision fractional values \
                 as specified by [IEEE 754](http://en.wikipedia.org/wiki/IEEE_floating_point).",
            )
            .into_meta(),
        ScalarMeta::new(literal!("ID"))
            .description(
                "The `ID` scalar type represents a unique identifier, often used to refetch an \
                 object or as key for a cache. The ID type appears in a JSON response as a \
                 String; however, it is not intended to be human-readable. When expected as an \
                 input type, any string (such as `\"4\"`) or integer (such as `4`) input value \
                 will be accepted as an ID.",
            )
            .into_meta(),
    ]
}

impl<'a> TypeType<'a> {
    /// Returns the [`TypeKind`] of this type.
    ///
    /// Total over all the possible types: wrappers report their own kind,
    /// named types the kind of their [`MetaType`].
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Concrete(t) => t.type_kind(),
            Self::List(_) => TypeKind::List,
            Self::NonNull(_) => TypeKind::NonNull,
        }
    }

    /// Returns the name of this type, if it's a named one.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Self::Concrete(t) => Some(t.name().as_str()),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    /// Returns the description of this type, if it's a named one having any.
    pub fn description(&self) -> Option<&'a str> {
        match self {
            Self::Concrete(t) => t.description().map(ArcStr::as_str),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    /// Returns the type wrapped by this one, if it's a wrapper.
    pub fn of_type(&self) -> Option<&TypeType<'a>> {
        match self {
            Self::Concrete(_) => None,
            Self::List(inner) | Self::NonNull(inner) => Some(inner),
        }
    }

    /// Returns the [`MetaType`] of this type, if it's a named one.
    #[inline]
    pub fn to_concrete(&self) -> Option<&'a MetaType> {
        match self {
            Self::Concrete(t) => Some(t),
            Self::List(_) | Self::NonNull(_) => None,
        }
    }

    /// Returns the named type at the core of this type, unwrapping it.
    #[inline]
    pub fn innermost_concrete(&self) -> &'a MetaType {
        match self {
            Self::Concrete(t) => t,
            Self::NonNull(n) | Self::List(n) => n.innermost_concrete(),
        }
    }

    /// Indicates whether this type can only represent non-`null` values.
    #[inline]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for TypeType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(t) => f.write_str(t.name()),
            Self::List(i) => write!(f, "[{i}]"),
            Self::NonNull(i) => write!(f, "{i}!"),
        }
    }
}

impl DirectiveType {
    /// Builds a new [`DirectiveType`].
    pub fn new(
        name: impl Into<ArcStr>,
        locations: &[DirectiveLocation],
        arguments: &[Argument],
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            locations: locations.to_vec(),
            arguments: arguments.to_vec(),
        }
    }

    fn new_include() -> Self {
        Self::new(
            literal!("include"),
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new(literal!("if"), Type::NonNullNamed(literal!("Boolean")))
                .description("Included when true.")],
        )
        .description(
            "Directs the executor to include this field or fragment only when the `if` \
             argument is true.",
        )
    }

    fn new_skip() -> Self {
        Self::new(
            literal!("skip"),
            &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            &[Argument::new(literal!("if"), Type::NonNullNamed(literal!("Boolean")))
                .description("Skipped when true.")],
        )
        .description(
            "Directs the executor to skip this field or fragment when the `if` argument is \
             true.",
        )
    }

    fn new_deprecated() -> Self {
        Self::new(
            literal!("deprecated"),
            &[DirectiveLocation::FieldDefinition, DirectiveLocation::EnumValue],
            &[Argument::new(literal!("reason"), Type::Named(literal!("String")))
                .description(
                    "Explains why this element was deprecated, usually also including a \
                     suggestion for how to access supported similar data.",
                )
                .default_value(DeprecationStatus::DEFAULT_REASON)],
        )
        .description("Marks an element of a GraphQL schema as no longer supported.")
    }

    /// Sets the `description` of this [`DirectiveType`].
    ///
    /// Overwrites any previously set description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Indicates whether this directive may be placed on an operation.
    pub fn on_operation(&self) -> bool {
        self.locations.iter().any(|l| l.is_operation())
    }

    /// Indicates whether this directive may be placed on a fragment.
    pub fn on_fragment(&self) -> bool {
        self.locations.iter().any(|l| l.is_fragment())
    }

    /// Indicates whether this directive may be placed on a field.
    pub fn on_field(&self) -> bool {
        self.locations.contains(&DirectiveLocation::Field)
    }
}
