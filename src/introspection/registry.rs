use std::{fmt, sync::OnceLock};

use arcstr::{ArcStr, literal};

use super::{
    providers,
    resolvers::{self, Resolution, Resolved, Resolver},
};
use crate::{
    ast::Type,
    schema::{
        meta::{Argument, EnumMeta, EnumValue, Field, MetaType, ObjectMeta},
        model::{DirectiveLocation, FnvIndexMap, SchemaType},
    },
    types::base::TypeKind,
};

/// Fields of an introspection type by their names, in declaration order.
pub type FieldMap = FnvIndexMap<ArcStr, FieldDescriptor>;

/// Field of an introspection type, along with the way to resolve it.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    /// Declaration of the field.
    pub field: Field,
    /// Resolver of the field.
    ///
    /// `None` means the field is resolved with [`resolvers::property()`].
    pub resolver: Option<Resolver>,
}

impl FieldDescriptor {
    /// Creates a new [`FieldDescriptor`] resolved with the default
    /// [`resolvers::property()`] resolver.
    pub fn new(field: Field) -> Self {
        Self {
            field,
            resolver: None,
        }
    }

    /// Sets the [`Resolver`] of this field.
    #[must_use]
    pub fn resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Resolves this field.
    pub fn resolve<'a>(&self, res: &Resolution<'_, 'a>) -> Resolved<'a> {
        self.resolver.unwrap_or(resolvers::property)(res)
    }
}

/// Field map built on its first access.
pub struct LazyFields {
    fields: OnceLock<FieldMap>,
    provider: fn() -> FieldMap,
}

impl LazyFields {
    /// Creates a new [`LazyFields`] built by the `provider`.
    pub const fn new(provider: fn() -> FieldMap) -> Self {
        Self {
            fields: OnceLock::new(),
            provider,
        }
    }

    /// Returns the fields, building them if this is the first access.
    pub fn get(&self) -> &FieldMap {
        self.fields.get_or_init(|| {
            let fields = (self.provider)();
            crate::__juniper_trace_debug!("built {} introspection fields", fields.len());
            fields
        })
    }

    /// Indicates whether the fields are built already.
    pub fn is_built(&self) -> bool {
        self.fields.get().is_some()
    }
}

impl fmt::Debug for LazyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fields.get() {
            Some(fields) => f.debug_tuple("LazyFields").field(fields).finish(),
            None => f.write_str("LazyFields(<not built>)"),
        }
    }
}

#[derive(Debug)]
enum Shape {
    Object(LazyFields),
    Enum(Vec<EnumValue>),
}

/// One of the types describing a schema to the introspection system.
#[derive(Debug)]
pub struct IntrospectionType {
    name: ArcStr,
    description: ArcStr,
    shape: Shape,
    meta: OnceLock<MetaType>,
}

impl IntrospectionType {
    fn object(name: ArcStr, description: &str, provider: fn() -> FieldMap) -> Self {
        crate::__juniper_trace_debug!("building introspection type `{}`", name);
        Self {
            name,
            description: description.into(),
            shape: Shape::Object(LazyFields::new(provider)),
            meta: OnceLock::new(),
        }
    }

    fn enumeration(name: ArcStr, description: &str, values: Vec<EnumValue>) -> Self {
        crate::__juniper_trace_debug!("building introspection type `{}`", name);
        Self {
            name,
            description: description.into(),
            shape: Shape::Enum(values),
            meta: OnceLock::new(),
        }
    }

    /// Name of this type.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Description of this type.
    pub fn description(&self) -> &ArcStr {
        &self.description
    }

    /// Kind of this type: either an object or an enum.
    pub fn kind(&self) -> TypeKind {
        match self.shape {
            Shape::Object(_) => TypeKind::Object,
            Shape::Enum(_) => TypeKind::Enum,
        }
    }

    /// Fields of this type, if it's an object.
    pub fn fields(&self) -> Option<&FieldMap> {
        match &self.shape {
            Shape::Object(fields) => Some(fields.get()),
            Shape::Enum(_) => None,
        }
    }

    /// Looks up a field of this type by its name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()?.get(name)
    }

    /// Values of this type, if it's an enum.
    pub fn enum_values(&self) -> Option<&[EnumValue]> {
        match &self.shape {
            Shape::Object(_) => None,
            Shape::Enum(values) => Some(values),
        }
    }

    /// Describes this type as a [`MetaType`], to be registered in a schema.
    pub fn as_meta_type(&self) -> &MetaType {
        self.meta.get_or_init(|| match &self.shape {
            Shape::Object(fields) => {
                let fields = fields.get().values().map(|f| f.field.clone()).collect::<Vec<_>>();
                ObjectMeta::new(self.name.clone(), &fields)
                    .description(self.description.clone())
                    .into_meta()
            }
            Shape::Enum(values) => EnumMeta::new(self.name.clone(), values)
                .description(self.description.clone())
                .into_meta(),
        })
    }
}

/// Registry of the introspection types and meta fields.
///
/// Every type and field is built once, on its first access, and then shared
/// by all the schemas using this registry. Accessing the same item twice
/// returns the same instance.
#[derive(Debug)]
pub struct MetaSchema {
    schema: OnceLock<IntrospectionType>,
    type_: OnceLock<IntrospectionType>,
    directive: OnceLock<IntrospectionType>,
    field: OnceLock<IntrospectionType>,
    input_value: OnceLock<IntrospectionType>,
    enum_value: OnceLock<IntrospectionType>,
    type_kind: OnceLock<IntrospectionType>,
    directive_location: OnceLock<IntrospectionType>,
    schema_field: OnceLock<FieldDescriptor>,
    type_field: OnceLock<FieldDescriptor>,
    typename_field: OnceLock<FieldDescriptor>,
}

static GLOBAL: MetaSchema = MetaSchema::new();

impl Default for MetaSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaSchema {
    /// Creates a new [`MetaSchema`] with nothing built yet.
    pub const fn new() -> Self {
        Self {
            schema: OnceLock::new(),
            type_: OnceLock::new(),
            directive: OnceLock::new(),
            field: OnceLock::new(),
            input_value: OnceLock::new(),
            enum_value: OnceLock::new(),
            type_kind: OnceLock::new(),
            directive_location: OnceLock::new(),
            schema_field: OnceLock::new(),
            type_field: OnceLock::new(),
            typename_field: OnceLock::new(),
        }
    }

    /// Returns the process-wide [`MetaSchema`].
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns all the introspection types by their names.
    pub fn types(&self) -> FnvIndexMap<&str, &IntrospectionType> {
        [
            self.schema(),
            self.type_(),
            self.directive(),
            self.field(),
            self.input_value(),
            self.enum_value(),
            self.type_kind(),
            self.directive_location(),
        ]
        .into_iter()
        .map(|t| (t.name().as_str(), t))
        .collect()
    }

    /// Looks up an introspection type by its name.
    pub fn type_by_name(&self, name: &str) -> Option<&IntrospectionType> {
        Some(match name {
            "__Schema" => self.schema(),
            "__Type" => self.type_(),
            "__Directive" => self.directive(),
            "__Field" => self.field(),
            "__InputValue" => self.input_value(),
            "__EnumValue" => self.enum_value(),
            "__TypeKind" => self.type_kind(),
            "__DirectiveLocation" => self.directive_location(),
            _ => return None,
        })
    }

    /// `__Schema` type.
    pub fn schema(&self) -> &IntrospectionType {
        self.schema.get_or_init(|| {
            IntrospectionType::object(
                literal!("__Schema"),
                "A GraphQL Schema defines the capabilities of a GraphQL server. It exposes all \
                 available types and directives on the server, as well as the entry points for \
                 query, mutation, and subscription operations.",
                providers::schema_fields,
            )
        })
    }

    /// `__Type` type.
    pub fn type_(&self) -> &IntrospectionType {
        self.type_.get_or_init(|| {
            IntrospectionType::object(
                literal!("__Type"),
                "The fundamental unit of any GraphQL Schema is the type. There are many kinds of \
                 types in GraphQL as represented by the `__TypeKind` enum.\n\n\
                 Depending on the kind of a type, certain fields describe information about that \
                 type. Scalar types provide no information beyond a name and description, while \
                 Enum types provide their values. Object and Interface types provide the fields \
                 they describe. Abstract types, Union and Interface, provide the Object types \
                 possible at runtime. List and NonNull types compose other types.",
                providers::type_fields,
            )
        })
    }

    /// `__Directive` type.
    pub fn directive(&self) -> &IntrospectionType {
        self.directive.get_or_init(|| {
            IntrospectionType::object(
                literal!("__Directive"),
                "A Directive provides a way to describe alternate runtime execution and type \
                 validation behavior in a GraphQL document.\n\n\
                 In some cases, you need to provide options to alter GraphQL's execution \
                 behavior in ways field arguments will not suffice, such as conditionally \
                 including or skipping a field. Directives provide this by describing \
                 additional information to the executor.",
                providers::directive_fields,
            )
        })
    }

    /// `__Field` type.
    pub fn field(&self) -> &IntrospectionType {
        self.field.get_or_init(|| {
            IntrospectionType::object(
                literal!("__Field"),
                "Object and Interface types are described by a list of Fields, each of which \
                 has a name, potentially a list of arguments, and a return type.",
                providers::field_fields,
            )
        })
    }

    /// `__InputValue` type.
    pub fn input_value(&self) -> &IntrospectionType {
        self.input_value.get_or_init(|| {
            IntrospectionType::object(
                literal!("__InputValue"),
                "Arguments provided to Fields or Directives and the input fields of an \
                 InputObject are represented as Input Values which describe their type and \
                 optionally a default value.",
                providers::input_value_fields,
            )
        })
    }

    /// `__EnumValue` type.
    pub fn enum_value(&self) -> &IntrospectionType {
        self.enum_value.get_or_init(|| {
            IntrospectionType::object(
                literal!("__EnumValue"),
                "One possible value for a given Enum. Enum values are unique values, not a \
                 placeholder for a string or numeric value. However an Enum value is returned \
                 in a JSON response as a string.",
                providers::enum_value_fields,
            )
        })
    }

    /// `__TypeKind` type.
    pub fn type_kind(&self) -> &IntrospectionType {
        self.type_kind.get_or_init(|| {
            IntrospectionType::enumeration(
                literal!("__TypeKind"),
                "An enum describing what kind of type a given `__Type` is.",
                TypeKind::ALL
                    .into_iter()
                    .map(|k| EnumValue::new(k.to_string()).description(type_kind_description(k)))
                    .collect(),
            )
        })
    }

    /// `__DirectiveLocation` type.
    pub fn directive_location(&self) -> &IntrospectionType {
        self.directive_location.get_or_init(|| {
            IntrospectionType::enumeration(
                literal!("__DirectiveLocation"),
                "A Directive can be adjacent to many parts of the GraphQL language, a \
                 __DirectiveLocation describes one such possible adjacencies.",
                DirectiveLocation::ALL
                    .into_iter()
                    .map(|l| {
                        EnumValue::new(l.to_string()).description(directive_location_description(l))
                    })
                    .collect(),
            )
        })
    }

    /// `__schema: __Schema!` meta field of the query type.
    pub fn schema_meta_field_def(&self) -> &FieldDescriptor {
        self.schema_field.get_or_init(|| {
            crate::__juniper_trace_debug!("building meta field `__schema`");
            FieldDescriptor::new(
                Field::new(literal!("__schema"), Type::NonNullNamed(literal!("__Schema")))
                    .description("Access the current type schema of this server."),
            )
            .resolver(resolvers::schema)
        })
    }

    /// `__type(name: String!): __Type` meta field of the query type.
    pub fn type_meta_field_def(&self) -> &FieldDescriptor {
        self.type_field.get_or_init(|| {
            crate::__juniper_trace_debug!("building meta field `__type`");
            FieldDescriptor::new(
                Field::new(literal!("__type"), Type::Named(literal!("__Type")))
                    .description("Request the type information of a single type.")
                    .argument(Argument::new(
                        literal!("name"),
                        Type::NonNullNamed(literal!("String")),
                    )),
            )
            .resolver(resolvers::type_)
        })
    }

    /// `__typename: String!` meta field of every composite type.
    pub fn type_name_meta_field_def(&self) -> &FieldDescriptor {
        self.typename_field.get_or_init(|| {
            crate::__juniper_trace_debug!("building meta field `__typename`");
            FieldDescriptor::new(
                Field::new(literal!("__typename"), Type::NonNullNamed(literal!("String")))
                    .description("The name of the current Object type at runtime."),
            )
            .resolver(resolvers::typename)
        })
    }

    /// Looks up the meta field of the given `name` available on the `parent`
    /// type of the `schema`.
    ///
    /// `__schema` and `__type` are only available on the query type, while
    /// `__typename` is available on every object, interface and union.
    pub fn meta_field(
        &self,
        schema: &SchemaType,
        parent: &MetaType,
        name: &str,
    ) -> Option<&FieldDescriptor> {
        let is_query_type = || schema.concrete_query_type().name() == parent.name();
        match name {
            "__schema" if is_query_type() => Some(self.schema_meta_field_def()),
            "__type" if is_query_type() => Some(self.type_meta_field_def()),
            "__typename" if parent.is_composite() => Some(self.type_name_meta_field_def()),
            _ => None,
        }
    }
}

fn type_kind_description(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Scalar => "Indicates this type is a scalar.",
        TypeKind::Object => {
            "Indicates this type is an object. `fields` and `interfaces` are valid fields."
        }
        TypeKind::Interface => {
            "Indicates this type is an interface. `fields` and `possibleTypes` are valid fields."
        }
        TypeKind::Union => "Indicates this type is a union. `possibleTypes` is a valid field.",
        TypeKind::Enum => "Indicates this type is an enum. `enumValues` is a valid field.",
        TypeKind::InputObject => {
            "Indicates this type is an input object. `inputFields` is a valid field."
        }
        TypeKind::List => "Indicates this type is a list. `ofType` is a valid field.",
        TypeKind::NonNull => "Indicates this type is a non-null. `ofType` is a valid field.",
    }
}

fn directive_location_description(location: DirectiveLocation) -> &'static str {
    use DirectiveLocation as L;

    match location {
        L::Query => "Location adjacent to a query operation.",
        L::Mutation => "Location adjacent to a mutation operation.",
        L::Subscription => "Location adjacent to a subscription operation.",
        L::Field => "Location adjacent to a field.",
        L::FragmentDefinition => "Location adjacent to a fragment definition.",
        L::FragmentSpread => "Location adjacent to a fragment spread.",
        L::InlineFragment => "Location adjacent to an inline fragment.",
        L::Schema => "Location adjacent to a schema definition.",
        L::Scalar => "Location adjacent to a scalar definition.",
        L::Object => "Location adjacent to an object type definition.",
        L::FieldDefinition => "Location adjacent to a field definition.",
        L::ArgumentDefinition => "Location adjacent to an argument definition.",
        L::Interface => "Location adjacent to an interface definition.",
        L::Union => "Location adjacent to a union definition.",
        L::Enum => "Location adjacent to an enum definition.",
        L::EnumValue => "Location adjacent to an enum value definition.",
        L::InputObject => "Location adjacent to an input object type definition.",
        L::InputFieldDefinition => "Location adjacent to an input object field definition.",
    }
}
