//! Field maps of the introspection object types.
//!
//! Fields refer to their result types by name only, so no field map needs
//! another introspection type to be built first, which lets `__Type` refer
//! to itself.

use arcstr::{ArcStr, literal};

use super::{
    registry::{FieldDescriptor, FieldMap},
    resolvers::{self, Resolution, Resolved},
};
use crate::{
    ast::{Type, ast_from_value},
    schema::{
        meta::{Argument, EnumMeta, Field, InputObjectMeta, MetaType, ObjectMeta},
        model::TypeType,
    },
};

const STRING: ArcStr = literal!("String");
const BOOLEAN: ArcStr = literal!("Boolean");
const TYPE: ArcStr = literal!("__Type");
const TYPE_KIND: ArcStr = literal!("__TypeKind");
const FIELD: ArcStr = literal!("__Field");
const INPUT_VALUE: ArcStr = literal!("__InputValue");
const ENUM_VALUE: ArcStr = literal!("__EnumValue");
const DIRECTIVE: ArcStr = literal!("__Directive");
const DIRECTIVE_LOCATION: ArcStr = literal!("__DirectiveLocation");

/// `[T!]`
fn list_of(name: ArcStr) -> Type {
    Type::NonNullNamed(name).wrap_list()
}

fn field_map(fields: impl IntoIterator<Item = FieldDescriptor>) -> FieldMap {
    fields
        .into_iter()
        .map(|f| (f.field.name.clone(), f))
        .collect()
}

fn include_deprecated() -> Argument {
    Argument::new(literal!("includeDeprecated"), Type::Named(BOOLEAN)).default_value(false)
}

/// Fields of `__Schema`.
pub(super) fn schema_fields() -> FieldMap {
    field_map([
        FieldDescriptor::new(
            Field::new(literal!("types"), list_of(TYPE).wrap_non_null())
                .description("A list of all types supported by this server."),
        )
        .resolver(resolvers::schema_types),
        FieldDescriptor::new(
            Field::new(literal!("queryType"), Type::NonNullNamed(TYPE))
                .description("The type that query operations will be rooted at."),
        )
        .resolver(resolvers::schema_query_type),
        FieldDescriptor::new(
            Field::new(literal!("mutationType"), Type::Named(TYPE)).description(
                "If this server supports mutation, the type that mutation operations will be \
                 rooted at.",
            ),
        )
        .resolver(resolvers::schema_mutation_type),
        FieldDescriptor::new(
            Field::new(literal!("subscriptionType"), Type::Named(TYPE)).description(
                "If this server support subscription, the type that subscription operations \
                 will be rooted at.",
            ),
        )
        .resolver(resolvers::schema_subscription_type),
        FieldDescriptor::new(
            Field::new(literal!("directives"), list_of(DIRECTIVE).wrap_non_null())
                .description("A list of all directives supported by this server."),
        )
        .resolver(resolvers::schema_directives),
    ])
}

/// Fields of `__Type`.
pub(super) fn type_fields() -> FieldMap {
    field_map([
        FieldDescriptor::new(Field::new(literal!("kind"), Type::NonNullNamed(TYPE_KIND)))
            .resolver(type_kind),
        FieldDescriptor::new(Field::new(literal!("name"), Type::Named(STRING))),
        FieldDescriptor::new(Field::new(literal!("description"), Type::Named(STRING))),
        FieldDescriptor::new(
            Field::new(literal!("fields"), list_of(FIELD)).argument(include_deprecated()),
        )
        .resolver(type_fields_of),
        FieldDescriptor::new(Field::new(literal!("interfaces"), list_of(TYPE)))
            .resolver(type_interfaces),
        FieldDescriptor::new(Field::new(literal!("possibleTypes"), list_of(TYPE)))
            .resolver(type_possible_types),
        FieldDescriptor::new(
            Field::new(literal!("enumValues"), list_of(ENUM_VALUE))
                .argument(include_deprecated()),
        )
        .resolver(type_enum_values),
        FieldDescriptor::new(Field::new(literal!("inputFields"), list_of(INPUT_VALUE)))
            .resolver(type_input_fields),
        FieldDescriptor::new(Field::new(literal!("ofType"), Type::Named(TYPE)))
            .resolver(type_of_type),
    ])
}

/// Fields of `__Field`.
pub(super) fn field_fields() -> FieldMap {
    field_map([
        FieldDescriptor::new(Field::new(literal!("name"), Type::NonNullNamed(STRING))),
        FieldDescriptor::new(Field::new(literal!("description"), Type::Named(STRING))),
        FieldDescriptor::new(Field::new(
            literal!("args"),
            list_of(INPUT_VALUE).wrap_non_null(),
        ))
        .resolver(field_args),
        FieldDescriptor::new(Field::new(literal!("type"), Type::NonNullNamed(TYPE)))
            .resolver(field_type),
        FieldDescriptor::new(Field::new(literal!("isDeprecated"), Type::NonNullNamed(BOOLEAN)))
            .resolver(field_is_deprecated),
        FieldDescriptor::new(Field::new(literal!("deprecationReason"), Type::Named(STRING))),
    ])
}

/// Fields of `__InputValue`.
pub(super) fn input_value_fields() -> FieldMap {
    field_map([
        FieldDescriptor::new(Field::new(literal!("name"), Type::NonNullNamed(STRING))),
        FieldDescriptor::new(Field::new(literal!("description"), Type::Named(STRING))),
        FieldDescriptor::new(Field::new(literal!("type"), Type::NonNullNamed(TYPE)))
            .resolver(input_value_type),
        FieldDescriptor::new(
            Field::new(literal!("defaultValue"), Type::Named(STRING)).description(
                "A GraphQL-formatted string representing the default value for this input \
                 value.",
            ),
        )
        .resolver(input_value_default_value),
    ])
}

/// Fields of `__EnumValue`.
pub(super) fn enum_value_fields() -> FieldMap {
    field_map([
        FieldDescriptor::new(Field::new(literal!("name"), Type::NonNullNamed(STRING))),
        FieldDescriptor::new(Field::new(literal!("description"), Type::Named(STRING))),
        FieldDescriptor::new(Field::new(literal!("isDeprecated"), Type::NonNullNamed(BOOLEAN)))
            .resolver(resolvers::enum_value_is_deprecated),
        FieldDescriptor::new(Field::new(literal!("deprecationReason"), Type::Named(STRING))),
    ])
}

/// Fields of `__Directive`.
pub(super) fn directive_fields() -> FieldMap {
    field_map([
        FieldDescriptor::new(Field::new(literal!("name"), Type::NonNullNamed(STRING))),
        FieldDescriptor::new(Field::new(literal!("description"), Type::Named(STRING))),
        FieldDescriptor::new(Field::new(
            literal!("locations"),
            list_of(DIRECTIVE_LOCATION).wrap_non_null(),
        )),
        FieldDescriptor::new(Field::new(
            literal!("args"),
            list_of(INPUT_VALUE).wrap_non_null(),
        ))
        .resolver(resolvers::directive_fields),
        // Superseded by `locations`.
        FieldDescriptor::new(
            Field::new(literal!("onOperation"), Type::NonNullNamed(BOOLEAN))
                .deprecated(Some("Use `locations`.")),
        )
        .resolver(resolvers::directive_on_operation),
        FieldDescriptor::new(
            Field::new(literal!("onFragment"), Type::NonNullNamed(BOOLEAN))
                .deprecated(Some("Use `locations`.")),
        )
        .resolver(resolvers::directive_on_fragment),
        FieldDescriptor::new(
            Field::new(literal!("onField"), Type::NonNullNamed(BOOLEAN))
                .deprecated(Some("Use `locations`.")),
        )
        .resolver(resolvers::directive_on_field),
    ])
}

fn type_kind<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match res.source {
        Resolved::Type(t) => Resolved::TypeKind(t.kind()),
        _ => Resolved::Null,
    }
}

fn concrete<'a>(res: &Resolution<'_, 'a>) -> Option<&'a MetaType> {
    match res.source {
        Resolved::Type(t) => t.to_concrete(),
        _ => None,
    }
}

fn type_fields_of<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    let include_deprecated = res.arguments.get_bool("includeDeprecated").unwrap_or(false);
    concrete(res)
        .and_then(MetaType::fields)
        .map_or(Resolved::Null, |fields| {
            Resolved::list(
                fields
                    .iter()
                    .filter(|f| include_deprecated || !f.deprecation_status.is_deprecated()),
                Resolved::Field,
            )
        })
}

fn type_interfaces<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match concrete(res) {
        Some(MetaType::Object(ObjectMeta {
            interface_names, ..
        })) => Resolved::list(
            interface_names
                .iter()
                .filter_map(|n| res.info.schema.type_by_name(n)),
            Resolved::Type,
        ),
        _ => Resolved::Null,
    }
}

fn type_possible_types<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match concrete(res) {
        Some(t) if t.is_abstract() => Resolved::list(res.info.schema.possible_types(t), |t| {
            Resolved::Type(TypeType::Concrete(t))
        }),
        _ => Resolved::Null,
    }
}

fn type_enum_values<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    let include_deprecated = res.arguments.get_bool("includeDeprecated").unwrap_or(false);
    match concrete(res) {
        Some(MetaType::Enum(EnumMeta { values, .. })) => Resolved::list(
            values
                .iter()
                .filter(|v| include_deprecated || !v.deprecation_status.is_deprecated()),
            Resolved::EnumValue,
        ),
        _ => Resolved::Null,
    }
}

fn type_input_fields<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match concrete(res) {
        Some(MetaType::InputObject(InputObjectMeta { input_fields, .. })) => {
            Resolved::list(input_fields, Resolved::InputValue)
        }
        _ => Resolved::Null,
    }
}

fn type_of_type<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match res.source {
        Resolved::Type(t) => t
            .of_type()
            .map_or(Resolved::Null, |t| Resolved::Type(t.clone())),
        _ => Resolved::Null,
    }
}

fn field_args<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Field(f) => Resolved::list(f.arguments.iter().flatten(), Resolved::InputValue),
        _ => Resolved::Null,
    }
}

fn field_type<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Field(f) => res
            .info
            .schema
            .make_type(&f.field_type)
            .map_or(Resolved::Null, Resolved::Type),
        _ => Resolved::Null,
    }
}

fn field_is_deprecated<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Field(f) => Resolved::Boolean(f.deprecation_status.is_deprecated()),
        _ => Resolved::Null,
    }
}

fn input_value_type<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::InputValue(a) => res
            .info
            .schema
            .make_type(&a.arg_type)
            .map_or(Resolved::Null, Resolved::Type),
        _ => Resolved::Null,
    }
}

/// Prints the default value as a literal of the argument's type.
fn input_value_default_value<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    let Resolved::InputValue(arg) = *res.source else {
        return Resolved::Null;
    };
    let schema = res.info.schema;
    arg.default_value
        .as_ref()
        .zip(schema.make_type(&arg.arg_type))
        .and_then(|(value, ty)| ast_from_value(value, &ty, schema))
        .map_or(Resolved::Null, |ast| Resolved::String(ast.to_string().into()))
}
