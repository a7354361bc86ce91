//! Functions computing the values of the introspection fields.
//!
//! Every resolver has the same [`Resolver`] signature and reads only the
//! parts of the [`Resolution`] it needs. A source of an unexpected shape
//! resolves to [`Resolved::Null`].

use std::borrow::Cow;

use arcstr::ArcStr;

use crate::{
    schema::{
        meta::{Argument, EnumValue, Field, MetaType},
        model::{DirectiveLocation, DirectiveType, SchemaType, TypeType},
    },
    types::base::{Arguments, TypeKind},
    value::Value,
};

/// Marker trait for the context values passed down to resolvers.
pub trait Context {}

impl Context for () {}

/// Value a field resolves into.
///
/// Leaves are scalar and enum values, everything else is an object of one
/// of the introspection types, to have its own fields resolved.
#[derive(Clone, Debug)]
pub enum Resolved<'a> {
    /// `null`.
    Null,
    /// `Boolean` value.
    Boolean(bool),
    /// `String` value.
    String(Cow<'a, str>),
    /// `__TypeKind` value.
    TypeKind(TypeKind),
    /// `__DirectiveLocation` value.
    DirectiveLocation(DirectiveLocation),
    /// `__Schema` object.
    Schema(&'a SchemaType),
    /// `__Type` object.
    Type(TypeType<'a>),
    /// `__Field` object.
    Field(&'a Field),
    /// `__InputValue` object, describing either a field argument or an input
    /// object field.
    InputValue(&'a Argument),
    /// `__EnumValue` object.
    EnumValue(&'a EnumValue),
    /// `__Directive` object.
    Directive(&'a DirectiveType),
    /// List of values.
    List(Vec<Resolved<'a>>),
}

impl<'a> Resolved<'a> {
    pub(crate) fn string(s: Option<&'a str>) -> Self {
        s.map_or(Self::Null, |s| Self::String(Cow::Borrowed(s)))
    }

    pub(crate) fn list<T>(items: impl IntoIterator<Item = T>, f: impl FnMut(T) -> Self) -> Self {
        Self::List(items.into_iter().map(f).collect())
    }

    /// Converts this value into a [`Value`], if it's a leaf or a list of
    /// leaves.
    pub fn leaf_value(&self) -> Option<Value> {
        Some(match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::scalar(*b),
            Self::String(s) => Value::scalar(s.as_ref()),
            Self::TypeKind(k) => Value::scalar(k.to_string()),
            Self::DirectiveLocation(l) => Value::scalar(l.to_string()),
            Self::List(l) => Value::List(l.iter().map(Self::leaf_value).collect::<Option<_>>()?),
            Self::Schema(_)
            | Self::Type(_)
            | Self::Field(_)
            | Self::InputValue(_)
            | Self::EnumValue(_)
            | Self::Directive(_) => return None,
        })
    }

    /// Returns the name of the introspection type this value is an object
    /// of, if it's an object.
    pub fn type_name(&self) -> Option<&'static str> {
        Some(match self {
            Self::Schema(_) => "__Schema",
            Self::Type(_) => "__Type",
            Self::Field(_) => "__Field",
            Self::InputValue(_) => "__InputValue",
            Self::EnumValue(_) => "__EnumValue",
            Self::Directive(_) => "__Directive",
            Self::Null
            | Self::Boolean(_)
            | Self::String(_)
            | Self::TypeKind(_)
            | Self::DirectiveLocation(_)
            | Self::List(_) => return None,
        })
    }
}

/// Information about the field being resolved.
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo<'a> {
    /// Name of the field.
    pub field_name: &'a str,
    /// Type the field is resolved on: the concrete runtime type of the
    /// object.
    pub parent_type: &'a MetaType,
    /// Schema the field is resolved in.
    pub schema: &'a SchemaType,
}

/// Everything a [`Resolver`] is given.
#[derive(Clone, Copy)]
pub struct Resolution<'r, 'a> {
    /// Object the field is resolved on.
    pub source: &'r Resolved<'a>,
    /// Arguments of the field, with their defaults applied.
    pub arguments: &'r Arguments,
    /// Context of the execution.
    pub context: &'r dyn Context,
    /// Information about the field being resolved.
    pub info: &'r FieldInfo<'a>,
}

/// Function resolving a field's value.
pub type Resolver = for<'r, 'a> fn(&Resolution<'r, 'a>) -> Resolved<'a>;

/// Resolves a field by reading the property of the same name from its
/// source.
///
/// Used for fields having no resolver of their own: `name`, `description`,
/// `deprecationReason` and `locations`.
pub fn property<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match (res.info.field_name, res.source) {
        ("name", Resolved::Type(t)) => Resolved::string(t.name()),
        ("name", &Resolved::Field(f)) => Resolved::string(Some(&f.name)),
        ("name", &Resolved::InputValue(a)) => Resolved::string(Some(&a.name)),
        ("name", &Resolved::EnumValue(v)) => Resolved::string(Some(&v.name)),
        ("name", &Resolved::Directive(d)) => Resolved::string(Some(&d.name)),
        ("description", Resolved::Type(t)) => Resolved::string(t.description()),
        ("description", &Resolved::Field(f)) => Resolved::string(f.description.as_deref()),
        ("description", &Resolved::InputValue(a)) => Resolved::string(a.description.as_deref()),
        ("description", &Resolved::EnumValue(v)) => Resolved::string(v.description.as_deref()),
        ("description", &Resolved::Directive(d)) => Resolved::string(d.description.as_deref()),
        ("deprecationReason", &Resolved::Field(f)) => {
            Resolved::string(f.deprecation_status.reason().map(ArcStr::as_str))
        }
        ("deprecationReason", &Resolved::EnumValue(v)) => {
            Resolved::string(v.deprecation_status.reason().map(ArcStr::as_str))
        }
        ("locations", &Resolved::Directive(d)) => {
            Resolved::list(&d.locations, |l| Resolved::DirectiveLocation(*l))
        }
        _ => Resolved::Null,
    }
}

/// Resolves `__Schema.types`: every type of the schema, in registration
/// order.
pub fn schema_types<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Schema(s) => Resolved::list(s.type_list(), Resolved::Type),
        _ => Resolved::Null,
    }
}

/// Resolves `__Schema.queryType`.
pub fn schema_query_type<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Schema(s) => Resolved::Type(s.query_type()),
        _ => Resolved::Null,
    }
}

/// Resolves `__Schema.mutationType`, which is `null` for schemas without
/// mutations.
pub fn schema_mutation_type<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Schema(s) => s.mutation_type().map_or(Resolved::Null, Resolved::Type),
        _ => Resolved::Null,
    }
}

/// Resolves `__Schema.subscriptionType`, which is `null` for schemas without
/// subscriptions.
pub fn schema_subscription_type<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Schema(s) => s.subscription_type().map_or(Resolved::Null, Resolved::Type),
        _ => Resolved::Null,
    }
}

/// Resolves `__Schema.directives`.
pub fn schema_directives<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Schema(s) => Resolved::list(s.directives(), Resolved::Directive),
        _ => Resolved::Null,
    }
}

/// Resolves the `__schema` meta field into the schema being executed,
/// regardless of the source.
pub fn schema<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    Resolved::Schema(res.info.schema)
}

/// Resolves the `__type(name:)` meta field, which is `null` for unknown
/// names.
///
/// Only the types registered during schema assembly are looked up: a type
/// its [`TypeLoader`] could provide, but which nothing in the schema
/// references, is unknown here as well.
///
/// [`TypeLoader`]: crate::schema::config::TypeLoader
pub fn type_<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    res.arguments
        .get_str("name")
        .and_then(|name| res.info.schema.type_by_name(name))
        .map_or(Resolved::Null, Resolved::Type)
}

/// Resolves the `__typename` meta field into the name of the concrete type
/// of the object being resolved.
pub fn typename<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    Resolved::string(Some(res.info.parent_type.name()))
}

/// Resolves `__Directive.args`.
pub fn directive_fields<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Directive(d) => Resolved::list(&d.arguments, Resolved::InputValue),
        _ => Resolved::Null,
    }
}

/// Resolves the deprecated `__Directive.onOperation`.
pub fn directive_on_operation<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Directive(d) => Resolved::Boolean(d.on_operation()),
        _ => Resolved::Null,
    }
}

/// Resolves the deprecated `__Directive.onFragment`.
pub fn directive_on_fragment<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Directive(d) => Resolved::Boolean(d.on_fragment()),
        _ => Resolved::Null,
    }
}

/// Resolves the deprecated `__Directive.onField`.
pub fn directive_on_field<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::Directive(d) => Resolved::Boolean(d.on_field()),
        _ => Resolved::Null,
    }
}

/// Resolves `__EnumValue.isDeprecated`.
pub fn enum_value_is_deprecated<'a>(res: &Resolution<'_, 'a>) -> Resolved<'a> {
    match *res.source {
        Resolved::EnumValue(v) => Resolved::Boolean(v.deprecation_status.is_deprecated()),
        _ => Resolved::Null,
    }
}

#[cfg(test)]
mod tests {
    use arcstr::literal;

    use super::{
        FieldInfo, Resolution, Resolved, Resolver, directive_on_field, directive_on_fragment,
        directive_on_operation, enum_value_is_deprecated, property, schema_mutation_type, type_,
    };
    use crate::{
        ast::Type,
        graphql_value,
        schema::{
            config::SchemaConfig,
            meta::{EnumValue, Field, ObjectMeta},
            model::{DirectiveLocation, DirectiveType, SchemaType},
        },
        types::base::Arguments,
    };

    fn schema() -> SchemaType {
        SchemaType::new(&SchemaConfig::new().query(ObjectMeta::new(
            literal!("Query"),
            &[Field::new(literal!("hello"), Type::Named(literal!("String")))],
        )))
        .expect("valid schema")
    }

    fn resolve<'a>(
        resolver: Resolver,
        schema: &'a SchemaType,
        field_name: &'a str,
        source: &Resolved<'a>,
        arguments: &Arguments,
    ) -> Resolved<'a> {
        let info = FieldInfo {
            field_name,
            parent_type: schema.concrete_query_type(),
            schema,
        };
        resolver(&Resolution {
            source,
            arguments,
            context: &(),
            info: &info,
        })
    }

    #[test]
    fn directive_location_projections() {
        let schema = schema();
        let on_query = DirectiveType::new(literal!("q"), &[DirectiveLocation::Query], &[]);
        let on_field = DirectiveType::new(literal!("f"), &[DirectiveLocation::Field], &[]);
        let args = Arguments::default();

        let project = |d: &DirectiveType| {
            [directive_on_operation, directive_on_fragment, directive_on_field].map(|r| {
                resolve(r, &schema, "onField", &Resolved::Directive(d), &args)
                    .leaf_value()
                    .and_then(|v| v.as_boolean_value())
            })
        };

        assert_eq!(project(&on_query), [Some(true), Some(false), Some(false)]);
        assert_eq!(project(&on_field), [Some(false), Some(false), Some(true)]);
    }

    #[test]
    fn unknown_type_resolves_to_null() {
        let schema = schema();
        let args = Arguments::new([("name", graphql_value!("Missing"))], None);

        let resolved = resolve(type_, &schema, "__type", &Resolved::Null, &args);

        assert!(matches!(resolved, Resolved::Null));
    }

    #[test]
    fn absent_mutation_type_resolves_to_null() {
        let schema = schema();
        let args = Arguments::default();

        let resolved = resolve(
            schema_mutation_type,
            &schema,
            "mutationType",
            &Resolved::Schema(&schema),
            &args,
        );

        assert!(matches!(resolved, Resolved::Null));
    }

    #[test]
    fn enum_value_deprecation() {
        let schema = schema();
        let args = Arguments::default();
        let current = EnumValue::new(literal!("NEW"));
        let deprecated = EnumValue::new(literal!("OLD")).deprecated(Some("Use `NEW`."));

        let is_deprecated = |v: &EnumValue| {
            resolve(
                enum_value_is_deprecated,
                &schema,
                "isDeprecated",
                &Resolved::EnumValue(v),
                &args,
            )
            .leaf_value()
        };
        let reason = |v: &EnumValue| {
            resolve(property, &schema, "deprecationReason", &Resolved::EnumValue(v), &args)
                .leaf_value()
        };

        assert_eq!(is_deprecated(&current), Some(graphql_value!(false)));
        assert_eq!(is_deprecated(&deprecated), Some(graphql_value!(true)));
        assert_eq!(reason(&current), Some(graphql_value!(null)));
        assert_eq!(reason(&deprecated), Some(graphql_value!("Use `NEW`.")));
    }

    #[test]
    fn mismatched_source_resolves_to_null() {
        let schema = schema();
        let args = Arguments::default();

        let resolved = resolve(
            directive_on_field,
            &schema,
            "onField",
            &Resolved::Boolean(true),
            &args,
        );

        assert!(matches!(resolved, Resolved::Null));
    }
}
