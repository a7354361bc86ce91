//! Schema introspection: the meta-schema describing every schema, and the
//! canonical query clients fetch it with.

mod providers;
mod registry;
pub mod resolvers;

use crate::schema::meta::MetaType;

pub use self::registry::{FieldDescriptor, FieldMap, IntrospectionType, LazyFields, MetaSchema};

/// The desired GraphQL introspection format for the canonical query
/// (<https://github.com/graphql/graphql-js/blob/v16.8.1/src/utilities/getIntrospectionQuery.ts>).
pub const INTROSPECTION_QUERY: &str = include_str!("./query.graphql");

/// The desired GraphQL introspection format for the canonical query without
/// descriptions (<https://github.com/graphql/graphql-js/blob/v16.8.1/src/utilities/getIntrospectionQuery.ts>).
pub const INTROSPECTION_QUERY_WITHOUT_DESCRIPTIONS: &str =
    include_str!("./query_without_descriptions.graphql");

/// Names of the types the introspection system reserves.
pub const INTROSPECTION_TYPE_NAMES: [&str; 8] = [
    "__Schema",
    "__Type",
    "__Directive",
    "__Field",
    "__InputValue",
    "__EnumValue",
    "__TypeKind",
    "__DirectiveLocation",
];

/// Options of the [`introspection_query()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntrospectionOptions {
    /// Whether to select descriptions of types, fields, arguments, enum
    /// values and directives.
    pub descriptions: bool,
}

impl Default for IntrospectionOptions {
    fn default() -> Self {
        Self { descriptions: true }
    }
}

/// Returns the canonical introspection query text.
pub fn introspection_query(options: IntrospectionOptions) -> &'static str {
    if options.descriptions {
        INTROSPECTION_QUERY
    } else {
        INTROSPECTION_QUERY_WITHOUT_DESCRIPTIONS
    }
}

/// Indicates whether the provided type is one of the introspection types.
pub fn is_introspection_type(ty: &MetaType) -> bool {
    is_introspection_type_name(ty.name())
}

/// Indicates whether the provided name is the exact name of one of the
/// introspection types.
pub fn is_introspection_type_name(name: &str) -> bool {
    INTROSPECTION_TYPE_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use arcstr::literal;

    use super::{
        INTROSPECTION_TYPE_NAMES, IntrospectionOptions, MetaSchema, introspection_query,
        is_introspection_type, is_introspection_type_name,
    };
    use crate::schema::meta::ScalarMeta;

    fn count_descriptions(query: &str) -> usize {
        query
            .lines()
            .filter(|l| l.trim() == "description")
            .count()
    }

    #[test]
    fn query_with_descriptions_by_default() {
        let query = introspection_query(IntrospectionOptions::default());

        assert_eq!(count_descriptions(query), 5);
        assert_eq!(query.matches("ofType").count(), 7);
    }

    #[test]
    fn query_without_descriptions() {
        let query = introspection_query(IntrospectionOptions {
            descriptions: false,
        });

        assert_eq!(count_descriptions(query), 0);
        assert!(!query.contains("description"));
        assert_eq!(query.matches("ofType").count(), 7);
    }

    #[test]
    fn queries_parse() {
        for descriptions in [true, false] {
            let query = introspection_query(IntrospectionOptions { descriptions });
            graphql_parser::parse_query::<&str>(query).expect("valid query");
        }
    }

    #[test]
    fn recognizes_introspection_types() {
        assert!(is_introspection_type_name("__Type"));
        assert!(!is_introspection_type_name("__TypeX"));
        assert!(!is_introspection_type_name("__type"));
        assert!(!is_introspection_type_name("Type"));

        for ty in MetaSchema::global().types().values() {
            assert!(is_introspection_type(ty.as_meta_type()));
        }
        assert!(!is_introspection_type(
            &ScalarMeta::new(literal!("__Scalar")).into_meta(),
        ));
        assert_eq!(MetaSchema::global().types().len(), INTROSPECTION_TYPE_NAMES.len());
    }
}
