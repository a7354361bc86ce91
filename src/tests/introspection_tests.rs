use std::collections::HashSet;

use arcstr::{ArcStr, literal};
use pretty_assertions::assert_eq;

use super::{
    executor::{execute, parse_literal},
    schema::schema,
};
use crate::{
    ast::{Type, ast_from_value, value_from_ast},
    graphql_value,
    introspection::{INTROSPECTION_QUERY, INTROSPECTION_QUERY_WITHOUT_DESCRIPTIONS},
    schema::{
        config::SchemaConfig,
        meta::{Argument, Field, InputObjectMeta, MetaType, ObjectMeta, ScalarMeta},
        model::SchemaType,
    },
    types::base::TypeKind,
    value::Value,
};

fn field<'v>(value: &'v Value, name: &str) -> &'v Value {
    value
        .as_object_value()
        .and_then(|o| o.get_field_value(name))
        .unwrap_or_else(|| panic!("no `{name}` field in {value:?}"))
}

fn list(value: &Value) -> &[Value] {
    value.as_list_value().expect("list value")
}

fn str_field<'v>(value: &'v Value, name: &str) -> &'v str {
    field(value, name).as_string_value().expect("string value")
}

fn names(value: &Value) -> Vec<&str> {
    list(value).iter().map(|v| str_field(v, "name")).collect()
}

#[test]
fn test_introspection_query_type_name() {
    let schema = schema();

    assert_eq!(
        execute(
            r#"
            query IntrospectionQueryTypeQuery {
              __schema {
                queryType {
                  name
                }
                mutationType {
                  name
                }
                subscriptionType {
                  name
                }
              }
            }"#,
            &schema,
        ),
        graphql_value!({
            "__schema": {
                "queryType": {"name": "Query"},
                "mutationType": {"name": "Mutation"},
                "subscriptionType": null,
            },
        }),
    );
}

#[test]
fn test_introspection_type_name() {
    let schema = schema();

    assert_eq!(
        execute(
            r#"
            {
              __typename
              droid: __type(name: "Droid") {
                __typename
                name
                kind
                description
              }
              missing: __type(name: "Wookiee") {
                name
              }
            }"#,
            &schema,
        ),
        graphql_value!({
            "__typename": "Query",
            "droid": {
                "__typename": "__Type",
                "name": "Droid",
                "kind": "OBJECT",
                "description": "A mechanical creature in the Star Wars universe.",
            },
            "missing": null,
        }),
    );
}

#[test]
fn test_introspection_type_not_loaded_when_unreferenced() {
    let schema = schema();

    assert_eq!(
        execute(
            r#"
            {
              starship: __type(name: "Starship") {
                name
              }
              review: __type(name: "Review") {
                name
              }
            }"#,
            &schema,
        ),
        graphql_value!({
            "starship": null,
            "review": {"name": "Review"},
        }),
    );
}

#[test]
fn test_introspection_possible_types() {
    let schema = schema();

    let result = execute(
        r#"
        {
          character: __type(name: "Character") {
            kind
            possibleTypes { name }
          }
          search: __type(name: "SearchResult") {
            kind
            possibleTypes { name }
          }
          human: __type(name: "Human") {
            interfaces { name }
            possibleTypes { name }
          }
        }"#,
        &schema,
    );

    assert_eq!(
        result,
        graphql_value!({
            "character": {
                "kind": "INTERFACE",
                "possibleTypes": [{"name": "Human"}, {"name": "Droid"}],
            },
            "search": {
                "kind": "UNION",
                "possibleTypes": [{"name": "Droid"}, {"name": "Human"}],
            },
            "human": {
                "interfaces": [{"name": "Character"}],
                "possibleTypes": null,
            },
        }),
    );
}

#[test]
fn test_introspection_deprecation_filtering() {
    let schema = schema();

    let result = execute(
        r#"
        {
          human: __type(name: "Human") {
            current: fields { name }
            all: fields(includeDeprecated: true) {
              name
              isDeprecated
              deprecationReason
            }
          }
          episode: __type(name: "Episode") {
            current: enumValues { name }
            explicit: enumValues(includeDeprecated: false) { name }
            all: enumValues(includeDeprecated: true) {
              name
              isDeprecated
              deprecationReason
            }
          }
        }"#,
        &schema,
    );

    let human = field(&result, "human");
    assert_eq!(
        names(field(human, "current")),
        ["id", "name", "friends", "appearsIn", "homePlanet", "height"],
    );
    let all = list(field(human, "all"));
    assert_eq!(all.len(), 7);
    assert_eq!(
        all[6],
        graphql_value!({
            "name": "mass",
            "isDeprecated": true,
            "deprecationReason": "Use `weight`.",
        }),
    );
    assert_eq!(field(&all[0], "isDeprecated"), &graphql_value!(false));
    assert_eq!(field(&all[0], "deprecationReason"), &graphql_value!(null));

    let episode = field(&result, "episode");
    assert_eq!(names(field(episode, "current")), ["NEW_HOPE", "EMPIRE", "JEDI"]);
    assert_eq!(names(field(episode, "explicit")), ["NEW_HOPE", "EMPIRE", "JEDI"]);
    assert_eq!(
        list(field(episode, "all"))[3],
        graphql_value!({
            "name": "HOLIDAY_SPECIAL",
            "isDeprecated": true,
            "deprecationReason": "Never released.",
        }),
    );
}

#[test]
fn test_introspection_inapplicable_fields_are_null() {
    let schema = schema();

    assert_eq!(
        execute(
            r#"
            {
              __type(name: "Episode") {
                fields { name }
                interfaces { name }
                possibleTypes { name }
                inputFields { name }
                ofType { name }
              }
            }"#,
            &schema,
        ),
        graphql_value!({
            "__type": {
                "fields": null,
                "interfaces": null,
                "possibleTypes": null,
                "inputFields": null,
                "ofType": null,
            },
        }),
    );
}

#[test]
fn test_introspection_wrapping_types() {
    let schema = schema();

    let result = execute(
        r#"
        {
          __type(name: "Query") {
            fields {
              name
              type {
                kind
                name
                ofType {
                  kind
                  name
                  ofType {
                    kind
                    name
                    ofType { kind name }
                  }
                }
              }
            }
          }
        }"#,
        &schema,
    );

    let search = list(field(field(&result, "__type"), "fields"))
        .iter()
        .find(|f| str_field(f, "name") == "search")
        .expect("`search` field");
    assert_eq!(
        field(search, "type"),
        &graphql_value!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": {"kind": "UNION", "name": "SearchResult"},
                },
            },
        }),
    );
}

#[test]
fn test_introspection_directives() {
    let schema = schema();

    let result = execute(
        r#"
        {
          __schema {
            directives {
              name
              locations
              onOperation
              onFragment
              onField
              args { name defaultValue type { kind } }
            }
          }
        }"#,
        &schema,
    );

    assert_eq!(
        field(field(&result, "__schema"), "directives"),
        &graphql_value!([
            {
                "name": "include",
                "locations": ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"],
                "onOperation": false,
                "onFragment": true,
                "onField": true,
                "args": [{"name": "if", "defaultValue": null, "type": {"kind": "NON_NULL"}}],
            },
            {
                "name": "skip",
                "locations": ["FIELD", "FRAGMENT_SPREAD", "INLINE_FRAGMENT"],
                "onOperation": false,
                "onFragment": true,
                "onField": true,
                "args": [{"name": "if", "defaultValue": null, "type": {"kind": "NON_NULL"}}],
            },
            {
                "name": "deprecated",
                "locations": ["FIELD_DEFINITION", "ENUM_VALUE"],
                "onOperation": false,
                "onFragment": false,
                "onField": false,
                "args": [{
                    "name": "reason",
                    "defaultValue": "\"No longer supported\"",
                    "type": {"kind": "SCALAR"},
                }],
            },
        ]),
    );
}

#[test]
fn test_introspection_directive_legacy_fields_are_deprecated() {
    let schema = schema();

    let result = execute(
        r#"
        {
          __type(name: "__Directive") {
            current: fields { name }
            all: fields(includeDeprecated: true) { name deprecationReason }
          }
        }"#,
        &schema,
    );

    let ty = field(&result, "__type");
    assert_eq!(
        names(field(ty, "current")),
        ["name", "description", "locations", "args"],
    );
    let all = list(field(ty, "all"));
    assert_eq!(all.len(), 7);
    for legacy in &all[4..] {
        assert_eq!(str_field(legacy, "deprecationReason"), "Use `locations`.");
    }
}

#[test]
fn test_introspection_default_values() {
    let schema = schema();

    let result = execute(
        r#"
        {
          query: __type(name: "Query") {
            fields { name args { name defaultValue } }
          }
          mutation: __type(name: "Mutation") {
            fields { name args { name defaultValue } }
          }
          input: __type(name: "ReviewInput") {
            inputFields { name defaultValue }
          }
        }"#,
        &schema,
    );

    let args_of = |ty: &str, field_name: &str| {
        list(field(field(&result, ty), "fields"))
            .iter()
            .find(|f| str_field(f, "name") == field_name)
            .map(|f| field(f, "args").clone())
            .expect("field exists")
    };

    assert_eq!(
        args_of("query", "search"),
        graphql_value!([
            {"name": "text", "defaultValue": null},
            {"name": "limit", "defaultValue": "10"},
            {"name": "offset", "defaultValue": "0"},
        ]),
    );
    assert_eq!(
        args_of("query", "droid"),
        graphql_value!([{"name": "id", "defaultValue": "2001"}]),
    );
    assert_eq!(
        args_of("query", "hero"),
        graphql_value!([{"name": "episode", "defaultValue": "NEW_HOPE"}]),
    );
    assert_eq!(
        list(&args_of("mutation", "createReview"))[1],
        graphql_value!({
            "name": "review",
            "defaultValue": r#"{stars: 5, commentary: "great", episodes: [NEW_HOPE, JEDI]}"#,
        }),
    );
    assert_eq!(
        field(field(&result, "input"), "inputFields"),
        &graphql_value!([
            {"name": "stars", "defaultValue": null},
            {"name": "commentary", "defaultValue": r#""Well \"balanced\"\n""#},
            {"name": "episodes", "defaultValue": "[JEDI]"},
        ]),
    );
}

#[test]
fn test_introspection_default_values_round_trip() {
    let schema = schema();

    let args = schema.types().flat_map(|t| {
        let of_fields = t
            .fields()
            .into_iter()
            .flatten()
            .flat_map(|f| f.arguments.iter().flatten());
        let of_input: &[Argument] = match t {
            MetaType::InputObject(i) => &i.input_fields,
            _ => &[],
        };
        of_fields.chain(of_input)
    });

    let mut checked = 0;
    for arg in args {
        if arg.default_value.is_some() {
            assert_default_round_trips(arg, &schema);
            checked += 1;
        }
    }
    // Including `includeDeprecated` of `__Type.fields` and `__Type.enumValues`.
    assert_eq!(checked, 10);
}

/// Prints the default value of the `arg`, re-parses it, and checks that the
/// same value is read back. Returns the printed literal.
fn assert_default_round_trips(arg: &Argument, schema: &SchemaType) -> String {
    let default = arg.default_value.as_ref().expect("default value");
    let ty = schema.make_type(&arg.arg_type).expect("known type");
    let printed = ast_from_value(default, &ty, schema)
        .expect("representable default")
        .to_string();

    let reparsed = value_from_ast(&parse_literal(&printed), &ty, schema);

    assert_eq!(reparsed.as_ref(), Some(default), "`{}` printed as `{printed}`", arg.name);
    printed
}

#[test]
fn test_introspection_default_values_round_trip_edge_cases() {
    let filter = InputObjectMeta::new(
        literal!("Filter"),
        &[
            Argument::new(literal!("limit"), Type::Named(literal!("Int"))).default_value(10),
            Argument::new(literal!("text"), Type::NonNullNamed(literal!("String"))),
        ],
    );
    let arg = |name: ArcStr, ty: ArcStr| Argument::new(name, Type::Named(ty));
    let args = [
        arg(literal!("ratio"), literal!("Float")).default_value(1.5),
        arg(literal!("distance"), literal!("Float")).default_value(3_000_000_000.0),
        arg(literal!("whole"), literal!("Float")).default_value(2.0),
        arg(literal!("id"), literal!("ID")).default_value("7"),
        arg(literal!("code"), literal!("ID")).default_value("007"),
        arg(literal!("negative"), literal!("ID")).default_value("-0"),
        arg(literal!("note"), literal!("String")).default_value(Value::Null),
        arg(literal!("since"), literal!("DateTime")).default_value("2024-05-04"),
        arg(literal!("epoch"), literal!("DateTime")).default_value(0),
        arg(literal!("filter"), literal!("Filter")).default_value(graphql_value!({"text": "r2"})),
    ];
    let query = args
        .iter()
        .cloned()
        .fold(Field::new(literal!("search"), Type::Named(literal!("String"))), Field::argument);
    let schema = SchemaType::new(
        &SchemaConfig::new()
            .query(ObjectMeta::new(literal!("Query"), &[query]))
            .types(vec![
                ScalarMeta::new(literal!("DateTime")).into_meta(),
                filter.into_meta(),
            ]),
    )
    .expect("valid schema");

    let printed = args
        .iter()
        .map(|arg| assert_default_round_trips(arg, &schema))
        .collect::<Vec<_>>();
    assert_eq!(
        printed,
        [
            "1.5",
            "3000000000.0",
            "2",
            "7",
            r#""007""#,
            r#""-0""#,
            "null",
            r#""2024-05-04""#,
            "0",
            r#"{text: "r2"}"#,
        ],
    );

    // A literal missing a required field is rejected rather than completed.
    let filter_ty = schema
        .make_type(&Type::Named(literal!("Filter")))
        .expect("known type");
    assert_eq!(value_from_ast(&parse_literal("{limit: 1}"), &filter_ty, &schema), None);
}

#[test]
fn test_introspection_query_full() {
    let schema = schema();

    let result = execute(INTROSPECTION_QUERY, &schema);

    let schema_value = field(&result, "__schema");
    assert_eq!(str_field(field(schema_value, "queryType"), "name"), "Query");
    let types = list(field(schema_value, "types"));
    assert_eq!(
        names(field(schema_value, "types")),
        [
            "String",
            "Boolean",
            "Int",
            "Float",
            "ID",
            "__Schema",
            "__Type",
            "__Directive",
            "__Field",
            "__InputValue",
            "__EnumValue",
            "__TypeKind",
            "__DirectiveLocation",
            "Query",
            "Mutation",
            "Character",
            "Human",
            "Droid",
            "SearchResult",
            "Episode",
            "ReviewInput",
            "Review",
            "LengthUnit",
        ],
    );

    let kinds = TypeKind::ALL.map(|k| k.to_string());
    for (ty, meta) in types.iter().zip(schema.types()) {
        let kind = str_field(ty, "kind");
        assert!(kinds.iter().any(|k| k == kind));
        assert_eq!(kind, meta.type_kind().to_string());
        assert_eq!(
            field(ty, "fields").is_null(),
            !matches!(kind, "OBJECT" | "INTERFACE"),
            "`fields` of {}",
            meta.name(),
        );
        assert_eq!(field(ty, "enumValues").is_null(), kind != "ENUM");
        assert_eq!(field(ty, "inputFields").is_null(), kind != "INPUT_OBJECT");
        assert_eq!(
            field(ty, "possibleTypes").is_null(),
            !matches!(kind, "INTERFACE" | "UNION"),
        );
    }

    let type_kind = types
        .iter()
        .find(|t| str_field(t, "name") == "__TypeKind")
        .expect("`__TypeKind` type");
    assert_eq!(
        names(field(type_kind, "enumValues")),
        [
            "SCALAR",
            "OBJECT",
            "INTERFACE",
            "UNION",
            "ENUM",
            "INPUT_OBJECT",
            "LIST",
            "NON_NULL",
        ],
    );
}

#[test]
fn test_introspection_query_without_descriptions() {
    let schema = schema();

    fn keys(value: &Value, acc: &mut HashSet<String>) {
        match value {
            Value::Object(o) => {
                for (k, v) in o.iter() {
                    acc.insert(k.clone());
                    keys(v, acc);
                }
            }
            Value::List(l) => l.iter().for_each(|v| keys(v, acc)),
            Value::Null | Value::Scalar(_) => {}
        }
    }

    let mut with = HashSet::new();
    keys(&execute(INTROSPECTION_QUERY, &schema), &mut with);
    let mut without = HashSet::new();
    keys(
        &execute(INTROSPECTION_QUERY_WITHOUT_DESCRIPTIONS, &schema),
        &mut without,
    );

    assert!(with.contains("description"));
    assert!(!without.contains("description"));
    assert_eq!(
        with.difference(&without).collect::<Vec<_>>(),
        [&"description".to_owned()],
    );
}
