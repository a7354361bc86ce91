#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[doc(hidden)]
#[macro_use]
pub mod macros;
pub mod ast;
pub mod introspection;
pub mod schema;
pub mod types;
mod value;

#[cfg(test)]
mod tests;

// Required by the `__juniper_trace_*` macros.
#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;

pub use crate::{
    ast::{InputValue, Type, ast_from_value, value_from_ast},
    introspection::{
        FieldDescriptor, INTROSPECTION_QUERY, INTROSPECTION_QUERY_WITHOUT_DESCRIPTIONS,
        IntrospectionOptions, MetaSchema, introspection_query, is_introspection_type,
        resolvers::{Context, FieldInfo, Resolution, Resolved, Resolver},
    },
    schema::{
        config::{ConfigValue, SchemaConfig, SchemaConfigError, SchemaOptions},
        meta,
        model::{DirectiveLocation, DirectiveType, SchemaError, SchemaType, TypeType},
    },
    types::base::{Arguments, TypeKind},
    value::{DefaultScalarValue, Object, Value},
};

static_assertions::assert_impl_all!(MetaSchema: Send, Sync);
static_assertions::assert_impl_all!(SchemaType: Send, Sync);
static_assertions::assert_impl_all!(SchemaConfig: Send, Sync);
