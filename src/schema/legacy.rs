//! Deprecated ways of configuring a schema, adapted onto the current ones.

use std::sync::Arc;

use crate::schema::{config::TypeLoader, meta::MetaType};

/// Strategy of resolving types by their names.
///
/// Superseded by a plain [`TypeLoader`] function: providing one logs a
/// deprecation warning.
pub trait TypeResolution: Send + Sync {
    /// Resolves the type of the given `name`, if there is one.
    fn resolve_type(&self, name: &str) -> Option<MetaType>;
}

pub(crate) fn into_type_loader(strategy: Arc<dyn TypeResolution>) -> TypeLoader {
    Arc::new(move |name: &str| strategy.resolve_type(name))
}

#[cfg(test)]
mod tests {
    use arcstr::literal;

    use super::TypeResolution;
    use crate::{
        ast::Type,
        schema::{
            config::{ConfigValue, SchemaConfig, SchemaOptions},
            meta::{Field, MetaType, ObjectMeta, ScalarMeta},
            model::SchemaType,
        },
    };

    struct Scalars;

    impl TypeResolution for Scalars {
        fn resolve_type(&self, name: &str) -> Option<MetaType> {
            (name == "Date").then(|| ScalarMeta::new(literal!("Date")).into_meta())
        }
    }

    fn query() -> ObjectMeta {
        ObjectMeta::new(
            literal!("Query"),
            &[Field::new(literal!("today"), Type::NonNullNamed(literal!("Date")))],
        )
    }

    #[test]
    fn adapts_into_type_loader() {
        let config = SchemaConfig::create(SchemaOptions {
            query: Some(query().into()),
            type_resolution: Some(ConfigValue::type_resolution(Scalars)),
            ..SchemaOptions::default()
        })
        .expect("valid options");

        let load = config.get_type_loader().expect("adapted loader");
        assert!(load("Date").is_some());
        assert!(load("Time").is_none());

        let schema = SchemaType::new(&config).expect("valid schema");
        assert!(schema.concrete_type_by_name("Date").is_some());
    }

    #[test]
    fn explicit_type_loader_takes_precedence() {
        let config = SchemaConfig::create(SchemaOptions {
            query: Some(query().into()),
            type_resolution: Some(ConfigValue::type_resolution(Scalars)),
            type_loader: Some(ConfigValue::type_loader(|_| None)),
            ..SchemaOptions::default()
        })
        .expect("valid options");

        let load = config.get_type_loader().expect("explicit loader");
        assert!(load("Date").is_none());
    }

    #[test]
    fn ignores_other_values() {
        let config = SchemaConfig::create(SchemaOptions {
            type_resolution: Some(true.into()),
            ..SchemaOptions::default()
        })
        .expect("valid options");

        assert!(config.get_type_loader().is_none());
    }
}
