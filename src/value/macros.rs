/// Constructs [`Value`]s by using JSON syntax.
///
/// Elements and values must be single tokens, so negative numbers and other
/// compound expressions have to be parenthesized.
///
/// # Example
///
/// ```rust
/// # use juniper_introspection::{graphql_value, Value};
/// #
/// # let _: Value =
/// graphql_value!(null);
/// # let _: Value =
/// graphql_value!(1234);
/// # let _: Value =
/// graphql_value!("test");
/// # let _: Value =
/// graphql_value!([1234, "test", true, (-1)]);
/// # let _: Value =
/// graphql_value!({"key": "value", "foo": 1234});
/// ```
///
/// [`Value`]: crate::Value
#[macro_export]
macro_rules! graphql_value {
    (null) => ($crate::Value::null());

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::list(vec![ $( $crate::graphql_value!($elem) ),* ])
    };

    ({}) => ($crate::Value::object($crate::Object::with_capacity(0)));

    ({ $($key:literal : $value:tt),+ $(,)? }) => {
        $crate::Value::object(
            [ $( ($key, $crate::graphql_value!($value)) ),+ ]
                .into_iter()
                .collect::<$crate::Object>(),
        )
    };

    ($e:expr) => ($crate::Value::from($e));
}

#[cfg(test)]
mod tests {
    use crate::{Object, Value};

    #[test]
    fn value_macro_scalars() {
        assert_eq!(graphql_value!("test"), Value::scalar("test"));
        assert_eq!(graphql_value!(123), Value::scalar(123));
        assert_eq!(graphql_value!(123.5), Value::scalar(123.5));
        assert_eq!(graphql_value!(false), Value::scalar(false));
        assert_eq!(graphql_value!((-7)), Value::scalar(-7));
    }

    #[test]
    fn value_macro_list() {
        assert_eq!(graphql_value!([]), Value::list(vec![]));
        assert_eq!(
            graphql_value!([1, null, [2]]),
            Value::list(vec![
                Value::scalar(1),
                Value::null(),
                Value::list(vec![Value::scalar(2)]),
            ]),
        );
    }

    #[test]
    fn value_macro_object() {
        assert_eq!(graphql_value!({}), Value::object(Object::with_capacity(0)));
        assert_eq!(
            graphql_value!({"key": 123, "next": {"inner": null}}),
            Value::object(
                [
                    ("key", Value::scalar(123)),
                    (
                        "next",
                        Value::object([("inner", Value::null())].into_iter().collect()),
                    ),
                ]
                .into_iter()
                .collect(),
            ),
        );
    }
}
