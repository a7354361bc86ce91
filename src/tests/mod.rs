//! Library tests and fixtures.

mod introspection_tests;
