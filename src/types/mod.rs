//! Building blocks shared by the type system and its resolvers.

pub mod base;
