//! Schema model, its configuration and the type metadata it is made of.

pub mod config;
pub mod legacy;
pub mod meta;
pub mod model;
