//! Generate the registration code that exposes a native engine's utility
//! functions and global enums to an embedded Lua state.
//!
//! Pipeline: [`schema`] → [`policy`] → [`classify`] → [`codegen`] → [`output`],
//! wired together in [`pipeline`]. Enums skip policy and classification.
pub mod error;
pub mod path_de;
pub mod schema;
pub mod ir;
pub mod policy;
pub mod classify;
pub mod lower;
pub mod profile;
pub mod codegen;
pub mod output;
pub mod embed;
pub mod config;
pub mod pipeline;

pub use error::{GenError, SchemaError, Stage};
