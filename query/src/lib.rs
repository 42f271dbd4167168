#![forbid(unsafe_code)]
extern crate ahash;
extern crate chrono;
extern crate phf;
extern crate serde;
extern crate thiserror;

mod error;
mod plan;

pub mod compile;
pub mod graph;

pub use compile::{compile, CompileOptions, CompiledField, CompiledStatement, Interval};
pub use error::*;
pub use plan::*;

pub mod prelude {
    pub use crate::compile::*;
    pub use crate::error::*;
    pub use crate::graph::*;
    pub use crate::plan::*;
}
