#![forbid(unsafe_code)]
extern crate chrono;
extern crate regex;
extern crate serde;

pub mod ast;

pub mod prelude {
    pub use crate::ast::*;
}
