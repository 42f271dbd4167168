//! Nominal types for a parsed InfluxQL `SELECT` statement.
//!
//! These are produced by the query-language frontend and consumed read-only by the
//! statement compiler.

pub use data_type::*;
pub use expr::*;
pub use operator::*;
pub use statement::*;

mod data_type;
mod expr;
mod operator;
mod statement;
