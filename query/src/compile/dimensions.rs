use std::fmt::{Display, Formatter};

use chrono::Duration;
use tracing::trace;

use influxql_ast::ast::{Dimension, Expr};
use influxql_common::duration::format_duration;
use influxql_common::time::{duration_nanos, time_offset};

use crate::compile::CompiledStatement;
use crate::{CompileError, CompileResult};

/// Time bucketing parameters from `GROUP BY time(duration[, offset])`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Interval {
    pub duration: Duration,
    pub offset: Duration,
}

impl Interval {
    pub fn new(duration: Duration, offset: Duration) -> Self {
        Self { duration, offset }
    }

    /// True when the statement has no time dimension.
    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            duration: Duration::zero(),
            offset: Duration::zero(),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "time({}", format_duration(&self.duration))?;
        if !self.offset.is_zero() {
            write!(f, ", {}", format_duration(&self.offset))?;
        }
        write!(f, ")")
    }
}

fn invalid(msg: &str) -> CompileError {
    CompileError::InvalidDimension(msg.to_string())
}

impl CompiledStatement {
    /// Reads the tag dimensions and the time interval from the `GROUP BY` clause.
    pub(super) fn compile_dimensions(&mut self, dimensions: &[Dimension]) -> CompileResult<()> {
        self.dimensions = Vec::with_capacity(dimensions.len());
        for d in dimensions {
            match &d.expr {
                Expr::VarRef(r) => {
                    if r.name.eq_ignore_ascii_case("time") {
                        return Err(invalid(
                            "time() is a function and expects at least one argument",
                        ));
                    }
                    self.dimensions.push(r.name.clone());
                }
                Expr::Call(call) => {
                    if call.name != "time" {
                        return Err(invalid("only time() calls allowed in dimensions"));
                    }
                    let got = call.args.len();
                    if !(1..=2).contains(&got) {
                        return Err(invalid("time dimension expected 1 or 2 arguments"));
                    }
                    let Expr::Duration(duration) = &call.args[0] else {
                        return Err(invalid("time dimension must have duration argument"));
                    };
                    if !self.interval.is_zero() {
                        return Err(CompileError::MultipleTimeDimensions);
                    }
                    if *duration <= Duration::zero() {
                        return Err(invalid("time dimension must have a positive duration"));
                    }
                    self.interval.duration = *duration;
                    if let Some(offset) = call.args.get(1) {
                        self.interval.offset = self.compile_time_offset(offset, duration)?;
                    }
                    trace!(interval = %self.interval, "time dimension");
                }
                Expr::Wildcard(_) => {
                    return Err(CompileError::Unimplemented(
                        "wildcard dimensions".to_string(),
                    ))
                }
                Expr::Regex(_) => {
                    return Err(CompileError::Unimplemented("regex dimensions".to_string()))
                }
                _ => return Err(invalid("only time and tag dimensions allowed")),
            }
        }
        Ok(())
    }

    fn compile_time_offset(&self, expr: &Expr, interval: &Duration) -> CompileResult<Duration> {
        match expr {
            Expr::Duration(lit) => {
                let lit_ns = duration_nanos(lit)
                    .ok_or_else(|| invalid("time dimension offset is out of range"))?;
                let interval_ns = duration_nanos(interval)
                    .ok_or_else(|| invalid("time dimension duration is out of range"))?;
                Ok(Duration::nanoseconds(lit_ns % interval_ns))
            }
            Expr::Time(t) => time_offset(t, interval)
                .ok_or_else(|| invalid("time dimension offset is out of range")),
            Expr::Call(call) => {
                if call.name != "now" {
                    return Err(invalid("time dimension offset function must be now()"));
                }
                if !call.args.is_empty() {
                    return Err(invalid(
                        "time dimension offset now() function requires no arguments",
                    ));
                }
                time_offset(&self.now, interval)
                    .ok_or_else(|| invalid("time dimension offset is out of range"))
            }
            _ => Err(invalid("time dimension offset must be duration or now()")),
        }
    }
}
