use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use influxql_common::duration::format_duration;

use crate::ast::{DataType, Operator};

pub type BExpr = Box<Expr>;

/// A reference to a field or tag, optionally with an explicit type (`value::float`).
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct VarRef {
    pub name: String,
    pub data_type: DataType,
}

impl VarRef {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Unknown,
        }
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

impl Display for VarRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.name)?;
        if self.data_type != DataType::Unknown {
            write!(f, "::{}", self.data_type)?;
        }
        Ok(())
    }
}

/// A function call, e.g. `mean(value)` or `top(value, host, 3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Call {
    pub fn new<S: Into<String>>(name: S, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// The keyword form of distinct: `SELECT DISTINCT value`.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct Distinct {
    pub name: String,
}

impl Distinct {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }

    /// Returns the equivalent `distinct(name)` call.
    pub fn to_call(&self) -> Call {
        Call::new("distinct", vec![Expr::VarRef(VarRef::new(self.name.as_str()))])
    }
}

impl Display for Distinct {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DISTINCT ")?;
        write_ident(f, &self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: Operator,
    pub lhs: BExpr,
    pub rhs: BExpr,
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// Which columns a wildcard selects.
#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildcardKind {
    #[default]
    All,
    Fields,
    Tags,
}

#[derive(Debug, Default, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Wildcard {
    pub kind: WildcardKind,
}

impl Display for Wildcard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            WildcardKind::All => write!(f, "*"),
            WildcardKind::Fields => write!(f, "*::field"),
            WildcardKind::Tags => write!(f, "*::tag"),
        }
    }
}

/// A regular expression literal such as `/^cpu/`.
#[derive(Debug, Clone)]
pub struct RegexLiteral(pub Regex);

impl RegexLiteral {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(RegexLiteral)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.0.is_match(s)
    }
}

impl PartialEq for RegexLiteral {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Eq for RegexLiteral {}

impl Hash for RegexLiteral {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_str().hash(state)
    }
}

impl Display for RegexLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.0.as_str().replace('/', "\\/"))
    }
}

/// An expression node of a parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    VarRef(VarRef),
    Call(Call),
    Distinct(Distinct),
    Binary(BinaryExpr),
    Paren(BExpr),
    Wildcard(Wildcard),
    Regex(RegexLiteral),
    Integer(i64),
    Number(f64),
    String(String),
    Boolean(bool),
    Duration(Duration),
    Time(DateTime<Utc>),
}

impl Expr {
    pub fn var_ref<S: Into<String>>(name: S) -> Self {
        Expr::VarRef(VarRef::new(name))
    }

    pub fn call<S: Into<String>>(name: S, args: Vec<Expr>) -> Self {
        Expr::Call(Call::new(name, args))
    }

    pub fn distinct<S: Into<String>>(name: S) -> Self {
        Expr::Distinct(Distinct::new(name))
    }

    pub fn binary(op: Operator, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn paren(expr: Expr) -> Self {
        Expr::Paren(Box::new(expr))
    }

    pub fn wildcard() -> Self {
        Expr::Wildcard(Wildcard::default())
    }

    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        RegexLiteral::new(pattern).map(Expr::Regex)
    }

    /// Returns true for value literals. Regular expressions are not value literals: they
    /// select columns and are handled like wildcards.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expr::Integer(_)
                | Expr::Number(_)
                | Expr::String(_)
                | Expr::Boolean(_)
                | Expr::Duration(_)
                | Expr::Time(_)
        )
    }

    pub fn is_var_ref(&self) -> bool {
        matches!(self, Expr::VarRef(_))
    }

    /// Strips any enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(inner) = expr {
            expr = inner.as_ref();
        }
        expr
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::VarRef(v) => write!(f, "{}", v),
            Expr::Call(c) => write!(f, "{}", c),
            Expr::Distinct(d) => write!(f, "{}", d),
            Expr::Binary(b) => write!(f, "{}", b),
            Expr::Paren(e) => write!(f, "({})", e),
            Expr::Wildcard(w) => write!(f, "{}", w),
            Expr::Regex(r) => write!(f, "{}", r),
            Expr::Integer(i) => write!(f, "{}", i),
            Expr::Number(n) => write!(f, "{}", n),
            Expr::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Expr::Boolean(b) => write!(f, "{}", b),
            Expr::Duration(d) => write!(f, "{}", format_duration(d)),
            Expr::Time(t) => write!(f, "'{}'", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<i64> for Expr {
    fn from(i: i64) -> Self {
        Expr::Integer(i)
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Number(n)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Boolean(b)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::String(s.to_string())
    }
}

impl From<Duration> for Expr {
    fn from(d: Duration) -> Self {
        Expr::Duration(d)
    }
}

impl From<DateTime<Utc>> for Expr {
    fn from(t: DateTime<Utc>) -> Self {
        Expr::Time(t)
    }
}

impl From<VarRef> for Expr {
    fn from(v: VarRef) -> Self {
        Expr::VarRef(v)
    }
}

impl From<Call> for Expr {
    fn from(c: Call) -> Self {
        Expr::Call(c)
    }
}

fn write_ident(f: &mut Formatter<'_>, ident: &str) -> fmt::Result {
    let plain = !ident.is_empty()
        && ident
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        write!(f, "{}", ident)
    } else {
        write!(f, "\"{}\"", ident.replace('"', "\\\""))
    }
}
