use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ast::Expr;

/// A measurement to read from, either by name or by name pattern.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub database: Option<String>,
    pub retention_policy: Option<String>,
    pub name: String,
    /// Pattern text when the measurement was given as a regular expression.
    pub regex: Option<String>,
}

impl Measurement {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_database<S: Into<String>>(mut self, database: S) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_retention_policy<S: Into<String>>(mut self, rp: S) -> Self {
        self.retention_policy = Some(rp.into());
        self
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (&self.database, &self.retention_policy) {
            (Some(db), Some(rp)) => write!(f, "{}.{}.", db, rp)?,
            (Some(db), None) => write!(f, "{}..", db)?,
            (None, Some(rp)) => write!(f, "{}.", rp)?,
            (None, None) => {}
        }
        match &self.regex {
            Some(re) => write!(f, "/{}/", re),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A data source of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Measurement(Measurement),
    SubQuery(Box<SelectStatement>),
}

impl Source {
    pub fn measurement<S: Into<String>>(name: S) -> Self {
        Source::Measurement(Measurement::new(name))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Source::Measurement(_) => "measurement",
            Source::SubQuery(_) => "subquery",
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Source::Measurement(m) => write!(f, "{}", m),
            Source::SubQuery(stmt) => write!(f, "({})", stmt),
        }
    }
}

/// A selected expression with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl Field {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn with_alias<S: Into<String>>(mut self, alias: S) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the column name of the field: the alias if present, otherwise a name
    /// derived from the expression.
    pub fn name(&self) -> String {
        if let Some(alias) = &self.alias {
            if !alias.is_empty() {
                return alias.clone();
            }
        }
        expr_name(&self.expr)
    }
}

fn expr_name(expr: &Expr) -> String {
    match expr {
        Expr::VarRef(v) => v.name.clone(),
        Expr::Call(c) => c.name.clone(),
        Expr::Distinct(_) => "distinct".to_string(),
        Expr::Paren(inner) => expr_name(inner),
        Expr::Binary(_) => {
            let mut names = Vec::new();
            collect_binary_names(expr, &mut names);
            names.join("_")
        }
        _ => String::new(),
    }
}

fn collect_binary_names(expr: &Expr, names: &mut Vec<String>) {
    match expr {
        Expr::VarRef(v) => names.push(v.name.clone()),
        Expr::Call(c) => names.push(c.name.clone()),
        Expr::Paren(inner) => collect_binary_names(inner, names),
        Expr::Binary(b) => {
            collect_binary_names(&b.lhs, names);
            collect_binary_names(&b.rhs, names);
        }
        _ => {}
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

/// A `GROUP BY` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub expr: Expr,
}

impl Dimension {
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    pub fields: Vec<Field>,
    pub sources: Vec<Source>,
    pub dimensions: Vec<Dimension>,
}

impl SelectStatement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_expr(self, expr: Expr) -> Self {
        self.with_field(Field::new(expr))
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_dimension(mut self, expr: Expr) -> Self {
        self.dimensions.push(Dimension::new(expr));
        self
    }
}

impl Display for SelectStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        write_list(f, &self.fields)?;
        if !self.sources.is_empty() {
            write!(f, " FROM ")?;
            write_list(f, &self.sources)?;
        }
        if !self.dimensions.is_empty() {
            write!(f, " GROUP BY ")?;
            write_list(f, &self.dimensions)?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use crate::ast::{Expr, Operator};

    use super::*;

    #[test_case(Field::new(Expr::var_ref("value")), "value")]
    #[test_case(Field::new(Expr::var_ref("value")).with_alias("v"), "v")]
    #[test_case(Field::new(Expr::call("mean", vec![Expr::var_ref("value")])), "mean")]
    #[test_case(Field::new(Expr::distinct("host")), "distinct")]
    #[test_case(Field::new(Expr::paren(Expr::var_ref("idle"))), "idle")]
    #[test_case(Field::new(Expr::binary(Operator::Add, Expr::var_ref("a"), Expr::var_ref("b"))), "a_b")]
    #[test_case(Field::new(Expr::binary(Operator::Mul, Expr::call("max", vec![Expr::var_ref("a")]), Expr::Integer(2))), "max")]
    #[test_case(Field::new(Expr::Integer(1)), "")]
    fn test_field_name(field: Field, expected: &str) {
        assert_eq!(field.name(), expected);
    }

    #[test]
    fn test_statement_display() {
        let stmt = SelectStatement::new()
            .with_expr(Expr::call("mean", vec![Expr::var_ref("value")]))
            .with_field(Field::new(Expr::var_ref("host")).with_alias("h"))
            .with_source(Source::measurement("cpu"))
            .with_source(Source::Measurement(
                Measurement::new("mem")
                    .with_database("db0")
                    .with_retention_policy("rp0"),
            ))
            .with_dimension(Expr::call("time", vec![Expr::from(Duration::minutes(1))]));

        assert_eq!(
            stmt.to_string(),
            "SELECT mean(value), host AS h FROM cpu, db0.rp0.mem GROUP BY time(1m)"
        );
    }

    #[test]
    fn test_source_kind() {
        let sub = Source::SubQuery(Box::new(SelectStatement::new()));
        assert_eq!(sub.kind(), "subquery");
        assert_eq!(Source::measurement("cpu").kind(), "measurement");
    }
}
