use ahash::AHashSet;

use influxql_ast::ast::{DataType, RegexLiteral};

/// Filters recorded for a field containing a wildcard or regex. The expansion into
/// concrete columns happens later, once the column types are known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WildcardDescriptor {
    /// Columns must match at least one of these. Empty means any name.
    name_filters: Vec<RegexLiteral>,
    /// Value types the expansion must skip because a function cannot consume them.
    type_filters: AHashSet<DataType>,
}

impl WildcardDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_filters(&self) -> &[RegexLiteral] {
        &self.name_filters
    }

    pub fn type_filters(&self) -> &AHashSet<DataType> {
        &self.type_filters
    }

    pub(crate) fn add_name_filter(&mut self, filter: RegexLiteral) {
        self.name_filters.push(filter);
    }

    pub(crate) fn exclude_type(&mut self, data_type: DataType) {
        self.type_filters.insert(data_type);
    }

    /// Reports whether a column with the given name and type is selected.
    pub fn matches(&self, name: &str, data_type: DataType) -> bool {
        if self.type_filters.contains(&data_type) {
            return false;
        }
        self.name_filters.is_empty() || self.name_filters.iter().any(|re| re.is_match(name))
    }
}
