use phf::phf_set;

use influxql_ast::ast::DataType;

/// Functions whose result is a point taken from the input. These may be combined with
/// auxiliary fields. `top` and `bottom` are tracked separately.
static SELECTOR_FUNCTIONS: phf::Set<&'static str> = phf_set! {
    "max",
    "min",
    "first",
    "last",
    "percentile",
    "sample",
};

/// Functions that read strings but skip booleans when applied to a wildcard.
static BOOLEAN_EXCLUDING_FUNCTIONS: phf::Set<&'static str> = phf_set! {
    "count",
    "first",
    "last",
    "distinct",
    "elapsed",
    "mode",
    "sample",
};

pub fn is_selector_function(name: &str) -> bool {
    SELECTOR_FUNCTIONS.contains(name)
}

pub fn is_top_bottom_function(name: &str) -> bool {
    matches!(name, "top" | "bottom")
}

/// Returns the value type a wildcard argument of `name` must not expand to.
pub(super) fn wildcard_type_exclusion(name: &str) -> Option<DataType> {
    match name {
        "min" | "max" => None,
        _ if BOOLEAN_EXCLUDING_FUNCTIONS.contains(name) => Some(DataType::Boolean),
        _ => Some(DataType::String),
    }
}

/// Number of arguments a generic (non top/bottom, non distinct) function takes.
pub(super) fn expected_arg_count(name: &str) -> usize {
    match name {
        "percentile" | "sample" => 2,
        _ => 1,
    }
}
