use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The value type of a field or tag.
#[derive(
    Debug, Default, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DataType {
    #[default]
    Unknown,
    Float,
    Integer,
    Unsigned,
    String,
    Boolean,
    Time,
    Duration,
    Tag,
    /// Any field type. Used by `*::field`.
    AnyField,
}

impl DataType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataType::Unknown => "unknown",
            DataType::Float => "float",
            DataType::Integer => "integer",
            DataType::Unsigned => "unsigned",
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Time => "time",
            DataType::Duration => "duration",
            DataType::Tag => "tag",
            DataType::AnyField => "field",
        }
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Float | DataType::Integer | DataType::Unsigned
        )
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type() {
        assert_eq!(DataType::Float.to_string(), "float");
        assert_eq!(DataType::AnyField.to_string(), "field");
        assert_eq!(DataType::default(), DataType::Unknown);
        assert!(DataType::Unsigned.is_numeric());
        assert!(!DataType::Boolean.is_numeric());
    }
}
