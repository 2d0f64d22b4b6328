//! Boleto field extraction module.

mod assembler;
pub mod rules;

pub use assembler::{page_label, RecordAssembler};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a unit of text without a digit-line is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// One unit per page; pages without a digit-line are dropped before any
    /// other field is looked at. Suits files holding many boletos mixed with
    /// cover sheets and statements.
    #[default]
    Strict,
    /// One unit per document; a record is always produced and a missing
    /// digit-line leaves it pending.
    Lenient,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(format!("unknown extraction mode: {other} (expected strict or lenient)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("strict".parse::<ExtractionMode>(), Ok(ExtractionMode::Strict));
        assert_eq!(" Lenient ".parse::<ExtractionMode>(), Ok(ExtractionMode::Lenient));
        assert!("loose".parse::<ExtractionMode>().is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&ExtractionMode::Lenient).unwrap(), "\"lenient\"");
        assert_eq!(ExtractionMode::default(), ExtractionMode::Strict);
    }
}
