//! 논리값 (ANY / NA)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NamingError;

/// CPE 속성의 특수 논리값
///
/// 일반 문자열 값과 구분되는 두 가지 값만 존재합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalValue {
    /// 어떤 값이든 허용 (ANY)
    #[serde(rename = "ANY")]
    Any,
    /// 해당 없음 (NA)
    #[serde(rename = "NA")]
    NotApplicable,
}

impl LogicalValue {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn is_na(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// 정규 문자열 표현 ("ANY" 또는 "NA")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::NotApplicable => "NA",
        }
    }
}

impl fmt::Display for LogicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalValue {
    type Err = NamingError;

    /// "ANY" 또는 "NA"만 허용합니다 (대소문자 구분).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANY" => Ok(Self::Any),
            "NA" => Ok(Self::NotApplicable),
            other => Err(NamingError::InvalidLogicalValue(other.to_owned())),
        }
    }
}
