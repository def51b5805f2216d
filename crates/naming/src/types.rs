//! 도메인 타입 -- WFN 속성 이름과 속성 값
//!
//! [`Attribute`]는 고정된 11개 속성 이름을, [`AttributeValue`]는 한 슬롯의 값을,
//! [`AttributeInput`]은 `set` 호출에 넘기는 입력(미지정 포함)을 나타냅니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NamingError;
use crate::logical::LogicalValue;

/// WFN 속성 이름
///
/// 선언 순서가 Formatted String의 필드 순서와 같습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Part,
    Vendor,
    Product,
    Version,
    Update,
    Edition,
    Language,
    SwEdition,
    TargetSw,
    TargetHw,
    Other,
}

impl Attribute {
    /// 고정 순서의 전체 속성 목록
    pub const ALL: [Attribute; 11] = [
        Self::Part,
        Self::Vendor,
        Self::Product,
        Self::Version,
        Self::Update,
        Self::Edition,
        Self::Language,
        Self::SwEdition,
        Self::TargetSw,
        Self::TargetHw,
        Self::Other,
    ];

    /// 정규 속성 이름 (예: `"sw_edition"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Vendor => "vendor",
            Self::Product => "product",
            Self::Version => "version",
            Self::Update => "update",
            Self::Edition => "edition",
            Self::Language => "language",
            Self::SwEdition => "sw_edition",
            Self::TargetSw => "target_sw",
            Self::TargetHw => "target_hw",
            Self::Other => "other",
        }
    }

    /// `ALL` 배열 내 위치
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| NamingError::UnknownAttribute(s.to_owned()))
    }
}

/// WFN 한 슬롯의 값
///
/// `Quoted`는 항상 이스케이프된 내부 표현을 담습니다 (예: `8\.0\.6001`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    #[default]
    Any,
    NotApplicable,
    Quoted(String),
}

impl AttributeValue {
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn is_na(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }

    /// 논리값이면 해당 [`LogicalValue`]를 반환합니다.
    pub fn as_logical(&self) -> Option<LogicalValue> {
        match self {
            Self::Any => Some(LogicalValue::Any),
            Self::NotApplicable => Some(LogicalValue::NotApplicable),
            Self::Quoted(_) => None,
        }
    }

    /// 문자열 값이면 이스케이프된 내부 표현을 반환합니다.
    pub fn as_quoted(&self) -> Option<&str> {
        match self {
            Self::Quoted(value) => Some(value),
            _ => None,
        }
    }
}

impl From<LogicalValue> for AttributeValue {
    fn from(value: LogicalValue) -> Self {
        match value {
            LogicalValue::Any => Self::Any,
            LogicalValue::NotApplicable => Self::NotApplicable,
        }
    }
}

impl fmt::Display for AttributeValue {
    /// 논리값은 따옴표 없이, 문자열은 큰따옴표로 감싸 출력합니다.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ANY"),
            Self::NotApplicable => f.write_str("NA"),
            Self::Quoted(value) => write!(f, "\"{value}\""),
        }
    }
}

/// `Wfn::set` 입력값
///
/// 미지정(`Unset`)과 명시적 논리값을 구분합니다.
/// 미지정과 빈 문자열은 ANY로 정규화됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeInput {
    Unset,
    Logical(LogicalValue),
    Text(String),
}

impl From<LogicalValue> for AttributeInput {
    fn from(value: LogicalValue) -> Self {
        Self::Logical(value)
    }
}

impl From<&str> for AttributeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttributeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<AttributeInput>> From<Option<T>> for AttributeInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Into::into)
    }
}

impl From<AttributeValue> for AttributeInput {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Any => Self::Logical(LogicalValue::Any),
            AttributeValue::NotApplicable => Self::Logical(LogicalValue::NotApplicable),
            AttributeValue::Quoted(text) => Self::Text(text),
        }
    }
}
