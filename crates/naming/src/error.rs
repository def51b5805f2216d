//! 이름 처리 에러 타입
//!
//! [`NamingError`]는 WFN 구성, 바인딩, 언바인딩 중 발생하는 모든 에러를 나타냅니다.
//! `From<NamingError> for CpekitError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **속성 검증**: `Validation`, `InvalidLogicalValue`
//! - **구조/인코딩 파싱**: `Parse`
//! - **속성 이름**: `UnknownAttribute`

use cpekit_core::error::{CpekitError, NameError};

/// 이름 처리 도메인 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    /// WFN 속성 대입이 불변식을 위반함
    #[error("invalid value for '{attribute}': '{value}': {reason}")]
    Validation {
        /// 대상 속성 이름
        attribute: String,
        /// 거부된 값
        value: String,
        /// 거부 사유
        reason: String,
    },

    /// URI / Formatted String 구조 또는 인코딩 오류
    #[error("cannot parse '{input}': {reason}")]
    Parse {
        /// 파싱 대상 문자열 (또는 그 일부)
        input: String,
        /// 실패 사유
        reason: String,
    },

    /// 알 수 없는 속성 이름 (strict 모드에서만 발생)
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// ANY / NA 이외의 논리값
    #[error("invalid logical value: '{0}' (expected ANY or NA)")]
    InvalidLogicalValue(String),
}

impl NamingError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl From<NamingError> for CpekitError {
    fn from(err: NamingError) -> Self {
        match err {
            NamingError::Validation { .. } | NamingError::InvalidLogicalValue(_) => {
                CpekitError::Name(NameError::Validation(err.to_string()))
            }
            NamingError::Parse { .. } => CpekitError::Name(NameError::Parse(err.to_string())),
            NamingError::UnknownAttribute(name) => {
                CpekitError::Name(NameError::UnknownAttribute(name))
            }
        }
    }
}
