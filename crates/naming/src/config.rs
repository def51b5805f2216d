//! 이름 처리 옵션
//!
//! [`NamingOptions`]는 core의 [`NamingConfig`](cpekit_core::config::NamingConfig)에서
//! 파생되며, 언바인더 입력 길이 제한과 속성 이름 처리 방식을 담습니다.
//!
//! # 사용 예시
//!
//! ```
//! use cpekit_naming::{NamingOptions, NamingOptionsBuilder};
//!
//! // 기본값으로 생성
//! let options = NamingOptions::default();
//! options.validate().unwrap();
//!
//! // 빌더로 생성
//! let options = NamingOptionsBuilder::new()
//!     .max_name_length(1024)
//!     .strict_attribute_names(true)
//!     .build()
//!     .unwrap();
//! assert!(options.strict_attribute_names);
//! ```

use cpekit_core::config::{MAX_NAME_LENGTH_LIMIT, NamingConfig};
use cpekit_core::error::{ConfigError, CpekitError};

/// 이름 처리 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    /// 언바인딩 입력 최대 길이 (바이트)
    pub max_name_length: usize,
    /// 알 수 없는 속성 이름을 에러로 처리할지 여부
    pub strict_attribute_names: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        let core = NamingConfig::default();
        Self {
            max_name_length: core.max_name_length,
            strict_attribute_names: core.strict_attribute_names,
        }
    }
}

impl NamingOptions {
    /// core 설정에서 옵션을 생성합니다.
    pub fn from_core(core: &NamingConfig) -> Self {
        Self {
            max_name_length: core.max_name_length,
            strict_attribute_names: core.strict_attribute_names,
        }
    }

    /// 옵션 값의 유효성을 검증합니다.
    ///
    /// - `max_name_length`: 1-65536
    pub fn validate(&self) -> Result<(), CpekitError> {
        if self.max_name_length == 0 || self.max_name_length > MAX_NAME_LENGTH_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "max_name_length".to_owned(),
                reason: format!("must be 1-{MAX_NAME_LENGTH_LIMIT}"),
            }
            .into());
        }
        Ok(())
    }
}

/// [`NamingOptions`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct NamingOptionsBuilder {
    options: NamingOptions,
}

impl NamingOptionsBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 입력 최대 길이를 설정합니다.
    pub fn max_name_length(mut self, len: usize) -> Self {
        self.options.max_name_length = len;
        self
    }

    /// 속성 이름 strict 모드를 설정합니다.
    pub fn strict_attribute_names(mut self, strict: bool) -> Self {
        self.options.strict_attribute_names = strict;
        self
    }

    /// 옵션을 검증하고 빌드합니다.
    pub fn build(self) -> Result<NamingOptions, CpekitError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
