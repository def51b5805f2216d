//! 설정 관리 -- cpekit.toml 파싱 및 런타임 설정
//!
//! [`CpekitConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`CPEKIT_MATCHER_ESCAPE_COUNTING=exact` 형식)
//! 2. 설정 파일 (`cpekit.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), cpekit_core::error::CpekitError> {
//! use cpekit_core::config::CpekitConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = CpekitConfig::load("cpekit.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = CpekitConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, CpekitError};

/// CPE 이름 최대 길이 상한 (바이트)
pub const MAX_NAME_LENGTH_LIMIT: usize = 65_536;

/// cpekit 통합 설정
///
/// `cpekit.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 크레이트는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpekitConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 이름 바인딩/언바인딩 설정
    #[serde(default)]
    pub naming: NamingConfig,
    /// 매처 설정
    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl CpekitConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CpekitError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CpekitError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CpekitError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                CpekitError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CpekitError> {
        toml::from_str(toml_str).map_err(|e| {
            CpekitError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CPEKIT_{SECTION}_{FIELD}`
    /// 예: `CPEKIT_NAMING_MAX_NAME_LENGTH=8192`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CPEKIT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CPEKIT_GENERAL_LOG_FORMAT");

        // Naming
        override_usize(
            &mut self.naming.max_name_length,
            "CPEKIT_NAMING_MAX_NAME_LENGTH",
        );
        override_bool(
            &mut self.naming.strict_attribute_names,
            "CPEKIT_NAMING_STRICT_ATTRIBUTE_NAMES",
        );

        // Matcher
        override_string(
            &mut self.matcher.escape_counting,
            "CPEKIT_MATCHER_ESCAPE_COUNTING",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CpekitError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.naming.max_name_length == 0 || self.naming.max_name_length > MAX_NAME_LENGTH_LIMIT
        {
            return Err(ConfigError::InvalidValue {
                field: "naming.max_name_length".to_owned(),
                reason: format!("must be 1-{MAX_NAME_LENGTH_LIMIT}"),
            }
            .into());
        }

        let valid_modes = ["legacy", "exact"];
        if !valid_modes.contains(&self.matcher.escape_counting.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "matcher.escape_counting".to_owned(),
                reason: format!("must be one of: {}", valid_modes.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 이름 바인딩/언바인딩 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// 언바인딩 입력 문자열 최대 길이 (바이트)
    pub max_name_length: usize,
    /// 알 수 없는 속성 이름을 에러로 처리할지 여부
    pub strict_attribute_names: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_name_length: 4096,
            strict_attribute_names: false,
        }
    }
}

/// 매처 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// 이스케이프 문자 계산 방식 (legacy, exact)
    ///
    /// `legacy`는 기존 매칭 결과와 호환되도록 이스케이프 수를 항상 0으로 계산합니다.
    pub escape_counting: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            escape_counting: "legacy".to_owned(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
