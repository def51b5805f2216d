//! 에러 타입 -- 도메인별 에러 정의

/// cpekit 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum CpekitError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// CPE 이름 처리 에러
    #[error("name error: {0}")]
    Name(#[from] NameError),

    /// 로깅 등 런타임 초기화 실패
    #[error("init error: {0}")]
    Init(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// CPE 이름 처리 에러
///
/// 각 크레이트의 상세 에러(`NamingError` 등)가 이 타입으로 변환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    /// WFN 속성 대입 시 불변식 위반
    #[error("validation failed: {0}")]
    Validation(String),

    /// URI / Formatted String 구조 또는 인코딩 오류
    #[error("parse failed: {0}")]
    Parse(String),

    /// 알 수 없는 속성 이름
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "matcher.escape_counting".to_owned(),
            reason: "must be one of: legacy, exact".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("matcher.escape_counting"));
        assert!(msg.contains("legacy, exact"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let err: CpekitError = ConfigError::ParseFailed {
            reason: "bad toml".to_owned(),
        }
        .into();
        assert!(matches!(
            err,
            CpekitError::Config(ConfigError::ParseFailed { .. })
        ));
        assert!(err.to_string().starts_with("config error"));
    }

    #[test]
    fn name_error_converts_to_top_level() {
        let err: CpekitError = NameError::Parse("cpe:a:foo".to_owned()).into();
        assert!(matches!(err, CpekitError::Name(NameError::Parse(_))));
        assert!(err.to_string().contains("cpe:a:foo"));
    }

    #[test]
    fn unknown_attribute_display() {
        let err = NameError::UnknownAttribute("platform".to_owned());
        assert_eq!(err.to_string(), "unknown attribute: platform");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CpekitError = io_err.into();
        assert!(matches!(err, CpekitError::Io(_)));
    }
}
