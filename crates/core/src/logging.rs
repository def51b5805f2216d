//! 로깅 초기화
//!
//! `[general]` 섹션의 설정에 따라 `tracing-subscriber`를 구성합니다.
//! JSON 구조화 로그와 사람이 읽기 쉬운 pretty 형식을 지원합니다.
//!
//! 라이브러리 크레이트는 스스로 subscriber를 설치하지 않습니다.
//! 이 함수는 cpekit을 사용하는 애플리케이션이 시작 시 한 번 호출합니다.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::GeneralConfig;
use crate::error::{ConfigError, CpekitError};

/// 전역 tracing subscriber를 초기화합니다.
///
/// `RUST_LOG` 환경변수가 있으면 `log_level`보다 우선합니다.
///
/// # Formats
///
/// * `"json"` - 기계 파싱용 JSON 라인
/// * `"pretty"` - 개발용 컬러 출력
///
/// # Errors
///
/// 알 수 없는 형식이면 `ConfigError::InvalidValue`,
/// 이미 전역 subscriber가 설치되어 있으면 `CpekitError::Init`을 반환합니다.
pub fn init_tracing(config: &GeneralConfig) -> Result<(), CpekitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .map_err(|e| {
                    CpekitError::Init(format!("failed to initialize JSON tracing subscriber: {e}"))
                })?;
        }
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .map_err(|e| {
                    CpekitError::Init(format!(
                        "failed to initialize pretty tracing subscriber: {e}"
                    ))
                })?;
        }
        other => {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("unknown log format '{other}', expected 'json' or 'pretty'"),
            }
            .into());
        }
    }

    Ok(())
}
