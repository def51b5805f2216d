//! cpekit 공통 크레이트
//!
//! 모든 cpekit 크레이트가 공유하는 에러 타입, 설정, 로깅 초기화를 제공합니다.
//!
//! # Module Structure
//!
//! - [`error`]: 최상위 에러 (`CpekitError`, `ConfigError`, `NameError`)
//! - [`config`]: `cpekit.toml` 설정 (`CpekitConfig`)
//! - [`logging`]: `tracing-subscriber` 초기화 (`init_tracing`)

pub mod config;
pub mod error;
pub mod logging;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, CpekitError, NameError};

// 설정
pub use config::{CpekitConfig, GeneralConfig, MatcherConfig, NamingConfig};

// 로깅
pub use logging::init_tracing;
