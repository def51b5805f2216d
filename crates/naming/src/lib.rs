//! cpekit-naming -- CPE Well-Formed Name 모델과 바인딩
//!
//! CPE 2.3 Naming 규칙에 따라 WFN을 구성하고, CPE 2.2 URI와
//! CPE 2.3 Formatted String 사이를 양방향으로 변환합니다.
//!
//! # 아키텍처
//!
//! ```text
//! "cpe:/a:..."  ──unbind_uri──┐                  ┌──bind_to_uri──> "cpe:/a:..."
//!                             ├──> Wfn (검증됨) ──┤
//! "cpe:2.3:..." ──unbind_fs───┘                  └──bind_to_fs───> "cpe:2.3:..."
//! ```
//!
//! # 모듈 구성
//!
//! - [`logical`]: 논리값 (ANY / NA)
//! - [`types`]: 속성 이름과 속성 값
//! - [`wfn`]: 검증되는 11개 속성 레코드
//! - [`binder`]: WFN → URI / Formatted String
//! - [`unbinder`]: URI / Formatted String → WFN
//! - [`util`]: 와일드카드, 이스케이프, 구조 검증 유틸리티
//! - [`config`]: 이름 처리 옵션
//! - [`error`]: 도메인 에러 타입
//!
//! # 사용 예시
//!
//! ```
//! use cpekit_naming::{Attribute, Wfn};
//!
//! let wfn: Wfn = "cpe:/a:microsoft:internet_explorer:8.0.6001:beta".parse().unwrap();
//! assert_eq!(wfn.get(Attribute::Version).as_quoted(), Some("8\\.0\\.6001"));
//! assert_eq!(
//!     wfn.to_fs(),
//!     "cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*"
//! );
//! ```

pub mod binder;
pub mod config;
pub mod error;
pub mod logical;
pub mod types;
pub mod unbinder;
pub mod util;
pub mod wfn;

// 주요 타입 re-export
pub use binder::{bind_to_fs, bind_to_uri};
pub use config::{NamingOptions, NamingOptionsBuilder};
pub use error::NamingError;
pub use logical::LogicalValue;
pub use types::{Attribute, AttributeInput, AttributeValue};
pub use unbinder::{Unbinder, unbind_fs, unbind_uri};
pub use util::EscapeCounting;
pub use wfn::Wfn;
