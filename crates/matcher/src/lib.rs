//! cpekit-matcher -- CPE 이름 매칭
//!
//! 두 Well-Formed Name을 속성별로 비교하여 집합 관계를 계산하고,
//! 이름 단위의 부분집합/상위집합/동일/서로소 판정을 제공합니다.
//!
//! # 모듈 구성
//!
//! - [`relation`]: 속성 관계 (`Relation`, `WfnRelations`)
//! - [`matcher`]: 비교 로직 (`NameMatcher`)

pub mod matcher;
pub mod relation;

pub use matcher::NameMatcher;
pub use relation::{Relation, WfnRelations};
