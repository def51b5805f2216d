//! 속성 관계 타입

use std::fmt;

use serde::{Deserialize, Serialize};

use cpekit_naming::Attribute;

/// 소스 값과 타겟 값 사이의 집합 관계
///
/// `Superset`은 소스가 타겟을 포함함을, `Subset`은 소스가 타겟에 포함됨을 뜻합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    Disjoint,
    Subset,
    Superset,
    Equal,
    /// 타겟에 와일드카드가 있어 판정할 수 없음
    Undefined,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disjoint => "DISJOINT",
            Self::Subset => "SUBSET",
            Self::Superset => "SUPERSET",
            Self::Equal => "EQUAL",
            Self::Undefined => "UNDEFINED",
        }
    }

    /// 소스와 타겟을 바꿨을 때의 관계
    pub fn inverse(self) -> Self {
        match self {
            Self::Subset => Self::Superset,
            Self::Superset => Self::Subset,
            other => other,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 두 WFN의 속성별 관계 (고정 속성 순서)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WfnRelations {
    relations: [Relation; 11],
}

impl WfnRelations {
    pub fn new(relations: [Relation; 11]) -> Self {
        Self { relations }
    }

    pub fn get(&self, attribute: Attribute) -> Relation {
        self.relations[attribute.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Relation)> + '_ {
        Attribute::ALL.into_iter().zip(self.relations.iter().copied())
    }

    /// 모든 속성 관계가 조건을 만족하는지 확인합니다.
    pub fn all(&self, predicate: impl Fn(Relation) -> bool) -> bool {
        self.relations.iter().all(|r| predicate(*r))
    }

    /// 하나 이상의 속성 관계가 조건을 만족하는지 확인합니다.
    pub fn any(&self, predicate: impl Fn(Relation) -> bool) -> bool {
        self.relations.iter().any(|r| predicate(*r))
    }
}

impl fmt::Display for WfnRelations {
    /// `part=EQUAL, vendor=SUPERSET, ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (attribute, relation)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attribute}={relation}")?;
        }
        Ok(())
    }
}
