//! 이름 매처 -- 속성 비교와 이름 단위 관계 판정
//!
//! [`NameMatcher`]는 두 WFN을 속성별로 비교하여 [`Relation`]을 계산하고,
//! 그 결과를 접어 부분집합/상위집합/동일/서로소 여부를 판정합니다.
//!
//! 이름 단위 판정은 모두 `compare_wfns(source, target)` 결과를 접어 계산하며
//! "타겟이 소스에 대해 어떤 관계인가"를 묻습니다. 예를 들어
//! `is_subset(source, target)`은 타겟이 소스에 포함되는지 확인합니다.
//!
//! # 사용 예시
//!
//! ```
//! use cpekit_matcher::NameMatcher;
//! use cpekit_naming::Wfn;
//!
//! let matcher = NameMatcher::default();
//! let pattern: Wfn = "cpe:2.3:a:microsoft:internet_explorer:*:*:*:*:*:*:*:*".parse().unwrap();
//! let name: Wfn = "cpe:/a:microsoft:internet_explorer:8.0.6001:beta".parse().unwrap();
//!
//! assert!(matcher.is_subset(&pattern, &name));
//! assert!(matcher.matches_name(&pattern, &name));
//! ```

use tracing::{debug, trace};

use cpekit_core::config::MatcherConfig;
use cpekit_core::error::{ConfigError, CpekitError};
use cpekit_naming::util::{contains_wildcards, count_escape_characters, is_even_number};
use cpekit_naming::{Attribute, AttributeValue, EscapeCounting, NamingError, Wfn};

use crate::relation::{Relation, WfnRelations};

/// CPE 이름 매처
///
/// 상태를 갖지 않으며 이스케이프 계산 방식만 설정으로 받습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameMatcher {
    escape_counting: EscapeCounting,
}

impl NameMatcher {
    pub fn new(escape_counting: EscapeCounting) -> Self {
        Self { escape_counting }
    }

    /// core 설정에서 매처를 생성합니다.
    ///
    /// # Errors
    ///
    /// `escape_counting`이 `legacy`/`exact`가 아니면 `ConfigError::InvalidValue`
    pub fn from_config(config: &MatcherConfig) -> Result<Self, CpekitError> {
        let escape_counting = config
            .escape_counting
            .parse::<EscapeCounting>()
            .map_err(|reason| ConfigError::InvalidValue {
                field: "matcher.escape_counting".to_owned(),
                reason,
            })?;
        debug!(%escape_counting, "name matcher configured");
        Ok(Self::new(escape_counting))
    }

    pub fn escape_counting(&self) -> EscapeCounting {
        self.escape_counting
    }

    /// 두 속성 값의 관계를 계산합니다 (대소문자 무시).
    ///
    /// 판정 순서:
    /// 1. 타겟 문자열에 와일드카드가 있으면 `Undefined`
    /// 2. 두 값이 같으면 `Equal`
    /// 3. 소스가 ANY면 `Superset`, 타겟이 ANY면 `Subset`
    /// 4. 어느 한쪽이 NA면 `Disjoint`
    /// 5. 그 외에는 [`compare_strings`](Self::compare_strings)
    pub fn compare(&self, source: &AttributeValue, target: &AttributeValue) -> Relation {
        use AttributeValue::{Any, NotApplicable, Quoted};

        if matches!(target, Quoted(t) if contains_wildcards(t)) {
            return Relation::Undefined;
        }

        match (source, target) {
            (Quoted(s), Quoted(t)) => {
                if s.eq_ignore_ascii_case(t) {
                    Relation::Equal
                } else {
                    self.compare_strings(&s.to_ascii_lowercase(), &t.to_ascii_lowercase())
                }
            }
            (Any, Any) | (NotApplicable, NotApplicable) => Relation::Equal,
            (Any, _) => Relation::Superset,
            (_, Any) => Relation::Subset,
            (NotApplicable, _) | (_, NotApplicable) => Relation::Disjoint,
        }
    }

    /// 와일드카드가 포함될 수 있는 소스 문자열과 타겟 문자열을 비교합니다.
    ///
    /// 소스의 앞뒤 와일드카드(`*` 또는 `?` 연속)를 떼어낸 나머지를 타겟에서 찾고,
    /// 앞쪽 `?` 개수와 뒤쪽 `?` 개수 제약을 만족하는 위치가 있으면 `Superset`,
    /// 없으면 `Disjoint`를 반환합니다.
    pub fn compare_strings(&self, source: &str, target: &str) -> Relation {
        let src = source.as_bytes();
        if src.is_empty() {
            return Relation::Disjoint;
        }

        // None: `*` (길이 제한 없음), Some(n): `?` n개
        let mut start = 0;
        let mut end = src.len();
        let mut begins = Some(0);
        let mut ends = Some(0);

        if src[0] == b'*' {
            start = 1;
            begins = None;
        } else {
            while start < end && src[start] == b'?' {
                start += 1;
                begins = begins.map(|n| n + 1);
            }
        }

        if end > start && src[end - 1] == b'*' && self.is_unescaped(source, end - 1) {
            end -= 1;
            ends = None;
        } else {
            while end > start && src[end - 1] == b'?' && self.is_unescaped(source, end - 1) {
                end -= 1;
                ends = ends.map(|n| n + 1);
            }
        }

        let needle = &src[start..end];
        let tgt = target.as_bytes();
        let len = tgt.len();
        let mut index: Option<usize> = None;
        let mut leftover = len;

        while leftover > 0 {
            let from = index.map_or(0, |i| i + 1);
            let Some(found) = find_from(tgt, needle, from) else {
                break;
            };
            index = Some(found);

            let escapes = self.escapes(target, 0, found);
            if found > 0 && matches!(begins, Some(n) if n < found - escapes) {
                break;
            }

            let escapes = self.escapes(target, found + 1, len);
            leftover = (len - found)
                .saturating_sub(escapes)
                .saturating_sub(needle.len());
            if leftover > 0 && matches!(ends, Some(n) if leftover > n) {
                continue;
            }
            return Relation::Superset;
        }

        Relation::Disjoint
    }

    /// 두 WFN의 11개 속성 관계를 계산합니다.
    pub fn compare_wfns(&self, source: &Wfn, target: &Wfn) -> WfnRelations {
        let relations =
            WfnRelations::new(Attribute::ALL.map(|a| self.compare(source.get(a), target.get(a))));
        trace!(%source, %target, %relations, "compared names");
        relations
    }

    /// 어느 속성이든 서로소이면 `true`
    pub fn is_disjoint(&self, source: &Wfn, target: &Wfn) -> bool {
        self.compare_wfns(source, target)
            .any(|r| r == Relation::Disjoint)
    }

    /// 모든 속성이 동일하면 `true`
    pub fn is_equal(&self, source: &Wfn, target: &Wfn) -> bool {
        self.compare_wfns(source, target)
            .all(|r| r == Relation::Equal)
    }

    /// 타겟이 소스에 포함되면 `true`
    ///
    /// 속성마다 소스가 타겟의 상위집합이거나 같아야 합니다.
    pub fn is_subset(&self, source: &Wfn, target: &Wfn) -> bool {
        self.compare_wfns(source, target)
            .all(|r| matches!(r, Relation::Superset | Relation::Equal))
    }

    /// 타겟이 소스를 포함하면 `true`
    pub fn is_superset(&self, source: &Wfn, target: &Wfn) -> bool {
        self.compare_wfns(source, target)
            .all(|r| matches!(r, Relation::Subset | Relation::Equal))
    }

    /// 패턴이 후보 이름을 포함하는지 확인합니다.
    ///
    /// 취약점 데이터의 CPE 패턴을 설치된 제품 이름에 대조할 때 사용합니다.
    /// 패턴은 항상 소스 자리에 두므로 와일드카드가 있어도 `Undefined`가 되지 않습니다.
    pub fn matches_name(&self, pattern: &Wfn, candidate: &Wfn) -> bool {
        self.is_subset(pattern, candidate)
    }

    /// CPE 문자열 두 개를 파싱하여 [`matches_name`](Self::matches_name)을 적용합니다.
    ///
    /// URI와 Formatted String을 섞어 사용할 수 있습니다.
    pub fn matches_str(&self, pattern: &str, candidate: &str) -> Result<bool, NamingError> {
        let pattern = Wfn::parse(pattern)?;
        let candidate = Wfn::parse(candidate)?;
        Ok(self.matches_name(&pattern, &candidate))
    }

    fn escapes(&self, s: &str, start: usize, end: usize) -> usize {
        count_escape_characters(s, start, end, self.escape_counting)
    }

    /// `pos` 위치 문자가 이스케이프되지 않았으면 `true`
    fn is_unescaped(&self, s: &str, pos: usize) -> bool {
        is_even_number(self.escapes(s, pos.saturating_sub(1), pos))
    }
}

/// `from` 위치부터 `needle`이 처음 나타나는 위치. 빈 `needle`은 `from` 자체.
fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(from);
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
