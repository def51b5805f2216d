//! 문자열 유틸리티 -- 와일드카드/이스케이프 검사와 구조 검증
//!
//! 바인더, 언바인더, 매처가 공유하는 저수준 스캔 함수들입니다.
//! 모든 인덱스는 바이트 단위입니다.

use std::fmt;
use std::str::FromStr;

use crate::error::NamingError;

/// 이스케이프 가능한 문장부호와 URI 퍼센트 인코딩 대응표
pub const PERCENT_CODES: [(char, &str); 29] = [
    ('!', "%21"),
    ('"', "%22"),
    ('#', "%23"),
    ('$', "%24"),
    ('%', "%25"),
    ('&', "%26"),
    ('\'', "%27"),
    ('(', "%28"),
    (')', "%29"),
    ('*', "%2a"),
    ('+', "%2b"),
    (',', "%2c"),
    ('/', "%2f"),
    (':', "%3a"),
    (';', "%3b"),
    ('<', "%3c"),
    ('=', "%3d"),
    ('>', "%3e"),
    ('?', "%3f"),
    ('@', "%40"),
    ('[', "%5b"),
    ('\\', "%5c"),
    (']', "%5d"),
    ('^', "%5e"),
    ('`', "%60"),
    ('{', "%7b"),
    ('|', "%7c"),
    ('}', "%7d"),
    ('~', "%7e"),
];

/// 문자의 퍼센트 인코딩을 반환합니다. 표에 없으면 `None`.
pub fn percent_encode(c: char) -> Option<&'static str> {
    PERCENT_CODES
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, code)| *code)
}

/// 퍼센트 인코딩(소문자)에 대응하는 문자를 반환합니다. 표에 없으면 `None`.
pub fn percent_decode(code: &str) -> Option<char> {
    PERCENT_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(ch, _)| *ch)
}

/// 이스케이프 문자 계산 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapeCounting {
    /// 항상 0을 반환합니다. 기존 매칭 결과와 동일한 판정을 유지합니다.
    #[default]
    Legacy,
    /// 구간 안의 이스케이프 백슬래시를 실제로 계산합니다.
    Exact,
}

impl fmt::Display for EscapeCounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("legacy"),
            Self::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for EscapeCounting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "exact" => Ok(Self::Exact),
            other => Err(format!(
                "unknown escape counting mode '{other}', expected 'legacy' or 'exact'"
            )),
        }
    }
}

/// 문자열에 `*` 또는 `?` 와일드카드가 있는지 확인합니다.
///
/// 백슬래시가 문자열 어디에든 있으면 검사하지 않고 `false`를 반환합니다.
/// 와일드카드 바로 앞의 백슬래시만 보지 않는다는 점에 주의하세요.
/// 기존 매칭 판정이 이 동작에 의존합니다.
pub fn contains_wildcards(s: &str) -> bool {
    if s.contains('\\') {
        return false;
    }
    s.contains('*') || s.contains('?')
}

pub fn is_even_number(n: usize) -> bool {
    n % 2 == 0
}

/// `[start, end)` 구간의 이스케이프 문자 수를 계산합니다.
///
/// [`EscapeCounting::Legacy`]에서는 항상 0입니다.
/// [`EscapeCounting::Exact`]에서는 문자열 처음부터 스캔하여
/// 다른 백슬래시에 의해 이스케이프되지 않은 백슬래시 중 구간 안에 있는 것을 셉니다.
pub fn count_escape_characters(s: &str, start: usize, end: usize, mode: EscapeCounting) -> usize {
    match mode {
        EscapeCounting::Legacy => 0,
        EscapeCounting::Exact => {
            let bytes = s.as_bytes();
            let end = end.min(bytes.len());
            let mut count = 0;
            let mut i = 0;
            while i < end {
                if bytes[i] == b'\\' {
                    if i >= start {
                        count += 1;
                    }
                    // 이스케이프된 다음 문자는 건너뜀
                    i += 2;
                } else {
                    i += 1;
                }
            }
            count
        }
    }
}

/// 백슬래시가 바로 앞에 오지 않는 첫 번째 콜론의 위치를 반환합니다.
///
/// 바로 앞 글자만 보므로 `\\:`의 콜론도 이스케이프된 것으로 취급합니다.
/// Formatted String 분할에는 [`split_fs`]를 사용합니다.
pub fn get_unescaped_colon_index(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b':' && (i == 0 || bytes[i - 1] != b'\\'))
        .map(|(i, _)| i)
}

/// 모든 문자가 `[A-Za-z0-9_]`이면 `true`. 빈 문자열은 `false`.
pub fn is_alphanum(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_alphanum_char)
}

pub(crate) fn is_alphanum_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn has_prefix_ignore_case(s: &str, prefix: &str) -> bool {
    s.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// CPE 2.2 URI의 구조를 검증합니다.
///
/// `cpe:/` 접두사(대소문자 무시)와 최대 7개의 콜론(최대 8개 컴포넌트)을 요구합니다.
pub fn validate_uri(s: &str) -> Result<(), NamingError> {
    if !has_prefix_ignore_case(s, "cpe:/") {
        return Err(NamingError::parse(s, "URI must start with 'cpe:/'"));
    }

    let colons = s.matches(':').count();
    if colons > 7 {
        return Err(NamingError::parse(
            s,
            format!("URI has {colons} colons, at most 7 allowed"),
        ));
    }

    Ok(())
}

/// CPE 2.3 Formatted String의 구조를 검증합니다.
///
/// `cpe:2.3:` 접두사(대소문자 무시), 정확히 12개의 이스케이프되지 않은 콜론,
/// 빈 컴포넌트 없음을 요구합니다.
pub fn validate_fs(s: &str) -> Result<(), NamingError> {
    if !has_prefix_ignore_case(s, "cpe:2.3:") {
        return Err(NamingError::parse(
            s,
            "formatted string must start with 'cpe:2.3:'",
        ));
    }

    let components = split_fs(s);
    if components.len() != 13 {
        return Err(NamingError::parse(
            s,
            format!(
                "formatted string has {} unescaped colons, exactly 12 required",
                components.len() - 1
            ),
        ));
    }

    if let Some(pos) = components.iter().position(|c| c.is_empty()) {
        return Err(NamingError::parse(
            s,
            format!("component {pos} is empty"),
        ));
    }

    Ok(())
}

/// Formatted String을 이스케이프되지 않은 콜론 기준으로 분할합니다.
///
/// 백슬래시는 항상 다음 한 글자와 짝을 이루므로 `\\:`의 콜론은 구분자입니다.
/// 빈 문자열도 컴포넌트 하나로 반환합니다.
pub fn split_fs(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut components = Vec::with_capacity(13);
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b':' => {
                components.push(&s[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    components.push(&s[start..]);
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_detected_without_backslash() {
        assert!(contains_wildcards("foo*"));
        assert!(contains_wildcards("?bar"));
        assert!(!contains_wildcards("plain"));
    }

    #[test]
    fn any_backslash_disables_wildcard_detection() {
        assert!(!contains_wildcards("foo\\*"));
        // 와일드카드와 무관한 위치의 백슬래시도 검사를 끕니다
        assert!(!contains_wildcards("8\\.0*"));
    }

    #[test]
    fn even_numbers() {
        assert!(is_even_number(0));
        assert!(is_even_number(2));
        assert!(!is_even_number(3));
    }

    #[test]
    fn legacy_escape_counting_is_zero() {
        assert_eq!(
            count_escape_characters("a\\.b\\.c", 0, 7, EscapeCounting::Legacy),
            0
        );
    }

    #[test]
    fn exact_escape_counting_counts_span() {
        let s = "a\\.b\\.c";
        assert_eq!(count_escape_characters(s, 0, s.len(), EscapeCounting::Exact), 2);
        assert_eq!(count_escape_characters(s, 3, s.len(), EscapeCounting::Exact), 1);
        assert_eq!(count_escape_characters(s, 0, 2, EscapeCounting::Exact), 1);
    }

    #[test]
    fn exact_escape_counting_handles_escaped_backslash() {
        // "\\\\" 는 이스케이프 하나 + 리터럴 백슬래시 하나
        let s = "a\\\\b";
        assert_eq!(count_escape_characters(s, 0, s.len(), EscapeCounting::Exact), 1);
    }

    #[test]
    fn escape_counting_parses_from_str() {
        assert_eq!("legacy".parse::<EscapeCounting>().unwrap(), EscapeCounting::Legacy);
        assert_eq!("EXACT".parse::<EscapeCounting>().unwrap(), EscapeCounting::Exact);
        assert!("fuzzy".parse::<EscapeCounting>().is_err());
    }

    #[test]
    fn unescaped_colon_index() {
        assert_eq!(get_unescaped_colon_index("ab:cd"), Some(2));
        assert_eq!(get_unescaped_colon_index("a\\:b:c"), Some(4));
        assert_eq!(get_unescaped_colon_index(":x"), Some(0));
        assert_eq!(get_unescaped_colon_index("a\\:b"), None);
        assert_eq!(get_unescaped_colon_index(""), None);
    }

    #[test]
    fn alphanum() {
        assert!(is_alphanum("abc_123"));
        assert!(!is_alphanum("a.b"));
        assert!(!is_alphanum(""));
        assert!(!is_alphanum("é"));
    }

    #[test]
    fn percent_table_is_bijective() {
        for (c, code) in PERCENT_CODES {
            assert_eq!(percent_encode(c), Some(code));
            assert_eq!(percent_decode(code), Some(c));
        }
        assert_eq!(percent_encode('.'), None);
        assert_eq!(percent_decode("%2e"), None);
    }

    #[test]
    fn validate_uri_accepts_well_formed() {
        validate_uri("cpe:/a:microsoft:internet_explorer:8.0.6001:beta").unwrap();
        validate_uri("CPE:/o:linux").unwrap();
        validate_uri("cpe:/").unwrap();
    }

    #[test]
    fn validate_uri_rejects_missing_slash() {
        assert!(validate_uri("cpe:a:foo").is_err());
        assert!(validate_uri("cpe").is_err());
    }

    #[test]
    fn validate_uri_rejects_too_many_colons() {
        assert!(validate_uri("cpe:/a:b:c:d:e:f:g:h").is_err());
        validate_uri("cpe:/a:b:c:d:e:f:g").unwrap();
    }

    #[test]
    fn validate_fs_accepts_well_formed() {
        validate_fs("cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*").unwrap();
        validate_fs("CPE:2.3:a:b\\:c:d:*:*:*:*:*:*:*:*").unwrap();
    }

    #[test]
    fn validate_fs_rejects_wrong_component_count() {
        assert!(validate_fs("cpe:2.3:a:microsoft:ie:*:*:*:*:*:*:*").is_err());
        assert!(validate_fs("cpe:2.3:a:microsoft:ie:*:*:*:*:*:*:*:*:*").is_err());
    }

    #[test]
    fn validate_fs_rejects_empty_component() {
        let err = validate_fs("cpe:2.3:a::ie:*:*:*:*:*:*:*:*").unwrap_err();
        assert!(err.to_string().contains("component 3 is empty"));
    }

    #[test]
    fn validate_fs_rejects_wrong_prefix() {
        assert!(validate_fs("cpe:2.2:a:b:c:*:*:*:*:*:*:*:*").is_err());
        assert!(validate_fs("cpe:/a:b:c").is_err());
    }

    #[test]
    fn split_fs_respects_escaped_colons() {
        let parts = split_fs("cpe:2.3:a:b\\:c:d");
        assert_eq!(parts, vec!["cpe", "2.3", "a", "b\\:c", "d"]);
    }

    #[test]
    fn split_fs_keeps_empty_components() {
        assert_eq!(split_fs("a::b"), vec!["a", "", "b"]);
        assert_eq!(split_fs(""), vec![""]);
        assert_eq!(split_fs("a:"), vec!["a", ""]);
    }

    #[test]
    fn split_fs_treats_escaped_backslash_as_a_pair() {
        assert_eq!(split_fs("a\\\\:b"), vec!["a\\\\", "b"]);
        assert_eq!(split_fs("a\\\\\\:b:c"), vec!["a\\\\\\:b", "c"]);
        assert_eq!(split_fs("a:b\\"), vec!["a", "b\\"]);
        // 바로 앞 글자만 보는 헬퍼와의 차이
        assert_eq!(get_unescaped_colon_index("a\\\\:b"), None);
    }
}
