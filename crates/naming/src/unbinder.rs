//! 언바인더 -- CPE 2.2 URI / CPE 2.3 Formatted String을 WFN으로 변환
//!
//! 입력 구조를 먼저 검증한 뒤 컴포넌트별로 디코딩하고, 결과는
//! [`Wfn::set`]을 거쳐 한 번 더 검증됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use cpekit_naming::{Attribute, NamingOptions, Unbinder};
//!
//! let unbinder = Unbinder::new(NamingOptions::default());
//! let wfn = unbinder
//!     .unbind_fs("cpe:2.3:a:microsoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*")
//!     .unwrap();
//! assert_eq!(wfn.get(Attribute::Version).as_quoted(), Some("8\\.0\\.6001"));
//! ```

use tracing::debug;

use crate::config::NamingOptions;
use crate::error::NamingError;
use crate::types::{Attribute, AttributeValue};
use crate::util::{is_alphanum_char, percent_decode, split_fs, validate_fs, validate_uri};
use crate::wfn::Wfn;

/// 에러 메시지에 포함할 입력의 최대 문자 수
const ERROR_INPUT_PREVIEW: usize = 64;

/// URI 컴포넌트 1-7에 대응하는 속성
const URI_ATTRIBUTES: [Attribute; 7] = [
    Attribute::Part,
    Attribute::Vendor,
    Attribute::Product,
    Attribute::Version,
    Attribute::Update,
    Attribute::Edition,
    Attribute::Language,
];

/// 묶인 edition(`~ed~sw~tsw~thw~oth`)의 필드 순서
const PACKED_ATTRIBUTES: [Attribute; 5] = [
    Attribute::Edition,
    Attribute::SwEdition,
    Attribute::TargetSw,
    Attribute::TargetHw,
    Attribute::Other,
];

/// 옵션을 가진 언바인더
#[derive(Debug, Clone, Default)]
pub struct Unbinder {
    options: NamingOptions,
}

impl Unbinder {
    pub fn new(options: NamingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NamingOptions {
        &self.options
    }

    /// CPE 2.2 URI를 WFN으로 언바인딩합니다.
    ///
    /// # Errors
    ///
    /// - 길이 제한 초과, 구조 오류, 잘못된 퍼센트 인코딩: `NamingError::Parse`
    /// - 디코딩된 값이 속성 불변식 위반: `NamingError::Validation`
    pub fn unbind_uri(&self, uri: &str) -> Result<Wfn, NamingError> {
        self.check_length(uri)
            .and_then(|()| unbind_uri_unchecked(uri))
            .inspect_err(|e| debug!(error = %e, "failed to unbind URI"))
    }

    /// CPE 2.3 Formatted String을 WFN으로 언바인딩합니다.
    ///
    /// # Errors
    ///
    /// - 길이 제한 초과, 구조 오류, 와일드카드 위치 오류: `NamingError::Parse`
    /// - 값이 속성 불변식 위반: `NamingError::Validation`
    pub fn unbind_fs(&self, fs: &str) -> Result<Wfn, NamingError> {
        self.check_length(fs)
            .and_then(|()| unbind_fs_unchecked(fs))
            .inspect_err(|e| debug!(error = %e, "failed to unbind formatted string"))
    }

    fn check_length(&self, input: &str) -> Result<(), NamingError> {
        if input.len() > self.options.max_name_length {
            let preview: String = input.chars().take(ERROR_INPUT_PREVIEW).collect();
            return Err(NamingError::parse(
                preview,
                format!(
                    "input is {} bytes, limit is {}",
                    input.len(),
                    self.options.max_name_length
                ),
            ));
        }
        Ok(())
    }
}

/// 기본 옵션으로 URI를 언바인딩합니다.
pub fn unbind_uri(uri: &str) -> Result<Wfn, NamingError> {
    Unbinder::default().unbind_uri(uri)
}

/// 기본 옵션으로 Formatted String을 언바인딩합니다.
pub fn unbind_fs(fs: &str) -> Result<Wfn, NamingError> {
    Unbinder::default().unbind_fs(fs)
}

fn unbind_uri_unchecked(uri: &str) -> Result<Wfn, NamingError> {
    validate_uri(uri)?;

    let components: Vec<&str> = uri.split(':').collect();
    let mut wfn = Wfn::new();

    for (i, attribute) in URI_ATTRIBUTES.into_iter().enumerate() {
        let raw = components.get(i + 1).copied().unwrap_or("");
        let raw = if i == 0 {
            raw.strip_prefix('/').unwrap_or(raw)
        } else {
            raw
        };

        if attribute == Attribute::Edition && raw.starts_with('~') {
            unpack(raw, &mut wfn)?;
        } else {
            set_decoded(&mut wfn, attribute, decode(raw)?)?;
        }
    }

    Ok(wfn)
}

fn unbind_fs_unchecked(fs: &str) -> Result<Wfn, NamingError> {
    validate_fs(fs)?;

    let components = split_fs(fs);
    let mut wfn = Wfn::new();

    // 0, 1번 컴포넌트는 "cpe", "2.3"
    for (attribute, raw) in Attribute::ALL.into_iter().zip(&components[2..]) {
        let value = unbind_value_fs(raw)?;
        set_decoded(&mut wfn, attribute, value)?;
    }

    Ok(wfn)
}

/// ANY는 기본값이므로 대입하지 않습니다 (`part`에 논리값 대입 불가).
fn set_decoded(
    wfn: &mut Wfn,
    attribute: Attribute,
    value: AttributeValue,
) -> Result<(), NamingError> {
    if value.is_any() {
        return Ok(());
    }
    wfn.set(attribute, value)
}

/// `~ed~sw~tsw~thw~oth` 형식의 묶인 edition을 풀어 5개 속성에 대입합니다.
fn unpack(packed: &str, wfn: &mut Wfn) -> Result<(), NamingError> {
    let mut fields = packed[1..].splitn(5, '~');
    for attribute in PACKED_ATTRIBUTES {
        let raw = fields.next().unwrap_or("");
        set_decoded(wfn, attribute, decode(raw)?)?;
    }
    Ok(())
}

/// URI 컴포넌트 하나를 WFN 값으로 디코딩합니다.
///
/// 빈 문자열은 ANY, `-`는 NA입니다. 그 외에는 소문자로 변환한 뒤
/// `.`, `-`, `~`를 이스케이프하고 퍼센트 인코딩을 해제합니다.
/// 그 밖의 문장부호는 퍼센트 인코딩되어 있어야 합니다.
/// `%01`(`?`)과 `%02`(`*`)는 값의 앞이나 끝에서만 허용됩니다.
pub fn decode(s: &str) -> Result<AttributeValue, NamingError> {
    match s {
        "" => return Ok(AttributeValue::Any),
        "-" => return Ok(AttributeValue::NotApplicable),
        _ => {}
    }

    let lower = s.to_ascii_lowercase();
    let len = lower.len();
    let mut result = String::with_capacity(len);
    let mut embedded = false;
    let mut idx = 0;

    while let Some(c) = lower[idx..].chars().next() {
        if c != '%' {
            if matches!(c, '.' | '-' | '~') {
                result.push('\\');
            } else if !is_alphanum_char(c) {
                return Err(NamingError::parse(
                    s,
                    format!("character {c:?} must be percent-encoded"),
                ));
            }
            result.push(c);
            embedded = true;
            idx += c.len_utf8();
            continue;
        }

        let form = lower
            .get(idx..idx + 3)
            .ok_or_else(|| NamingError::parse(s, "truncated percent-encoded form"))?;

        match form {
            "%01" => {
                let at_edge = idx == 0 || idx == len - 3;
                let follows_run = !embedded && idx >= 3 && lower.get(idx - 3..idx) == Some("%01");
                let precedes_run =
                    embedded && len >= idx + 6 && lower.get(idx + 3..idx + 6) == Some("%01");
                if !(at_edge || follows_run || precedes_run) {
                    return Err(NamingError::parse(
                        s,
                        "'%01' must appear at the beginning or end of a value",
                    ));
                }
                result.push('?');
            }
            "%02" => {
                if idx != 0 && idx != len - 3 {
                    return Err(NamingError::parse(
                        s,
                        "'%02' must appear at the beginning or end of a value",
                    ));
                }
                result.push('*');
            }
            _ => {
                let decoded = percent_decode(form).ok_or_else(|| {
                    NamingError::parse(s, format!("unknown percent-encoded form '{form}'"))
                })?;
                result.push('\\');
                result.push(decoded);
                embedded = true;
            }
        }
        idx += 3;
    }

    Ok(AttributeValue::Quoted(result))
}

fn unbind_value_fs(s: &str) -> Result<AttributeValue, NamingError> {
    match s {
        "*" => Ok(AttributeValue::Any),
        "-" => Ok(AttributeValue::NotApplicable),
        _ => add_quoting(s).map(AttributeValue::Quoted),
    }
}

/// Formatted String 컴포넌트에 이스케이프를 추가하여 WFN 내부 표현으로 변환합니다.
///
/// 영숫자와 `_` 이외의 문자는 이스케이프되며, 이미 이스케이프된 쌍은 그대로 둡니다.
/// 대소문자는 변환하지 않습니다.
pub fn add_quoting(s: &str) -> Result<String, NamingError> {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(s.len() + 4);
    let mut embedded = false;
    let mut idx = 0;

    while idx < len {
        let c = chars[idx];
        match c {
            c if is_alphanum_char(c) => {
                result.push(c);
                embedded = true;
                idx += 1;
            }
            '\\' => {
                let next = chars
                    .get(idx + 1)
                    .ok_or_else(|| NamingError::parse(s, "dangling escape character"))?;
                result.push('\\');
                result.push(*next);
                embedded = true;
                idx += 2;
            }
            '*' => {
                if idx != 0 && idx != len - 1 {
                    return Err(NamingError::parse(
                        s,
                        "unquoted '*' must appear at the beginning or end of a value",
                    ));
                }
                result.push('*');
                embedded = true;
                idx += 1;
            }
            '?' => {
                let allowed = idx == 0
                    || idx == len - 1
                    || (!embedded && chars[idx - 1] == '?')
                    || (embedded && chars.get(idx + 1) == Some(&'?'));
                if !allowed {
                    return Err(NamingError::parse(
                        s,
                        "unquoted '?' must appear at the beginning or end of a value",
                    ));
                }
                result.push('?');
                embedded = false;
                idx += 1;
            }
            _ => {
                result.push('\\');
                result.push(c);
                embedded = true;
                idx += 1;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbind_fs_preserves_escaped_question_mark() {
        let wfn = unbind_fs("cpe:2.3:a:micr\\?osoft:internet_explorer:8.0.6001:beta:*:*:*:*:*:*")
            .unwrap();
        assert_eq!(wfn.get(Attribute::Vendor).as_quoted(), Some("micr\\?osoft"));
        assert_eq!(wfn.get(Attribute::Version).as_quoted(), Some("8\\.0\\.6001"));
        for attribute in PACKED_ATTRIBUTES {
            assert!(wfn.get(attribute).is_any(), "{attribute}");
        }
        assert!(wfn.get(Attribute::Language).is_any());
    }

    #[test]
    fn unbind_fs_na_and_case() {
        let wfn = unbind_fs("cpe:2.3:o:Linux:linux_kernel:-:*:*:*:*:*:*:*").unwrap();
        // Formatted String은 대소문자를 유지
        assert_eq!(wfn.get(Attribute::Vendor).as_quoted(), Some("Linux"));
        assert!(wfn.get(Attribute::Version).is_na());
    }

    #[test]
    fn unbind_fs_rejects_bad_structure() {
        assert!(unbind_fs("cpe:2.3:a:b:c").is_err());
        assert!(unbind_fs("cpe:/a:b:c").is_err());
    }

    #[test]
    fn unbind_fs_rejects_na_part() {
        let err = unbind_fs("cpe:2.3:-:a:b:*:*:*:*:*:*:*:*").unwrap_err();
        assert!(matches!(err, NamingError::Validation { .. }));
    }

    #[test]
    fn unbind_uri_ie8() {
        let wfn = unbind_uri("cpe:/a:microsoft:internet_explorer:8.0.6001:beta::sp2").unwrap();
        assert_eq!(wfn.get(Attribute::Part).as_quoted(), Some("a"));
        assert_eq!(wfn.get(Attribute::Version).as_quoted(), Some("8\\.0\\.6001"));
        assert!(wfn.get(Attribute::Edition).is_any());
        assert_eq!(wfn.get(Attribute::Language).as_quoted(), Some("sp2"));
    }

    #[test]
    fn unbind_uri_lowercases() {
        let wfn = unbind_uri("CPE:/A:Microsoft").unwrap();
        assert_eq!(wfn.get(Attribute::Part).as_quoted(), Some("a"));
        assert_eq!(wfn.get(Attribute::Vendor).as_quoted(), Some("microsoft"));
    }

    #[test]
    fn unbind_uri_unpacks_editions() {
        let wfn = unbind_uri("cpe:/a:hp:insight_diagnostics:7.4.0.1570::~~online~win2003~x64~")
            .unwrap();
        assert!(wfn.get(Attribute::Edition).is_any());
        assert_eq!(wfn.get(Attribute::SwEdition).as_quoted(), Some("online"));
        assert_eq!(wfn.get(Attribute::TargetSw).as_quoted(), Some("win2003"));
        assert_eq!(wfn.get(Attribute::TargetHw).as_quoted(), Some("x64"));
        assert!(wfn.get(Attribute::Other).is_any());
    }

    #[test]
    fn unbind_uri_short_packed_edition() {
        let wfn = unbind_uri("cpe:/a:foo:bar:1::~pro~x").unwrap();
        assert_eq!(wfn.get(Attribute::Edition).as_quoted(), Some("pro"));
        assert_eq!(wfn.get(Attribute::SwEdition).as_quoted(), Some("x"));
        assert!(wfn.get(Attribute::TargetSw).is_any());
    }

    #[test]
    fn unbind_uri_rejects_missing_slash() {
        assert!(unbind_uri("cpe:a:foo").is_err());
    }

    #[test]
    fn unbind_uri_accepts_bare_prefix() {
        let wfn = unbind_uri("cpe:/").unwrap();
        assert!(wfn.iter().all(|(_, v)| v.is_any()));
    }

    #[test]
    fn decode_logical_values() {
        assert_eq!(decode("").unwrap(), AttributeValue::Any);
        assert_eq!(decode("-").unwrap(), AttributeValue::NotApplicable);
    }

    #[test]
    fn decode_escapes_and_percent_forms() {
        assert_eq!(
            decode("8.0-rc~1").unwrap(),
            AttributeValue::Quoted("8\\.0\\-rc\\~1".to_owned())
        );
        assert_eq!(
            decode("at%26t").unwrap(),
            AttributeValue::Quoted("at\\&t".to_owned())
        );
        assert_eq!(
            decode("AT%26T").unwrap(),
            AttributeValue::Quoted("at\\&t".to_owned())
        );
    }

    #[test]
    fn decode_wildcards_at_edges() {
        assert_eq!(decode("%02foo").unwrap(), AttributeValue::Quoted("*foo".to_owned()));
        assert_eq!(decode("foo%02").unwrap(), AttributeValue::Quoted("foo*".to_owned()));
        assert_eq!(decode("%01%01ab").unwrap(), AttributeValue::Quoted("??ab".to_owned()));
        assert_eq!(decode("ab%01%01").unwrap(), AttributeValue::Quoted("ab??".to_owned()));
    }

    #[test]
    fn decode_rejects_embedded_wildcards() {
        assert!(decode("fo%02o").is_err());
        assert!(decode("fo%01o").is_err());
    }

    #[test]
    fn decode_rejects_bad_percent_forms() {
        assert!(decode("foo%2").is_err());
        assert!(decode("foo%2e").is_err());
    }

    #[test]
    fn decode_rejects_raw_punctuation() {
        let err = decode("at&t").unwrap_err();
        assert!(matches!(err, NamingError::Parse { .. }));
        assert!(err.to_string().contains("must be percent-encoded"));
        assert!(decode("foo!").is_err());
        assert!(decode("caf\u{e9}").is_err());
        assert_eq!(decode("rc_1").unwrap(), AttributeValue::Quoted("rc_1".to_owned()));
    }

    #[test]
    fn unbind_uri_rejects_raw_punctuation_as_parse_error() {
        let err = unbind_uri("cpe:/a:at&t").unwrap_err();
        assert!(matches!(err, NamingError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn add_quoting_escapes_punctuation() {
        assert_eq!(add_quoting("8.0.6001").unwrap(), "8\\.0\\.6001");
        assert_eq!(add_quoting("micr\\?osoft").unwrap(), "micr\\?osoft");
        assert_eq!(add_quoting("foo*").unwrap(), "foo*");
        assert_eq!(add_quoting("??sp1").unwrap(), "??sp1");
        assert_eq!(add_quoting("sp??").unwrap(), "sp??");
    }

    #[test]
    fn add_quoting_rejects_misplaced_wildcards() {
        assert!(add_quoting("fo*o").is_err());
        assert!(add_quoting("s?p").is_err());
        assert!(add_quoting("abc\\").is_err());
    }

    #[test]
    fn length_limit_is_enforced() {
        let unbinder = Unbinder::new(NamingOptions {
            max_name_length: 16,
            ..NamingOptions::default()
        });
        let err = unbinder
            .unbind_fs("cpe:2.3:a:microsoft:internet_explorer:*:*:*:*:*:*:*:*")
            .unwrap_err();
        assert!(err.to_string().contains("limit is 16"));
        assert!(unbinder.unbind_uri("cpe:/a:microsoft:ie").is_err());
        unbinder.unbind_uri("cpe:/a:ms").unwrap();
    }
}
