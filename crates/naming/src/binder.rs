//! 바인더 -- WFN을 CPE 2.2 URI / CPE 2.3 Formatted String으로 변환
//!
//! 두 바인딩 모두 실패하지 않습니다. [`Wfn`]은 대입 시점에 검증되므로
//! 바인딩 단계에서 다시 검사하지 않습니다.

use crate::types::{Attribute, AttributeValue};
use crate::util::{is_alphanum_char, percent_encode};
use crate::wfn::Wfn;

/// URI에 직접 들어가는 속성 (edition 자리는 5개 속성을 묶어서 표현)
const URI_ATTRIBUTES: [Attribute; 7] = [
    Attribute::Part,
    Attribute::Vendor,
    Attribute::Product,
    Attribute::Version,
    Attribute::Update,
    Attribute::Edition,
    Attribute::Language,
];

/// WFN을 CPE 2.2 URI로 바인딩합니다.
///
/// 끝의 빈 컴포넌트는 제거됩니다.
///
/// ```
/// use cpekit_naming::{Wfn, AttributeInput, LogicalValue, bind_to_uri};
///
/// let wfn = Wfn::with_values([
///     AttributeInput::from("a"),
///     "microsoft".into(),
///     "internet_explorer".into(),
///     "8\\.0\\.6001".into(),
///     "beta".into(),
///     LogicalValue::Any.into(),
///     "sp2".into(),
/// ])
/// .unwrap();
/// assert_eq!(bind_to_uri(&wfn), "cpe:/a:microsoft:internet_explorer:8.0.6001:beta::sp2");
/// ```
pub fn bind_to_uri(wfn: &Wfn) -> String {
    let mut uri = String::from("cpe:/");
    for attribute in URI_ATTRIBUTES {
        let component = if attribute == Attribute::Edition {
            pack_editions(wfn)
        } else {
            bind_value_for_uri(wfn.get(attribute))
        };
        uri.push_str(&component);
        uri.push(':');
    }
    let trimmed = uri.trim_end_matches(':').len();
    uri.truncate(trimmed);
    uri
}

/// WFN을 CPE 2.3 Formatted String으로 바인딩합니다.
///
/// 항상 `cpe:2.3:` 뒤에 11개 컴포넌트가 옵니다.
pub fn bind_to_fs(wfn: &Wfn) -> String {
    let mut fs = String::from("cpe:2.3");
    for (_, value) in wfn.iter() {
        fs.push(':');
        fs.push_str(&bind_value_for_fs(value));
    }
    fs
}

/// edition 자리 값. 확장 속성이 모두 비어 있으면 edition만 사용합니다.
fn pack_editions(wfn: &Wfn) -> String {
    let edition = bind_value_for_uri(wfn.get(Attribute::Edition));
    let sw_edition = bind_value_for_uri(wfn.get(Attribute::SwEdition));
    let target_sw = bind_value_for_uri(wfn.get(Attribute::TargetSw));
    let target_hw = bind_value_for_uri(wfn.get(Attribute::TargetHw));
    let other = bind_value_for_uri(wfn.get(Attribute::Other));

    if sw_edition.is_empty() && target_sw.is_empty() && target_hw.is_empty() && other.is_empty()
    {
        return edition;
    }
    format!("~{edition}~{sw_edition}~{target_sw}~{target_hw}~{other}")
}

fn bind_value_for_uri(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Any => String::new(),
        AttributeValue::NotApplicable => "-".to_owned(),
        AttributeValue::Quoted(s) => transform_for_uri(s),
    }
}

/// 이스케이프된 문자는 퍼센트 인코딩, 와일드카드는 `%01`/`%02`로 변환합니다.
fn transform_for_uri(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            c if is_alphanum_char(c) => result.push(c),
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_encoded(&mut result, escaped);
                }
            }
            '?' => result.push_str("%01"),
            '*' => result.push_str("%02"),
            // 검증된 값에는 나오지 않음. 버리지 않고 이스케이프된 문자와 같이 인코딩
            other => push_encoded(&mut result, other),
        }
    }
    result
}

fn push_encoded(result: &mut String, c: char) {
    match percent_encode(c) {
        Some(code) => result.push_str(code),
        // `.`, `-`, `_`는 URI에서 그대로 사용
        None => result.push(c),
    }
}

fn bind_value_for_fs(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Any => "*".to_owned(),
        AttributeValue::NotApplicable => "-".to_owned(),
        AttributeValue::Quoted(s) => process_quoted_chars(s),
    }
}

/// `\.`, `\-`, `\_`만 이스케이프를 해제하고 나머지는 유지합니다.
fn process_quoted_chars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(next @ ('.' | '-' | '_')) => result.push(next),
            Some(next) => {
                result.push('\\');
                result.push(next);
            }
            None => result.push('\\'),
        }
    }
    result
}
