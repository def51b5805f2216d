//! Well-Formed Name -- 11개 속성의 검증된 레코드
//!
//! [`Wfn`]의 모든 슬롯은 항상 값을 가지며 (기본값 ANY), 문자열 값은 대입 시점에
//! 검증됩니다. 검증에 실패하면 슬롯은 변경되지 않습니다.
//!
//! # 문자열 값 규칙
//!
//! 저장되는 문자열은 이스케이프된 내부 표현입니다 (예: `8\.0\.6001`).
//!
//! - 영숫자와 `_`는 그대로 허용
//! - `\`는 항상 다음 문자와 한 쌍으로 소비 (다음 문자는 출력 가능한 ASCII)
//! - 이스케이프되지 않은 `*`는 맨 앞 또는 맨 뒤에만, 단독 `*`와 연속 `**`는 불가
//! - 이스케이프되지 않은 `?`는 앞쪽 또는 뒤쪽 연속 구간에만
//! - 공백, 이스케이프되지 않은 문장부호, 단독 `\-`는 불가
//! - `part`는 `a`, `o`, `h` 중 하나이며 논리값을 대입할 수 없음

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::binder;
use crate::config::NamingOptions;
use crate::error::NamingError;
use crate::types::{Attribute, AttributeInput, AttributeValue};
use crate::unbinder;
use crate::util::is_alphanum_char;

static ANY: AttributeValue = AttributeValue::Any;

/// CPE Well-Formed Name
///
/// 구조적 동등성(`PartialEq`)은 제공하지 않습니다.
/// 두 이름의 관계는 매처로만 판단합니다.
#[derive(Debug, Clone, Default)]
pub struct Wfn {
    values: [AttributeValue; 11],
}

impl Wfn {
    /// 모든 속성이 ANY인 WFN을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 위치 순서대로 최대 11개의 값으로 WFN을 생성합니다.
    ///
    /// 지정하지 않은 뒤쪽 속성과 `Unset`/빈 문자열은 ANY가 됩니다.
    pub fn with_values<I, V>(values: I) -> Result<Self, NamingError>
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeInput>,
    {
        let mut wfn = Self::new();
        let mut values = values.into_iter();
        for attribute in Attribute::ALL {
            match values.next() {
                Some(value) => wfn.set(attribute, value)?,
                None => return Ok(wfn),
            }
        }
        if values.next().is_some() {
            return Err(NamingError::Validation {
                attribute: "wfn".to_owned(),
                value: String::new(),
                reason: "at most 11 attribute values allowed".to_owned(),
            });
        }
        Ok(wfn)
    }

    /// CPE 문자열을 형식에 맞게 언바인딩합니다.
    ///
    /// `cpe:2.3:`로 시작하면 Formatted String, `cpe:/`로 시작하면 URI로 처리합니다
    /// (대소문자 무시).
    pub fn parse(s: &str) -> Result<Self, NamingError> {
        let head = s.as_bytes().get(..8).unwrap_or(s.as_bytes());
        if head.eq_ignore_ascii_case(b"cpe:2.3:") {
            unbinder::unbind_fs(s)
        } else if head.len() >= 5 && head[..5].eq_ignore_ascii_case(b"cpe:/") {
            unbinder::unbind_uri(s)
        } else {
            Err(NamingError::parse(
                s,
                "expected a 'cpe:2.3:' formatted string or a 'cpe:/' URI",
            ))
        }
    }

    pub fn get(&self, attribute: Attribute) -> &AttributeValue {
        &self.values[attribute.index()]
    }

    /// 속성 이름으로 값을 조회합니다. 알 수 없는 이름이면 ANY.
    pub fn get_by_name(&self, name: &str) -> &AttributeValue {
        match name.parse::<Attribute>() {
            Ok(attribute) => self.get(attribute),
            Err(_) => &ANY,
        }
    }

    /// 속성 값을 검증 후 대입합니다.
    ///
    /// # Errors
    ///
    /// 값이 불변식을 위반하면 `NamingError::Validation`을 반환하며
    /// 기존 값은 그대로 유지됩니다.
    pub fn set(
        &mut self,
        attribute: Attribute,
        value: impl Into<AttributeInput>,
    ) -> Result<(), NamingError> {
        let value = normalize(attribute, value.into())?;
        self.values[attribute.index()] = value;
        Ok(())
    }

    /// [`set`](Self::set)의 체이닝 버전
    pub fn with(
        mut self,
        attribute: Attribute,
        value: impl Into<AttributeInput>,
    ) -> Result<Self, NamingError> {
        self.set(attribute, value)?;
        Ok(self)
    }

    /// 속성 이름으로 값을 대입합니다.
    ///
    /// 알 수 없는 이름은 무시합니다 (no-op).
    pub fn set_by_name(
        &mut self,
        name: &str,
        value: impl Into<AttributeInput>,
    ) -> Result<(), NamingError> {
        self.set_by_name_with(name, value, &NamingOptions::default())
    }

    /// 옵션에 따라 속성 이름으로 값을 대입합니다.
    ///
    /// `strict_attribute_names`가 켜져 있으면 알 수 없는 이름에
    /// `NamingError::UnknownAttribute`를 반환합니다.
    pub fn set_by_name_with(
        &mut self,
        name: &str,
        value: impl Into<AttributeInput>,
        options: &NamingOptions,
    ) -> Result<(), NamingError> {
        match name.parse::<Attribute>() {
            Ok(attribute) => self.set(attribute, value),
            Err(err) if options.strict_attribute_names => Err(err),
            Err(_) => {
                debug!(attribute = name, "ignoring unknown attribute name");
                Ok(())
            }
        }
    }

    /// 고정 순서로 (속성, 값) 쌍을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &AttributeValue)> {
        Attribute::ALL.into_iter().zip(self.values.iter())
    }

    /// CPE 2.2 URI로 바인딩합니다.
    pub fn to_uri(&self) -> String {
        binder::bind_to_uri(self)
    }

    /// CPE 2.3 Formatted String으로 바인딩합니다.
    pub fn to_fs(&self) -> String {
        binder::bind_to_fs(self)
    }
}

fn normalize(attribute: Attribute, input: AttributeInput) -> Result<AttributeValue, NamingError> {
    match input {
        AttributeInput::Unset => Ok(AttributeValue::Any),
        AttributeInput::Text(text) if text.is_empty() => Ok(AttributeValue::Any),
        AttributeInput::Logical(logical) => {
            if attribute == Attribute::Part {
                return Err(NamingError::Validation {
                    attribute: attribute.as_str().to_owned(),
                    value: logical.to_string(),
                    reason: "part cannot hold a logical value".to_owned(),
                });
            }
            Ok(logical.into())
        }
        AttributeInput::Text(text) => {
            validate_quoted(attribute, &text)?;
            Ok(AttributeValue::Quoted(text))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Plain,
    Escaped,
    Star,
    Question,
}

fn tokenize(value: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '\\' => match chars.next() {
                Some(escaped) if escaped.is_ascii_graphic() => Token::Escaped,
                Some(escaped) => return Err(format!("cannot escape {escaped:?}")),
                None => return Err("dangling escape character at end of value".to_owned()),
            },
            '*' => Token::Star,
            '?' => Token::Question,
            c if is_alphanum_char(c) => Token::Plain,
            c => return Err(format!("unquoted character {c:?} must be escaped")),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

fn validate_quoted(attribute: Attribute, value: &str) -> Result<(), NamingError> {
    let invalid = |reason: String| NamingError::Validation {
        attribute: attribute.as_str().to_owned(),
        value: value.to_owned(),
        reason,
    };

    if attribute == Attribute::Part {
        return match value {
            "a" | "o" | "h" => Ok(()),
            _ => Err(invalid("part must be one of 'a', 'o', 'h'".to_owned())),
        };
    }

    if value.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace".to_owned()));
    }
    if value == "*" {
        return Err(invalid("a lone '*' must be expressed as ANY".to_owned()));
    }
    if value == "\\-" {
        return Err(invalid("a lone quoted hyphen is not a valid value".to_owned()));
    }

    let tokens = tokenize(value).map_err(invalid)?;
    let n = tokens.len();
    let leading = tokens.iter().take_while(|t| **t == Token::Question).count();
    let trailing = tokens.iter().rev().take_while(|t| **t == Token::Question).count();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Star => {
                if i != 0 && i != n - 1 {
                    return Err(invalid(
                        "unquoted '*' is only allowed at the beginning or end".to_owned(),
                    ));
                }
                if tokens.get(i + 1) == Some(&Token::Star) {
                    return Err(invalid("consecutive unquoted '*'".to_owned()));
                }
            }
            Token::Question if i >= leading && i < n - trailing => {
                return Err(invalid(
                    "unquoted '?' must form a leading or trailing run".to_owned(),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

impl fmt::Display for Wfn {
    /// `wfn:[part="a", vendor="microsoft", ..., other=ANY]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("wfn:[")?;
        for (i, (attribute, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{attribute}={value}")?;
        }
        f.write_str("]")
    }
}

impl FromStr for Wfn {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Wfn {
    /// Formatted String 바인딩으로 직렬화합니다.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_fs())
    }
}

impl<'de> Deserialize<'de> for Wfn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        unbinder::unbind_fs(&s).map_err(serde::de::Error::custom)
    }
}
