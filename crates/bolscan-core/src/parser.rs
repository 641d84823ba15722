//! 모델 응답 파싱.
//!
//! 1. 코드 펜스(```json ... ```) 제거 후 엄격한 JSON 파싱
//! 2. 실패 시 필드별 정규식으로 독립 추출: 한 필드의 실패가 다른 필드에 영향 없음
//!
//! 파싱은 절대 에러를 반환하지 않는다. 최악의 경우 모든 필드가 `None`이다.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::{ExtractedFields, ModelCompletion, ParsedCompletion};

static BOL_NUMBER_RE: Lazy<Regex> = Lazy::new(|| field_regex("bolNumber"));
static WEIGHT_RE: Lazy<Regex> = Lazy::new(|| field_regex("weight"));
static WEIGHT_TYPE_RE: Lazy<Regex> = Lazy::new(|| field_regex("weightType"));

/// `"field": "value"` 형태를 잡는 정규식
fn field_regex(field: &str) -> Regex {
    let pattern = format!(r#""{}"\s*:\s*"([^"]+)""#, regex::escape(field));
    Regex::new(&pattern).expect("필드 이름은 이스케이프되므로 정규식은 항상 유효")
}

/// 응답 앞뒤의 코드 펜스 제거
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        // 여는 펜스의 언어 태그(json 등)는 첫 줄 끝까지
        body = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

/// 모델 응답을 추출 필드로 변환
pub fn parse_completion(completion: &ModelCompletion) -> ParsedCompletion {
    let body = strip_code_fences(completion.as_str());

    match parse_strict(body) {
        Some(fields) => ParsedCompletion::Structured(fields),
        None => ParsedCompletion::BestEffort(extract_with_patterns(completion.as_str())),
    }
}

/// 엄격한 JSON 파싱: 객체가 아니면 None
fn parse_strict(body: &str) -> Option<ExtractedFields> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    Some(ExtractedFields {
        bol_number: object.get("bolNumber").and_then(scalar_to_string),
        weight: object.get("weight").and_then(scalar_to_string),
        weight_type: object.get("weightType").and_then(scalar_to_string),
    })
}

/// JSON 스칼라 → 문자열 (null/배열/객체는 None)
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// 원문 응답에서 필드별 정규식 추출
fn extract_with_patterns(raw: &str) -> ExtractedFields {
    let capture = |re: &Regex| re.captures(raw).map(|c| c[1].to_string());

    ExtractedFields {
        bol_number: capture(&BOL_NUMBER_RE),
        weight: capture(&WEIGHT_RE),
        weight_type: capture(&WEIGHT_TYPE_RE),
    }
}
