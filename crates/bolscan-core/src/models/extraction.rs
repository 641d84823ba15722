//! BOL 추출 모델.
//!
//! 요청 1건당 하나의 `ExtractionResult`가 만들어지며, 어디에도 저장되지 않는다.

use serde::{Deserialize, Serialize};

/// 응답에 포함되는 OCR 원문 최대 길이 (문자 수)
pub const RAW_OCR_PREVIEW_CHARS: usize = 500;

/// 모델이 추출한 세 필드
///
/// 각 필드는 독립적으로 `None`일 수 있다 (JSON `null`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    /// BOL 번호
    #[serde(default)]
    pub bol_number: Option<String>,
    /// 중량 (단위 포함 원문, 예: "500 lbs")
    #[serde(default)]
    pub weight: Option<String>,
    /// 중량 분류 (예: "Net Weight")
    #[serde(default)]
    pub weight_type: Option<String>,
}

impl ExtractedFields {
    /// BOL 번호와 중량이 모두 없으면 true
    pub fn is_empty(&self) -> bool {
        self.bol_number.is_none() && self.weight.is_none()
    }
}

/// 추출 결과: HTTP 응답의 `data` 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub fields: ExtractedFields,
    /// OCR 원문 앞 500자
    pub raw_ocr_text: String,
}

impl ExtractionResult {
    /// 추출 필드와 OCR 원문으로 결과 생성
    ///
    /// OCR 원문은 가공 없이 앞 `RAW_OCR_PREVIEW_CHARS`자만 남긴다.
    /// 바이트가 아닌 문자 단위로 자르므로 멀티바이트 문자도 안전하다.
    pub fn new(fields: ExtractedFields, raw_ocr_text: &str) -> Self {
        Self {
            fields,
            raw_ocr_text: raw_ocr_text.chars().take(RAW_OCR_PREVIEW_CHARS).collect(),
        }
    }
}

/// 업로드된 이미지 (요청 수명 동안만 존재)
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// 클라이언트가 보낸 원본 파일 이름
    pub file_name: String,
    /// 선언된 MIME 타입
    pub content_type: String,
    /// 원본 바이트
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// 바이트 크기
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 비전 LLM의 원시 텍스트 응답
///
/// 올바른 JSON일 수도, 아닐 수도 있다. 파싱 후 바로 버려진다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCompletion(pub String);

impl ModelCompletion {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ModelCompletion {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for ModelCompletion {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// 모델 응답 파싱 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCompletion {
    /// 엄격한 JSON 파싱 성공
    Structured(ExtractedFields),
    /// JSON 파싱 실패 → 필드별 정규식 추출 (부분 결과 가능)
    BestEffort(ExtractedFields),
}

impl ParsedCompletion {
    /// 파싱 방식과 무관하게 필드 반환
    pub fn into_fields(self) -> ExtractedFields {
        match self {
            ParsedCompletion::Structured(fields) | ParsedCompletion::BestEffort(fields) => fields,
        }
    }

    /// 파싱 방식 이름 (로그용)
    pub fn mode(&self) -> &'static str {
        match self {
            ParsedCompletion::Structured(_) => "structured",
            ParsedCompletion::BestEffort(_) => "best-effort",
        }
    }
}
