//! 애플리케이션 설정 구조체.
//!
//! 서버 포트, 허용 Origin, 업로드 제한, OCR 엔진, 비전 LLM 자격증명 등
//! 런타임 설정을 정의한다. 프로세스 시작 시 한 번 로드되어 불변으로 공유된다.
//! 로딩은 [`crate::config_loader`] 참고.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// CORS 허용 Origin
    #[serde(default)]
    pub cors: CorsConfig,
    /// 업로드 수락 설정
    #[serde(default)]
    pub upload: UploadConfig,
    /// OCR 엔진 설정
    #[serde(default)]
    pub ocr: OcrConfig,
    /// 비전 LLM 설정
    #[serde(default)]
    pub llm: LlmConfig,
    /// CLI 클라이언트 설정
    #[serde(default)]
    pub client: ClientConfig,
}

// ============================================================
// 서버 / CORS
// ============================================================

/// HTTP 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 바인드 주소
    #[serde(default = "default_host")]
    pub host: String,
    /// 리스닝 포트 (기본: 5000)
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// CORS 설정: 허용 목록 외 Origin은 전송 계층에서 거부된다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// 허용 Origin 목록 (예: "http://localhost:3000")
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

// ============================================================
// 업로드
// ============================================================

/// 업로드 수락 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 최대 업로드 크기 (bytes, 기본: 10MB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: u64,
    /// 임시 업로드 디렉토리
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
    /// 이미지가 담긴 multipart 필드 이름
    #[serde(default = "default_field_name")]
    pub field_name: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_upload_bytes(),
            scratch_dir: default_scratch_dir(),
            field_name: default_field_name(),
        }
    }
}

impl UploadConfig {
    /// 최대 크기를 MB 단위로 (에러 메시지용)
    pub fn max_megabytes(&self) -> u64 {
        (self.max_bytes / (1024 * 1024)).max(1)
    }
}

// ============================================================
// OCR
// ============================================================

/// OCR 엔진 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngine {
    /// `tesseract` 실행 파일 호출 (기본값)
    #[default]
    Cli,
    /// leptess 바인딩 (`ocr` feature 필요)
    Leptess,
}

/// OCR 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// 엔진 종류
    #[serde(default)]
    pub engine: OcrEngine,
    /// 고정 언어 프로필 (Tesseract 언어 코드)
    #[serde(default = "default_ocr_language")]
    pub language: String,
    /// tesseract 실행 파일 경로 (engine=cli)
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,
    /// tessdata 경로 (None이면 시스템 기본값)
    #[serde(default)]
    pub tessdata_path: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngine::default(),
            language: default_ocr_language(),
            tesseract_cmd: default_tesseract_cmd(),
            tessdata_path: None,
        }
    }
}

// ============================================================
// 비전 LLM
// ============================================================

/// AI API 제공자 타입: 요청/응답 형식 및 인증 헤더 결정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderType {
    /// Anthropic Claude API: `x-api-key` 헤더 + `/v1/messages` 형식
    #[default]
    Anthropic,
    /// OpenAI 호환 API: `Authorization: Bearer` 헤더 + `/v1/chat/completions` 형식
    OpenAi,
}

/// 호스팅 비전 LLM 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// 제공자 타입
    #[serde(default)]
    pub provider_type: AiProviderType,
    /// API URL
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    /// API 키 (환경변수 `BOLSCAN_LLM_API_KEY` 권장)
    #[serde(default)]
    pub api_key: String,
    /// 모델 이름
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// 최대 응답 토큰
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// 샘플링 온도 (낮을수록 결정적)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// 요청 타임아웃 (초): None이면 HTTP 클라이언트 기본값
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_type: AiProviderType::default(),
            endpoint: default_llm_endpoint(),
            api_key: String::new(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// 설정된 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// ============================================================
// 클라이언트
// ============================================================

/// CLI 업로드 클라이언트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 추출 서비스 기본 URL
    #[serde(default = "default_client_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_client_base_url(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 서버 구동 전 필수 설정 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.server.port == 0 {
            return Err(validation("server.port", "0은 사용할 수 없음"));
        }
        if self.upload.max_bytes == 0 {
            return Err(validation("upload.max_bytes", "0보다 커야 함"));
        }
        if self.upload.field_name.trim().is_empty() {
            return Err(validation("upload.field_name", "비어 있음"));
        }
        if self.llm.endpoint.trim().is_empty() {
            return Err(validation("llm.endpoint", "비어 있음"));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(CoreError::Config(
                "비전 LLM API 키 미설정. BOLSCAN_LLM_API_KEY 환경변수를 지정하세요.".into(),
            ));
        }
        if self.ocr.language.trim().is_empty() {
            return Err(validation("ocr.language", "비어 있음"));
        }
        Ok(())
    }

    /// 바인드 주소 문자열 ("host:port")
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn validation(field: &str, message: &str) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
        "http://localhost:5000".to_string(),
    ]
}
fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}
fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("bolscan-uploads")
}
fn default_field_name() -> String {
    "image".to_string()
}
fn default_ocr_language() -> String {
    "eng".to_string()
}
fn default_tesseract_cmd() -> String {
    "tesseract".to_string()
}
fn default_llm_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}
fn default_llm_model() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}
fn default_max_tokens() -> u32 {
    500
}
fn default_temperature() -> f32 {
    0.1
}
fn default_client_base_url() -> String {
    "http://localhost:5000".to_string()
}
