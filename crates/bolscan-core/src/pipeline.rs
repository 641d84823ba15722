//! 추출 파이프라인: OCR → 지시문 → 비전 LLM → 응답 파싱.
//!
//! 요청마다 독립적으로 실행되며 공유 가변 상태가 없다.
//! 재시도하지 않는다. 임시 파일 수명은 호출자(web)가 관리한다.

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::models::{ExtractionResult, UploadedImage};
use crate::parser::parse_completion;
use crate::ports::llm_provider::{VisionLlmProvider, VisionRequest};
use crate::ports::ocr_provider::OcrProvider;
use crate::prompt::build_extraction_prompt;

/// 파이프라인 단계별 실패
///
/// 외부 응답 형태는 동일하지만 로그에서 단계를 구분하기 위해 나눈다.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// OCR 엔진 실패
    #[error("{0}")]
    Ocr(CoreError),

    /// 비전 LLM 호출 실패
    #[error("{0}")]
    Model(CoreError),
}

impl ExtractionError {
    /// 실패 단계 이름 (로그용)
    pub fn stage(&self) -> &'static str {
        match self {
            ExtractionError::Ocr(_) => "ocr",
            ExtractionError::Model(_) => "model",
        }
    }
}

/// 추출 파이프라인
#[derive(Clone)]
pub struct ExtractionPipeline {
    ocr: Arc<dyn OcrProvider>,
    llm: Arc<dyn VisionLlmProvider>,
}

impl ExtractionPipeline {
    /// 새 파이프라인 생성
    pub fn new(ocr: Arc<dyn OcrProvider>, llm: Arc<dyn VisionLlmProvider>) -> Self {
        Self { ocr, llm }
    }

    /// 저장된 이미지 파일에 대해 추출 실행
    ///
    /// - `image_path`: 임시 저장된 업로드 파일 (OCR 입력)
    /// - `image`: 같은 업로드의 원본 바이트 (LLM 인라인 이미지)
    pub async fn run(
        &self,
        image_path: &Path,
        image: &UploadedImage,
    ) -> Result<ExtractionResult, ExtractionError> {
        debug!(
            provider = self.ocr.provider_name(),
            path = %image_path.display(),
            "OCR 시작"
        );
        let ocr_text = self
            .ocr
            .recognize(image_path)
            .await
            .map_err(ExtractionError::Ocr)?;
        debug!(chars = ocr_text.chars().count(), "OCR 완료");

        let request = VisionRequest {
            prompt: build_extraction_prompt(&ocr_text),
            image_base64: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
            media_type: image.content_type.clone(),
        };

        debug!(model = self.llm.provider_name(), "비전 LLM 호출");
        let completion = self
            .llm
            .complete(&request)
            .await
            .map_err(ExtractionError::Model)?;

        let parsed = parse_completion(&completion);
        info!(
            mode = parsed.mode(),
            file = %image.file_name,
            "모델 응답 파싱 완료"
        );

        Ok(ExtractionResult::new(parsed.into_fields(), &ocr_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelCompletion;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeOcr {
        result: Result<String, String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OcrProvider for FakeOcr {
        async fn recognize(&self, _image_path: &Path) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map_err(CoreError::OcrError)
        }

        fn provider_name(&self) -> &str {
            "fake-ocr"
        }
    }

    struct FakeLlm {
        reply: Result<String, String>,
        seen: Mutex<Vec<VisionRequest>>,
    }

    #[async_trait]
    impl VisionLlmProvider for FakeLlm {
        async fn complete(&self, request: &VisionRequest) -> Result<ModelCompletion, CoreError> {
            self.seen.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .map(ModelCompletion::from)
                .map_err(CoreError::Network)
        }

        fn provider_name(&self) -> &str {
            "fake-llm"
        }
    }

    fn fixtures(
        ocr: Result<&str, &str>,
        reply: Result<&str, &str>,
    ) -> (Arc<FakeOcr>, Arc<FakeLlm>, ExtractionPipeline) {
        let ocr = Arc::new(FakeOcr {
            result: ocr.map(str::to_string).map_err(str::to_string),
            calls: AtomicUsize::new(0),
        });
        let llm = Arc::new(FakeLlm {
            reply: reply.map(str::to_string).map_err(str::to_string),
            seen: Mutex::new(Vec::new()),
        });
        let pipeline = ExtractionPipeline::new(ocr.clone(), llm.clone());
        (ocr, llm, pipeline)
    }

    fn image() -> UploadedImage {
        UploadedImage {
            file_name: "bol.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: b"\x89PNG fake".to_vec(),
        }
    }

    #[tokio::test]
    async fn successful_run_combines_fields_and_ocr_text() {
        let ocr_text = "BOL 555\nNet Weight: 500 lbs\nGross Weight: 600 lbs";
        let (_, llm, pipeline) = fixtures(
            Ok(ocr_text),
            Ok(r#"{"bolNumber":"555","weight":"500 lbs","weightType":"Net Weight"}"#),
        );

        let result = pipeline.run(Path::new("/tmp/x.png"), &image()).await.unwrap();
        assert_eq!(result.fields.bol_number.as_deref(), Some("555"));
        assert_eq!(result.fields.weight_type.as_deref(), Some("Net Weight"));
        assert_eq!(result.raw_ocr_text, ocr_text);

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].prompt.contains(ocr_text));
        assert_eq!(seen[0].media_type, "image/png");
        assert_eq!(
            seen[0].image_base64,
            base64::engine::general_purpose::STANDARD.encode(b"\x89PNG fake")
        );
    }

    #[tokio::test]
    async fn raw_ocr_text_is_first_500_chars_of_engine_output() {
        let long = "x".repeat(750);
        let (_, _, pipeline) = fixtures(Ok(&long), Ok("not json"));
        let result = pipeline.run(Path::new("/tmp/x.png"), &image()).await.unwrap();
        assert_eq!(result.raw_ocr_text.len(), 500);
        assert_eq!(result.raw_ocr_text, long[..500]);
    }

    #[tokio::test]
    async fn unparseable_reply_is_not_an_error() {
        let (_, _, pipeline) = fixtures(Ok("text"), Ok("I could not find anything."));
        let result = pipeline.run(Path::new("/tmp/x.png"), &image()).await.unwrap();
        assert!(result.fields.is_empty());
    }

    #[tokio::test]
    async fn ocr_failure_skips_model_call() {
        let (ocr, llm, pipeline) = fixtures(Err("tesseract crashed"), Ok("{}"));
        let err = pipeline
            .run(Path::new("/tmp/x.png"), &image())
            .await
            .unwrap_err();
        assert_matches!(err, ExtractionError::Ocr(_));
        assert_eq!(err.stage(), "ocr");
        assert!(err.to_string().contains("tesseract crashed"));
        assert_eq!(ocr.calls.load(Ordering::SeqCst), 1);
        assert!(llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn model_failure_is_reported_as_model_stage() {
        let (_, _, pipeline) = fixtures(Ok("text"), Err("connection refused"));
        let err = pipeline
            .run(Path::new("/tmp/x.png"), &image())
            .await
            .unwrap_err();
        assert_matches!(err, ExtractionError::Model(CoreError::Network(_)));
        assert_eq!(err.stage(), "model");
    }
}
