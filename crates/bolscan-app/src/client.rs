//! CLI 업로드 & 표시 클라이언트.
//!
//! 브라우저 페이지와 같은 흐름을 터미널에서 수행한다:
//! 이미지 여부 확인 → multipart 업로드 → 응답 해석 → 세 필드 출력.
//! 추출 로직은 없다.

use std::fmt;
use std::path::Path;

use bolscan_core::models::ExtractedFields;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

/// 업로드 필드 이름
pub const UPLOAD_FIELD: &str = "image";

/// 이미지가 아닌 파일 선택 시 메시지
pub const NOT_IMAGE_MESSAGE: &str = "Please select an image file.";

/// 결과가 비었을 때 안내 메시지
pub const NOTHING_FOUND_MESSAGE: &str = "No BOL number or weight found in the image.";

/// 서비스가 에러 문자열 없이 실패했을 때 메시지
const GENERIC_FAILURE_MESSAGE: &str = "Failed to process image";

/// 업로드 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientOutcome {
    /// 추출 성공 (필드가 모두 비어 있어도 성공)
    Extracted {
        fields: ExtractedFields,
        nothing_found: bool,
    },
    /// 서비스가 에러 응답을 보냄
    ServiceError(String),
    /// 연결 실패 또는 해석할 수 없는 응답
    TransportError(String),
    /// 요청 전에 거부됨
    Rejected(String),
}

impl ClientOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ClientOutcome::Extracted { .. })
    }
}

impl fmt::Display for ClientOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientOutcome::Extracted {
                fields,
                nothing_found,
            } => {
                writeln!(f, "BOL Number: {}", fields.bol_number.as_deref().unwrap_or(""))?;
                writeln!(f, "Weight: {}", fields.weight.as_deref().unwrap_or(""))?;
                write!(f, "Weight Type: {}", fields.weight_type.as_deref().unwrap_or(""))?;
                if *nothing_found {
                    write!(f, "\n{NOTHING_FOUND_MESSAGE}")?;
                }
                Ok(())
            }
            ClientOutcome::ServiceError(message) => write!(f, "{message}"),
            ClientOutcome::TransportError(detail) => {
                write!(f, "{GENERIC_FAILURE_MESSAGE}: {detail}")
            }
            ClientOutcome::Rejected(message) => write!(f, "{message}"),
        }
    }
}

/// 성공 응답 본문
#[derive(Debug, Deserialize)]
struct SuccessBody {
    success: bool,
    #[serde(default)]
    data: Option<ExtractedFields>,
}

/// 에러 응답 본문
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// 추출 서비스 업로드 클라이언트
pub struct SubmitClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmitClient {
    /// 새 클라이언트 생성
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/process-image", self.base_url)
    }

    /// 파일 경로로 업로드
    ///
    /// 확장자로 MIME을 추정하고, 이미지가 아니면 요청 없이 거부한다.
    pub async fn submit_file(&self, path: &Path) -> ClientOutcome {
        let content_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        if !content_type.starts_with("image/") {
            warn!(path = %path.display(), content_type, "이미지가 아닌 파일");
            return ClientOutcome::Rejected(NOT_IMAGE_MESSAGE.to_string());
        }

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return ClientOutcome::Rejected(format!(
                    "Cannot read {}: {e}",
                    path.display()
                ))
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        self.submit_bytes(&file_name, content_type, bytes).await
    }

    /// 바이트로 업로드
    pub async fn submit_bytes(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ClientOutcome {
        let part = match Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
        {
            Ok(part) => part,
            Err(e) => return ClientOutcome::Rejected(format!("Invalid content type: {e}")),
        };
        let form = Form::new().part(UPLOAD_FIELD, part);

        debug!(url = %self.endpoint(), file = file_name, "업로드 요청");
        let response = match self.http.post(self.endpoint()).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => return ClientOutcome::TransportError(e.to_string()),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => interpret_response(status.is_success(), &body),
            Err(e) => ClientOutcome::TransportError(e.to_string()),
        }
    }
}

/// 응답 상태/본문 → 결과
fn interpret_response(ok: bool, body: &str) -> ClientOutcome {
    if ok {
        return match serde_json::from_str::<SuccessBody>(body) {
            Ok(SuccessBody {
                success: true,
                data,
            }) => {
                let fields = data.unwrap_or_default();
                let nothing_found = fields.is_empty();
                ClientOutcome::Extracted {
                    fields,
                    nothing_found,
                }
            }
            Ok(_) => ClientOutcome::ServiceError(GENERIC_FAILURE_MESSAGE.to_string()),
            Err(e) => ClientOutcome::TransportError(format!("invalid response: {e}")),
        };
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: Some(error) }) => ClientOutcome::ServiceError(error),
        Ok(ErrorBody { error: None }) => {
            ClientOutcome::ServiceError(GENERIC_FAILURE_MESSAGE.to_string())
        }
        Err(e) => ClientOutcome::TransportError(format!("invalid response: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn success_with_fields() {
        let outcome = interpret_response(
            true,
            r#"{"success":true,"data":{"bolNumber":"12345","weight":"500 lbs","weightType":"Net Weight","rawOcrText":"..."}}"#,
        );
        assert_eq!(
            outcome,
            ClientOutcome::Extracted {
                fields: ExtractedFields {
                    bol_number: Some("12345".into()),
                    weight: Some("500 lbs".into()),
                    weight_type: Some("Net Weight".into()),
                },
                nothing_found: false,
            }
        );
    }

    #[test]
    fn success_without_fields_is_nothing_found() {
        let outcome = interpret_response(
            true,
            r#"{"success":true,"data":{"bolNumber":null,"weight":null,"weightType":"Gross Weight","rawOcrText":""}}"#,
        );
        match outcome {
            ClientOutcome::Extracted {
                fields,
                nothing_found,
            } => {
                assert!(nothing_found);
                assert_eq!(fields.weight_type.as_deref(), Some("Gross Weight"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn service_error_uses_error_string() {
        let outcome = interpret_response(
            false,
            r#"{"error":"Failed to process image","details":"OCR 에러: boom"}"#,
        );
        assert_eq!(
            outcome,
            ClientOutcome::ServiceError("Failed to process image".into())
        );
    }

    #[test]
    fn unparseable_body_is_transport_error() {
        let outcome = interpret_response(false, "<html>bad gateway</html>");
        assert!(matches!(outcome, ClientOutcome::TransportError(_)));
    }

    #[test]
    fn render_extracted_fields() {
        let outcome = ClientOutcome::Extracted {
            fields: ExtractedFields {
                bol_number: Some("A1".into()),
                weight: None,
                weight_type: None,
            },
            nothing_found: false,
        };
        assert_eq!(
            outcome.to_string(),
            "BOL Number: A1\nWeight: \nWeight Type: "
        );
    }

    #[test]
    fn render_nothing_found() {
        let outcome = ClientOutcome::Extracted {
            fields: ExtractedFields::default(),
            nothing_found: true,
        };
        assert!(outcome.to_string().ends_with(NOTHING_FOUND_MESSAGE));
    }

    #[tokio::test]
    async fn non_image_rejected_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/process-image")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let client = SubmitClient::new(&server.url());
        let outcome = client.submit_file(&path).await;

        assert_eq!(outcome, ClientOutcome::Rejected(NOT_IMAGE_MESSAGE.into()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn uploads_image_as_multipart() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/process-image")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".into()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="image"; filename="bol.png""#.into()),
                Matcher::Regex("Content-Type: image/png".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"bolNumber":"BOL-9","weight":"1,200 kg","weightType":"Shipping Weight","rawOcrText":"x"}}"#,
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bol.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nbytes").unwrap();

        // 끝의 '/'는 무시된다
        let client = SubmitClient::new(&format!("{}/", server.url()));
        let outcome = client.submit_file(&path).await;

        mock.assert_async().await;
        match outcome {
            ClientOutcome::Extracted { fields, .. } => {
                assert_eq!(fields.bol_number.as_deref(), Some("BOL-9"));
                assert_eq!(fields.weight.as_deref(), Some("1,200 kg"));
                assert_eq!(fields.weight_type.as_deref(), Some("Shipping Weight"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn service_400_surfaces_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/process-image")
            .with_status(400)
            .with_body(r#"{"error":"File too large. Maximum size is 10MB"}"#)
            .create_async()
            .await;

        let client = SubmitClient::new(&server.url());
        let outcome = client
            .submit_bytes("big.jpg", "image/jpeg", vec![0u8; 16])
            .await;

        assert_eq!(
            outcome,
            ClientOutcome::ServiceError("File too large. Maximum size is 10MB".into())
        );
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let client = SubmitClient::new("http://127.0.0.1:1");
        let outcome = client
            .submit_bytes("bol.png", "image/png", vec![1, 2, 3])
            .await;
        assert!(matches!(outcome, ClientOutcome::TransportError(_)));
    }
}
