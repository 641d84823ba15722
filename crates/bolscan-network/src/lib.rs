//! # bolscan-network
//!
//! 호스팅 비전 LLM 네트워크 어댑터.
//! 추출 지시문과 인라인 이미지를 단일 요청으로 보내고 텍스트 응답을 돌려받는다.
//!
//! 지원 형식:
//! - Anthropic Messages API (`x-api-key`)
//! - OpenAI 호환 Chat Completions API (`Authorization: Bearer`)

pub mod vision_llm_client;

pub use vision_llm_client::RemoteVisionLlm;
