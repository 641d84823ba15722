//! 포트(trait) 정의.
//!
//! 외부 협력자(OCR 엔진, 호스팅 비전 LLM)를 추상화한다.
//! 어댑터 구현은 `bolscan-vision`, `bolscan-network`에 있다.

pub mod llm_provider;
pub mod ocr_provider;
