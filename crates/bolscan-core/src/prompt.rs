//! 추출 지시문 구성.
//!
//! OCR 원문을 그대로 포함하고, 중량 우선순위 규칙과 고정 JSON 형식을 명시한다.

/// 중량 우선순위 규칙 (지시문에 그대로 포함됨)
pub const WEIGHT_PRIORITY_RULE: &str =
    "Net Weight/Net > Shipping Weight > any other weight (including Gross Weight)";

/// 응답 JSON 형식
pub const RESPONSE_SHAPE: &str =
    r#"{"bolNumber": "string or null", "weight": "string or null", "weightType": "string or null"}"#;

/// BOL 필드 추출 지시문 생성
pub fn build_extraction_prompt(raw_ocr_text: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are analyzing an image of a Bill of Lading (BOL) document. \
         The attached image is the original document and the text below was \
         recognized from it by OCR. OCR text may contain recognition errors, \
         so use the image to confirm values.\n\n",
    );
    prompt.push_str("OCR text:\n\"\"\"\n");
    prompt.push_str(raw_ocr_text);
    prompt.push_str("\n\"\"\"\n\n");
    prompt.push_str("Extract the following fields:\n");
    prompt.push_str("1. bolNumber: the Bill of Lading number (BOL #, B/L No., etc.)\n");
    prompt.push_str("2. weight: the shipment weight, including its unit as written\n");
    prompt.push_str(
        "3. weightType: the label of the weight you returned \
         (e.g. \"Net Weight\", \"Shipping Weight\", \"Gross Weight\")\n\n",
    );
    prompt.push_str("Weight priority: ");
    prompt.push_str(WEIGHT_PRIORITY_RULE);
    prompt.push_str(
        ". If several weights are present, return the one with the highest priority.\n\n",
    );
    prompt.push_str("If a field is not found, return null for that field.\n");
    prompt.push_str("Respond with only this JSON object and nothing else:\n");
    prompt.push_str(RESPONSE_SHAPE);
    prompt
}
