//! Serverless request handler and WASM wrapper for PDF-to-slide extraction.
//!
//! Requests carry a base64-encoded PDF in `body`; responses carry the slide
//! deck as JSON, or `{"error": ...}` with a 4xx/5xx status.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use deck_core::text::deck_title_from_filename;
use deck_core::{DocumentFormat, Error, ExtractionOptions, SlideDeck, SlideExtractor};
use deck_pdf::PdfParser;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

/// Filename used when the request does not name the document.
const DEFAULT_FILENAME: &str = "document.pdf";

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Incoming extraction request.
#[derive(Debug, Deserialize)]
pub struct ExtractionRequest {
    /// Base64-encoded PDF bytes.
    #[serde(default)]
    pub body: String,
    pub filename: Option<String>,
    #[serde(default)]
    pub options: ExtractionOptions,
}

/// Response in the shape serverless runtimes expect.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded response body.
    pub body: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl HandlerResponse {
    fn json(status_code: u16, body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body,
        }
    }

    fn ok(deck: &SlideDeck) -> Self {
        match serde_json::to_string(deck) {
            Ok(body) => Self::json(200, body),
            Err(e) => Self::error(500, &format!("Serialization error: {}", e)),
        }
    }

    fn error(status_code: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody { error: message })
            .unwrap_or_else(|_| r#"{"error":"unknown error"}"#.to_string());
        Self::json(status_code, body)
    }
}

/// Map a pipeline error to an HTTP status.
fn status_for(error: &Error) -> u16 {
    match error {
        Error::InvalidPayload(_) | Error::UnsupportedFormat(_) => 400,
        _ => 500,
    }
}

/// Handle a raw JSON request event.
pub fn handle_request(event: &str) -> HandlerResponse {
    let request: ExtractionRequest = match serde_json::from_str(event) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejecting malformed request: {}", e);
            return HandlerResponse::error(400, &format!("Invalid request JSON: {}", e));
        }
    };

    match process_request(&request) {
        Ok(deck) => HandlerResponse::ok(&deck),
        Err(e) => {
            log::warn!("Extraction request failed: {}", e);
            HandlerResponse::error(status_for(&e), &e.to_string())
        }
    }
}

/// Decode and extract a parsed request.
pub fn process_request(request: &ExtractionRequest) -> deck_core::Result<SlideDeck> {
    if request.body.trim().is_empty() {
        return Err(Error::InvalidPayload("missing body".to_string()));
    }

    let data = STANDARD
        .decode(request.body.trim())
        .map_err(|e| Error::InvalidPayload(format!("body is not valid base64: {}", e)))?;

    let filename = request.filename.as_deref().unwrap_or(DEFAULT_FILENAME);
    extract_deck(&data, filename, request.options.clone())
}

/// Extract a deck from raw PDF bytes.
pub fn extract_deck(
    data: &[u8],
    filename: &str,
    options: ExtractionOptions,
) -> deck_core::Result<SlideDeck> {
    if DocumentFormat::from_magic(data).is_none() {
        return Err(Error::UnsupportedFormat(format!(
            "'{}' does not start with a PDF header",
            filename
        )));
    }

    let raw_pages = PdfParser::new().parse_bytes(data, filename)?;
    let extractor = SlideExtractor::new(options);

    Ok(extractor.extract_deck(deck_title_from_filename(filename), &raw_pages))
}

/// Extract slides from a PDF file.
///
/// # Arguments
/// * `data` - The raw bytes of the PDF
/// * `filename` - The original filename (used for the deck title)
///
/// # Returns
/// A JavaScript object with the slide deck, or throws on error.
#[wasm_bindgen]
pub fn extract_slides(data: &[u8], filename: &str) -> Result<JsValue, JsValue> {
    let deck = extract_deck(data, filename, ExtractionOptions::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&deck)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Handle a serverless event given as a JSON string.
///
/// Never throws for request problems; those come back as error responses.
#[wasm_bindgen]
pub fn handle_event(event: &str) -> Result<JsValue, JsValue> {
    let response = handle_request(event);

    serde_wasm_bindgen::to_value(&response)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
