//! WASM bindings for boleto extraction.
//!
//! The host extracts PDF text itself and hands it over per document or
//! per page; everything else runs in the core library.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use boleto_core::{BatchProcessor, ExtractionMode, NoProgress, RecordAssembler, TextDocument};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// One document as sent from JavaScript: `{ name, pages: [text, ...] }`.
#[derive(Deserialize)]
struct TextUnit {
    name: String,
    pages: Vec<String>,
}

#[derive(Serialize)]
struct BarcodeJs {
    layout: &'static str,
    raw: String,
    digits: String,
}

fn parse_mode(mode: Option<String>) -> Result<ExtractionMode, JsValue> {
    match mode {
        Some(mode) => mode.parse().map_err(|e: String| JsValue::from_str(&e)),
        None => Ok(ExtractionMode::default()),
    }
}

fn processor(mode: ExtractionMode) -> BatchProcessor {
    BatchProcessor::new(RecordAssembler::new(mode))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract the records of a single text document.
///
/// `mode` is `"strict"` (default) or `"lenient"`.
#[wasm_bindgen]
pub fn extract_from_text(name: &str, text: &str, mode: Option<String>) -> Result<JsValue, JsValue> {
    let processor = processor(parse_mode(mode)?);
    let document = TextDocument::single(name, text);

    let records = processor
        .process_document(&document)
        .map_err(|failure| JsValue::from_str(&failure.message))?;

    to_js(&records)
}

/// Extract records from many documents.
///
/// Returns `{ records, failures }` in input order.
#[wasm_bindgen]
pub fn extract_batch(units: JsValue, mode: Option<String>) -> Result<JsValue, JsValue> {
    let units: Vec<TextUnit> = serde_wasm_bindgen::from_value(units)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let documents: Vec<TextDocument> = units
        .into_iter()
        .map(|unit| TextDocument::new(unit.name, unit.pages))
        .collect();

    let result = processor(parse_mode(mode)?).process(&documents, &NoProgress);
    to_js(&result)
}

/// Keep only the ASCII digits of a string.
#[wasm_bindgen]
pub fn normalize_digits(s: &str) -> Option<String> {
    boleto_core::normalize_digits(Some(s))
}

/// Find the first digit-line in `text`.
///
/// Returns `{ layout, raw, digits }` or `undefined`.
#[wasm_bindgen]
pub fn recognize_barcode(text: &str) -> Result<JsValue, JsValue> {
    match boleto_core::recognize_barcode(text) {
        Some(m) => to_js(&BarcodeJs {
            layout: m.layout.as_str(),
            digits: m.digits(),
            raw: m.raw,
        }),
        None => Ok(JsValue::UNDEFINED),
    }
}
