//! `{ ok, value }` / `{ ok: false, error: { code, message, data? } }`
//! envelopes returned by the `_res` methods.

use wasm_bindgen::JsValue;
use wayfinder::{Clearance, EditorError};

use crate::interop::object;

pub fn ok(value: JsValue) -> JsValue {
    object(&[("ok", JsValue::TRUE), ("value", value)])
}

pub fn err(code: &str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let mut fields = vec![
        ("code", JsValue::from_str(code)),
        ("message", JsValue::from_str(&message.into())),
    ];
    if let Some(d) = data {
        fields.push(("data", d));
    }
    object(&[("ok", JsValue::FALSE), ("error", object(&fields))])
}

pub fn non_finite(param: &str) -> JsValue {
    let data = object(&[("param", JsValue::from_str(param))]);
    err(
        "non_finite",
        format!("parameter '{}' must be finite", param),
        Some(data),
    )
}

pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let data = object(&[
        ("kind", JsValue::from_str(kind)),
        ("id", JsValue::from_f64(id as f64)),
    ]);
    err("invalid_id", format!("no {} with id {}", kind, id), Some(data))
}

fn clearance_out_of_range(got: u8) -> JsValue {
    let data = object(&[
        ("param", JsValue::from_str("clearance")),
        ("min", JsValue::from_f64(0.0)),
        ("max", JsValue::from_f64(Clearance::MAX as f64)),
        ("got", JsValue::from_f64(got as f64)),
    ]);
    err(
        "out_of_range",
        format!("clearance {} outside 0..={}", got, Clearance::MAX),
        Some(data),
    )
}

pub fn from_editor(e: &EditorError) -> JsValue {
    match e {
        EditorError::NodeNotFound(id) => invalid_id("node", *id),
        EditorError::EdgeNotFound(id) => invalid_id("edge", *id),
        EditorError::InvalidClearance(level) => clearance_out_of_range(*level),
        EditorError::NonFinite(param) => non_finite(param),
        other => err(other.code(), other.to_string(), None),
    }
}
