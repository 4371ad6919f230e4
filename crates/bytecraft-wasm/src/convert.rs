use std::collections::{BTreeMap, HashMap};

use bytecraft::{
    codec::Value,
    compiled::{Codec, CompiledField},
    errors::AccessError,
    view::RecordView,
};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// A decoded field as it crosses into JavaScript.
#[derive(Serialize)]
#[serde(untagged)]
pub enum JsValueOut {
    Number(f64),
    /// Serialized as a `BigInt`.
    I64(i64),
    /// Serialized as a `BigInt`.
    U64(u64),
    Bytes(Vec<u8>),
}

impl From<Value<'_>> for JsValueOut {
    fn from(value: Value<'_>) -> Self {
        match value {
            Value::I8(v) => JsValueOut::Number(v.into()),
            Value::U8(v) => JsValueOut::Number(v.into()),
            Value::I16(v) => JsValueOut::Number(v.into()),
            Value::U16(v) => JsValueOut::Number(v.into()),
            Value::I32(v) => JsValueOut::Number(v.into()),
            Value::U32(v) => JsValueOut::Number(v.into()),
            Value::I64(v) => JsValueOut::I64(v),
            Value::U64(v) => JsValueOut::U64(v),
            Value::F32(v) => JsValueOut::Number(v.into()),
            Value::F64(v) => JsValueOut::Number(v),
            Value::Bytes(bytes) => JsValueOut::Bytes(bytes.to_vec()),
        }
    }
}

/// A field value coming from JavaScript, checked against the field's kind.
pub enum JsValueIn {
    Scalar(Value<'static>),
    Bytes(Vec<u8>),
}

pub fn error_to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn serializer() -> serde_wasm_bindgen::Serializer {
    serde_wasm_bindgen::Serializer::new()
        .serialize_maps_as_objects(true)
        .serialize_large_number_types_as_bigints(true)
}

pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value.serialize(&serializer()).map_err(error_to_js)
}

/// Decodes every named field of `view` into a plain map.
pub fn record_to_map(view: &RecordView<'_>) -> Result<BTreeMap<String, JsValueOut>, JsValue> {
    let mut map = BTreeMap::new();

    for field in view.layout().fields() {
        let value = view.get(field.name.as_str()).map_err(error_to_js)?;
        map.insert(field.name.clone(), value.into());
    }

    Ok(map)
}

/// Checks every entry of `raw` against the layout of `view` before anything is written.
pub fn map_to_inputs<'v>(
    view: &RecordView<'v>,
    raw: HashMap<String, serde_json::Value>,
) -> Result<Vec<(&'v CompiledField, JsValueIn)>, JsValue> {
    let mut inputs = Vec::with_capacity(raw.len());

    for (name, json) in raw {
        let field = view
            .layout()
            .field(&name)
            .ok_or_else(|| error_to_js(AccessError::UnknownField(name.clone())))?;
        inputs.push((field, convert_json_value(field, json)?));
    }

    Ok(inputs)
}

pub fn convert_json_value(
    field: &CompiledField,
    json: serde_json::Value,
) -> Result<JsValueIn, JsValue> {
    let invalid = || {
        JsValue::from_str(&format!(
            "invalid value for {} field `{}`",
            field.kind(),
            field.name
        ))
    };

    let int = |json: &serde_json::Value| json.as_i64().ok_or_else(invalid);
    let uint = |json: &serde_json::Value| json.as_u64().ok_or_else(invalid);
    let float = |json: &serde_json::Value| json.as_f64().ok_or_else(invalid);

    let value = match field.codec {
        Codec::Int8 => Value::I8(i8::try_from(int(&json)?).map_err(|_| invalid())?),
        Codec::Uint8 => Value::U8(u8::try_from(uint(&json)?).map_err(|_| invalid())?),
        Codec::Int16 => Value::I16(i16::try_from(int(&json)?).map_err(|_| invalid())?),
        Codec::Uint16 => Value::U16(u16::try_from(uint(&json)?).map_err(|_| invalid())?),
        Codec::Int32 => Value::I32(i32::try_from(int(&json)?).map_err(|_| invalid())?),
        Codec::Uint32 => Value::U32(u32::try_from(uint(&json)?).map_err(|_| invalid())?),
        Codec::Int64 => Value::I64(int(&json)?),
        Codec::Uint64 => Value::U64(uint(&json)?),
        Codec::Float32 => Value::F32(float(&json)? as f32),
        Codec::Float64 => Value::F64(float(&json)?),
        Codec::Bytes => {
            let items = json.as_array().ok_or_else(invalid)?;
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                bytes.push(u8::try_from(uint(item)?).map_err(|_| invalid())?);
            }
            if bytes.len() != field.width {
                return Err(error_to_js(AccessError::LengthMismatch {
                    field: field.name.clone(),
                    expected: field.width,
                    actual: bytes.len(),
                }));
            }
            return Ok(JsValueIn::Bytes(bytes));
        }
    };

    Ok(JsValueIn::Scalar(value))
}
