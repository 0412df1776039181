//! JSON value conversion for sample input and inspection.
//!
//! Records map to JSON objects keyed by field name, with the entity kind
//! under `entity`; field insertion order is preserved in both directions.

use serde_json::{Map, Value};

use crate::descriptor::{EntityKind, Field, Host, Protocol, ServiceRecord, Transport};
use crate::error::SdbError;

/// Converts a JSON array of record objects into a record list.
pub fn records_from_json(value: &Value) -> Result<Vec<ServiceRecord>, SdbError> {
    let items = value
        .as_array()
        .ok_or_else(|| SdbError::InvalidRecord("expected an array of record objects".into()))?;
    items.iter().map(record_from_json).collect()
}

/// Converts one JSON record object into a [`ServiceRecord`].
pub fn record_from_json(value: &Value) -> Result<ServiceRecord, SdbError> {
    let map = value
        .as_object()
        .ok_or_else(|| SdbError::InvalidRecord("expected a record object".into()))?;
    let mut kind = None;
    let mut fields = Vec::new();
    for (key, val) in map {
        match key.as_str() {
            "entity" => {
                let s = expect_str(key, val)?;
                kind = Some(
                    EntityKind::parse(s)
                        .ok_or_else(|| SdbError::InvalidRecord(format!("unknown entity `{s}`")))?,
                );
            }
            "name" => fields.push(Field::Name(expect_str(key, val)?.to_owned())),
            "description" => fields.push(Field::Description(expect_str(key, val)?.to_owned())),
            "transport" => {
                let s = expect_str(key, val)?;
                let transport = Transport::parse(s).ok_or_else(|| {
                    SdbError::InvalidRecord(format!("unknown transport `{s}`"))
                })?;
                fields.push(Field::Transport(transport));
            }
            "protocol" => {
                let s = expect_str(key, val)?;
                let protocol = Protocol::parse(s).ok_or_else(|| {
                    SdbError::InvalidRecord(format!("unknown protocol `{s}`"))
                })?;
                fields.push(Field::Protocol(protocol));
            }
            "host" => fields.push(Field::Host(Host::parse(expect_str(key, val)?))),
            "port" => {
                let port = val
                    .as_u64()
                    .and_then(|p| u16::try_from(p).ok())
                    .ok_or_else(|| {
                        SdbError::InvalidRecord(format!("`port` must be a u16, got {val}"))
                    })?;
                fields.push(Field::Port(port));
            }
            "parameters" => {
                fields.push(Field::Parameters(expect_str(key, val)?.as_bytes().to_vec()));
            }
            "url" => fields.push(Field::Url(expect_str(key, val)?.to_owned())),
            other => {
                return Err(SdbError::InvalidRecord(format!(
                    "unknown record field `{other}`"
                )));
            }
        }
    }
    let kind = kind.ok_or_else(|| SdbError::InvalidRecord("missing `entity` field".into()))?;
    Ok(ServiceRecord { kind, fields })
}

/// Converts a record list back into a JSON array of record objects.
///
/// Parameters bytes are rendered as a (lossy) UTF-8 string; they are
/// query strings in practice.
pub fn records_to_json(records: &[ServiceRecord]) -> Value {
    Value::Array(records.iter().map(record_to_json).collect())
}

fn record_to_json(record: &ServiceRecord) -> Value {
    let mut map = Map::new();
    map.insert("entity".into(), Value::String(record.kind.as_str().into()));
    for field in &record.fields {
        let (key, value) = match field {
            Field::Name(s) => ("name", Value::String(s.clone())),
            Field::Description(s) => ("description", Value::String(s.clone())),
            Field::Transport(t) => ("transport", Value::String(t.as_str().into())),
            Field::Protocol(p) => ("protocol", Value::String(p.as_str().into())),
            Field::Host(h) => ("host", Value::String(h.to_string())),
            Field::Port(p) => ("port", Value::Number((*p).into())),
            Field::Parameters(bytes) => (
                "parameters",
                Value::String(String::from_utf8_lossy(bytes).into_owned()),
            ),
            Field::Url(u) => ("url", Value::String(u.clone())),
        };
        map.insert(key.into(), value);
    }
    Value::Object(map)
}

fn expect_str<'v>(key: &str, val: &'v Value) -> Result<&'v str, SdbError> {
    val.as_str()
        .ok_or_else(|| SdbError::InvalidRecord(format!("`{key}` must be a string, got {val}")))
}
