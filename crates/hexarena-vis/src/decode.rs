//! Decoding stored documents into [`ArenaSnapshot`]s.
//!
//! The snapshot producer keeps adding diagnostic fields, so decoding walks
//! only the fields the visualizer needs and ignores everything else. The
//! four collections are required; scalar fields fall back to zero or the
//! empty string when absent.
//!
//! Integers are accepted in every shape a document store tends to hand
//! back: plain numbers, whole floats, decimal strings and extended-JSON
//! wrappers such as `{"$numberLong": "42"}`.

use hexarena_store::RawDocument;
use hexarena_topology::HexCell;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Ant, ArenaSnapshot, Food, Home};

/// Result type for decoding.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// A document did not have the shape of an arena snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required field is absent
    #[error("{path}: missing required field")]
    Missing { path: String },

    /// A field holds the wrong kind of value
    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A numeric field cannot be read as an integer
    #[error("{path}: {value} is not an integer")]
    NotInteger { path: String, value: String },
}

impl DecodeError {
    /// Path of the offending field, e.g. `state.ants[2].health`.
    pub fn path(&self) -> &str {
        match self {
            DecodeError::Missing { path }
            | DecodeError::WrongType { path, .. }
            | DecodeError::NotInteger { path, .. } => path,
        }
    }
}

/// Decode a stored document whose `state` field holds the snapshot.
pub fn decode_document(document: &RawDocument) -> Result<ArenaSnapshot> {
    let fields = expect_object(document, "document")?;
    let state = fields.get("state").ok_or_else(|| DecodeError::Missing {
        path: "state".into(),
    })?;
    decode_state(state)
}

/// Decode the snapshot node itself.
pub fn decode_state(state: &Value) -> Result<ArenaSnapshot> {
    let fields = expect_object(state, "state")?;

    let map = decode_sequence(fields, "map", decode_cell)?;
    let ants = decode_sequence(fields, "ants", decode_ant)?;
    let food = decode_sequence(fields, "food", |value, path| {
        let (q, r, extra) = decode_positioned(value, path)?;
        Ok(Food { q, r, extra })
    })?;
    let home = decode_sequence(fields, "home", |value, path| {
        let (q, r, extra) = decode_positioned(value, path)?;
        Ok(Home { q, r, extra })
    })?;

    Ok(ArenaSnapshot {
        map,
        ants,
        food,
        home,
        turn_no: int_field(fields, "turnNo", "state")?,
        score: int_field(fields, "score", "state")?,
    })
}

fn decode_sequence<T, F>(fields: &Map<String, Value>, name: &str, decode: F) -> Result<Vec<T>>
where
    F: Fn(&Value, &str) -> Result<T>,
{
    let path = format!("state.{}", name);
    let items = match fields.get(name) {
        None => return Err(DecodeError::Missing { path }),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(DecodeError::WrongType {
                path,
                expected: "array",
                found: kind_of(other),
            })
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode(item, &format!("{}[{}]", path, i)))
        .collect()
}

fn decode_cell(value: &Value, path: &str) -> Result<HexCell> {
    let fields = expect_object(value, path)?;
    Ok(HexCell::with_terrain(
        int_field(fields, "q", path)?,
        int_field(fields, "r", path)?,
        int_field(fields, "type", path)?,
        int_field(fields, "cost", path)?,
    ))
}

fn decode_ant(value: &Value, path: &str) -> Result<Ant> {
    let fields = expect_object(value, path)?;
    Ok(Ant {
        q: int_field(fields, "q", path)?,
        r: int_field(fields, "r", path)?,
        kind: int_field(fields, "type", path)?,
        health: int_field(fields, "health", path)?,
        id: string_field(fields, "id", path)?,
    })
}

fn decode_positioned(value: &Value, path: &str) -> Result<(i64, i64, Map<String, Value>)> {
    let fields = expect_object(value, path)?;
    let q = int_field(fields, "q", path)?;
    let r = int_field(fields, "r", path)?;
    let extra = fields
        .iter()
        .filter(|(key, _)| key.as_str() != "q" && key.as_str() != "r")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok((q, r, extra))
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| DecodeError::WrongType {
        path: path.to_string(),
        expected: "object",
        found: kind_of(value),
    })
}

/// Integer field, `0` when absent or null.
fn int_field(fields: &Map<String, Value>, name: &str, parent: &str) -> Result<i64> {
    match fields.get(name) {
        None => Ok(0),
        Some(value) => coerce_int(value).ok_or_else(|| DecodeError::NotInteger {
            path: format!("{}.{}", parent, name),
            value: value.to_string(),
        }),
    }
}

/// String field, empty when absent or null. Scalars are stringified.
fn string_field(fields: &Map<String, Value>, name: &str, parent: &str) -> Result<String> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(DecodeError::WrongType {
            path: format!("{}.{}", parent, name),
            expected: "string",
            found: kind_of(other),
        }),
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_float)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(fields) if fields.len() == 1 => {
            let (key, inner) = fields.iter().next()?;
            let text = inner.as_str()?;
            match key.as_str() {
                "$numberInt" | "$numberLong" => text.trim().parse().ok(),
                "$numberDouble" => text.trim().parse().ok().and_then(whole_float),
                _ => None,
            }
        }
        _ => None,
    }
}

fn whole_float(f: f64) -> Option<i64> {
    // 2^63 as f64; anything at or beyond it does not fit
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "_id": {"$oid": "665f1c2e9b1e8a3f4c2d1a00"},
            "state": {
                "map": [
                    {"q": 0, "r": 0, "type": 1, "cost": 1},
                    {"q": 1, "r": 0, "type": 2, "cost": 1},
                    {"q": 0, "r": 1, "type": 5, "cost": 0}
                ],
                "ants": [
                    {"q": 0, "r": 0, "type": 0, "health": 130, "id": "a-1",
                     "food": {"amount": 0, "type": 0}, "lastMove": []}
                ],
                "food": [{"q": 1, "r": 0, "amount": 8, "type": 2}],
                "home": [{"q": 0, "r": 0}],
                "turnNo": 3,
                "score": 10,
                "nextTurnIn": 1.5
            }
        })
    }

    #[test]
    fn decodes_nested_state() {
        let snap = decode_document(&sample_document()).unwrap();

        assert_eq!(snap.map.len(), 3);
        assert_eq!(snap.map[2], HexCell::new(0, 1));
        assert_eq!(snap.map[2].kind(), 5);
        assert_eq!(snap.ants[0].id, "a-1");
        assert_eq!(snap.ants[0].health, 130);
        assert_eq!(snap.food[0].extra["amount"], 8);
        assert!(!snap.food[0].extra.contains_key("q"));
        assert_eq!(snap.home[0].q, 0);
        assert_eq!(snap.turn_no, 3);
        assert_eq!(snap.score, 10);
    }

    #[test]
    fn minimal_example() {
        let doc = json!({"state": {"map": [{"q": 0, "r": 0}], "ants": [], "food": [],
                                   "home": [], "turnNo": 3, "score": 10}});
        let snap = decode_document(&doc).unwrap();
        assert_eq!(snap.map, vec![HexCell::ORIGIN]);
        assert!(snap.ants.is_empty());
        assert_eq!((snap.turn_no, snap.score), (3, 10));
    }

    #[test]
    fn roundtrip_through_serialization() {
        let original = decode_document(&sample_document()).unwrap();
        let document = json!({ "state": serde_json::to_value(&original).unwrap() });
        let decoded = decode_document(&document).unwrap();

        assert_eq!(decoded, original);
        let kinds: Vec<_> = decoded.map.iter().map(|c| (c.kind(), c.cost())).collect();
        assert_eq!(kinds, vec![(1, 1), (2, 1), (5, 0)]);
    }

    #[test]
    fn unknown_fields_are_ignored_at_every_level() {
        let baseline = decode_document(&sample_document()).unwrap();

        let mut top = sample_document();
        top["debug"] = json!({"elapsedMs": 12});
        assert_eq!(decode_document(&top).unwrap(), baseline);

        let mut state = sample_document();
        state["state"]["enemies"] = json!([{"q": 4, "r": 4}]);
        assert_eq!(decode_document(&state).unwrap(), baseline);

        let mut cell = sample_document();
        cell["state"]["map"][1]["fog"] = json!(true);
        assert_eq!(decode_document(&cell).unwrap(), baseline);

        let mut ant = sample_document();
        ant["state"]["ants"][0]["lastAttack"] = json!({"q": 1, "r": 1});
        assert_eq!(decode_document(&ant).unwrap(), baseline);
    }

    #[test]
    fn missing_optional_fields_default() {
        let doc = json!({"state": {"map": [{"q": 2}], "ants": [{"q": 1, "r": 1}],
                                   "food": [], "home": []}});
        let snap = decode_document(&doc).unwrap();

        assert_eq!(snap.map[0], HexCell::new(2, 0));
        assert_eq!(snap.ants[0].health, 0);
        assert_eq!(snap.ants[0].id, "");
        assert_eq!(snap.turn_no, 0);
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn missing_state_fails() {
        let err = decode_document(&json!({"map": []})).unwrap_err();
        assert_eq!(err, DecodeError::Missing { path: "state".into() });
    }

    #[test]
    fn state_must_be_an_object() {
        let err = decode_document(&json!({"state": "pending"})).unwrap_err();
        assert_eq!(err.path(), "state");
        assert!(err.to_string().contains("expected object, found string"));
    }

    #[test]
    fn map_as_string_fails() {
        let mut doc = sample_document();
        doc["state"]["map"] = json!("0,0;1,0");
        let err = decode_document(&doc).unwrap_err();
        assert_eq!(
            err,
            DecodeError::WrongType {
                path: "state.map".into(),
                expected: "array",
                found: "string",
            }
        );
    }

    #[test]
    fn missing_collection_fails() {
        let mut doc = sample_document();
        doc["state"].as_object_mut().unwrap().remove("home");
        let err = decode_document(&doc).unwrap_err();
        assert_eq!(err.path(), "state.home");
    }

    #[test]
    fn bad_element_reports_index() {
        let mut doc = sample_document();
        doc["state"]["ants"][0]["health"] = json!("lots");
        let err = decode_document(&doc).unwrap_err();
        assert_eq!(err.path(), "state.ants[0].health");

        let mut doc = sample_document();
        doc["state"]["map"][2] = json!(7);
        let err = decode_document(&doc).unwrap_err();
        assert_eq!(err.path(), "state.map[2]");
    }

    #[test]
    fn turn_and_score_coercion() {
        let mut doc = sample_document();
        doc["state"]["turnNo"] = json!({"$numberLong": "42"});
        doc["state"]["score"] = json!(17.0);
        let snap = decode_document(&doc).unwrap();
        assert_eq!((snap.turn_no, snap.score), (42, 17));

        doc["state"]["turnNo"] = json!("8");
        doc["state"]["score"] = Value::Null;
        let snap = decode_document(&doc).unwrap();
        assert_eq!((snap.turn_no, snap.score), (8, 0));

        doc["state"]["score"] = json!(2.5);
        let err = decode_document(&doc).unwrap_err();
        assert_eq!(err, DecodeError::NotInteger { path: "state.score".into(), value: "2.5".into() });

        doc["state"]["score"] = json!(true);
        assert!(decode_document(&doc).is_err());
    }

    #[test]
    fn extended_json_wrappers() {
        assert_eq!(coerce_int(&json!({"$numberInt": "-3"})), Some(-3));
        assert_eq!(coerce_int(&json!({"$numberDouble": "4.0"})), Some(4));
        assert_eq!(coerce_int(&json!({"$numberDouble": "4.5"})), None);
        assert_eq!(coerce_int(&json!({"$oid": "abc"})), None);
        assert_eq!(coerce_int(&json!(u64::MAX)), None);
    }

    #[test]
    fn wrapped_integers_tolerate_whitespace() {
        assert_eq!(coerce_int(&json!(" 42")), Some(42));
        assert_eq!(coerce_int(&json!({"$numberLong": " 42"})), Some(42));
        assert_eq!(coerce_int(&json!({"$numberInt": "7 "})), Some(7));
        assert_eq!(coerce_int(&json!({"$numberDouble": " 3.0 "})), Some(3));
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let mut doc = sample_document();
        doc["state"]["ants"][0]["id"] = json!(1234);
        let snap = decode_document(&doc).unwrap();
        assert_eq!(snap.ants[0].id, "1234");

        doc["state"]["ants"][0]["id"] = json!(["a"]);
        assert_eq!(decode_document(&doc).unwrap_err().path(), "state.ants[0].id");
    }
}
