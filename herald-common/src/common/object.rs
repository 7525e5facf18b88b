use std::collections::HashMap;

use either::Either;
use numtoa::NumToA;

use crate::prelude::{debug, fmt_err, ErrorCode, InlineStr, TegResult};

#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Int(i32),
    Long(i64),
    Double(f64),
    Boolean(bool),
    String(InlineStr),
    Map(HashMap<InlineStr, Object>),
    List(Vec<Object>),
    Null,
}

impl Object {
    /// Evaluates the JSONPath `$.{path}` against the document. The document is converted to json
    /// lazily on first read and kept in that form for the following reads.
    pub fn read(
        document_context: &mut Either<HashMap<InlineStr, Object>, serde_json::Value>,
        path: &str,
    ) -> Object {
        if let Either::Left(map) = document_context {
            let json = Self::convert_hashmap_to_json(map);
            *document_context = Either::Right(json);
        }
        let value = match document_context {
            Either::Right(value) => value,
            Either::Left(_) => return Object::Null,
        };

        debug!("json for select is: {}", value);
        match jsonpath_lib::select(value, format!("$.{}", path).as_str()) {
            Ok(found) => found
                .first()
                .map(|v| Self::from_json(v))
                .unwrap_or(Object::Null),
            Err(e) => {
                debug!("jsonpath {} not resolvable: {}", path, e);
                Object::Null
            }
        }
    }

    pub fn as_string(&self) -> TegResult<&InlineStr> {
        match self {
            Self::String(v) => Ok(v),
            _ => fmt_err!(UnknownException, "not a string {:?}", self),
        }
    }

    pub fn to_string(&self) -> InlineStr {
        match self {
            Object::Int(v) => (*v).numtoa_str(10, &mut [0; 16]).into(),
            Object::Long(v) => (*v).numtoa_str(10, &mut [0; 32]).into(),
            Object::Double(v) => v.to_string().into(),
            Object::Boolean(v) => {
                if *v {
                    "true".into()
                } else {
                    "false".into()
                }
            }
            Object::String(v) => v.clone(),
            Object::Map(v) => Self::convert_hashmap_to_json(v).to_string().into(),
            Object::List(v) => Self::convert_list_to_json(v).to_string().into(),
            Object::Null => "".into(),
        }
    }
}

/// json <-> object
impl Object {
    pub fn convert_hashmap_to_json(hash_map: &HashMap<InlineStr, Object>) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(hash_map.len());
        for (k, v) in hash_map {
            map.insert(k.to_string(), v.to_json());
        }
        serde_json::Value::Object(map)
    }

    fn convert_list_to_json(list: &[Object]) -> serde_json::Value {
        serde_json::Value::Array(list.iter().map(|v| v.to_json()).collect())
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Object::Int(v) => serde_json::Value::Number((*v).into()),
            Object::Long(v) => serde_json::Value::Number((*v).into()),
            Object::Double(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Object::Boolean(v) => serde_json::Value::Bool(*v),
            Object::String(v) => serde_json::Value::String(v.to_string()),
            Object::Map(v) => Self::convert_hashmap_to_json(v),
            Object::List(v) => Self::convert_list_to_json(v),
            Object::Null => serde_json::Value::Null,
        }
    }

    pub fn convert_jsonmap_to_hashmap(
        jsonmap: &serde_json::Map<String, serde_json::Value>,
    ) -> HashMap<InlineStr, Object> {
        let mut map = HashMap::with_capacity(jsonmap.len());
        for (k, v) in jsonmap {
            map.insert(k.into(), Self::from_json(v));
        }
        map
    }

    pub fn from_json(json: &serde_json::Value) -> Object {
        match json {
            serde_json::Value::Bool(v) => (*v).into(),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    match i32::try_from(v) {
                        Ok(v) => Object::Int(v),
                        Err(_) => Object::Long(v),
                    }
                } else {
                    Object::Double(v.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(v) => v.into(),
            serde_json::Value::Object(v) => Object::Map(Self::convert_jsonmap_to_hashmap(v)),
            serde_json::Value::Array(v) => {
                Object::List(v.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Null => Object::Null,
        }
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Object::Int(value)
    }
}
impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Long(value)
    }
}
impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Double(value)
    }
}
impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Object::Boolean(value)
    }
}
impl From<InlineStr> for Object {
    fn from(value: InlineStr) -> Self {
        Object::String(value)
    }
}
impl From<&InlineStr> for Object {
    fn from(value: &InlineStr) -> Self {
        Object::String(value.clone())
    }
}
impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::String(InlineStr::from(value))
    }
}
impl From<&String> for Object {
    fn from(value: &String) -> Self {
        Object::String(InlineStr::from(value.as_str()))
    }
}
impl From<String> for Object {
    fn from(value: String) -> Self {
        Object::String(InlineStr::from(value))
    }
}
impl From<Vec<Object>> for Object {
    fn from(value: Vec<Object>) -> Self {
        Object::List(value)
    }
}
impl From<HashMap<InlineStr, Object>> for Object {
    fn from(value: HashMap<InlineStr, Object>) -> Self {
        Object::Map(value)
    }
}

#[cfg(test)]
mod tests {
    use either::Either;
    use serde_json::json;

    use super::*;

    #[test]
    fn read_resolves_nested_paths() {
        let mut input = HashMap::new();
        input.insert(InlineStr::from("target"), Object::from("sqs:orders"));
        input.insert(InlineStr::from("count"), Object::from(3));
        let mut workflow = HashMap::new();
        workflow.insert(InlineStr::from("input"), Object::from(input));
        let mut root = HashMap::new();
        root.insert(InlineStr::from("workflow"), Object::from(workflow));

        let mut document = Either::Left(root);
        assert_eq!(
            Object::read(&mut document, "workflow.input.target"),
            Object::from("sqs:orders")
        );
        assert!(document.is_right());
        assert_eq!(Object::read(&mut document, "workflow.input.count"), Object::Int(3));
        assert_eq!(Object::read(&mut document, "workflow.input.missing"), Object::Null);
    }

    #[test]
    fn json_conversion_keeps_number_width() {
        let value = json!({"small": 7, "big": 9_000_000_000_i64, "ratio": 0.5, "none": null});
        let map = Object::convert_jsonmap_to_hashmap(value.as_object().expect("object"));
        assert_eq!(map.get("small"), Some(&Object::Int(7)));
        assert_eq!(map.get("big"), Some(&Object::Long(9_000_000_000)));
        assert_eq!(map.get("ratio"), Some(&Object::Double(0.5)));
        assert_eq!(map.get("none"), Some(&Object::Null));
        assert_eq!(Object::convert_hashmap_to_json(&map), value);
    }

    #[test]
    fn int_range_includes_its_bounds() {
        assert_eq!(Object::from_json(&json!(i32::MAX)), Object::Int(i32::MAX));
        assert_eq!(Object::from_json(&json!(i32::MIN)), Object::Int(i32::MIN));
        assert_eq!(
            Object::from_json(&json!(i32::MAX as i64 + 1)),
            Object::Long(i32::MAX as i64 + 1)
        );
        assert_eq!(
            Object::from_json(&json!(i32::MIN as i64 - 1)),
            Object::Long(i32::MIN as i64 - 1)
        );
    }
}
