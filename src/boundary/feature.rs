use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One boundary polygon with its property bag.
///
/// Geometry is kept as raw GeoJSON; it is only decoded when drawing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Value,
}

impl Feature {
    pub fn new(properties: Map<String, Value>, geometry: Value) -> Self {
        Self { id: None, properties, geometry }
    }

    /// Read a string property, ignoring non-string values.
    #[inline]
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Read a property as text; numbers are rendered the way a table cell would be.
    pub fn property_text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.properties.get(key)? {
            Value::String(text) => Some(Cow::Borrowed(text)),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            _ => None,
        }
    }

    /// GeoJSON `type` of the geometry, if any.
    #[inline]
    pub fn geometry_type(&self) -> Option<&str> {
        self.geometry.get("type").and_then(Value::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_properties_only() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": { "deleg_na_1": "Bab Bhar", "code": 1101 },
            "geometry": { "type": "Polygon", "coordinates": [] }
        })).unwrap();

        assert_eq!(feature.property_str("deleg_na_1"), Some("Bab Bhar"));
        assert_eq!(feature.property_str("code"), None);
        assert_eq!(feature.property_str("gov_name_f"), None);
        assert_eq!(feature.geometry_type(), Some("Polygon"));
    }

    #[test]
    fn property_text_renders_numbers() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": { "deleg_na_1": 1101, "gov_name_f": "Tunis", "area": 2.5, "flag": true },
            "geometry": null
        })).unwrap();

        assert_eq!(feature.property_text("deleg_na_1").as_deref(), Some("1101"));
        assert_eq!(feature.property_text("gov_name_f").as_deref(), Some("Tunis"));
        assert_eq!(feature.property_text("area").as_deref(), Some("2.5"));
        assert_eq!(feature.property_text("flag"), None);
        assert_eq!(feature.property_text("missing"), None);
    }

    #[test]
    fn null_properties_become_empty() {
        let feature: Feature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": null,
            "geometry": null
        })).unwrap();
        assert!(feature.properties.is_empty());
        assert_eq!(feature.geometry_type(), None);
    }
}
