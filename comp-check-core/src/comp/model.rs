//! Parsed representation of a `.comp` document

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Header fields and properties extracted from a `.comp` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Component name
    pub name: Option<String>,

    /// Free-text version, not interpreted
    pub version: Option<String>,

    /// Author of the descriptor
    pub author: Option<String>,

    /// Properties block, keys lower-cased
    pub properties: Properties,
}

impl ParsedDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a header field by its lower-case name
    pub fn header(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            "version" => self.version.as_deref(),
            "author" => self.author.as_deref(),
            _ => None,
        }
    }

    /// Store a header field, returning false for keys that are not header fields
    pub(crate) fn set_header(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "version" => &mut self.version,
            "author" => &mut self.author,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Declared component type, if it is one of the known ones
    pub fn component_type(&self) -> Option<ComponentType> {
        self.properties.get("type").and_then(ComponentType::from_name)
    }
}

/// Insertion-ordered string map with last-write-wins semantics.
///
/// Overwriting a key keeps its original position. Equality compares
/// contents only, like any other map.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value, returning the previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for Properties {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Properties {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of string properties")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Properties, A::Error> {
                let mut properties = Properties::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    properties.insert(key, value);
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

const PROCESSOR_BRANDS: &[&str] = &["intel", "amd"];
const GRAPHICS_BRANDS: &[&str] = &["nvidia", "amd", "intel"];
const STORAGE_KINDS: &[&str] = &["ssd", "hdd", "nvme"];

/// Closed set of hardware component kinds a `.comp` file may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Processor,
    Graphics,
    Memory,
    Storage,
    PowerSupply,
    Cooling,
    Case,
    Network,
    CaptureCard,
    SoundCard,
    Antenna,
    DvdDrive,
    Encoder,
}

impl ComponentType {
    pub const ALL: [ComponentType; 13] = [
        Self::Processor,
        Self::Graphics,
        Self::Memory,
        Self::Storage,
        Self::PowerSupply,
        Self::Cooling,
        Self::Case,
        Self::Network,
        Self::CaptureCard,
        Self::SoundCard,
        Self::Antenna,
        Self::DvdDrive,
        Self::Encoder,
    ];

    /// Name as written in a `.comp` file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processor => "processor",
            Self::Graphics => "graphics",
            Self::Memory => "memory",
            Self::Storage => "storage",
            Self::PowerSupply => "power_supply",
            Self::Cooling => "cooling",
            Self::Case => "case",
            Self::Network => "network",
            Self::CaptureCard => "capture_card",
            Self::SoundCard => "sound_card",
            Self::Antenna => "antenna",
            Self::DvdDrive => "dvd_drive",
            Self::Encoder => "encoder",
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Substrings of which at least one must appear in the lower-cased model.
    ///
    /// `None` for types that carry no model heuristic.
    pub fn model_keywords(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Processor => Some(PROCESSOR_BRANDS),
            Self::Graphics => Some(GRAPHICS_BRANDS),
            Self::Storage => Some(STORAGE_KINDS),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_overwrite_keeps_position() {
        let mut props = Properties::new();
        props.insert("id", "a");
        props.insert("type", "processor");
        assert_eq!(props.insert("id", "b"), Some("a".to_string()));

        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, vec!["id", "type"]);
        assert_eq!(props.get("id"), Some("b"));
    }

    #[test]
    fn test_properties_missing_key() {
        let props: Properties = [("id", "a")].into_iter().collect();
        assert_eq!(props.get("model"), None);
        assert!(!props.contains_key("model"));
        assert!(Properties::new().get("id").is_none());
    }

    #[test]
    fn test_properties_equality_ignores_order() {
        let a: Properties = [("model", "x"), ("type", "y")].into_iter().collect();
        let b: Properties = [("type", "y"), ("model", "x")].into_iter().collect();
        let c: Properties = [("type", "y")].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_properties_serialize_in_insertion_order() {
        let props: Properties =
            [("type", "storage"), ("id", "s1"), ("model", "NVMe 1TB")].into_iter().collect();
        let json = serde_json::to_string(&props).unwrap();
        assert_eq!(json, r#"{"type":"storage","id":"s1","model":"NVMe 1TB"}"#);

        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["type", "id", "model"]);
    }

    #[test]
    fn test_component_type_lookup() {
        assert_eq!(ComponentType::from_name("Processor"), Some(ComponentType::Processor));
        assert_eq!(ComponentType::from_name("DVD_DRIVE"), Some(ComponentType::DvdDrive));
        assert_eq!(ComponentType::from_name("gpu"), None);
        assert_eq!(ComponentType::from_name(""), None);
        for kind in ComponentType::ALL {
            assert_eq!(ComponentType::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_model_keywords() {
        assert_eq!(ComponentType::Storage.model_keywords(), Some(STORAGE_KINDS));
        assert!(ComponentType::Memory.model_keywords().is_none());
    }

    #[test]
    fn test_document_headers() {
        let mut doc = ParsedDocument::new();
        assert!(doc.set_header("name", "Widget".to_string()));
        assert!(!doc.set_header("id", "1".to_string()));
        assert_eq!(doc.header("name"), Some("Widget"));
        assert_eq!(doc.header("author"), None);
    }

    #[test]
    fn test_document_serializes_nulls() {
        let doc = ParsedDocument::new();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"name":null,"version":null,"author":null,"properties":{}}"#);
    }
}
