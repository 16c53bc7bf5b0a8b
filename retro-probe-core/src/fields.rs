//! Ordered field maps returned by format decoders.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::track::TrackList;

/// Key under which the dispatcher stores the resolved track layout.
pub const TRACKS_KEY: &str = "tracks";

/// Key every decoder sets to name the platform it recognized.
pub const PLATFORM_KEY: &str = "platform";

/// A single decoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Tracks(TrackList),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tracks(&self) -> Option<&TrackList> {
        match self {
            Self::Tracks(t) => Some(t),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Tracks(tracks) => {
                let parts: Vec<String> = tracks
                    .iter()
                    .map(|t| {
                        format!(
                            "#{} {}/{} @{} ({})",
                            t.index,
                            t.mode.name(),
                            t.sector_size.bytes(),
                            t.byte_offset,
                            t.source_path.display()
                        )
                    })
                    .collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<TrackList> for FieldValue {
    fn from(tracks: TrackList) -> Self {
        Self::Tracks(tracks)
    }
}

/// String-keyed map that keeps insertion order.
///
/// Decoders emit a handful of fields, so lookups are linear scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Shorthand for text fields.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
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

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The resolved track layout, if the dispatcher attached one.
    pub fn tracks(&self) -> Option<&TrackList> {
        self.get(TRACKS_KEY).and_then(FieldValue::as_tracks)
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{SectorSize, Track, TrackMode};

    #[test]
    fn insert_keeps_order() {
        let mut fields = FieldMap::new();
        fields.insert("platform", "Saturn");
        fields.insert("title", "NIGHTS");
        fields.insert("code", "GS-9001");
        let keys: Vec<&str> = fields.keys().collect();
        assert_eq!(keys, vec!["platform", "title", "code"]);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut fields = FieldMap::new();
        fields.insert("platform", "Mega Drive");
        fields.insert("format", "");
        fields.insert("console", "SEGA MEGA DRIVE");
        fields.insert("format", "Multi Game Doctor interleaved");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.keys().nth(1), Some("format"));
        assert_eq!(
            fields.get_str("format"),
            Some("Multi Game Doctor interleaved")
        );
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut fields = FieldMap::new();
        fields.insert("platform", "Dreamcast");
        fields.insert("set_info", "1/1");
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"platform":"Dreamcast","set_info":"1/1"}"#);
    }

    #[test]
    fn tracks_accessor() {
        let mut fields = FieldMap::new();
        assert!(fields.tracks().is_none());
        let tracks = TrackList::new(vec![Track::new(
            0,
            "a.iso",
            0,
            SectorSize::Cooked2048,
            TrackMode::Mode1,
        )])
        .unwrap();
        fields.insert(TRACKS_KEY, tracks);
        assert_eq!(fields.tracks().map(|t| t.len()), Some(1));
    }
}
