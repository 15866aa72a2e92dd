use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::types::{FORVO, GOOGLE_IMAGES};

/// A formatted dictionary entry handed to UI and export collaborators
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct SearchEntry {
    pub term: String,
    pub altterm: String,
    pub pronunciation: String,
    pub part_of_speech: String,
    pub definition: String,
    pub examples: Option<String>,
    pub audio: Option<String>,
    pub star_rating: String,
    /// Display head, absent when the definition already embeds it
    pub header: Option<String>,
}

/// Entries per dictionary in search order, plus pseudo-dictionary presence flags.
///
/// Serializes as one JSON object: dictionary names in order, then the
/// reserved `"Google Images"` / `"Forvo"` keys set to `true` when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    entries: IndexMap<String, Vec<SearchEntry>>,
    pub google_images: bool,
    pub forvo: bool,
}

impl SearchResult {
    pub(crate) fn insert(&mut self, dictionary: String, entries: Vec<SearchEntry>) {
        self.entries.insert(dictionary, entries);
    }

    pub fn contains(&self, dictionary: &str) -> bool {
        self.entries.contains_key(dictionary)
    }

    pub fn get(&self, dictionary: &str) -> Option<&[SearchEntry]> {
        self.entries.get(dictionary).map(Vec::as_slice)
    }

    /// Dictionary names in search order
    pub fn dictionaries(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SearchEntry])> {
        self.entries
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of dictionaries with entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no dictionary matched and no pseudo-dictionary was flagged
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && !self.google_images && !self.forvo
    }

    /// Rows summed across all dictionaries
    pub fn total_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let flags = usize::from(self.google_images) + usize::from(self.forvo);
        let mut map = serializer.serialize_map(Some(self.entries.len() + flags))?;
        for (name, entries) in &self.entries {
            map.serialize_entry(name, entries)?;
        }
        if self.google_images {
            map.serialize_entry(GOOGLE_IMAGES, &true)?;
        }
        if self.forvo {
            map.serialize_entry(FORVO, &true)?;
        }
        map.end()
    }
}
