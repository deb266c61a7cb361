//! Registry data model
//!
//! Defines the index and item shapes served by weft catalogs and
//! normalizes the two supported index document formats.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Artifact kinds served by a registry.
///
/// The kind is a namespace: resolution and target-path computation
/// never cross kinds implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    #[serde(rename = "components:ui")]
    Component,
    #[serde(rename = "components:block")]
    Block,
    #[serde(rename = "components:primitive")]
    Primitive,
    #[serde(rename = "theme")]
    Theme,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Component,
        ItemKind::Block,
        ItemKind::Primitive,
        ItemKind::Theme,
    ];

    /// Wire type string as it appears in registry documents.
    pub fn as_type_str(&self) -> &'static str {
        match self {
            ItemKind::Component => "components:ui",
            ItemKind::Block => "components:block",
            ItemKind::Primitive => "components:primitive",
            ItemKind::Theme => "theme",
        }
    }

    /// Parse a wire type string; unknown strings are rejected.
    pub fn parse_type_str(s: &str) -> Option<Self> {
        match s {
            "components:ui" => Some(ItemKind::Component),
            "components:block" => Some(ItemKind::Block),
            "components:primitive" => Some(ItemKind::Primitive),
            "theme" => Some(ItemKind::Theme),
            _ => None,
        }
    }

    /// Path segments of the wire type string, used to build item URLs
    /// (`components:ui` becomes `components/ui`).
    pub fn path_segments(&self) -> String {
        self.as_type_str().split(':').collect::<Vec<_>>().join("/")
    }

    /// Human label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Component => "component",
            ItemKind::Block => "block",
            ItemKind::Primitive => "primitive",
            ItemKind::Theme => "theme",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_type_str())
    }
}

/// Lightweight index entry, used for dependency resolution only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// External package requirements (forwarded, never executed).
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Names of other registry artifacts this one needs.
    #[serde(default, alias = "registryDependencies")]
    pub registry_dependencies: Vec<String>,
}

/// Full artifact content, fetched lazily per name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Defaulted because the category-map index shape keys items by
    /// name; normalization copies the key back in.
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default = "default_item_kind")]
    pub kind: ItemKind,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub files: FileSet,

    /// External package requirements attached to this artifact.
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default, alias = "registryDependencies")]
    pub registry_dependencies: Vec<String>,
}

fn default_item_kind() -> ItemKind {
    ItemKind::Component
}

/// Item files keyed by relative path, in registry document order.
///
/// Install writes files in the key order of the fetched JSON document,
/// so this cannot be a sorted or hashed map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet(Vec<(String, String)>);

impl FileSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// File name/content pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    /// File names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    /// Insert a file; a repeated name keeps its original position and
    /// takes the new content.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = content,
            None => self.0.push((name, content)),
        }
    }
}

impl<S, C> FromIterator<(S, C)> for FileSet
where
    S: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        let mut files = FileSet::default();
        for (name, content) in iter {
            files.insert(name, content);
        }
        files
    }
}

impl Serialize for FileSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, content) in &self.0 {
            map.serialize_entry(name, content)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FileSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FileSetVisitor;

        impl<'de> Visitor<'de> for FileSetVisitor {
            type Value = FileSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of file name to file content")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileSet, A::Error> {
                let mut files = FileSet::default();
                while let Some((name, content)) = map.next_entry::<String, String>()? {
                    files.insert(name, content);
                }
                Ok(files)
            }
        }

        deserializer.deserialize_map(FileSetVisitor)
    }
}

/// Raw index document for format detection.
///
/// Catalogs serve either a flat entry array or a map keyed by category
/// where each category maps name to a full item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Flat(Vec<IndexEntry>),
    Categorized(CategorizedIndex),
}

/// Category-map index shape. BTreeMaps keep `--all` installs
/// deterministic; a JSON object carries no inherent entry order.
#[derive(Debug, Default, Deserialize)]
struct CategorizedIndex {
    #[serde(default)]
    components: BTreeMap<String, Item>,
    #[serde(default)]
    blocks: BTreeMap<String, Item>,
    #[serde(default)]
    primitives: BTreeMap<String, Item>,
    #[serde(default)]
    theme: BTreeMap<String, Item>,
}

/// Normalized index document.
///
/// Both wire shapes normalize to an entry list; the category-map shape
/// additionally embeds full items and can serve content directly.
#[derive(Debug, Clone, Default)]
pub struct RegistryIndex {
    entries: Vec<IndexEntry>,
    items: HashMap<(ItemKind, String), Item>,
    embedded: bool,
}

impl RegistryIndex {
    /// Parse an index document, detecting the wire shape.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let raw: RawIndex = serde_json::from_str(content)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawIndex) -> Self {
        match raw {
            RawIndex::Flat(entries) => RegistryIndex {
                entries,
                items: HashMap::new(),
                embedded: false,
            },
            RawIndex::Categorized(categories) => {
                let groups = [
                    (ItemKind::Component, categories.components),
                    (ItemKind::Block, categories.blocks),
                    (ItemKind::Primitive, categories.primitives),
                    (ItemKind::Theme, categories.theme),
                ];
                let mut entries = Vec::new();
                let mut items = HashMap::new();
                for (kind, group) in groups {
                    for (name, mut item) in group {
                        item.name = name.clone();
                        item.kind = kind;
                        entries.push(IndexEntry {
                            name: name.clone(),
                            kind,
                            dependencies: item.dependencies.clone(),
                            registry_dependencies: item.registry_dependencies.clone(),
                        });
                        items.insert((kind, name), item);
                    }
                }
                RegistryIndex {
                    entries,
                    items,
                    embedded: true,
                }
            }
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }

    /// Whether the source document embedded full item content (the
    /// category-map shape does, the flat shape does not).
    pub fn serves_items(&self) -> bool {
        self.embedded
    }

    pub fn item(&self, kind: ItemKind, name: &str) -> Option<&Item> {
        self.items.get(&(kind, name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_str_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::parse_type_str(kind.as_type_str()), Some(kind));
        }
        assert_eq!(ItemKind::parse_type_str("components:banner"), None);
    }

    #[test]
    fn path_segments_split_on_colon() {
        assert_eq!(ItemKind::Component.path_segments(), "components/ui");
        assert_eq!(ItemKind::Theme.path_segments(), "theme");
    }

    #[test]
    fn file_set_preserves_document_order() {
        let json = r#"{"z.tsx": "Z", "a.tsx": "A", "m.tsx": "M"}"#;
        let files: FileSet = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = files.names().collect();
        assert_eq!(names, vec!["z.tsx", "a.tsx", "m.tsx"]);
    }

    #[test]
    fn file_set_repeated_key_keeps_position() {
        let mut files = FileSet::default();
        files.insert("a.tsx", "old");
        files.insert("b.tsx", "B");
        files.insert("a.tsx", "new");
        let pairs: Vec<(&str, &str)> = files.iter().collect();
        assert_eq!(pairs, vec![("a.tsx", "new"), ("b.tsx", "B")]);
    }

    #[test]
    fn parse_flat_index() {
        let json = r#"
        [
          {"name": "button", "type": "components:ui", "registryDependencies": ["label"]},
          {"name": "label", "type": "components:ui"}
        ]
        "#;
        let index = RegistryIndex::parse(json).unwrap();
        assert_eq!(index.entries().len(), 2);
        assert!(!index.serves_items());
        assert_eq!(
            index.entries()[0].registry_dependencies,
            vec!["label".to_string()]
        );
    }

    #[test]
    fn parse_categorized_index() {
        let json = r#"
        {
          "components": {
            "button": {
              "type": "components:ui",
              "files": {"button.tsx": "export {}"},
              "registryDependencies": ["label"]
            }
          },
          "theme": {
            "midnight": {"files": {"midnight.css": ":root {}"}}
          }
        }
        "#;
        let index = RegistryIndex::parse(json).unwrap();
        assert!(index.serves_items());
        assert_eq!(index.entries().len(), 2);

        let button = index.item(ItemKind::Component, "button").unwrap();
        assert_eq!(button.name, "button");
        assert_eq!(button.files.get("button.tsx"), Some("export {}"));

        // Kind comes from the category key, not the (absent) type field.
        let theme = index.item(ItemKind::Theme, "midnight").unwrap();
        assert_eq!(theme.kind, ItemKind::Theme);
    }

    #[test]
    fn categorized_entries_are_name_sorted() {
        let json = r#"
        {
          "components": {
            "card": {"files": {"card.tsx": ""}},
            "alert": {"files": {"alert.tsx": ""}}
          }
        }
        "#;
        let index = RegistryIndex::parse(json).unwrap();
        let names: Vec<&str> = index.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alert", "card"]);
    }

    #[test]
    fn item_parses_camel_case_registry_dependencies() {
        let json = r#"
        {
          "name": "dialog",
          "type": "components:ui",
          "files": {"dialog.tsx": "X"},
          "dependencies": ["@radix-ui/react-dialog@^1"],
          "registryDependencies": ["button"]
        }
        "#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.registry_dependencies, vec!["button".to_string()]);
        assert_eq!(item.dependencies.len(), 1);
    }
}
