//! Catalog access
//!
//! One client per catalog side. A local override file, when present
//! and parseable, wins over the network; otherwise a single HTTP GET
//! with no retry. Catalog fallback (primary vs. fallback) is
//! orchestrated a level up, in the resolver and commands.

use std::path::PathBuf;

use url::Url;

use crate::error::RegistryError;
use crate::registry::schema::{IndexEntry, Item, ItemKind, RegistryIndex};

/// Which of the two parallel catalogs a client addresses.
///
/// The two sides use different URL conventions and are independent:
/// items sharing a name across sides are distinct artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSide {
    Primary,
    Fallback,
}

impl CatalogSide {
    /// Relative path of the index document.
    fn index_path(&self) -> &'static str {
        match self {
            CatalogSide::Primary => "registry/index.json",
            CatalogSide::Fallback => "r/index.json",
        }
    }

    /// Relative path of a single item document.
    fn item_path(&self, kind: ItemKind, name: &str) -> String {
        match self {
            CatalogSide::Primary => format!("registry/{}/{}.json", kind.path_segments(), name),
            CatalogSide::Fallback => format!("r/{}.json", name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    side: CatalogSide,
    base_url: Url,
    local_override: Option<PathBuf>,
}

impl CatalogClient {
    pub fn new(side: CatalogSide, base_url: Url) -> Self {
        Self {
            side,
            base_url,
            local_override: None,
        }
    }

    /// Configure a local override file checked before any network call.
    pub fn with_local_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_override = Some(path.into());
        self
    }

    pub fn side(&self) -> CatalogSide {
        self.side
    }

    /// Fetch the catalog index.
    ///
    /// A present and parseable local override wins; otherwise one GET
    /// of the side's index path. A failed fetch is a hard error, never
    /// a soft fallback to the other catalog.
    pub fn get_index(&self) -> Result<Vec<IndexEntry>, RegistryError> {
        if let Some(index) = self.read_override() {
            return Ok(index.into_entries());
        }

        let url = self.join(self.side.index_path())?;
        let body = self
            .fetch(&url)?
            .ok_or_else(|| RegistryError::unavailable(url.as_str(), "HTTP 404"))?;
        let index = RegistryIndex::parse(&body)
            .map_err(|err| RegistryError::unavailable(url.as_str(), err))?;
        Ok(index.into_entries())
    }

    /// Fetch a single item's full content.
    ///
    /// `Ok(None)` means the catalog has no item by this name; that is
    /// a normal outcome, not an error.
    pub fn get_item(&self, kind: ItemKind, name: &str) -> Result<Option<Item>, RegistryError> {
        if let Some(index) = self.read_override() {
            if index.serves_items() {
                // Once the override parses with embedded content it is
                // authoritative: a missing item is a miss, not a cue to
                // consult the network.
                return Ok(index.item(kind, name).cloned());
            }
            // A flat override carries no file content; items still come
            // from the network.
        }

        let url = self.join(&self.side.item_path(kind, name))?;
        let Some(body) = self.fetch(&url)? else {
            return Ok(None);
        };
        let item: Item = serde_json::from_str(&body)
            .map_err(|err| RegistryError::unavailable(url.as_str(), err))?;
        Ok(Some(item))
    }

    /// Read the local override, if configured, present, and parseable.
    /// An unreadable or unparseable override falls through to the
    /// network rather than failing the call.
    fn read_override(&self) -> Option<RegistryIndex> {
        let path = self.local_override.as_ref()?;
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("ignoring unreadable override {}: {}", path.display(), err);
                return None;
            }
        };
        match RegistryIndex::parse(&content) {
            Ok(index) => {
                tracing::debug!("using local override {}", path.display());
                Some(index)
            }
            Err(err) => {
                tracing::debug!("ignoring unparseable override {}: {}", path.display(), err);
                None
            }
        }
    }

    fn join(&self, relative: &str) -> Result<Url, RegistryError> {
        let mut base = self.base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&format!("{base}{relative}"))
            .map_err(|err| RegistryError::InvalidBaseUrl(format!("{base}{relative}: {err}")))
    }

    /// One GET, no retry. `Ok(None)` is a 404.
    fn fetch(&self, url: &Url) -> Result<Option<String>, RegistryError> {
        let runtime = tokio::runtime::Runtime::new().map_err(|err| {
            RegistryError::unavailable(
                url.as_str(),
                format!("failed to create tokio runtime: {err}"),
            )
        })?;
        runtime.block_on(fetch_text(url))
    }
}

async fn fetch_text(url: &Url) -> Result<Option<String>, RegistryError> {
    let response = reqwest::get(url.clone())
        .await
        .map_err(|err| RegistryError::unavailable(url.as_str(), err))?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(RegistryError::unavailable(
            url.as_str(),
            format!("HTTP {}", response.status()),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|err| RegistryError::unavailable(url.as_str(), err))?;
    Ok(Some(body))
}
