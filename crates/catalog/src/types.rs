//! Catalog entry and catalog types.

use serde::Serialize;

use magicengine_registry::InstalledPackage;

/// Display projection of one installed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCatalogEntry {
    product_id: u32,
    name: String,
    version: String,
    install_path: String,
}

impl GameCatalogEntry {
    pub fn product_id(&self) -> u32 {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn install_path(&self) -> &str {
        &self.install_path
    }

    /// Label shown in game lists: `"<name> <version>"`, or the bare name
    /// when no version is known.
    pub fn display_label(&self) -> String {
        if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.version)
        }
    }
}

impl From<InstalledPackage> for GameCatalogEntry {
    fn from(pkg: InstalledPackage) -> Self {
        Self {
            product_id: pkg.product_id,
            name: pkg.name,
            version: pkg.version,
            install_path: pkg.install_path,
        }
    }
}

/// Installed games ordered ascending by product id.
///
/// Built in one pass by [`crate::build`] and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCatalog {
    entries: Vec<GameCatalogEntry>,
    duplicate_ids: Vec<u32>,
}

impl GameCatalog {
    pub(crate) fn from_parts(entries: Vec<GameCatalogEntry>, duplicate_ids: Vec<u32>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].product_id < w[1].product_id));
        Self {
            entries,
            duplicate_ids,
        }
    }

    pub fn entries(&self) -> &[GameCatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameCatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a game by product id.
    pub fn get(&self, product_id: u32) -> Option<&GameCatalogEntry> {
        self.entries
            .binary_search_by_key(&product_id, |e| e.product_id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Product ids in catalog order.
    pub fn product_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.product_id)
    }

    /// Product ids that more than one game record reported, ascending.
    ///
    /// The catalog keeps only the last such record; this list lets callers
    /// surface the data-quality problem.
    pub fn duplicate_ids(&self) -> &[u32] {
        &self.duplicate_ids
    }
}

impl<'a> IntoIterator for &'a GameCatalog {
    type Item = &'a GameCatalogEntry;
    type IntoIter = std::slice::Iter<'a, GameCatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, name: &str, version: &str) -> GameCatalogEntry {
        InstalledPackage::new(id, name, version, true).into()
    }

    #[test]
    fn display_label_includes_version() {
        assert_eq!(entry(1, "Base Game", "1.67.2").display_label(), "Base Game 1.67.2");
    }

    #[test]
    fn display_label_without_version() {
        assert_eq!(entry(1, "Base Game", "").display_label(), "Base Game");
    }

    #[test]
    fn get_finds_by_product_id() {
        let catalog = GameCatalog::from_parts(
            vec![entry(1, "A", ""), entry(4, "B", ""), entry(9, "C", "")],
            vec![],
        );

        assert_eq!(catalog.get(4).map(GameCatalogEntry::name), Some("B"));
        assert!(catalog.get(5).is_none());
    }

    #[test]
    fn serializes_for_ui_consumers() {
        let catalog = GameCatalog::from_parts(vec![entry(2, "World Adventures", "2.0")], vec![2]);
        let value = serde_json::to_value(&catalog).unwrap();

        assert_eq!(value["entries"][0]["productId"], 2);
        assert_eq!(value["entries"][0]["name"], "World Adventures");
        assert_eq!(value["duplicateIds"][0], 2);
    }
}
