//! Catalog builder.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use magicengine_registry::InstalledPackage;

use crate::types::{GameCatalog, GameCatalogEntry};

/// Builds a catalog from registry records.
///
/// Keeps records flagged as games, keyed by product id and ordered
/// ascending. When several game records share a product id, the one that
/// comes **last** in `records` wins; the id is logged and listed in
/// [`GameCatalog::duplicate_ids`]. Non-game records never collide with games.
///
/// Total over any finite input, including an empty one.
pub fn build<I>(records: I) -> GameCatalog
where
    I: IntoIterator<Item = InstalledPackage>,
{
    let mut by_id: BTreeMap<u32, InstalledPackage> = BTreeMap::new();
    let mut duplicates: Vec<u32> = Vec::new();
    let mut skipped = 0usize;

    for record in records {
        if !record.is_game {
            skipped += 1;
            continue;
        }
        let product_id = record.product_id;
        if let Some(previous) = by_id.insert(product_id, record) {
            warn!(
                product_id,
                replaced = %previous.name,
                "duplicate game product id in installation registry, keeping the later record"
            );
            duplicates.push(product_id);
        }
    }

    duplicates.sort_unstable();
    duplicates.dedup();

    let entries: Vec<GameCatalogEntry> = by_id.into_values().map(GameCatalogEntry::from).collect();
    debug!(
        games = entries.len(),
        skipped,
        duplicates = duplicates.len(),
        "built game catalog"
    );

    GameCatalog::from_parts(entries, duplicates)
}
