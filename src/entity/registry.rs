use rustc_hash::FxHashMap;

use super::SatelliteVisual;
use crate::scene::{ObjectId, SceneInterface};

/// One dataset record and its visuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteEntry {
    /// Satellite name.
    pub name: String,
    /// Scene handles, `None` when construction failed.
    pub visual: Option<SatelliteVisual>,
}

/// Ordered satellite registry keyed by record index and by name.
///
/// Every record of the current dataset has exactly one entry, in dataset
/// order, whether or not its visuals could be built. The per-kind handle
/// views (markers, orbits, two swath slots per satellite) are derived from
/// the entries, so they can never drift out of alignment.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entries: Vec<SatelliteEntry>,
    by_name: FxHashMap<String, usize>,
}

impl EntityRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records (built or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no dataset is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a record's entry and return its index. A duplicate name keeps
    /// resolving to the first record with that name.
    pub fn push(&mut self, name: &str, visual: Option<SatelliteVisual>) -> usize {
        let index = self.entries.len();
        if self.by_name.contains_key(name) {
            log::warn!("duplicate satellite name '{name}' at index {index}");
        } else {
            let _ = self.by_name.insert(name.to_owned(), index);
        }
        self.entries.push(SatelliteEntry {
            name: name.to_owned(),
            visual,
        });
        index
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SatelliteEntry> {
        self.entries.get(index)
    }

    /// Visuals at `index`, `None` for placeholders and out-of-range indices.
    #[must_use]
    pub fn visual(&self, index: usize) -> Option<&SatelliteVisual> {
        self.entries.get(index).and_then(|e| e.visual.as_ref())
    }

    /// Index of the record named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// All entries in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &SatelliteEntry> {
        self.entries.iter()
    }

    /// Built visuals with their record index.
    pub fn visuals(&self) -> impl Iterator<Item = (usize, &SatelliteVisual)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.visual.as_ref().map(|v| (i, v)))
    }

    /// Marker handle per record.
    #[must_use]
    pub fn marker_handles(&self) -> Vec<Option<ObjectId>> {
        self.entries
            .iter()
            .map(|e| e.visual.map(|v| v.marker))
            .collect()
    }

    /// Orbit handle per record.
    #[must_use]
    pub fn orbit_handles(&self) -> Vec<Option<ObjectId>> {
        self.entries
            .iter()
            .map(|e| e.visual.map(|v| v.orbit))
            .collect()
    }

    /// Two swath slots per record: left at `2 * i`, right at `2 * i + 1`.
    #[must_use]
    pub fn swath_handles(&self) -> Vec<Option<ObjectId>> {
        self.entries
            .iter()
            .flat_map(|e| {
                let v = e.visual;
                [
                    v.and_then(|v| v.left_swath),
                    v.and_then(|v| v.right_swath),
                ]
            })
            .collect()
    }

    /// Number of scene objects owned by the registry.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.visuals().map(|(_, v)| v.object_ids().count()).sum()
    }

    /// Remove every owned object from `scene` and forget all entries.
    /// Returns the number of objects removed.
    pub fn clear<S: SceneInterface>(&mut self, scene: &mut S) -> usize {
        let mut removed = 0;
        for entry in self.entries.drain(..) {
            for id in entry.visual.iter().flat_map(SatelliteVisual::object_ids) {
                if scene.remove_object(id) {
                    removed += 1;
                } else {
                    log::warn!("'{}': object #{} was already detached", entry.name, id.0);
                }
            }
        }
        self.by_name.clear();
        log::debug!("cleared {removed} scene objects");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(base: u64, swaths: bool) -> SatelliteVisual {
        SatelliteVisual {
            marker: ObjectId(base),
            orbit: ObjectId(base + 1),
            left_swath: swaths.then_some(ObjectId(base + 2)),
            right_swath: swaths.then_some(ObjectId(base + 3)),
        }
    }

    #[test]
    fn views_stay_index_aligned() {
        let mut registry = EntityRegistry::new();
        let _ = registry.push("A", Some(visual(10, true)));
        let _ = registry.push("B", None);
        let _ = registry.push("C", Some(visual(20, false)));

        assert_eq!(
            registry.marker_handles(),
            vec![Some(ObjectId(10)), None, Some(ObjectId(20))]
        );
        assert_eq!(
            registry.orbit_handles(),
            vec![Some(ObjectId(11)), None, Some(ObjectId(21))]
        );
        assert_eq!(
            registry.swath_handles(),
            vec![
                Some(ObjectId(12)),
                Some(ObjectId(13)),
                None,
                None,
                None,
                None
            ]
        );
        assert_eq!(registry.object_count(), 6);
    }

    #[test]
    fn names_resolve_to_first_index() {
        let mut registry = EntityRegistry::new();
        let _ = registry.push("A", None);
        let _ = registry.push("B", None);
        let _ = registry.push("A", None);
        assert_eq!(registry.index_of("A"), Some(0));
        assert_eq!(registry.index_of("B"), Some(1));
        assert_eq!(registry.index_of("Z"), None);
        assert_eq!(registry.len(), 3);
    }
}
