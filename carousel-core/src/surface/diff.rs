//! Keyed diff between two item lists

use std::collections::{HashMap, HashSet};

use crate::item::{CarouselItem, ItemId};

/// Outcome of applying a new item list, keyed by [`ItemId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDiff {
    pub inserted: Vec<ItemId>,
    pub removed: Vec<ItemId>,
    /// Retained items whose index changed, as `(id, old, new)`.
    pub moved: Vec<(ItemId, usize, usize)>,
    /// Retained items, moved or not.
    pub retained: usize,
}

impl ItemDiff {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.removed.is_empty()
            && self.moved.is_empty()
    }

    pub fn compute(old: &[CarouselItem], new: &[CarouselItem]) -> Self {
        let old_index = first_positions(old);
        let new_index = first_positions(new);

        let mut diff = ItemDiff::default();
        let mut seen = HashSet::with_capacity(new.len());
        for (new_pos, item) in new.iter().enumerate() {
            let id = item.id();
            if !seen.insert(id) {
                continue;
            }
            match old_index.get(&id) {
                Some(&old_pos) => {
                    diff.retained += 1;
                    if old_pos != new_pos {
                        diff.moved.push((id, old_pos, new_pos));
                    }
                }
                None => diff.inserted.push(id),
            }
        }

        let mut seen = HashSet::with_capacity(old.len());
        for item in old {
            let id = item.id();
            if seen.insert(id) && !new_index.contains_key(&id) {
                diff.removed.push(id);
            }
        }
        diff
    }
}

/// Index of the first occurrence of each id. Later duplicates share the
/// first one's slot.
fn first_positions(items: &[CarouselItem]) -> HashMap<ItemId, usize> {
    let mut positions = HashMap::with_capacity(items.len());
    for (pos, item) in items.iter().enumerate() {
        positions.entry(item.id()).or_insert(pos);
    }
    positions
}

/// True when some id appears more than once.
pub fn has_duplicate_ids(items: &[CarouselItem]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    !items.iter().all(|item| seen.insert(item.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::seed::video_seed;

    #[test]
    fn identical_lists_produce_an_empty_diff() {
        let items = video_seed();
        let diff = ItemDiff::compute(&items, &items);
        assert!(diff.is_empty());
        assert_eq!(diff.retained, 5);
    }

    #[test]
    fn insert_remove_and_move() {
        let old = video_seed();
        let extra = CarouselItem::new("6", None);
        // Drop "1", append "6": every survivor shifts left by one.
        let new: Vec<_> = old[1..]
            .iter()
            .cloned()
            .chain(std::iter::once(extra.clone()))
            .collect();

        let diff = ItemDiff::compute(&old, &new);
        assert_eq!(diff.inserted, vec![extra.id()]);
        assert_eq!(diff.removed, vec![old[0].id()]);
        assert_eq!(diff.retained, 4);
        assert_eq!(diff.moved.len(), 4);
        assert_eq!(diff.moved[0], (old[1].id(), 1, 0));
    }

    #[test]
    fn duplicates_are_detected() {
        let mut items = video_seed();
        assert!(!has_duplicate_ids(&items));
        items.push(items[0].clone());
        assert!(has_duplicate_ids(&items));
    }
}
