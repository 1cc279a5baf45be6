//! Carousel item store
//!
//! Owns the ordered item list and the current selection. The selection is
//! written only through [`CarouselStore::select`], [`CarouselStore::initialize`]
//! and the list-replacement helpers; every other component reads snapshots.

use crate::item::{CarouselItem, ItemId};

/// Items in display order plus at most one selected item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselState {
    pub items: Vec<CarouselItem>,
    pub selected: Option<CarouselItem>,
}

impl CarouselState {
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, item: &CarouselItem) -> bool {
        self.position_of(item.id()).is_some()
    }
}

/// Emitted by [`CarouselStore::select`]; the composition forwards it to the
/// surface so the new selection is scrolled to the center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<CarouselItem>,
    pub current: CarouselItem,
}

#[derive(Debug, Clone, Default)]
pub struct CarouselStore {
    state: CarouselState,
}

impl CarouselStore {
    pub fn new(seed: Vec<CarouselItem>) -> Self {
        let mut store = Self::default();
        store.initialize(seed);
        store
    }

    /// Replace the items and clear the selection.
    pub fn initialize(&mut self, seed: Vec<CarouselItem>) {
        log::debug!("CarouselStore: initialized with {} items", seed.len());
        self.state = CarouselState {
            items: seed,
            selected: None,
        };
    }

    /// Record `item` as selected. Last write wins.
    ///
    /// Membership is not checked: selecting an item that is not in
    /// [`Self::items`] is recorded all the same, and scrolling to it is a
    /// no-op further down.
    pub fn select(&mut self, item: CarouselItem) -> SelectionChange {
        if !self.state.contains(&item) {
            log::debug!(
                "CarouselStore: selecting '{}' which is not in the item list",
                item.title()
            );
        }
        let previous = self.state.selected.replace(item.clone());
        SelectionChange {
            previous,
            current: item,
        }
    }

    /// Replace the items while keeping the selection if its item survives.
    /// Returns the selection that was dropped, if any.
    pub fn replace_items(
        &mut self,
        items: Vec<CarouselItem>,
    ) -> Option<CarouselItem> {
        self.state.items = items;
        let vanished = self
            .state
            .selected
            .as_ref()
            .is_some_and(|selected| !self.state.contains(selected));
        if !vanished {
            return None;
        }

        let dropped = self.state.selected.take();
        if let Some(item) = &dropped {
            log::debug!(
                "CarouselStore: selection '{}' removed with item list update",
                item.title()
            );
        }
        dropped
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.state.items
    }

    pub fn selected(&self) -> Option<&CarouselItem> {
        self.state.selected.as_ref()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }
}
