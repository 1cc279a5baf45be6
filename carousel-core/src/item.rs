//! Carousel items
//!
//! Items are immutable. Identity is carried by [`ItemId`]; equality and
//! hashing look at the id only.

use std::fmt;
use std::hash::{Hash, Hasher};

use url::Url;
use uuid::Uuid;

/// Namespace for ids derived from an item's title and image URL.
const ITEM_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93b7_4d0a_8e55_c3a1_7b2d_9f40);

/// Stable identity of a carousel entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(Uuid);

impl ItemId {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Deterministic id for a `(title, image_url)` pair. Two items built
    /// from identical content share an id.
    pub fn from_content(title: &str, image_url: Option<&Url>) -> Self {
        let mut name = Vec::with_capacity(title.len() + 64);
        name.extend_from_slice(title.as_bytes());
        // Separator that cannot appear in a UTF-8 title.
        name.push(0xff);
        if let Some(url) = image_url {
            name.extend_from_slice(url.as_str().as_bytes());
        }
        Self(Uuid::new_v5(&ITEM_ID_NAMESPACE, &name))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single video tile.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselItem {
    id: ItemId,
    title: String,
    image_url: Option<Url>,
}

impl CarouselItem {
    /// Build an item whose identity follows its content.
    pub fn new(title: impl Into<String>, image_url: Option<Url>) -> Self {
        let title = title.into();
        let id = ItemId::from_content(&title, image_url.as_ref());
        Self {
            id,
            title,
            image_url,
        }
    }

    /// Build an item with an explicit id, e.g. to keep two entries with the
    /// same title and image apart.
    pub fn with_id(
        id: ItemId,
        title: impl Into<String>,
        image_url: Option<Url>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image_url,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image_url(&self) -> Option<&Url> {
        self.image_url.as_ref()
    }
}

impl PartialEq for CarouselItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CarouselItem {}

impl Hash for CarouselItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Seed data for the demo carousel.
pub mod seed {
    use super::CarouselItem;
    use url::Url;

    /// The five numbered videos shown at startup.
    pub fn video_seed() -> Vec<CarouselItem> {
        (1..=5)
            .map(|n| {
                let url = Url::parse(&format!(
                    "https://source.unsplash.com/random?sig={n}"
                ))
                .ok();
                CarouselItem::new(n.to_string(), url)
            })
            .collect()
    }
}
