use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::image::ImageRefs;
use crate::item::Item;
use crate::scene::Scene;

/// The compiled world: map metadata plus every scene, character, and item
/// discovered in the source pages, and the image reference table.
///
/// A `World` is built fresh per compile run and never mutated afterwards.
/// All entity lists preserve source declaration order — the runtime
/// evaluates conditions first-match-wins, so order is load-bearing.
///
/// Map metadata fields are individually optional: a missing or malformed
/// value on the world page loses that field, not the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    /// Display name of the world map.
    pub map_name: Option<String>,
    /// Background image for the map view.
    pub image: Option<String>,
    /// Map dimensions in pixels, `(width, height)`.
    pub size: Option<(i64, i64)>,
    /// Initial pan position in pixels, `(x, y)`.
    pub pan_start: Option<(i64, i64)>,
    /// Initial zoom level.
    pub zoom_start: Option<i64>,
    /// Maximum zoom level.
    pub zoom_max: Option<i64>,
    /// Whether panning is clamped to the map bounds.
    pub viewport_restricted: bool,
    /// Scenes in source discovery order.
    pub scenes: Vec<Scene>,
    /// Characters in source discovery order.
    pub characters: Vec<Character>,
    /// Items in source discovery order.
    pub items: Vec<Item>,
    /// Every image referenced anywhere in the model, canonical name to URL.
    pub image_refs: ImageRefs,
}

impl World {
    /// Create an empty world with no metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of compiled entities (scenes + characters + items).
    pub fn entity_count(&self) -> usize {
        self.scenes.len() + self.characters.len() + self.items.len()
    }
}
