use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A rectangular pixel region, `(x, y)` top-left corner plus extent.
///
/// Interaction regions are authored as edge coordinates and derived via
/// [`Region::from_edges`]; scene map placements carry width and height
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Region {
    /// Build a region from edge coordinates: `(left, top, right - left,
    /// bottom - top)`.
    pub fn from_edges(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// A scene: a visitable location, a spot on the world map, both, or neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub name: Option<String>,
    /// Clickable placement on the world map, if the scene is mapped.
    pub map_region: Option<Region>,
    /// Tooltip shown on the map; defaults to the scene name.
    pub tooltip: Option<String>,
    /// Background image, if the scene is visitable.
    pub bg_image: Option<String>,
    /// Background dimensions in pixels, `(width, height)`.
    pub bg_size: Option<(i64, i64)>,
    /// Set only for visitable scenes.
    pub indoors: Option<bool>,
    /// Interactions in source declaration order.
    pub interactions: Vec<SceneInteraction>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A clickable interaction within a scene.
///
/// Links to an item or character by name only — the interaction does not own
/// the referenced entity, and the compiler does not verify it exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneInteraction {
    pub name: Option<String>,
    pub linked_item: Option<String>,
    pub linked_character: Option<String>,
    pub default_action: Option<String>,
    pub default_state: Option<String>,
    pub overlay_image: Option<String>,
    /// Action verb (e.g. `Talk`) to its ordered condition→action mappings.
    pub action_mappings: BTreeMap<String, Vec<ActionMapping>>,
    /// Named actions local to this interaction.
    pub actions: BTreeMap<String, Action>,
    /// States in source declaration order; the first whose condition holds
    /// (or the first catchall) is active.
    pub states: Vec<InteractionState>,
}

impl SceneInteraction {
    /// Create an empty interaction.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One conditional visual/behavioral state of an interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    pub name: String,
    /// `None` is a catchall: the state always matches.
    pub condition: Option<String>,
    pub tooltip: Option<String>,
    pub image: Option<String>,
    /// Clickable region; absent when the source edges are missing or
    /// non-numeric (e.g. an item already taken has no hotspot).
    pub region: Option<Region>,
    pub enabled: bool,
    pub visible: bool,
}

/// One entry of an action map: when `condition` holds (or unconditionally
/// for a catchall), `action` runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMapping {
    /// `None` is a catchall that terminates effective evaluation.
    pub condition: Option<String>,
    pub item: Option<String>,
    pub action: Option<String>,
    /// Verb inherited from the enclosing action map.
    pub verb: Option<String>,
    /// Connective phrase inherited from the enclosing action map.
    pub connective: Option<String>,
}

/// A named, ordered command sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    pub commands: Vec<Command>,
}

/// A single game command. Closed set: the serializer's `event` tag mapping
/// is total over exactly these variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Command {
    /// Show narration text.
    Narrate {
        /// The narration text.
        content: String,
    },
    /// Move the player to another scene.
    MoveTo {
        /// Target scene name.
        destination: String,
    },
    /// Grant a game flag.
    Grant {
        /// Flag name.
        flag: String,
    },
    /// Put an item into the player's inventory.
    Take {
        /// Item name.
        item: String,
    },
}
