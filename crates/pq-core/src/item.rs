use serde::{Deserialize, Serialize};

/// An inventory item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: Option<String>,
    pub inventory_tooltip: Option<String>,
    pub inventory_icon: Option<String>,
}

impl Item {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }
}
