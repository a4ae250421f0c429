use serde::{Deserialize, Serialize};

/// A character the player can meet and talk to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: Option<String>,
    pub tooltip: Option<String>,
    pub image: Option<String>,
    /// CSS-style color for this character's speech text.
    pub speech_color: Option<String>,
    /// Dialogue trees in source declaration order.
    pub dialogues: Vec<Dialogue>,
}

impl Character {
    /// Create an empty character.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A named dialogue tree: an ordered sequence of dialogue events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialogue {
    pub name: Option<String>,
    pub lines: Vec<DialogueEvent>,
}

/// One event in a dialogue. Closed set: the serializer's `event` tag mapping
/// is total over exactly these variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum DialogueEvent {
    /// A spoken line.
    Line {
        /// Who says it.
        speaker: String,
        /// What is said.
        content: String,
    },
    /// A branching choice offered to the player.
    Prompt {
        /// Optional anchor name for jumps back into this prompt.
        name: Option<String>,
        /// Options in declaration order.
        options: Vec<DialogueOption>,
    },
    /// Continue at another named dialogue or prompt.
    Jump {
        /// Target dialogue or prompt name.
        target: String,
    },
    /// Grant a game flag mid-dialogue.
    Grant {
        /// Flag name.
        flag: String,
    },
}

/// One selectable option of a [`DialogueEvent::Prompt`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueOption {
    pub label: Option<String>,
    /// `None` means the option is always offered.
    pub condition: Option<String>,
    /// Events played when the option is chosen.
    pub result: Vec<DialogueEvent>,
}
