//! Scene interaction compilation.
//!
//! An interaction owns its conditional states and its per-verb action maps.
//! Both are ordered lists evaluated first-match-wins at runtime, so the
//! compiler preserves declaration order exactly, even for entries shadowed
//! by an earlier catchall.

use pq_core::{InteractionState, Region, SceneInteraction};
use pq_wiki::{ParamMap, single_template};

use crate::compiler::{WorldCompiler, condition_text};
use crate::source::ContentSource;

/// The five interaction verbs and the parameters that carry their maps.
const ACTION_VERBS: [(&str, &str); 5] = [
    ("action-talk", "Talk"),
    ("action-take", "Take"),
    ("action-use", "Use"),
    ("action-inspect", "Inspect"),
    ("action-apply", "Apply"),
];

/// Why a region could not be derived from its edge parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// An edge parameter was absent.
    #[error("missing region edge \"{0}\"")]
    Missing(&'static str),

    /// An edge parameter did not parse as an integer.
    #[error("region edge \"{field}\" is not an integer: \"{value}\"")]
    NonNumeric {
        /// The offending edge name.
        field: &'static str,
        /// The raw value found.
        value: String,
    },
}

/// Derive a clickable region from `left`/`top`/`right`/`bottom` edge
/// parameters.
pub fn derive_region(params: &ParamMap) -> Result<Region, RegionError> {
    let edge = |field: &'static str| -> Result<i64, RegionError> {
        let raw = params
            .get_text(field)
            .ok_or(RegionError::Missing(field))?;
        raw.parse()
            .map_err(|_| RegionError::NonNumeric { field, value: raw })
    };
    Ok(Region::from_edges(
        edge("left")?,
        edge("top")?,
        edge("right")?,
        edge("bottom")?,
    ))
}

impl<S: ContentSource> WorldCompiler<S> {
    /// Compile one `Scene Interaction` template into an interaction.
    ///
    /// Shape problems inside the interaction (a malformed state, a missing
    /// action map) degrade to warnings or drop the fragment; the interaction
    /// itself always comes out.
    pub(crate) fn compile_interaction(&mut self, params: &ParamMap) -> SceneInteraction {
        let mut interaction = SceneInteraction::new();
        interaction.name = params.get_text("name");
        interaction.linked_item = params.get_text("linked-item");
        interaction.linked_character = params.get_text("linked-character");
        interaction.default_action = params.get_text("default-action");
        interaction.default_state = params.get_text("default-state");
        interaction.overlay_image = params.get_text("overlay-image");
        self.register_image(interaction.overlay_image.as_deref());

        let label = interaction.name.clone().unwrap_or_default();

        let mut any_map = false;
        for (param, verb) in ACTION_VERBS {
            if let Some(value) = params.get(param) {
                any_map = true;
                let mappings = self.compile_action_map(&label, verb, value);
                interaction
                    .action_mappings
                    .insert(verb.to_string(), mappings);
            }
        }
        if !any_map {
            self.diagnostics
                .warning(format!("Interaction \"{label}\" has no action maps."));
        }

        if let Some(value) = params.get("actions") {
            match single_template(value) {
                Ok(template) if template.name == "Actions" => {
                    interaction.actions = self.compile_actions(&label, &template.params);
                }
                Ok(template) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\": expected an \"Actions\" template, got \"{}\"; skipping.",
                    template.name
                )),
                Err(e) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\": malformed \"actions\" value ({e}); skipping."
                )),
            }
        }

        match params.get("states") {
            None => self
                .diagnostics
                .error(format!("Interaction \"{label}\" has no states.")),
            Some(value) => match single_template(value) {
                Ok(template) if template.name == "States" => {
                    interaction.states = self.compile_interaction_states(&label, &template.params);
                }
                Ok(template) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\": expected a \"States\" template, got \"{}\"; skipping.",
                    template.name
                )),
                Err(e) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\": malformed \"states\" value ({e}); skipping."
                )),
            },
        }

        interaction
    }

    /// Compile the entries of a `States` template, in order.
    ///
    /// A catchall state (no condition) shadows everything after it at
    /// runtime; the shadowed tail is kept in the output but reported once
    /// as an aggregate warning.
    fn compile_interaction_states(
        &mut self,
        label: &str,
        params: &ParamMap,
    ) -> Vec<InteractionState> {
        let mut states = Vec::new();
        let mut catchall_seen = false;
        let mut inaccessible = 0usize;

        for (key, value) in params.iter() {
            let template = match single_template(value) {
                Ok(t) if t.name == "State" => t,
                Ok(t) => {
                    self.diagnostics.warning(format!(
                        "Interaction \"{label}\", state \"{key}\": expected a \"State\" template, got \"{}\"; skipping.",
                        t.name
                    ));
                    continue;
                }
                Err(e) => {
                    self.diagnostics.warning(format!(
                        "Interaction \"{label}\", state \"{key}\": malformed value ({e}); skipping."
                    ));
                    continue;
                }
            };

            let state = self.compile_interaction_state(label, key, &template.params);
            if catchall_seen {
                inaccessible += 1;
            }
            if state.condition.is_none() {
                catchall_seen = true;
            }
            states.push(state);
        }

        if inaccessible > 0 {
            self.diagnostics.warning(format!(
                "Interaction \"{label}\": {inaccessible} states are inaccessible due to an earlier catchall state."
            ));
        }

        states
    }

    fn compile_interaction_state(
        &mut self,
        label: &str,
        name: &str,
        params: &ParamMap,
    ) -> InteractionState {
        let mut state = InteractionState {
            name: name.to_string(),
            condition: condition_text(params.get_text("condition")),
            tooltip: params.get_text("tooltip"),
            image: params.get_text("image"),
            region: None,
            enabled: params.get_text("enabled").as_deref() == Some("yes"),
            visible: params.get_text("visible").as_deref() == Some("yes"),
        };
        self.register_image(state.image.as_deref());

        match derive_region(params) {
            Ok(region) => state.region = Some(region),
            Err(e) => self.diagnostics.warning(format!(
                "Interaction \"{label}\", state \"{name}\" has no region: {e}."
            )),
        }

        state
    }
}
