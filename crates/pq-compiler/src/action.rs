//! Action and action-map compilation.
//!
//! An interaction carries two related structures: named actions (command
//! sequences the runtime can execute) and per-verb action maps (ordered
//! condition lists picking which action runs). Both live in parameter
//! values as nested templates.

use std::collections::BTreeMap;

use pq_core::{Action, ActionMapping, Command};
use pq_wiki::{ParamMap, Template, extract_templates, single_template};

use crate::compiler::{WorldCompiler, condition_text};
use crate::source::ContentSource;

impl<S: ContentSource> WorldCompiler<S> {
    /// Compile the entries of an `Actions` template into named actions.
    pub(crate) fn compile_actions(
        &mut self,
        label: &str,
        params: &ParamMap,
    ) -> BTreeMap<String, Action> {
        let mut actions = BTreeMap::new();
        for (key, value) in params.iter() {
            match single_template(value) {
                Ok(template) if template.name == "Action" => {
                    let action = self.compile_action(label, key, &template.params);
                    actions.insert(key.to_string(), action);
                }
                Ok(template) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\", action \"{key}\": expected an \"Action\" template, got \"{}\"; skipping.",
                    template.name
                )),
                Err(e) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\", action \"{key}\": malformed value ({e}); skipping."
                )),
            }
        }
        actions
    }

    fn compile_action(&mut self, label: &str, name: &str, params: &ParamMap) -> Action {
        let mut action = Action {
            name: name.to_string(),
            commands: Vec::new(),
        };
        for (_, value) in params.iter() {
            match single_template(value) {
                Ok(template) => {
                    if let Some(command) = self.compile_command(label, name, &template) {
                        action.commands.push(command);
                    }
                }
                Err(e) => self.diagnostics.warning(format!(
                    "Interaction \"{label}\", action \"{name}\": malformed command ({e}); skipping."
                )),
            }
        }
        action
    }

    /// Compile one command template. The command set is closed; anything
    /// else is skipped with a warning.
    fn compile_command(&mut self, label: &str, action: &str, template: &Template) -> Option<Command> {
        let arg = match template.params.get_text("1") {
            Some(arg) => arg,
            None => {
                self.diagnostics.warning(format!(
                    "Interaction \"{label}\", action \"{action}\": \"{}\" command has no argument; skipping.",
                    template.name
                ));
                return None;
            }
        };
        match template.name.as_str() {
            "Narrate" => Some(Command::Narrate { content: arg }),
            "MoveTo" => Some(Command::MoveTo { destination: arg }),
            "Grant" => Some(Command::Grant { flag: arg }),
            "Take" => Some(Command::Take { item: arg }),
            other => {
                self.diagnostics.warning(format!(
                    "Interaction \"{label}\", action \"{action}\": unknown command \"{other}\"; skipping."
                ));
                None
            }
        }
    }

    /// Compile one verb's action map from its parameter value.
    ///
    /// The value must hold exactly one `ActionMap` template; its `verb` and
    /// `connective` params are stamped onto every mapping, and the numbered
    /// params each hold one `When` entry. Entries after the first catchall
    /// are kept in order and reported once as an aggregate warning.
    pub(crate) fn compile_action_map(
        &mut self,
        label: &str,
        map_verb: &str,
        value: &str,
    ) -> Vec<ActionMapping> {
        let mut templates = extract_templates(value);
        if templates.is_empty() {
            self.diagnostics.error(format!(
                "Interaction \"{label}\", {map_verb} map: no \"ActionMap\" template found."
            ));
            return Vec::new();
        }
        if templates.len() > 1 {
            self.diagnostics.warning(format!(
                "Interaction \"{label}\", {map_verb} map: {} templates found, using the first.",
                templates.len()
            ));
        }
        let template = templates.remove(0);
        if template.name != "ActionMap" {
            self.diagnostics.error(format!(
                "Interaction \"{label}\", {map_verb} map: expected an \"ActionMap\" template, got \"{}\".",
                template.name
            ));
            return Vec::new();
        }

        let verb = template.params.get_text("verb");
        let connective = template.params.get_text("connective");

        let mut mappings = Vec::new();
        let mut catchall_seen = false;
        let mut inaccessible = 0usize;

        for (key, entry) in template.params.iter() {
            if key == "verb" || key == "connective" {
                continue;
            }
            let when = match single_template(entry) {
                Ok(t) if t.name == "When" => t,
                Ok(t) => {
                    self.diagnostics.warning(format!(
                        "Interaction \"{label}\", {map_verb} map: expected a \"When\" template, got \"{}\"; skipping.",
                        t.name
                    ));
                    continue;
                }
                Err(e) => {
                    self.diagnostics.warning(format!(
                        "Interaction \"{label}\", {map_verb} map: malformed entry ({e}); skipping."
                    ));
                    continue;
                }
            };

            let mapping = ActionMapping {
                condition: condition_text(when.params.get_text("condition")),
                item: when.params.get_text("item"),
                action: when.params.get_text("action"),
                verb: verb.clone(),
                connective: connective.clone(),
            };
            if catchall_seen {
                inaccessible += 1;
            }
            if mapping.condition.is_none() {
                catchall_seen = true;
            }
            mappings.push(mapping);
        }

        if mappings.is_empty() {
            self.diagnostics.warning(format!(
                "Interaction \"{label}\", {map_verb} map is empty."
            ));
        }
        if inaccessible > 0 {
            self.diagnostics.warning(format!(
                "Interaction \"{label}\", {map_verb} map: {inaccessible} mapped actions are inaccessible due to an earlier catchall condition."
            ));
        }

        mappings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::source::testutil::MockSource;

    fn compiler() -> WorldCompiler<MockSource> {
        WorldCompiler::new(MockSource::default())
    }

    #[test]
    fn compiles_actions_with_all_command_kinds() {
        let mut c = compiler();
        let template = single_template(
            "{{Actions\
             |open-door={{Action\
             |1={{Narrate|The door creaks open.}}\
             |2={{Grant|door-open}}\
             |3={{MoveTo|Cellar}}}}\
             |take-key={{Action|1={{Take|Brass Key}}}}}}",
        )
        .unwrap();
        let actions = c.compile_actions("door", &template.params);

        assert_eq!(actions.len(), 2);
        let open = &actions["open-door"];
        assert_eq!(
            open.commands,
            vec![
                Command::Narrate {
                    content: "The door creaks open.".into()
                },
                Command::Grant {
                    flag: "door-open".into()
                },
                Command::MoveTo {
                    destination: "Cellar".into()
                },
            ]
        );
        assert_eq!(
            actions["take-key"].commands,
            vec![Command::Take {
                item: "Brass Key".into()
            }]
        );
        assert!(!c.diagnostics.has_errors());
    }

    #[test]
    fn unknown_command_is_skipped_with_warning() {
        let mut c = compiler();
        let template = single_template(
            "{{Actions|act={{Action\
             |1={{Explode|everything}}\
             |2={{Narrate|Still here.}}}}}}",
        )
        .unwrap();
        let actions = c.compile_actions("door", &template.params);

        assert_eq!(actions["act"].commands.len(), 1);
        assert!(
            c.diagnostics
                .messages(Severity::Warning)
                .iter()
                .any(|m| m.contains("Explode"))
        );
    }

    #[test]
    fn command_without_argument_is_skipped() {
        let mut c = compiler();
        let template = single_template("{{Actions|act={{Action|1={{Narrate}}}}}}").unwrap();
        let actions = c.compile_actions("door", &template.params);
        assert!(actions["act"].commands.is_empty());
        assert!(!c.diagnostics.messages(Severity::Warning).is_empty());
    }

    #[test]
    fn action_map_stamps_verb_and_connective() {
        let mut c = compiler();
        let mappings = c.compile_action_map(
            "door",
            "Apply",
            "{{ActionMap|verb=Unlock|connective=with\
             |1={{When|item=Brass Key|action=unlock-door}}\
             |2={{When|action=rattle-door}}}}",
        );

        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].verb.as_deref(), Some("Unlock"));
        assert_eq!(mappings[0].connective.as_deref(), Some("with"));
        assert_eq!(mappings[0].item.as_deref(), Some("Brass Key"));
        assert_eq!(mappings[0].action.as_deref(), Some("unlock-door"));
        assert!(mappings[0].condition.is_none());
        assert_eq!(mappings[1].verb.as_deref(), Some("Unlock"));
    }

    #[test]
    fn entries_after_catchall_warn_once_but_stay() {
        let mut c = compiler();
        let mappings = c.compile_action_map(
            "door",
            "Use",
            "{{ActionMap\
             |1={{When|action=a}}\
             |2={{When|condition=flags.x|action=b}}\
             |3={{When|action=c}}}}",
        );

        let order: Vec<_> = mappings.iter().map(|m| m.action.as_deref()).collect();
        assert_eq!(order, vec![Some("a"), Some("b"), Some("c")]);

        let aggregate: Vec<_> = c
            .diagnostics
            .messages(Severity::Warning)
            .into_iter()
            .filter(|m| m.contains("inaccessible"))
            .collect();
        assert_eq!(aggregate.len(), 1);
        assert!(aggregate[0].contains("2 mapped actions"));
    }

    #[test]
    fn missing_map_template_is_an_error() {
        let mut c = compiler();
        let mappings = c.compile_action_map("door", "Use", "nothing here");
        assert!(mappings.is_empty());
        assert!(c.diagnostics.has_errors());
    }

    #[test]
    fn wrong_map_name_is_an_error() {
        let mut c = compiler();
        let mappings = c.compile_action_map("door", "Use", "{{ActoinMap|1={{When|action=a}}}}");
        assert!(mappings.is_empty());
        assert!(
            c.diagnostics
                .messages(Severity::Error)
                .iter()
                .any(|m| m.contains("ActoinMap"))
        );
    }

    #[test]
    fn extra_map_templates_use_the_first() {
        let mut c = compiler();
        let mappings = c.compile_action_map(
            "door",
            "Use",
            "{{ActionMap|1={{When|action=a}}}} {{ActionMap|1={{When|action=b}}}}",
        );
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].action.as_deref(), Some("a"));
        assert!(!c.diagnostics.has_errors());
        assert!(!c.diagnostics.messages(Severity::Warning).is_empty());
    }

    #[test]
    fn empty_map_warns() {
        let mut c = compiler();
        let mappings = c.compile_action_map("door", "Use", "{{ActionMap|verb=Open}}");
        assert!(mappings.is_empty());
        assert!(
            c.diagnostics
                .messages(Severity::Warning)
                .iter()
                .any(|m| m.contains("empty"))
        );
    }
}
