//! Dialogue tree compilation.
//!
//! Dialogues are the one place shape violations are structural: a malformed
//! directive aborts the whole tree, because a half-compiled conversation is
//! worse than none. The caller logs the error and drops only that dialogue.

use pq_core::{Dialogue, DialogueEvent, DialogueOption};
use pq_wiki::{ParamMap, single_template};

use crate::compiler::{WorldCompiler, condition_text};
use crate::error::CompileError;
use crate::source::ContentSource;

impl<S: ContentSource> WorldCompiler<S> {
    /// Compile one `Dialogue` template into a dialogue tree.
    pub(crate) fn compile_dialogue(&mut self, params: &ParamMap) -> Result<Dialogue, CompileError> {
        let value = params.get("lines").ok_or(CompileError::MissingParameter {
            template: "Dialogue",
            param: "lines",
        })?;
        let template = single_template(value).map_err(|e| CompileError::NotExactlyOne {
            expected: "Lines",
            found: e.found,
        })?;
        if template.name != "Lines" {
            return Err(CompileError::UnexpectedTemplate {
                expected: "Lines",
                found: template.name,
            });
        }
        Ok(Dialogue {
            name: params.get_text("name"),
            lines: self.compile_dialogue_lines(&template.params)?,
        })
    }

    /// Compile the directives of a `Lines` template, recursing into prompt
    /// option results.
    fn compile_dialogue_lines(
        &mut self,
        params: &ParamMap,
    ) -> Result<Vec<DialogueEvent>, CompileError> {
        let mut events = Vec::new();
        for (_, value) in params.iter() {
            let template = single_template(value).map_err(|e| CompileError::NotExactlyOne {
                expected: "dialogue directive",
                found: e.found,
            })?;

            match template.name.as_str() {
                "Line" => {
                    if template.params.len() != 2 {
                        return Err(CompileError::WrongArgCount {
                            template: "Line",
                            expected: 2,
                            found: template.params.len(),
                        });
                    }
                    events.push(DialogueEvent::Line {
                        speaker: self.required(&template.params, "Line", "1")?,
                        content: self.required(&template.params, "Line", "2")?,
                    });
                }
                "Prompt" => {
                    events.push(self.compile_prompt(&template.params)?);
                }
                "Jump" => {
                    if template.params.len() != 1 {
                        return Err(CompileError::WrongArgCount {
                            template: "Jump",
                            expected: 1,
                            found: template.params.len(),
                        });
                    }
                    events.push(DialogueEvent::Jump {
                        target: self.required(&template.params, "Jump", "1")?,
                    });
                }
                "Grant" => {
                    if template.params.len() != 1 {
                        return Err(CompileError::WrongArgCount {
                            template: "Grant",
                            expected: 1,
                            found: template.params.len(),
                        });
                    }
                    events.push(DialogueEvent::Grant {
                        flag: self.required(&template.params, "Grant", "1")?,
                    });
                }
                other => {
                    self.diagnostics
                        .warning(format!("Unknown directive in dialogue lines: {other}"));
                }
            }
        }
        Ok(events)
    }

    fn compile_prompt(&mut self, params: &ParamMap) -> Result<DialogueEvent, CompileError> {
        let name = condition_text(params.get_text("name"));
        let mut options = Vec::new();

        for (key, value) in params.iter() {
            if key == "name" {
                continue;
            }
            let template = single_template(value).map_err(|e| CompileError::NotExactlyOne {
                expected: "Option",
                found: e.found,
            })?;
            if template.name != "Option" {
                return Err(CompileError::UnexpectedTemplate {
                    expected: "Option",
                    found: template.name,
                });
            }
            options.push(self.compile_option(&template.params)?);
        }

        Ok(DialogueEvent::Prompt { name, options })
    }

    fn compile_option(&mut self, params: &ParamMap) -> Result<DialogueOption, CompileError> {
        let value = params.get("result").ok_or(CompileError::MissingParameter {
            template: "Option",
            param: "result",
        })?;
        let template = single_template(value).map_err(|e| CompileError::NotExactlyOne {
            expected: "Lines",
            found: e.found,
        })?;
        if template.name != "Lines" {
            return Err(CompileError::UnexpectedTemplate {
                expected: "Lines",
                found: template.name,
            });
        }
        Ok(DialogueOption {
            label: params.get_text("label"),
            condition: condition_text(params.get_text("condition")),
            result: self.compile_dialogue_lines(&template.params)?,
        })
    }

    fn required(
        &self,
        params: &ParamMap,
        template: &'static str,
        param: &'static str,
    ) -> Result<String, CompileError> {
        params
            .get_text(param)
            .ok_or(CompileError::MissingParameter { template, param })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::compiler::CompileResult;
    use crate::source::testutil::MockSource;

    fn compile_dialogue(markup: &str) -> (Result<Dialogue, CompileError>, crate::Diagnostics) {
        let mut compiler = WorldCompiler::new(MockSource::default());
        let template = single_template(markup).expect("one template");
        assert_eq!(template.name, "Dialogue");
        let result = compiler.compile_dialogue(&template.params);
        (result, compiler.diagnostics)
    }

    #[test]
    fn compiles_lines_prompts_and_nested_results() {
        let (result, diags) = compile_dialogue(
            "{{Dialogue|name=greeting|lines={{Lines\
             |1={{Line|Ana|Hello, traveler.}}\
             |2={{Prompt|name=reply\
             |a={{Option|label=Wave back|result={{Lines\
             |1={{Grant|waved}}\
             |2={{Line|Ana|How polite.}}}}}}\
             |b={{Option|label=Ask about the mill|condition=flags.seen-mill\
             |result={{Lines|1={{Jump|mill-talk}}}}}}}}}}}}",
        );
        let dialogue = result.unwrap();
        assert_eq!(dialogue.name.as_deref(), Some("greeting"));
        assert_eq!(dialogue.lines.len(), 2);

        assert_eq!(
            dialogue.lines[0],
            DialogueEvent::Line {
                speaker: "Ana".into(),
                content: "Hello, traveler.".into()
            }
        );
        let DialogueEvent::Prompt { name, options } = &dialogue.lines[1] else {
            panic!("expected a prompt");
        };
        assert_eq!(name.as_deref(), Some("reply"));
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label.as_deref(), Some("Wave back"));
        assert!(options[0].condition.is_none());
        assert_eq!(
            options[0].result,
            vec![
                DialogueEvent::Grant {
                    flag: "waved".into()
                },
                DialogueEvent::Line {
                    speaker: "Ana".into(),
                    content: "How polite.".into()
                },
            ]
        );
        assert_eq!(options[1].condition.as_deref(), Some("flags.seen-mill"));
        assert_eq!(
            options[1].result,
            vec![DialogueEvent::Jump {
                target: "mill-talk".into()
            }]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn two_argument_jump_is_a_structural_error() {
        let (result, _) = compile_dialogue(
            "{{Dialogue|name=broken|lines={{Lines|1={{Jump|here|there}}}}}}",
        );
        assert!(matches!(
            result,
            Err(CompileError::WrongArgCount {
                template: "Jump",
                expected: 1,
                found: 2,
            })
        ));
    }

    #[test]
    fn one_argument_line_is_a_structural_error() {
        let (result, _) =
            compile_dialogue("{{Dialogue|name=broken|lines={{Lines|1={{Line|Ana}}}}}}");
        assert!(matches!(
            result,
            Err(CompileError::WrongArgCount {
                template: "Line",
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn missing_lines_param_is_a_structural_error() {
        let (result, _) = compile_dialogue("{{Dialogue|name=broken}}");
        assert!(matches!(
            result,
            Err(CompileError::MissingParameter {
                template: "Dialogue",
                param: "lines",
            })
        ));
    }

    #[test]
    fn unknown_directive_is_skipped_with_warning() {
        let (result, diags) = compile_dialogue(
            "{{Dialogue|name=greeting|lines={{Lines\
             |1={{Whisper|Ana|psst}}\
             |2={{Line|Ana|Hello.}}}}}}",
        );
        let dialogue = result.unwrap();
        assert_eq!(dialogue.lines.len(), 1);
        assert_eq!(
            diags.messages(Severity::Warning),
            vec!["Unknown directive in dialogue lines: Whisper"]
        );
    }

    #[test]
    fn broken_dialogue_spares_sibling_characters() {
        let mut source = MockSource::with_world("{{Infobox World|map-name=W}}");
        source.characters = vec![
            MockSource::page(
                "Ana",
                "{{Infobox Character|name=Ana}}\n\
                 {{Dialogue|name=bad|lines={{Lines|1={{Jump|a|b}}}}}}\n\
                 {{Dialogue|name=good|lines={{Lines|1={{Line|Ana|Hi.}}}}}}",
            ),
            MockSource::page(
                "Bram",
                "{{Infobox Character|name=Bram}}\n\
                 {{Dialogue|name=greeting|lines={{Lines|1={{Line|Bram|Hm.}}}}}}",
            ),
        ];

        let result: CompileResult = WorldCompiler::new(source).compile();
        assert!(result.has_errors());

        let ana = &result.world.characters[0];
        assert_eq!(ana.dialogues.len(), 1);
        assert_eq!(ana.dialogues[0].name.as_deref(), Some("good"));

        let bram = &result.world.characters[1];
        assert_eq!(bram.dialogues.len(), 1);
        assert!(
            result
                .diagnostics
                .messages(Severity::Error)
                .iter()
                .any(|m| m.contains("Skipping dialogue in \"Ana\""))
        );
    }
}
