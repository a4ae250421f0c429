use crate::lexer::{self, Token};
use crate::template::{ParamMap, Template};

/// Extract every top-level template from raw markup, in document order.
///
/// Text outside templates is ignored. Templates nested inside a parameter
/// value are *not* expanded — their source is preserved verbatim in the raw
/// value so the consumer of that parameter can extract them on demand.
/// An unterminated template yields nothing; extraction never fails.
pub fn extract_templates(source: &str) -> Vec<Template> {
    let tokens = lexer::lex(source);
    let mut templates = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == Token::TemplateOpen {
            let (template, next) = parse_template(&tokens, i + 1);
            if let Some(t) = template {
                templates.push(t);
            }
            i = next;
        } else {
            i += 1;
        }
    }

    templates
}

/// One `name` or `key=value` segment of a template under construction.
#[derive(Default)]
struct Segment {
    key: Option<String>,
    text: String,
}

/// Parse one template starting just after its `{{`.
///
/// Returns the template (or `None` if the input ran out before the closing
/// `}}`) and the index of the first token after it. Nested templates and
/// links are tracked by depth only; their tokens are appended verbatim to
/// the current segment.
fn parse_template(tokens: &[Token], start: usize) -> (Option<Template>, usize) {
    let mut segments = vec![Segment::default()];
    let mut template_depth = 0usize;
    let mut link_depth = 0usize;

    let mut i = start;
    while i < tokens.len() {
        let token = &tokens[i];
        let at_top = template_depth == 0 && link_depth == 0;
        match token {
            Token::TemplateClose if at_top => {
                return (Some(finish_template(segments)), i + 1);
            }
            Token::Pipe if at_top => {
                segments.push(Segment::default());
            }
            Token::Eq if at_top => {
                // Only the first `=` of a parameter splits key from value,
                // and the name segment never splits.
                let is_param = segments.len() > 1;
                let segment = segments.last_mut().unwrap_or_else(|| unreachable!());
                if is_param && segment.key.is_none() {
                    segment.key = Some(std::mem::take(&mut segment.text));
                } else {
                    segment.text.push('=');
                }
            }
            other => {
                match other {
                    Token::TemplateOpen => template_depth += 1,
                    Token::TemplateClose => template_depth = template_depth.saturating_sub(1),
                    Token::LinkOpen => link_depth += 1,
                    Token::LinkClose => link_depth = link_depth.saturating_sub(1),
                    _ => {}
                }
                let segment = segments.last_mut().unwrap_or_else(|| unreachable!());
                segment.text.push_str(other.as_source());
            }
        }
        i += 1;
    }

    // Ran out of input before `}}` — drop the fragment.
    (None, i)
}

fn finish_template(segments: Vec<Segment>) -> Template {
    let mut iter = segments.into_iter();
    let name = iter
        .next()
        .map(|s| s.text.trim().to_string())
        .unwrap_or_default();

    let mut params = ParamMap::new();
    let mut positional = 0usize;
    for segment in iter {
        let key = match segment.key {
            Some(k) => k.trim().to_string(),
            None => {
                positional += 1;
                positional.to_string()
            }
        };
        params.push(key, segment.text);
    }

    Template { name, params }
}
