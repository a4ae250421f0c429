//! The batched image URL resolver.
//!
//! Runs once, after every entity compiler has registered its image fields.
//! Individual resolution failures are warnings; only a failure of the
//! batched lookup itself escapes to the orchestrator.

use pq_core::image::canonical_name;

use crate::compiler::WorldCompiler;
use crate::error::CompileError;
use crate::source::ContentSource;

impl<S: ContentSource> WorldCompiler<S> {
    /// Resolve every still-unresolved image reference in one batched call.
    pub(crate) fn resolve_images(&mut self) -> Result<(), CompileError> {
        let pending = self.image_refs.unresolved();
        if pending.is_empty() {
            return Ok(());
        }
        self.diagnostics
            .info(format!("Resolving {} image references", pending.len()));

        let query: Vec<String> = pending.iter().map(|name| format!("File:{name}")).collect();
        let records = self.source.resolve_image_urls(&query)?;

        for record in records {
            let name = record
                .title
                .strip_prefix("File:")
                .unwrap_or(&record.title);
            let name = canonical_name(name);
            if !self.image_refs.contains(&name) {
                self.diagnostics
                    .warning(format!("Unexpected image resource: {name}"));
                continue;
            }
            match record.url {
                Some(url) => {
                    self.image_refs.resolve(&name, url);
                }
                None => self.diagnostics.warning(format!(
                    "Unable to resolve URL for image resource {name}"
                )),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::source::ImageRecord;
    use crate::source::testutil::MockSource;

    fn compiler_with(images: Vec<ImageRecord>) -> WorldCompiler<MockSource> {
        let source = MockSource {
            images,
            ..MockSource::default()
        };
        WorldCompiler::new(source)
    }

    fn record(title: &str, url: Option<&str>) -> ImageRecord {
        ImageRecord {
            title: title.to_string(),
            url: url.map(String::from),
        }
    }

    #[test]
    fn resolves_registered_names_through_file_prefix() {
        let mut c = compiler_with(vec![record(
            "File:Old_Mill.png",
            Some("http://example/Old_Mill.png"),
        )]);
        c.image_refs.register("Old Mill.png");

        c.resolve_images().unwrap();
        assert_eq!(
            c.image_refs.url("Old Mill.png"),
            Some("http://example/Old_Mill.png")
        );
        assert!(c.diagnostics.messages(Severity::Warning).is_empty());
    }

    #[test]
    fn record_with_spaces_matches_canonical_key() {
        let mut c = compiler_with(vec![record(
            "File:Old Mill.png",
            Some("http://example/Old_Mill.png"),
        )]);
        c.image_refs.register("Old_Mill.png");

        c.resolve_images().unwrap();
        assert!(c.image_refs.url("Old_Mill.png").is_some());
    }

    #[test]
    fn unknown_record_warns_and_adds_nothing() {
        let mut c = compiler_with(vec![record(
            "File:Ghost.png",
            Some("http://example/Ghost.png"),
        )]);
        c.image_refs.register("Real.png");

        c.resolve_images().unwrap();
        assert_eq!(c.image_refs.len(), 1);
        assert!(!c.image_refs.contains("Ghost.png"));
        assert_eq!(
            c.diagnostics.messages(Severity::Warning),
            vec!["Unexpected image resource: Ghost.png"]
        );
    }

    #[test]
    fn record_without_url_stays_unresolved_with_warning() {
        let mut c = compiler_with(vec![record("File:Lost.png", None)]);
        c.image_refs.register("Lost.png");

        c.resolve_images().unwrap();
        assert!(c.image_refs.url("Lost.png").is_none());
        assert!(c.image_refs.contains("Lost.png"));
        assert_eq!(
            c.diagnostics.messages(Severity::Warning),
            vec!["Unable to resolve URL for image resource Lost.png"]
        );
    }

    #[test]
    fn nothing_to_resolve_skips_the_lookup() {
        let mut c = compiler_with(Vec::new());
        c.resolve_images().unwrap();
        assert!(c.diagnostics.is_empty());
    }
}
