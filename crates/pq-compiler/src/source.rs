use crate::error::SourceError;

/// One page fetched from the content source.
#[derive(Debug, Clone)]
pub struct Page {
    /// Page title.
    pub title: String,
    /// Raw markup body.
    pub text: String,
}

/// One record of a batched image URL lookup.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    /// Resource title as returned by the source, `File:` prefix included.
    pub title: String,
    /// Resolved URL, absent when the source knows the name but has no file.
    pub url: Option<String>,
}

/// The compiler's view of wherever pages live.
///
/// All three calls are synchronous full round trips with no streaming.
/// Authentication, caching, and retries are the implementation's business;
/// the compiler only sees bodies and records.
pub trait ContentSource {
    /// Fetch the raw markup body of a single page.
    fn fetch_page(&self, title: &str) -> Result<String, SourceError>;

    /// Fetch every page tagged with a category, title and body together.
    fn fetch_category_members(&self, category: &str) -> Result<Vec<Page>, SourceError>;

    /// Resolve image names (with `File:` namespace prefix) to URLs in one
    /// batched lookup.
    fn resolve_image_urls(&self, names: &[String]) -> Result<Vec<ImageRecord>, SourceError>;
}
