//! Mapping from produced files to caller-visible URLs.

use std::path::{Component, Path, PathBuf};

use url::Url;

/// Maps paths below a base directory onto a public base URL.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mdexport::infra::PublicUrls;
/// use url::Url;
///
/// let urls = PublicUrls::new("/srv/uploads", Url::parse("https://example.test/uploads").unwrap());
/// let url = urls.url_for(Path::new("/srv/uploads/markdown-exports/Post-a b.md")).unwrap();
/// assert_eq!(url.as_str(), "https://example.test/uploads/markdown-exports/Post-a%20b.md");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrls {
    base_dir: PathBuf,
    base_url: Url,
}

impl PublicUrls {
    pub fn new(base_dir: impl Into<PathBuf>, base_url: Url) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the public URL for `path`, or `None` if it is not below the
    /// base directory (or the base URL cannot carry a path).
    pub fn url_for(&self, path: &Path) -> Option<Url> {
        let relative = path.strip_prefix(&self.base_dir).ok()?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(s) => segments.push(s.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(segments.iter().map(String::as_str));
        Some(url)
    }
}
