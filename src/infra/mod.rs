//! File I/O, front matter, slugs, archives, public URLs

mod archive;
mod frontmatter;
mod fs;
mod public_url;
mod slug;

pub use archive::{ARCHIVE_PREFIX, archive_name, write_archive};
pub use frontmatter::{FrontMatterSerializer, ParseError, escape_yaml, split, unescape_yaml};
pub use fs::{FsError, ensure_dir, is_export_artifact, persist_unique, purge_stale, write_atomic};
pub use public_url::PublicUrls;
pub use slug::{document_filename, sanitize_file_name, slugify};
