pub mod directives;
pub mod front_matter;
pub mod split;

use std::path::PathBuf;

use crate::models::{Presentation, Slide};

pub use front_matter::FrontMatter;
pub use split::{SLIDE_SEPARATOR, split_slides};

/// Turn a whole document into a presentation.
///
/// Never fails: malformed front matter, unknown directives and bad dates all
/// degrade to defaults. `file_path` is recorded for identity only.
pub fn parse_str(text: &str, file_path: impl Into<PathBuf>) -> Presentation {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace("\r\n", "\n");

    let (front_matter, body) = front_matter::extract(&text);
    let mut presentation = Presentation::new(file_path);
    presentation.set_metadata(&front_matter);

    let chunks = split_slides(body)
        .into_iter()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty());

    for (index, chunk) in chunks.enumerate() {
        presentation.add_slide(Slide::with_metadata(index, chunk, directives::scan(chunk)));
    }

    log::debug!(
        "Parsed {} slides from {}",
        presentation.slide_count(),
        presentation.file_path().display()
    );
    presentation
}
