use std::sync::OnceLock;

use regex::Regex;

use crate::models::SlideMetadata;

/// Matches `<!-- @key: value -->`, capturing key and value
pub(crate) fn directive_regex() -> &'static Regex {
    static DIRECTIVE: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE.get_or_init(|| {
        Regex::new(r"<!--\s*@(\w+):\s*(.+?)\s*-->").expect("Invalid directive regex")
    })
}

/// Collect the recognised directives of one slide chunk.
///
/// Keys are matched case-insensitively and values are lowercased. Unknown keys
/// are skipped; a repeated key keeps its last value.
pub fn scan(chunk: &str) -> SlideMetadata {
    let mut metadata = SlideMetadata::default();

    for captures in directive_regex().captures_iter(chunk) {
        let key = captures[1].to_lowercase();
        let value = captures[2].to_lowercase();

        match key.as_str() {
            "notes" => metadata.notes = value,
            "transition" => metadata.transition = value,
            "background" => metadata.background = value,
            other => log::debug!("Ignoring unknown slide directive @{other}"),
        }
    }

    metadata
}
