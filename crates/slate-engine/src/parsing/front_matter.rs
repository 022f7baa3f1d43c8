use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_yaml_ng::Value;

/// Front-matter keys flattened to strings
pub type FrontMatter = BTreeMap<String, String>;

/// Split a leading `---` ... `---` block off the document.
///
/// Only a block at the very start of the text is recognised. When the block is
/// missing or is not a YAML mapping the text is returned untouched together
/// with an empty map.
pub fn extract(text: &str) -> (FrontMatter, &str) {
    static FRONT_MATTER: OnceLock<Regex> = OnceLock::new();
    let re = FRONT_MATTER.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\n(?:(.*?)\n)?---[ \t]*(?:\n|\z)")
            .expect("Invalid front matter regex")
    });

    let Some(captures) = re.captures(text) else {
        return (FrontMatter::new(), text);
    };
    let whole = captures.get(0).map_or(0, |m| m.end());
    let block = captures.get(1).map_or("", |m| m.as_str());

    match parse_block(block) {
        Ok(metadata) => (metadata, &text[whole..]),
        Err(e) => {
            log::warn!("Ignoring malformed front matter: {e}");
            (FrontMatter::new(), text)
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum FrontMatterError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("expected a key/value mapping")]
    NotAMapping,
}

fn parse_block(block: &str) -> Result<FrontMatter, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::new());
    }
    match serde_yaml_ng::from_str::<Value>(block)? {
        Value::Mapping(mapping) => Ok(mapping
            .iter()
            .map(|(key, value)| (flatten(key), flatten(value)))
            .collect()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// String form of a YAML value; nested structures become inline YAML.
fn flatten(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => flatten(&tagged.value),
        nested => serde_yaml_ng::to_string(nested)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_string_values() {
        let (metadata, rest) = extract("---\ntitle: Demo\nauthor: Ada\n---\n\n# Slide");

        assert_eq!(metadata["title"], "Demo");
        assert_eq!(metadata["author"], "Ada");
        assert_eq!(rest, "\n# Slide");
    }

    #[test]
    fn test_scalars_are_stringified() {
        let (metadata, _) = extract("---\ndate: 2026-01-01\nversion: 3\ndraft: true\n---\n");

        assert_eq!(metadata["date"], "2026-01-01");
        assert_eq!(metadata["version"], "3");
        assert_eq!(metadata["draft"], "true");
    }

    #[test]
    fn test_nested_values_are_flattened() {
        let (metadata, _) = extract("---\ntags:\n  - rust\n  - tui\n---\n# Body");

        assert!(metadata["tags"].contains("rust"));
        assert!(metadata["tags"].contains("tui"));
    }

    #[test]
    fn test_no_front_matter() {
        let text = "# Just a slide\n\n---\n\n# Another";
        let (metadata, rest) = extract(text);

        assert!(metadata.is_empty());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_front_matter_must_start_the_document() {
        let text = "\n---\ntitle: Late\n---\n# Body";
        let (metadata, rest) = extract(text);

        assert!(metadata.is_empty());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_malformed_yaml_is_treated_as_absent() {
        let text = "---\ntitle: [unclosed\n---\n\n# Body";
        let (metadata, rest) = extract(text);

        assert!(metadata.is_empty());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_scalar_block_is_not_metadata() {
        let text = "---\njust words\n---\n\n# Body";
        let (metadata, rest) = extract(text);

        assert!(metadata.is_empty());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_leading_separator_is_not_front_matter() {
        let text = "---\n\n# A\n\n---\n\n# B";
        let (metadata, rest) = extract(text);

        assert!(metadata.is_empty());
        assert_eq!(rest, text);
    }

    #[test]
    fn test_empty_block() {
        let (metadata, rest) = extract("---\n---\n# Body");

        assert!(metadata.is_empty());
        assert_eq!(rest, "# Body");
    }
}
