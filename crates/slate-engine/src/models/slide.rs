use std::cell::RefCell;

/// Per-slide directives scanned from `<!-- @key: value -->` comments.
///
/// Values are stored lowercased; absent directives stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideMetadata {
    pub notes: String,
    pub transition: String,
    pub background: String,
}

/// A single displayable unit of a presentation.
///
/// Content is trimmed once at construction and never changes afterwards. The
/// only mutable state is the render cache, which the renderer fills and clears
/// through a shared reference so that a navigator can keep borrowing the
/// presentation while slides are being laid out.
#[derive(Debug)]
pub struct Slide {
    index: usize,
    raw_content: String,
    metadata: SlideMetadata,
    rendered: RefCell<Option<String>>,
}

impl Slide {
    pub fn new(index: usize, content: &str) -> Self {
        Self {
            index,
            raw_content: content.trim().to_string(),
            metadata: SlideMetadata::default(),
            rendered: RefCell::new(None),
        }
    }

    pub fn with_metadata(index: usize, content: &str, metadata: SlideMetadata) -> Self {
        Self {
            metadata,
            ..Self::new(index, content)
        }
    }

    /// Position of this slide within its presentation (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// The trimmed source chunk, directive comments included
    pub fn content(&self) -> &str {
        &self.raw_content
    }

    pub fn metadata(&self) -> &SlideMetadata {
        &self.metadata
    }

    pub fn is_empty(&self) -> bool {
        self.raw_content.trim().is_empty()
    }

    pub fn has_cache(&self) -> bool {
        self.rendered.borrow().is_some()
    }

    /// The cached layout, or an empty string when nothing is cached
    pub fn rendered_cache(&self) -> String {
        self.rendered.borrow().clone().unwrap_or_default()
    }

    /// Store a rendering. An empty string is treated as "no cache".
    pub fn set_rendered_cache(&self, rendered: impl Into<String>) {
        let rendered = rendered.into();
        *self.rendered.borrow_mut() = (!rendered.is_empty()).then_some(rendered);
    }

    pub fn clear_cache(&self) {
        self.rendered.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_new_slide_keeps_index_and_content() {
        let slide = Slide::new(5, "# Test Slide\n\nSome content");

        assert_eq!(slide.index(), 5);
        assert_eq!(slide.content(), "# Test Slide\n\nSome content");
    }

    #[test]
    fn test_new_slide_trims_whitespace() {
        let slide = Slide::new(0, "  \n  # Test Slide  \n  ");
        assert_eq!(slide.content(), "# Test Slide");
    }

    #[rstest]
    #[case("", true)]
    #[case("   \n\t  ", true)]
    #[case("# Test", false)]
    #[case("a", false)]
    fn test_slide_is_empty(#[case] content: &str, #[case] expected: bool) {
        assert_eq!(Slide::new(0, content).is_empty(), expected);
    }

    #[test]
    fn test_metadata_defaults_to_empty() {
        let slide = Slide::new(0, "# Test");
        assert_eq!(slide.metadata(), &SlideMetadata::default());
    }

    #[test]
    fn test_with_metadata() {
        let metadata = SlideMetadata {
            notes: "remember the demo".to_string(),
            transition: "fade".to_string(),
            background: "#000000".to_string(),
        };
        let slide = Slide::with_metadata(2, " # Body ", metadata.clone());

        assert_eq!(slide.index(), 2);
        assert_eq!(slide.content(), "# Body");
        assert_eq!(slide.metadata(), &metadata);
    }

    #[test]
    fn test_render_cache_lifecycle() {
        let slide = Slide::new(0, "# Test");

        assert!(!slide.has_cache());
        assert_eq!(slide.rendered_cache(), "");

        slide.set_rendered_cache("Rendered content");
        assert!(slide.has_cache());
        assert_eq!(slide.rendered_cache(), "Rendered content");

        slide.clear_cache();
        assert!(!slide.has_cache());
        assert_eq!(slide.rendered_cache(), "");
    }

    #[test]
    fn test_render_cache_reads_are_stable() {
        let slide = Slide::new(0, "# Test");
        slide.set_rendered_cache("layout");

        assert_eq!(slide.rendered_cache(), slide.rendered_cache());
        assert!(slide.has_cache());
    }

    #[test]
    fn test_empty_rendering_counts_as_absent() {
        let slide = Slide::new(0, "# Test");
        slide.set_rendered_cache("something");
        slide.set_rendered_cache("");

        assert!(!slide.has_cache());
    }

    #[test]
    fn test_setting_cache_does_not_touch_content() {
        let slide = Slide::new(0, "# Raw");
        slide.set_rendered_cache("RAW\n═══");

        assert_eq!(slide.content(), "# Raw");
    }
}
