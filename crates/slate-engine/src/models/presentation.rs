use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::models::Slide;
use crate::render::LayoutConfig;

/// Date format used by the `date` front-matter key
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A requested position outside the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// A 0-based index outside the half-open range `0..count`
    #[error("slide index {index} out of bounds (presentation has {count} slides)")]
    Index { index: usize, count: usize },
    /// A 1-based slide number outside `1..=count`
    #[error("slide number {number} out of bounds (presentation has {count} slides)")]
    SlideNumber { number: usize, count: usize },
    /// A backward jump that would pass the first slide
    #[error("cannot jump back {steps} slides from slide index {from}")]
    BeforeStart { from: usize, steps: usize },
}

/// Reasons a parsed presentation cannot be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("presentation must have at least one slide")]
    NoSlides,
    #[error("presentation must have at least one non-empty slide")]
    AllSlidesEmpty,
}

/// An ordered deck of slides plus document-level metadata.
///
/// Built once by the parser. After that only the attached layout changes; the
/// slide list itself is append-only during parsing and fixed afterwards.
#[derive(Debug)]
pub struct Presentation {
    file_path: PathBuf,
    title: String,
    author: String,
    date: NaiveDate,
    slides: Vec<Slide>,
    layout: Option<LayoutConfig>,
}

impl Presentation {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            title: String::new(),
            author: String::new(),
            date: Local::now().date_naive(),
            slides: Vec::new(),
            layout: None,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub(crate) fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Bounds-checked accessor over `0..slide_count()`
    pub fn slide(&self, index: usize) -> Result<&Slide, BoundsError> {
        self.slides.get(index).ok_or(BoundsError::Index {
            index,
            count: self.slides.len(),
        })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Apply `title`, `author` and `date` from a front-matter map.
    ///
    /// An unparsable date leaves the current one in place.
    pub fn set_metadata(&mut self, metadata: &BTreeMap<String, String>) {
        if let Some(title) = metadata.get("title") {
            self.title = title.clone();
        }
        if let Some(author) = metadata.get("author") {
            self.author = author.clone();
        }
        if let Some(date) = metadata.get("date") {
            match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
                Ok(date) => self.date = date,
                Err(e) => log::warn!("Ignoring front-matter date {date:?}: {e}"),
            }
        }
    }

    /// Non-empty document metadata as strings
    pub fn metadata(&self) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        if !self.title.is_empty() {
            metadata.insert("title".to_string(), self.title.clone());
        }
        if !self.author.is_empty() {
            metadata.insert("author".to_string(), self.author.clone());
        }
        metadata.insert("date".to_string(), self.date.format(DATE_FORMAT).to_string());
        metadata
    }

    /// Load-time admission gate, run once right after parsing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.slides.is_empty() {
            return Err(ValidationError::NoSlides);
        }
        if self.slides.iter().all(Slide::is_empty) {
            return Err(ValidationError::AllSlidesEmpty);
        }
        Ok(())
    }

    pub fn attach_layout(&mut self, layout: LayoutConfig) {
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<LayoutConfig> {
        self.layout
    }

    /// Drop every slide's cached rendering
    pub fn clear_render_caches(&self) {
        for slide in &self.slides {
            slide.clear_cache();
        }
    }
}
