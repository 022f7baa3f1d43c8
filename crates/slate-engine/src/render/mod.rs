pub mod layout;

use std::borrow::Cow;

use crate::models::{Presentation, Slide};
use crate::parsing::directives::directive_regex;

pub use layout::{MIN_WIDTH, display_width, layout_markdown, wrap_words};

/// Numeric layout parameters a cached rendering depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub word_wrap: usize,
    pub margin: usize,
    pub padding: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            word_wrap: 80,
            margin: 2,
            padding: 1,
        }
    }
}

/// Slide content as it should be displayed: directive comments removed.
///
/// Lines that held nothing but directives disappear entirely. The stored slide
/// content is never modified.
pub fn display_view(raw: &str) -> Cow<'_, str> {
    let directive = directive_regex();
    if !directive.is_match(raw) {
        return Cow::Borrowed(raw);
    }

    let lines: Vec<String> = raw
        .lines()
        .filter_map(|line| {
            let stripped = directive.replace_all(line, "");
            let only_directives = stripped.trim().is_empty() && !line.trim().is_empty();
            (!only_directives).then(|| stripped.trim_end().to_string())
        })
        .collect();
    Cow::Owned(lines.join("\n"))
}

/// Lays out slides for a viewport and memoizes the result on each slide.
///
/// Every layout computation bumps [`render_count`](Self::render_count), so a
/// cache hit is observable. Changing the viewport or layout parameters clears
/// the cache of every slide in the presentation before returning.
#[derive(Debug)]
pub struct SlideRenderer {
    layout: LayoutConfig,
    width: usize,
    height: usize,
    renders: usize,
}

impl SlideRenderer {
    pub fn new(layout: LayoutConfig, width: usize, height: usize) -> Self {
        Self {
            layout,
            width,
            height,
            renders: 0,
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        self.layout
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Columns available to slide text after margin and padding
    pub fn wrap_width(&self) -> usize {
        let inset = 2 * (self.layout.margin + self.layout.padding);
        let room = self.width.saturating_sub(inset);
        let width = match self.layout.word_wrap {
            0 => room,
            wrap => wrap.min(room),
        };
        width.max(MIN_WIDTH)
    }

    /// Return the slide's layout, computing and caching it on a miss
    pub fn render_slide(&mut self, slide: &Slide) -> String {
        if slide.has_cache() {
            return slide.rendered_cache();
        }

        let view = display_view(slide.content());
        let body = layout_markdown(&view, self.wrap_width());
        let rendered = self.apply_insets(&body);

        self.renders += 1;
        log::debug!("Laid out slide {} ({} renders)", slide.index(), self.renders);
        slide.set_rendered_cache(rendered.clone());
        rendered
    }

    fn apply_insets(&self, body: &str) -> String {
        let indent = " ".repeat(self.layout.margin + self.layout.padding);
        let mut lines: Vec<String> = vec![String::new(); self.layout.padding];
        lines.extend(body.lines().map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        }));
        let rendered = lines.join("\n");
        // An empty string reads back as "no cache", so a blank slide keeps one blank row
        if rendered.is_empty() {
            return " ".to_string();
        }
        rendered
    }

    /// Adopt a new viewport size and invalidate every cached slide
    pub fn resize(&mut self, width: usize, height: usize, presentation: &Presentation) {
        self.width = width;
        self.height = height;
        presentation.clear_render_caches();
    }

    /// Adopt new layout parameters and invalidate every cached slide
    pub fn set_layout(&mut self, layout: LayoutConfig, presentation: &Presentation) {
        self.layout = layout;
        presentation.clear_render_caches();
    }

    /// Horizontal progress bar for slide `current` (0-based) of `total`
    pub fn progress_bar(&self, current: usize, total: usize) -> String {
        if total == 0 {
            return String::new();
        }
        let bar_width = self
            .width
            .saturating_sub(self.layout.margin * 4)
            .max(MIN_WIDTH);
        let filled = ((current + 1).min(total) * bar_width) / total;
        format!("{}{}", "━".repeat(filled), "─".repeat(bar_width - filled))
    }

    /// "current / total" with a 1-based current slide
    pub fn slide_number(current: usize, total: usize) -> String {
        format!("{} / {}", current + 1, total)
    }
}
