//! Plain-text layout of markdown for fixed-width terminals.
//!
//! Walks `pulldown-cmark` events and produces wrapped lines. Block structure is
//! kept with simple typography: underlined headings, bullets, quote bars and
//! indented code. Inline emphasis is flattened to its text.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// Narrowest column count the layout will wrap to
pub const MIN_WIDTH: usize = 10;

const QUOTE_BAR: &str = "│ ";
const CODE_INDENT: &str = "    ";

/// Lay out `markdown` wrapped to `width` columns.
pub fn layout_markdown(markdown: &str, width: usize) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut writer = LayoutWriter::new(width.max(MIN_WIDTH));

    for event in Parser::new_ext(markdown, options) {
        writer.event(event);
    }

    writer.finish()
}

/// Width of a string in terminal columns (one per char)
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap. Words longer than `width` are split across lines.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while display_width(&word) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            display_width(&word)
        } else {
            display_width(&current) + 1 + display_width(&word)
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug)]
struct LayoutWriter {
    width: usize,
    lines: Vec<String>,
    inline: String,
    quote_depth: usize,
    /// Next number for each open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
    /// Marker widths of the open list items
    items: Vec<usize>,
    pending_marker: Option<String>,
    heading: Option<HeadingLevel>,
    in_code: bool,
    /// Open links: destination and where their text starts in `inline`
    links: Vec<(String, usize)>,
    image_alt: Option<String>,
}

impl LayoutWriter {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            inline: String::new(),
            quote_depth: 0,
            lists: Vec::new(),
            items: Vec::new(),
            pending_marker: None,
            heading: None,
            in_code: false,
            links: Vec::new(),
            image_alt: None,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(&code),
            Event::SoftBreak => self.push_inline(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                let prefix = self.continuation_prefix();
                let rule = "─".repeat(self.available(&prefix));
                self.lines.push(format!("{prefix}{rule}"));
                self.blank();
            }
            Event::TaskListMarker(checked) => {
                self.push_inline(if checked { "[x] " } else { "[ ] " });
            }
            // Raw HTML (including directive comments) is not displayed
            Event::Html(_) | Event::InlineHtml(_) => {}
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(level);
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.in_code = true;
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    let prefix = self.continuation_prefix();
                    self.lines.push(format!("{prefix}{CODE_INDENT}[{lang}]"));
                }
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{number}. ");
                        *number += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.items.push(display_width(&marker));
                self.pending_marker = Some(marker);
            }
            Tag::Link { dest_url, .. } => {
                self.links.push((dest_url.to_string(), self.inline.len()));
            }
            Tag::Image { .. } => self.image_alt = Some(String::new()),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.heading = None;
                self.blank();
            }
            TagEnd::BlockQuote { .. } => {
                self.flush();
                let bar = self.quote_prefix().trim_end().to_string();
                if self.lines.last() == Some(&bar) {
                    self.lines.pop();
                }
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            TagEnd::CodeBlock => {
                self.in_code = false;
                self.blank();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Item => {
                self.flush();
                self.items.pop();
            }
            TagEnd::Link => {
                if let Some((url, start)) = self.links.pop()
                    && !url.is_empty()
                    && self.inline.get(start..) != Some(url.as_str())
                {
                    self.push_inline(&format!(" <{url}>"));
                }
            }
            TagEnd::Image => {
                if let Some(alt) = self.image_alt.take() {
                    self.push_inline(&format!("[image: {alt}]"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code {
            let prefix = self.continuation_prefix();
            for line in text.lines() {
                self.lines.push(format!("{prefix}{CODE_INDENT}{line}").trim_end().to_string());
            }
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
        } else {
            self.push_inline(text);
        }
    }

    fn push_inline(&mut self, text: &str) {
        self.inline.push_str(text);
    }

    fn quote_prefix(&self) -> String {
        QUOTE_BAR.repeat(self.quote_depth)
    }

    fn continuation_prefix(&self) -> String {
        let indent: usize = self.items.iter().sum();
        format!("{}{}", self.quote_prefix(), " ".repeat(indent))
    }

    fn first_line_prefix(&self) -> String {
        match &self.pending_marker {
            Some(marker) => {
                let outer: usize = self.items.iter().rev().skip(1).sum();
                format!("{}{}{marker}", self.quote_prefix(), " ".repeat(outer))
            }
            None => self.continuation_prefix(),
        }
    }

    fn available(&self, prefix: &str) -> usize {
        self.width.saturating_sub(display_width(prefix)).max(1)
    }

    /// Wrap and emit the pending inline text
    fn flush(&mut self) {
        let text = std::mem::take(&mut self.inline);
        if text.trim().is_empty() && self.pending_marker.is_none() {
            return;
        }

        let first = self.first_line_prefix();
        let rest = self.continuation_prefix();
        self.pending_marker = None;

        let mut wrapped = wrap_words(&text, self.available(&rest));
        if wrapped.is_empty() {
            wrapped.push(String::new());
        }

        let underline = match self.heading {
            Some(HeadingLevel::H1) => Some('═'),
            Some(HeadingLevel::H2) => Some('─'),
            _ => None,
        };
        let widest = wrapped.iter().map(|l| display_width(l)).max().unwrap_or(0);

        for (i, line) in wrapped.into_iter().enumerate() {
            let prefix = if i == 0 { &first } else { &rest };
            let line = match self.heading {
                Some(HeadingLevel::H1) => line.to_uppercase(),
                _ => line,
            };
            self.lines.push(format!("{prefix}{line}").trim_end().to_string());
        }
        if let Some(ch) = underline {
            self.lines
                .push(format!("{rest}{}", ch.to_string().repeat(widest)));
        }
    }

    /// Separate blocks with a single empty line
    fn blank(&mut self) {
        let blank = self.quote_prefix().trim_end().to_string();
        if self.lines.last().is_some_and(|last| *last != blank) {
            self.lines.push(blank);
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        while self.lines.last().is_some_and(|l| l.trim().is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}
