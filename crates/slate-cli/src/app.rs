use slate_config::{Config, KeybindingConfig, ThemeConfig};
use slate_engine::{LayoutConfig, Navigator, Presentation, SlideRenderer, ValidationError};

use crate::theme::ThemeManager;

const HELP_KEY: &str = "?";
const THEME_KEY: &str = "t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Presentation,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
    Back,
    Quit,
    ToggleHelp,
    ToggleTheme,
}

/// Presenter state: one presentation, a cursor over it and the view chrome.
pub struct App<'a> {
    presentation: &'a Presentation,
    navigator: Navigator<'a>,
    renderer: SlideRenderer,
    theme: ThemeManager,
    keybindings: KeybindingConfig,
    chrome: ThemeConfig,
    view_mode: ViewMode,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(
        presentation: &'a Presentation,
        config: &Config,
        theme: ThemeManager,
        width: usize,
        height: usize,
    ) -> Result<Self, ValidationError> {
        let layout = presentation.layout().unwrap_or(LayoutConfig {
            word_wrap: config.presentation.word_wrap,
            margin: config.presentation.margin,
            padding: config.presentation.padding,
        });

        Ok(Self {
            presentation,
            navigator: Navigator::new(presentation)?,
            renderer: SlideRenderer::new(layout, width, height),
            theme,
            keybindings: config.keybindings.clone(),
            chrome: config.theme.clone(),
            view_mode: ViewMode::Presentation,
            should_quit: false,
        })
    }

    pub fn navigator(&self) -> &Navigator<'a> {
        &self.navigator
    }

    pub fn renderer(&self) -> &SlideRenderer {
        &self.renderer
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn show_progress(&self) -> bool {
        self.chrome.show_progress
    }

    pub fn show_slide_number(&self) -> bool {
        self.chrome.show_slide_number
    }

    /// Map a key name to an action. Quit keys win over everything else.
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let bound = |keys: &[String]| keys.iter().any(|k| k == key);
        let bindings = &self.keybindings;

        if bound(&bindings.quit) {
            Some(Action::Quit)
        } else if key == HELP_KEY {
            Some(Action::ToggleHelp)
        } else if key == THEME_KEY {
            Some(Action::ToggleTheme)
        } else if bound(&bindings.next) {
            Some(Action::Next)
        } else if bound(&bindings.previous) {
            Some(Action::Previous)
        } else if bound(&bindings.first) {
            Some(Action::First)
        } else if bound(&bindings.last) {
            Some(Action::Last)
        } else if bound(&bindings.back) {
            Some(Action::Back)
        } else {
            None
        }
    }

    pub fn handle_key(&mut self, key: &str) {
        if self.view_mode == ViewMode::Help {
            if matches!(key, HELP_KEY | "q" | "esc") {
                self.view_mode = ViewMode::Presentation;
            }
            return;
        }

        if let Some(action) = self.action_for(key) {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleHelp => self.view_mode = ViewMode::Help,
            Action::ToggleTheme => self.theme.toggle_mode(),
            // Advancing past the final slide ends the talk
            Action::Next if self.navigator.is_last() => self.should_quit = true,
            Action::Next => {
                self.navigator.next();
            }
            Action::Previous => {
                self.navigator.previous();
            }
            Action::First => {
                self.navigator.first();
            }
            Action::Last => {
                self.navigator.last();
            }
            Action::Back => {
                self.navigator.back();
            }
        }
    }

    /// Terminal size changed: every cached layout is stale
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.renderer.size() == (width, height) {
            return;
        }
        self.renderer.resize(width, height, self.presentation);
        log::debug!("Resized to {width}x{height}");
    }

    /// Laid-out text of the current slide, served from its cache when warm
    pub fn current_body(&mut self) -> String {
        self.renderer.render_slide(self.navigator.current_slide())
    }

    pub fn current_notes(&self) -> Option<&str> {
        let notes = self.navigator.current_slide().metadata().notes.as_str();
        (!notes.is_empty()).then_some(notes)
    }

    pub fn progress_bar(&self) -> String {
        self.renderer.progress_bar(
            self.navigator.current_index(),
            self.navigator.total_slides(),
        )
    }

    pub fn slide_number(&self) -> String {
        SlideRenderer::slide_number(
            self.navigator.current_index(),
            self.navigator.total_slides(),
        )
    }

    /// Context-dependent command hints for the footer
    pub fn footer_hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if !self.navigator.is_first() {
            hints.push("← Prev");
        }
        if self.navigator.is_last() {
            hints.push("End");
        } else {
            hints.push("→ Next");
        }
        hints.push("? Help");
        hints.push("q Quit");
        hints
    }

    pub fn help_lines(&self) -> Vec<(String, String)> {
        let keys = |names: &[String]| names.join(", ");
        let bindings = &self.keybindings;
        vec![
            ("Next slide".to_string(), keys(&bindings.next)),
            ("Previous slide".to_string(), keys(&bindings.previous)),
            ("First slide".to_string(), keys(&bindings.first)),
            ("Last slide".to_string(), keys(&bindings.last)),
            ("Go back".to_string(), keys(&bindings.back)),
            ("Toggle theme".to_string(), THEME_KEY.to_string()),
            ("Show help".to_string(), HELP_KEY.to_string()),
            ("Quit".to_string(), keys(&bindings.quit)),
        ]
    }
}
