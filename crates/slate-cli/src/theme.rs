//! Colour palettes and dark/light resolution

use ratatui::style::{Color, Modifier, Style};
use slate_config::{ThemeConfig, ThemeMode};
use std::process::Command;

/// Answers whether the surrounding terminal uses a dark background.
pub trait DarkModeProbe {
    fn is_dark_environment(&self) -> bool;
}

/// Probe backed by the real environment
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl SystemProbe {
    /// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"); ANSI backgrounds
    /// 0-6 and 8 are dark.
    fn from_colorfgbg(value: &str) -> Option<bool> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(matches!(background, 0..=6 | 8))
    }

    fn from_macos_defaults() -> Option<bool> {
        if !cfg!(target_os = "macos") {
            return None;
        }
        // The key is absent in light mode, so a failed read means light
        let output = Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .ok()?;
        Some(output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "Dark")
    }
}

impl DarkModeProbe for SystemProbe {
    fn is_dark_environment(&self) -> bool {
        if let Ok(value) = std::env::var("COLORFGBG")
            && let Some(dark) = Self::from_colorfgbg(&value)
        {
            return dark;
        }
        Self::from_macos_defaults().unwrap_or(true)
    }
}

/// Named palettes accepted by `theme.style`
pub const STYLE_NAMES: [&str; 4] = ["dark", "light", "dracula", "pink"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub foreground: Color,
    pub background: Color,
    pub accent: Color,
    pub muted: Color,
    pub warning: Color,
    pub progress: Color,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            primary: Color::Indexed(63),
            foreground: Color::Indexed(255),
            background: Color::Indexed(235),
            accent: Color::Indexed(212),
            muted: Color::Indexed(241),
            warning: Color::Indexed(214),
            progress: Color::Indexed(63),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Indexed(63),
            foreground: Color::Indexed(235),
            background: Color::Indexed(255),
            accent: Color::Indexed(162),
            muted: Color::Indexed(246),
            warning: Color::Indexed(166),
            progress: Color::Indexed(63),
        }
    }

    pub fn dracula() -> Self {
        Self {
            primary: Color::Rgb(189, 147, 249),
            foreground: Color::Rgb(248, 248, 242),
            background: Color::Rgb(40, 42, 54),
            accent: Color::Rgb(255, 121, 198),
            muted: Color::Rgb(98, 114, 164),
            warning: Color::Rgb(255, 184, 108),
            progress: Color::Rgb(80, 250, 123),
        }
    }

    pub fn pink() -> Self {
        Self {
            primary: Color::Indexed(212),
            accent: Color::Indexed(219),
            progress: Color::Indexed(212),
            ..Self::dark()
        }
    }

    /// Terminal defaults only; emphasis comes from modifiers
    pub fn monochrome() -> Self {
        Self {
            primary: Color::Reset,
            foreground: Color::Reset,
            background: Color::Reset,
            accent: Color::Reset,
            muted: Color::Reset,
            warning: Color::Reset,
            progress: Color::Reset,
        }
    }

    pub fn named(style: &str, is_dark: bool) -> Self {
        match style {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "dracula" => Self::dracula(),
            "pink" => Self::pink(),
            _ if is_dark => Self::dark(),
            _ => Self::light(),
        }
    }
}

/// Resolves the configured mode against the environment and hands out styles.
pub struct ThemeManager {
    mode: ThemeMode,
    style: String,
    is_dark: bool,
    monochrome: bool,
    palette: Palette,
    probe: Box<dyn DarkModeProbe>,
}

impl ThemeManager {
    pub fn new(config: &ThemeConfig, probe: Box<dyn DarkModeProbe>, monochrome: bool) -> Self {
        if !config.style.is_empty() && !STYLE_NAMES.contains(&config.style.as_str()) {
            log::warn!(
                "Unknown theme style '{}', falling back to the mode default",
                config.style
            );
        }

        let mut manager = Self {
            mode: config.mode,
            style: config.style.clone(),
            is_dark: true,
            monochrome,
            palette: Palette::monochrome(),
            probe,
        };
        manager.refresh();
        manager
    }

    fn refresh(&mut self) {
        self.is_dark = match self.mode {
            ThemeMode::Dark => true,
            ThemeMode::Light => false,
            ThemeMode::Auto => self.probe.is_dark_environment(),
        };
        self.palette = if self.monochrome {
            Palette::monochrome()
        } else {
            Palette::named(&self.style, self.is_dark)
        };
    }

    /// Flip between dark and light. Auto becomes the opposite of what was
    /// detected, and any named style gives way to the mode default.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ThemeMode::Auto if self.is_dark => ThemeMode::Light,
            ThemeMode::Auto => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        self.style.clear();
        self.refresh();
        log::debug!("Theme toggled to {:?}", self.mode);
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Style in effect: the configured name, or the one implied by the mode
    pub fn style_name(&self) -> &str {
        match self.style.as_str() {
            name if STYLE_NAMES.contains(&name) => name,
            _ if self.is_dark => "dark",
            _ => "light",
        }
    }

    pub fn body_style(&self) -> Style {
        Style::default()
            .fg(self.palette.foreground)
            .bg(self.palette.background)
    }

    pub fn title_style(&self) -> Style {
        self.body_style()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        self.body_style().fg(self.palette.accent)
    }

    pub fn muted_style(&self) -> Style {
        let style = self.body_style().fg(self.palette.muted);
        if self.monochrome {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn help_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::ITALIC)
    }

    pub fn warning_style(&self) -> Style {
        self.body_style()
            .fg(self.palette.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn progress_style(&self) -> Style {
        self.body_style().fg(self.palette.progress)
    }
}
