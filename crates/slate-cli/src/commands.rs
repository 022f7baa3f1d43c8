//! Non-interactive subcommands: `init`, `config ...` and `version`.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use slate_config::{Config, ConfigLoader};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRESENTATION_NAME: &str = "presentation.md";

pub const SAMPLE_PRESENTATION: &str = r#"---
title: My Presentation
author: Your Name
date: 2026-01-01
---

# Welcome to slate

Markdown slides, presented right in your terminal.

---

## Writing slides

- Slides are plain **markdown**
- A line holding only `---`, with blank lines around it, starts a new slide
- Front matter at the top sets the title, author and date

---

## Speaker notes

Hidden comments become notes shown in the footer.

<!-- @notes: Notes like this one never appear on the slide itself -->

---

## Code

```rust
fn main() {
    println!("Hello from slate!");
}
```

---

## Getting around

- **Next**: →, Space, l
- **Previous**: ←, h
- **First / Last**: Home, g / End, G
- **Back** to where you were: b
- **Theme** toggle: t
- **Quit**: q, Esc, Ctrl+C

---

# Thank you!

Press ? for help at any time.
"#;

/// File name `init` writes to: the default, with `.md` appended when missing
pub fn presentation_file_name(requested: Option<&str>) -> PathBuf {
    let name = requested.unwrap_or(DEFAULT_PRESENTATION_NAME);
    let path = PathBuf::from(name);
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(slate_engine::PRESENTATION_EXTENSION));
    if has_extension {
        path
    } else {
        PathBuf::from(format!("{name}.{}", slate_engine::PRESENTATION_EXTENSION))
    }
}

/// Write the sample deck; an existing file is never replaced
pub fn init_presentation(path: &Path) -> Result<()> {
    slate_engine::write_new_file(path, SAMPLE_PRESENTATION)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    log::info!("Wrote sample presentation to {}", path.display());
    Ok(())
}

pub fn describe_config(config: &Config, source: Option<&Path>) -> String {
    let mut out = String::new();
    let theme = &config.theme;
    let layout = &config.presentation;
    let keys = &config.keybindings;
    let style = if theme.style.is_empty() {
        "(from mode)"
    } else {
        theme.style.as_str()
    };

    // Writing to a String cannot fail
    let _ = writeln!(out, "Current Configuration:");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out, "\nTheme:");
    let _ = writeln!(out, "  Mode: {:?}", theme.mode);
    let _ = writeln!(out, "  Style: {style}");
    let _ = writeln!(out, "  Show Progress: {}", theme.show_progress);
    let _ = writeln!(out, "  Show Slide Number: {}", theme.show_slide_number);
    let _ = writeln!(out, "\nPresentation:");
    let _ = writeln!(out, "  Word Wrap: {}", layout.word_wrap);
    let _ = writeln!(out, "  Margin: {}", layout.margin);
    let _ = writeln!(out, "  Padding: {}", layout.padding);
    let _ = writeln!(out, "\nKeybindings:");
    let _ = writeln!(out, "  Next: {}", keys.next.join(", "));
    let _ = writeln!(out, "  Previous: {}", keys.previous.join(", "));
    let _ = writeln!(out, "  First: {}", keys.first.join(", "));
    let _ = writeln!(out, "  Last: {}", keys.last.join(", "));
    let _ = writeln!(out, "  Back: {}", keys.back.join(", "));
    let _ = writeln!(out, "  Quit: {}", keys.quit.join(", "));

    match source {
        Some(path) => {
            let _ = writeln!(out, "\nConfig file: {}", path.display());
        }
        None => {
            let _ = writeln!(out, "\nUsing default configuration (no config file found)");
        }
    }
    out
}

pub fn config_init() -> Result<()> {
    let path = slate_config::create_default_config()?;
    println!("Created default config at: {}", path.display());
    println!("Edit this file to customize your presentation settings.");
    Ok(())
}

pub fn config_show() -> Result<()> {
    let (config, source) = ConfigLoader::new().load()?;
    print!("{}", describe_config(&config, source.as_deref()));
    Ok(())
}

pub fn config_path() {
    match ConfigLoader::new().find() {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("No configuration file found.");
            println!("Run 'slate config init' to create one.");
        }
    }
}

pub fn config_example() -> Result<()> {
    println!("Example Configuration:");
    println!("=====================");
    println!();
    print!("{}", slate_config::example_config()?);
    Ok(())
}

const BANNER: &str = r"
  ┌─┐┬  ┌─┐┌┬┐┌─┐
  └─┐│  ├─┤ │ ├┤
  └─┘┴─┘┴ ┴ ┴ └─┘
";

pub fn banner(color: bool) -> String {
    let title = format!(
        "        Slate · Terminal Presentation Tool v{}",
        env!("CARGO_PKG_VERSION")
    );
    let link = format!("        {}", env!("CARGO_PKG_REPOSITORY"));

    if color {
        format!("{}\n{}\n{}\n", BANNER.cyan(), title.white(), link.yellow())
    } else {
        format!("{BANNER}\n{title}\n{link}\n")
    }
}
