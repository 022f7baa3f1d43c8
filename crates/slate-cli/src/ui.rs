use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};

use crate::app::{App, ViewMode};
use crate::theme::ThemeManager;

const HINT_SEPARATOR: &str = "  •  ";

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    f.render_widget(Block::default().style(app.theme().body_style()), area);

    match app.view_mode() {
        ViewMode::Presentation => draw_presentation(f, app, area),
        ViewMode::Help => draw_help(f, app, area),
    }
}

fn draw_presentation(f: &mut Frame, app: &mut App, area: Rect) {
    let progress_rows = u16::from(app.show_progress());
    let status_rows = u16::from(app.show_slide_number() || app.current_notes().is_some());

    let [body, progress, status, hints] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(progress_rows),
        Constraint::Length(status_rows),
        Constraint::Length(1),
    ])
    .areas(area);

    let text = style_slide(&app.current_body(), app.theme());
    f.render_widget(Paragraph::new(text), body);

    if app.show_progress() {
        let bar = Line::styled(app.progress_bar(), app.theme().progress_style()).centered();
        f.render_widget(Paragraph::new(bar), progress);
    }

    if status_rows > 0 {
        draw_status(f, app, status);
    }

    f.render_widget(Paragraph::new(footer_line(app)), hints);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let [notes_area, number_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);

    if let Some(notes) = app.current_notes() {
        let notes = Line::from(vec![
            Span::styled(" Notes: ", app.theme().accent_style()),
            Span::styled(notes.to_string(), app.theme().help_style()),
        ]);
        f.render_widget(Paragraph::new(notes), notes_area);
    }

    if app.show_slide_number() {
        let number = Line::styled(format!("{} ", app.slide_number()), app.theme().muted_style())
            .right_aligned();
        f.render_widget(Paragraph::new(number), number_area);
    }
}

fn footer_line(app: &App) -> Line<'static> {
    let theme = app.theme();
    let mut spans = vec![Span::styled(
        app.footer_hints().join(HINT_SEPARATOR),
        theme.muted_style(),
    )];
    if app.navigator().is_last() {
        spans.push(Span::styled("  [Press q to exit]", theme.warning_style()));
    }
    Line::from(spans).centered()
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();
    let mut lines = vec![
        Line::styled("Keyboard Shortcuts", theme.title_style()),
        Line::default(),
    ];
    lines.extend(app.help_lines().into_iter().map(|(action, keys)| {
        Line::from(vec![
            Span::styled(format!("  {action:<16}"), theme.body_style()),
            Span::styled(keys, theme.accent_style()),
        ])
    }));
    lines.push(Line::default());
    lines.push(Line::styled(
        format!("Theme: {}", theme.style_name()),
        theme.muted_style(),
    ));
    lines.push(Line::default());
    lines.push(Line::styled(
        "Press ? or Esc to return to the presentation",
        theme.help_style(),
    ));

    let block = Block::bordered()
        .title(" Help ")
        .border_style(theme.muted_style());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn is_underline(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '═' || c == '─')
}

/// Colour the laid-out slide text. Headings are the lines directly above an
/// underline; quotes start with the quote bar.
fn style_slide(body: &str, theme: &ThemeManager) -> Text<'static> {
    let lines: Vec<&str> = body.lines().collect();
    let styled = lines.iter().enumerate().map(|(i, line)| {
        let style = if is_underline(line) {
            theme.accent_style()
        } else if lines.get(i + 1).is_some_and(|next| is_underline(next)) {
            theme.title_style()
        } else if line.trim_start().starts_with('│') {
            theme.help_style()
        } else {
            theme.body_style()
        };
        Line::styled(line.to_string(), style)
    });
    Text::from(styled.collect::<Vec<_>>())
}
