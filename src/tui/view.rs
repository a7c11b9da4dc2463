use crossterm::style::Color;

use crate::palette::{EditorField, Mode, NoticeLevel, Palette, Viewport};

use super::terminal::{Size, Style, Terminal};

/// One screen row before it is written to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: Style,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

const PREVIEW_LINES: usize = 6;
/// Header, result counter, notice and key hints.
const CHROME_ROWS: usize = 4;

/// List rows a terminal of this size can show without clipping the selection.
pub fn list_rows(size: Size) -> usize {
    size.height.saturating_sub(CHROME_ROWS).max(1)
}

/// The palette's viewport shrunk to the terminal and scrolled to the selection.
fn visible_window(palette: &Palette, size: Size) -> Viewport {
    let mut viewport = *palette.viewport();
    viewport.set_height(viewport.height().min(list_rows(size)));
    viewport.follow(palette.selected_index());
    viewport
}

/// Map a terminal row to an index in the filtered list, if a result is drawn there.
pub fn list_index_at(palette: &Palette, size: Size, row: usize) -> Option<usize> {
    if palette.mode() != Mode::Search || row == 0 {
        return None;
    }
    let range = visible_window(palette, size).visible(palette.filtered().len());
    let index = range.start + (row - 1);
    range.contains(&index).then_some(index)
}

/// Lay the palette out for a terminal of the given size.
///
/// The body is clipped so the notice row and the key hints always occupy the
/// last two rows.
pub fn layout(palette: &Palette, size: Size) -> Vec<Line> {
    let mut lines = vec![header(palette)];
    match palette.mode() {
        Mode::Search => search_body(palette, size, &mut lines),
        Mode::Filling => filling_body(palette, &mut lines),
        Mode::Editor => editor_body(palette, &mut lines),
    }

    let body_rows = size.height.saturating_sub(2);
    lines.truncate(body_rows);
    while lines.len() < body_rows {
        lines.push(Line::plain(""));
    }

    lines.push(match palette.notice() {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Line::styled(notice.message.clone(), Style::fg(color))
        }
        None => Line::plain(""),
    });
    lines.push(Line::styled(hints(palette.mode()), Style::fg(Color::DarkGrey)));

    for line in &mut lines {
        line.text = fit(&line.text, size.width);
    }
    lines
}

pub fn draw(palette: &Palette, size: Size) -> Result<(), std::io::Error> {
    Terminal::hide_cursor()?;
    for (row, line) in layout(palette, size).iter().enumerate() {
        Terminal::print_styled_row(row, &line.text, line.style)?;
    }
    Terminal::execute()
}

fn header(palette: &Palette) -> Line {
    let text = match palette.mode() {
        Mode::Search => format!("[{}] > {}", palette.mode(), palette.query()),
        Mode::Filling => match palette.active_prompt() {
            Some(prompt) => format!("[{}] {}", palette.mode(), prompt.title),
            None => format!("[{}]", palette.mode()),
        },
        Mode::Editor => {
            let action = match palette.editor().and_then(|buffer| buffer.editing.as_ref()) {
                Some(_) => "Edit prompt",
                None => "New prompt",
            };
            format!("[{}] {action}", palette.mode())
        }
    };
    Line::styled(text, Style::fg(Color::Cyan).bold())
}

fn search_body(palette: &Palette, size: Size, lines: &mut Vec<Line>) {
    let filtered = palette.filtered();

    if filtered.is_empty() {
        let message = if palette.offers_create() {
            "Press Enter to create a new prompt"
        } else if palette.prompts().is_empty() {
            "No prompts yet. Type 'new' and press Enter to create one."
        } else {
            "No matching prompts"
        };
        lines.push(Line::styled(message, Style::fg(Color::Yellow)));
        return;
    }

    let range = visible_window(palette, size).visible(filtered.len());
    for (index, prompt) in filtered.iter().enumerate().take(range.end).skip(range.start) {
        let mut text = prompt.title.clone();
        if !prompt.tags.is_empty() {
            text.push_str("  #");
            text.push_str(&prompt.tags.join(" #"));
        }
        if prompt.usage_count > 0 {
            text.push_str(&format!("  ({} uses)", prompt.usage_count));
        }

        if index == palette.selected_index() {
            lines.push(Line::styled(format!("› {text}"), Style::default().reverse()));
        } else {
            lines.push(Line::plain(format!("  {text}")));
        }
    }
    lines.push(Line::styled(
        format!("{}/{}", palette.selected_index() + 1, filtered.len()),
        Style::fg(Color::DarkGrey),
    ));

    if let Some(prompt) = palette.selected_prompt() {
        lines.push(Line::plain(""));
        for row in prompt.content.lines().take(PREVIEW_LINES) {
            lines.push(Line::styled(row, Style::fg(Color::DarkGrey)));
        }
    }
}

fn filling_body(palette: &Palette, lines: &mut Vec<Line>) {
    let Some(fill) = palette.fill() else {
        return;
    };

    for (index, variable) in fill.session.variables().iter().enumerate() {
        let value = fill.session.value(variable);
        if index == fill.focus {
            lines.push(Line::styled(
                format!("› {variable}: {value}_"),
                Style::fg(Color::Yellow).bold(),
            ));
        } else {
            lines.push(Line::plain(format!("  {variable}: {value}")));
        }
    }

    lines.push(Line::plain(""));
    lines.push(Line::styled("Preview", Style::fg(Color::Cyan)));
    for row in fill.session.rendered().lines() {
        lines.push(Line::plain(row));
    }
}

fn editor_body(palette: &Palette, lines: &mut Vec<Line>) {
    let Some(buffer) = palette.editor() else {
        return;
    };

    let field = |label: &str, value: &str, field: EditorField| {
        if buffer.focus == field {
            Line::styled(
                format!("› {label}: {value}_"),
                Style::fg(Color::Yellow).bold(),
            )
        } else {
            Line::plain(format!("  {label}: {value}"))
        }
    };

    lines.push(field("Title", &buffer.title, EditorField::Title));
    lines.push(field("Tags", &buffer.tags, EditorField::Tags));

    let content_style = if buffer.focus == EditorField::Content {
        Style::fg(Color::Yellow).bold()
    } else {
        Style::default()
    };
    let marker = if buffer.focus == EditorField::Content {
        "›"
    } else {
        " "
    };
    lines.push(Line::styled(format!("{marker} Content:"), content_style));
    for row in buffer.content.split('\n') {
        lines.push(Line::plain(format!("    {row}")));
    }
}

fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Search => {
            "↑/↓ select · Enter use · Ctrl-N new · Ctrl-E edit · Ctrl-D delete · Esc clear · Ctrl-C quit"
        }
        Mode::Filling => "Tab/↓ next · Shift-Tab/↑ previous · Enter copy · Esc cancel",
        Mode::Editor => "Tab next field · Enter newline in content · Ctrl-S save · Esc cancel",
    }
}

/// Clip `text` to `width` characters.
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
