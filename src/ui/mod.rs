// UI module for rendering the TUI.
// Lays out the header, editor, stdin and output panes, and the status bar.

mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::export;
use crate::state::{ConsoleLevel, RunPhase, Theme};

/// Colors for one display theme.
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub focused: Color,
    pub accent: Color,
    pub title: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::DarkGray,
                border: Color::DarkGray,
                focused: Color::Magenta,
                accent: Color::Yellow,
                title: Color::Cyan,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::Gray,
                border: Color::Gray,
                focused: Color::Blue,
                accent: Color::Magenta,
                title: Color::Blue,
            },
        }
    }
}

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.session.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_header(frame, app, &palette, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(chunks[1]);

    draw_editor(frame, app, &palette, columns[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    draw_stdin(frame, app, &palette, side[0]);
    draw_output(frame, app, &palette, side[1]);

    draw_status_bar(frame, app, &palette, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame, &palette);
    }
}

fn pane_block<'a>(title: String, focused: bool, palette: &Palette) -> Block<'a> {
    let border = if focused { palette.focused } else { palette.border };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

/// First visible line so that `cursor_line` stays on screen.
fn scroll_for(cursor_line: usize, height: u16) -> u16 {
    let visible = height.saturating_sub(2).max(1) as usize;
    cursor_line.saturating_sub(visible - 1) as u16
}

/// Draw the code editor for the active language, with line numbers.
fn draw_editor(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    const GUTTER: u16 = 7;

    let code = app.session.active_code();
    let artifact_name = format!(
        " ● code.{} ",
        export::extension_for(Some(app.session.active_language()))
    );
    let focused = app.focus == Focus::Editor;
    let block = pane_block(artifact_name, focused, palette);

    let lines: Vec<Line> = code
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>4} │ ", i + 1),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(line, Style::default().fg(palette.text)),
            ])
        })
        .collect();

    let cursor = app.editor_cursor();
    let (line, col) = cursor.line_col(code);
    let scroll_y = scroll_for(line, area.height);

    let editor = Paragraph::new(lines).block(block).scroll((scroll_y, 0));
    frame.render_widget(editor, area);

    if focused {
        place_cursor(frame, area, GUTTER, line, col, scroll_y);
    }
}

/// Draw the stdin input pane.
fn draw_stdin(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == Focus::Stdin;
    let block = pane_block(" Input (stdin) ".to_string(), focused, palette);
    let stdin = app.session.stdin();

    if stdin.is_empty() && !focused {
        let placeholder = Paragraph::new("Enter your program input here...")
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let (line, col) = app.stdin_cursor.line_col(stdin);
    let scroll_y = scroll_for(line, area.height);
    let input = Paragraph::new(stdin)
        .style(Style::default().fg(palette.text))
        .block(block)
        .scroll((scroll_y, 0));
    frame.render_widget(input, area);

    if focused {
        place_cursor(frame, area, 0, line, col, scroll_y);
    }
}

/// Draw the output pane; errors get a red border.
fn draw_output(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let border = if app.session.output_is_error() {
        Color::Red
    } else {
        palette.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Output (stdout) ");

    let style = if app.session.is_running() {
        Style::default().fg(Color::Yellow)
    } else if app.session.output_is_error() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(palette.text)
    };

    let output = Paragraph::new(app.session.output())
        .style(style)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(output, area);
}

fn place_cursor(frame: &mut Frame, area: Rect, gutter: u16, line: usize, col: usize, scroll_y: u16) {
    let row = u16::try_from(line).unwrap_or(u16::MAX).saturating_sub(scroll_y);
    let col = u16::try_from(col).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1 + gutter).saturating_add(col);
    let y = area.y.saturating_add(1).saturating_add(row);
    if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
        frame.set_cursor_position((x, y));
    }
}

/// Draw the status bar with run state, language, theme and the latest console message.
fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let status = match app.session.phase() {
        RunPhase::Running => Span::styled("Running", Style::default().fg(Color::Yellow)),
        RunPhase::Idle => Span::styled("Ready", Style::default().fg(Color::Green)),
    };

    let mut spans = vec![
        Span::styled(" Status: ", Style::default().fg(palette.muted)),
        status,
        Span::styled("  Language: ", Style::default().fg(palette.muted)),
        Span::raw(app.session.active_language().as_str().to_uppercase()),
        Span::styled("  Theme: ", Style::default().fg(palette.muted)),
        Span::raw(app.session.theme().label()),
        Span::styled("  F1 ", Style::default().fg(palette.accent)),
        Span::styled("Help", Style::default().fg(palette.muted)),
    ];

    if let Some(msg) = app.console.latest() {
        let color = match msg.level {
            ConsoleLevel::Error => Color::Red,
            ConsoleLevel::Warn => Color::Yellow,
            ConsoleLevel::Info => palette.title,
        };
        spans.push(Span::styled(
            format!("  {} {}", msg.timestamp.format("%H:%M:%S"), msg.message),
            Style::default().fg(color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    let popup_width = 48;
    let popup_height = 14;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    frame.render_widget(Clear, popup_area);

    let shortcuts = [
        ("  Ctrl-R        ", "Run code"),
        ("  Ctrl-S        ", "Save code.<ext>"),
        ("  F2 / F3       ", "Next / previous language"),
        ("  Tab           ", "Switch editor / input"),
        ("  Ctrl-T        ", "Toggle light / dark"),
        ("  F1            ", "Show/hide this help"),
        ("  Ctrl-Q        ", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    help_text.extend(shortcuts.iter().map(|(keys, action)| {
        Line::from(vec![
            Span::styled(*keys, Style::default().fg(palette.title)),
            Span::raw(*action),
        ])
    }));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(palette.muted)),
        Span::styled("Esc", Style::default().fg(palette.accent)),
        Span::styled(" to close", Style::default().fg(palette.muted)),
    ]));

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.title))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(palette.title)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .style(Style::default().bg(palette.background).fg(palette.text))
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
