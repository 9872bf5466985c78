// Header bar with the language selector.
// Highlights the active language and shows the run indicator.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::language::LanguageId;

use super::Palette;

/// Draw the header: language tabs on the left, run state on the right.
pub fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(16)])
        .split(area);

    let active = app.session.active_language();

    let titles: Vec<Line> = LanguageId::ALL
        .iter()
        .map(|lang| {
            let style = if *lang == active {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            Line::from(vec![
                Span::styled(format!("{} ", lang.icon()), Style::default().fg(icon_color(*lang))),
                Span::styled(lang.display_name(), style),
            ])
        })
        .collect();

    let selected_index = LanguageId::ALL
        .iter()
        .position(|lang| *lang == active)
        .unwrap_or(0);

    let tabs_widget = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.border))
                .title(" CodeNest IDE ")
                .title_style(
                    Style::default()
                        .fg(palette.title)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(palette.accent))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, chunks[0]);

    let (label, color) = if app.session.is_running() {
        ("⏳ Running...", Color::Yellow)
    } else {
        ("▶ Run (^R)", Color::Green)
    };
    let run_indicator = Paragraph::new(label)
        .alignment(Alignment::Right)
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(run_indicator, chunks[1]);
}

fn icon_color(lang: LanguageId) -> Color {
    match lang {
        LanguageId::Cpp => Color::Blue,
        LanguageId::Javascript => Color::Yellow,
        LanguageId::Java => Color::Red,
        LanguageId::Python => Color::LightBlue,
    }
}
