//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::state::{AppState, FormField, ItineraryView, Screen};
use crate::domain::INTEREST_OPTIONS;
use crate::planner::PanelState;
use crate::validation::Field;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Screen regions of the form, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, PartialEq)]
pub struct FormLayout {
    pub fields: Vec<(FormField, Rect)>,
    /// Suggestion list under the destination field, when open
    pub dropdown: Option<Rect>,
}

/// Split the frame into header, body and footer
fn frame_chunks(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Compute the form layout for a frame of size `area`
pub fn form_layout(state: &AppState, area: Rect) -> FormLayout {
    let (_, body, _) = frame_chunks(area);
    let visible = FormField::visible(state.form.prefs.wants_other());

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|f| match f {
            FormField::Interests => Constraint::Length(4),
            _ => Constraint::Length(3),
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(body);
    let fields: Vec<(FormField, Rect)> = visible.into_iter().zip(rects.iter().copied()).collect();

    let candidates = state.suggestions.candidates().len();
    let dropdown = fields
        .iter()
        .find(|(f, _)| *f == FormField::Destination)
        .filter(|_| candidates > 0)
        .map(|(_, dest)| {
            let y = dest.y + dest.height;
            let height = (candidates as u16 + 2).min(body.bottom().saturating_sub(y));
            Rect::new(dest.x, y, dest.width, height)
        })
        .filter(|r| r.height > 2);

    FormLayout { fields, dropdown }
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let (header, body, footer) = frame_chunks(frame.area());

    render_header(state, frame, header);
    match state.screen {
        Screen::Form => render_form(state, frame),
        Screen::Itinerary => match &state.itinerary {
            Some(view) => render_itinerary(state, view, frame, body),
            None => render_form(state, frame),
        },
    }
    render_footer(state, frame, footer);
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let messages = state.messages();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            messages.app_title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(messages.app_subtitle, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn field_label(state: &AppState, field: FormField) -> (&'static str, Option<Field>) {
    let messages = state.messages();
    match field {
        FormField::Destination => (messages.destination, Some(Field::Destination)),
        FormField::Duration => (messages.duration, Some(Field::Duration)),
        FormField::Budget => (messages.budget, Some(Field::Budget)),
        FormField::Interests => (messages.interests, None),
        FormField::OtherInterest => (messages.other_interest_placeholder, Some(Field::OtherInterest)),
        FormField::Restrictions => (messages.requirements, None),
        FormField::Submit => ("", None),
    }
}

fn render_form(state: &AppState, frame: &mut Frame) {
    let layout = form_layout(state, frame.area());

    for (field, area) in &layout.fields {
        let focused = state.form.focus == *field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        if *field == FormField::Submit {
            render_submit(state, frame, *area, border);
            continue;
        }

        let (label, validated) = field_label(state, *field);
        let mut title = vec![Span::raw(format!(" {} ", label))];
        if let Some(rule) = validated.and_then(|f| state.errors.get(f)) {
            title.push(Span::styled(
                format!("· {} ", rule.message(state.lang)),
                Style::default().fg(Color::Red),
            ));
        }
        if *field == FormField::Budget {
            title.push(Span::styled(
                format!("({}) ", state.messages().budget_per_person),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Line::from(title));

        if *field == FormField::Interests {
            frame.render_widget(interest_tags(state, focused).block(block), *area);
            continue;
        }

        let value = state.form.input(*field);
        let content = if value.is_empty() && *field == FormField::Destination {
            Span::styled(state.messages().destination_placeholder, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(value)
        };
        frame.render_widget(Paragraph::new(Line::from(content)).block(block), *area);

        if focused {
            let x = area.x + 1 + value.chars().count() as u16;
            frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    if let Some(dropdown) = layout.dropdown {
        render_suggestions(state, frame, dropdown);
    }
}

fn interest_tags(state: &AppState, focused: bool) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (i, tag) in INTEREST_OPTIONS.iter().enumerate() {
        let selected = state.form.prefs.has_interest(tag);
        let mut style = if selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        if focused && i == state.form.interest_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        let mark = if selected { "✓" } else { " " };
        spans.push(Span::styled(format!("[{}] {}", mark, tag), style));
        spans.push(Span::raw("  "));
    }
    Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true })
}

fn render_submit(state: &AppState, frame: &mut Frame, area: Rect, border: Style) {
    let messages = state.messages();
    let text = if state.loading {
        format!("{} {}", SPINNER[state.spinner % SPINNER.len()], messages.generating)
    } else {
        messages.submit.to_string()
    };
    let style = if state.loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Span::styled(text, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(button, area);
}

fn render_suggestions(state: &AppState, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = state
        .suggestions
        .candidates()
        .iter()
        .map(|label| ListItem::new(label.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut list_state = ListState::default().with_selected(state.suggestions.active_index());
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_itinerary(state: &AppState, view: &ItineraryView, frame: &mut Frame, area: Rect) {
    let messages = state.messages();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let justification = &view.itinerary.justification;
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{}: ", messages.interests_heading), heading),
            Span::raw(justification.interests_alignment.as_str()),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", messages.budget_heading), heading),
            Span::raw(justification.budget_alignment.as_str()),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", messages.requirements_heading), heading),
            Span::raw(justification.restrictions_alignment.as_str()),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} {} · {} ", messages.itinerary_title, view.destination, messages.justification_title)),
    );
    frame.render_widget(summary, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let items: Vec<ListItem> = view
        .itinerary
        .activities()
        .map(|(day, activity)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {} ", messages.day, day.day), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<6} ", activity.time), Style::default().fg(Color::Yellow)),
                Span::raw(activity.location.name.as_str()),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Activities "))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
    let mut list_state = ListState::default().with_selected(Some(view.selected));
    frame.render_stateful_widget(list, panes[0], &mut list_state);

    render_activity_detail(state, view, frame, panes[1]);
}

fn render_activity_detail(state: &AppState, view: &ItineraryView, frame: &mut Frame, area: Rect) {
    let messages = state.messages();
    let Some((day, activity)) = view.itinerary.activities().nth(view.selected) else {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(format!("{} {}: {}", messages.day, day.day, day.title), bold)),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}  ", activity.time), Style::default().fg(Color::Yellow)),
            Span::raw(activity.description.as_str()),
        ]),
        Line::from(Span::styled(activity.estimated_cost.as_str(), Style::default().fg(Color::Green))),
        Line::from(activity.location.name.as_str()),
        Line::from(Span::styled(
            format!("{}: {}", messages.view_on_map, activity.location.map_url()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    match view.panels.get(view.selected).map(|p| p.state()) {
        Some(PanelState::Idle) | None => {
            lines.push(Line::from(Span::styled(
                format!("[Enter] {}", messages.more_info),
                Style::default().fg(Color::Cyan),
            )));
        }
        Some(PanelState::Loading) => {
            lines.push(Line::from(format!(
                "{} {}",
                SPINNER[state.spinner % SPINNER.len()],
                messages.loading
            )));
        }
        Some(PanelState::Loaded { text, chunks }) => {
            lines.push(Line::from(Span::styled(
                format!("{} {}", messages.updated_info, activity.location.name),
                bold,
            )));
            lines.extend(text.lines().map(|l| Line::from(l.to_string())));
            let sources: Vec<_> = chunks.iter().filter_map(|c| c.uri().map(|uri| (c, uri))).collect();
            if !sources.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(messages.sources, bold)));
                for (chunk, uri) in sources {
                    let label = if chunk.is_maps() { messages.map_link } else { messages.web_link };
                    lines.push(Line::from(vec![
                        Span::raw(format!("- {}: ", chunk.title().unwrap_or(label))),
                        Span::styled(uri.to_string(), Style::default().fg(Color::Blue)),
                    ]));
                }
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("[Enter] {}", messages.hide_info),
                Style::default().fg(Color::Cyan),
            )));
        }
        Some(PanelState::Failed(message)) => {
            lines.push(Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))));
            lines.push(Line::from(Span::styled(
                format!("[Enter] {}", messages.more_info),
                Style::default().fg(Color::Cyan),
            )));
        }
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(detail, area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let line = if let Some(ref error) = state.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else if let Some(ref notice) = state.notice {
        Line::from(Span::styled(notice.as_str(), Style::default().fg(Color::Yellow)))
    } else {
        let hints = match state.screen {
            Screen::Form => "Tab/↑↓: move  ←→ Space: interests  Enter: next/select  Ctrl+S: submit  Esc: quit",
            Screen::Itinerary => "↑↓/jk: select  Enter/i: info  m: map link  e: export CSV  n: new plan  q: quit",
        };
        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, OTHER_INTEREST};
    use crate::places::{PlaceRecord, SuggestionMatcher};
    use crate::validation::PreferencesValidator;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state() -> AppState {
        AppState::new(
            Language::En,
            SuggestionMatcher::default(),
            PreferencesValidator::default(),
            vec![PlaceRecord::new("Oslo", "Norway", None)],
        )
    }

    #[test]
    fn test_form_layout_hides_other_field() {
        let mut s = state();
        let area = Rect::new(0, 0, 80, 50);
        let fields: Vec<_> = form_layout(&s, area).fields.into_iter().map(|(f, _)| f).collect();
        assert!(!fields.contains(&FormField::OtherInterest));

        s.form.prefs.toggle_interest(OTHER_INTEREST);
        let fields: Vec<_> = form_layout(&s, area).fields.into_iter().map(|(f, _)| f).collect();
        assert!(fields.contains(&FormField::OtherInterest));
    }

    #[test]
    fn test_dropdown_only_with_candidates() {
        let mut s = state();
        let area = Rect::new(0, 0, 80, 50);
        assert!(form_layout(&s, area).dropdown.is_none());

        s.form.prefs.destination = "os".to_string();
        s.destination_edited();
        let layout = form_layout(&s, area);
        let dest = layout.fields[0].1;
        let dropdown = layout.dropdown.unwrap();
        assert_eq!(dropdown.y, dest.y + dest.height);
        assert_eq!(dropdown.height, 3);
    }

    #[test]
    fn test_render_form_shows_title_and_errors() {
        let mut s = state();
        s.submit();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(&s, frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("AI Travel Planner Pro"));
        assert!(text.contains("This field is required"));
    }
}
