use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::events::Focus;
use super::layout::AppLayout;
use crate::controller::{DetailController, SearchController};
use crate::models::{MAX_USER_RATING, MovieDetail, WatchedEntry, WatchedSummary};
use crate::utils::sanitize_text;
use crate::watched::WatchedStore;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const STAR: Color = Color::Rgb(252, 196, 25);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

const LOGO: &str = "🍿 usePopcorn";
const SEARCH_PLACEHOLDER: &str = "Search movies...";

/// Everything the renderer reads from the app
pub struct RenderState<'a> {
    pub search: &'a SearchController,
    pub detail: &'a DetailController,
    pub watched: &'a WatchedStore,
    pub focus: Focus,
    pub results_idx: usize,
    pub watched_idx: usize,
    pub left_open: bool,
    pub right_open: bool,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_nav_bar(frame, &layout, state);
    render_left_box(frame, layout.left_area, state);
    render_right_box(frame, layout.right_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn render_nav_bar(frame: &mut Frame, layout: &AppLayout, state: &RenderState) {
    let (logo_area, search_area, count_area) = layout.nav_sections();

    let logo = Paragraph::new(Line::from(Span::styled(
        LOGO,
        Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)));
    frame.render_widget(logo, logo_area);

    let query = state.search.query();
    let focused = state.focus == Focus::Search;
    let input = if query.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(MUTED))
    } else {
        Span::styled(query, Style::default().fg(BRIGHT))
    };
    let search = Paragraph::new(Line::from(input)).block(
        Block::default().borders(Borders::ALL).border_style(border_style(focused)).title(" Search "),
    );
    frame.render_widget(search, search_area);

    if focused {
        let width = query.chars().count() as u16;
        let max_x = search_area.x + search_area.width.saturating_sub(2);
        let x = (search_area.x + 1 + width).min(max_x);
        frame.set_cursor_position((x, search_area.y + 1));
    }

    let count = Paragraph::new(Line::from(vec![
        Span::raw("Found "),
        Span::styled(
            state.search.results().len().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" results"),
    ]))
    .style(Style::default().fg(BRIGHT))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)));
    frame.render_widget(count, count_area);
}

fn border_style(focused: bool) -> Style {
    if focused { Style::default().fg(ACCENT) } else { Style::default().fg(MUTED) }
}

/// Block for a collapsible box. A closed box keeps only its border and a `+` marker.
fn box_block(title: &str, open: bool, focused: bool) -> Block<'static> {
    let marker = if open { "–" } else { "+" };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(format!(" {} {} ", marker, title))
}

fn render_left_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Results;
    let block = box_block("Results", state.left_open, focused);

    if !state.left_open {
        frame.render_widget(block, area);
        return;
    }

    if state.search.is_loading() {
        frame.render_widget(loader(block), area);
    } else if let Some(error) = state.search.error() {
        frame.render_widget(error_message(block, error), area);
    } else {
        render_results_list(frame, area, block, state);
    }
}

fn loader(block: Block<'_>) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled("Loading...", Style::default().fg(MUTED))))
        .block(block)
}

fn error_message<'a>(block: Block<'a>, error: &str) -> Paragraph<'a> {
    Paragraph::new(Line::from(Span::styled(
        format!("⛔ {}", sanitize_text(error)),
        Style::default().fg(ERROR),
    )))
    .block(block)
    .wrap(Wrap { trim: true })
}

fn render_results_list(frame: &mut Frame, area: Rect, block: Block<'_>, state: &RenderState) {
    let selected_id = state.detail.selected_id();
    let items: Vec<ListItem> = state
        .search
        .results()
        .iter()
        .map(|result| {
            let marker = if selected_id == Some(result.id.as_str()) { "▶ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(sanitize_text(&result.title).into_owned(), Style::default().fg(BRIGHT)),
                Span::styled(
                    format!("  🗓 {}", sanitize_text(&result.year)),
                    Style::default().fg(MUTED),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    render_selectable_list(frame, area, block, items, state.results_idx, state.focus == Focus::Results);
}

fn render_selectable_list(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    items: Vec<ListItem>,
    selected_idx: usize,
    focused: bool,
) {
    let highlight = if focused {
        Style::default().bg(ACCENT).fg(BRIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let selected = (!items.is_empty()).then_some(selected_idx);
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut list_state = ListState::default().with_selected(selected);

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_right_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    if state.detail.is_open() {
        let block = box_block("Movie", state.right_open, state.focus == Focus::Detail);
        if !state.right_open {
            frame.render_widget(block, area);
        } else if state.detail.is_loading() {
            frame.render_widget(loader(block), area);
        } else if let Some(error) = state.detail.error() {
            frame.render_widget(error_message(block, error), area);
        } else if let Some(detail) = state.detail.detail() {
            frame.render_widget(detail_view(block, detail, state), area);
        } else {
            frame.render_widget(block, area);
        }
        return;
    }

    let block = box_block("Watched", state.right_open, state.focus == Focus::Watched);
    if !state.right_open {
        frame.render_widget(block, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    render_summary(frame, chunks[0], &state.watched.summary());
    render_watched_list(frame, chunks[1], state);
}

fn detail_view<'a>(block: Block<'a>, detail: &MovieDetail, state: &RenderState) -> Paragraph<'a> {
    let runtime = if detail.runtime_minutes > 0 {
        format!("{} min", detail.runtime_minutes)
    } else {
        "N/A".to_string()
    };

    let mut lines = vec![
        Line::from(Span::styled(
            sanitize_text(&detail.title).into_owned(),
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} • {}", sanitize_text(&detail.release_date), runtime),
            Style::default().fg(MUTED),
        )),
        Line::from(Span::styled(sanitize_text(&detail.genre).into_owned(), Style::default().fg(MUTED))),
        Line::from(vec![
            Span::styled("⭐ ", Style::default().fg(STAR)),
            Span::raw(format!("{} IMDb rating", detail.external_rating)),
        ]),
        Line::from(""),
    ];

    match state.detail.watched_rating(state.watched) {
        Some(rating) => {
            lines.push(Line::from(format!("You rated this movie {} ⭐", rating)));
        }
        None => {
            lines.push(star_row(state.detail.user_rating()));
            if state.detail.can_add(state.watched) {
                lines.push(Line::from(Span::styled(
                    "[a] + Add to list",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        sanitize_text(&detail.plot).into_owned(),
        Style::default().add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(format!("Starring {}", sanitize_text(&detail.actors))));
    lines.push(Line::from(format!("Directed by {}", sanitize_text(&detail.director))));

    Paragraph::new(Text::from(lines)).block(block).wrap(Wrap { trim: false })
}

/// Star input: filled stars up to the chosen rating, then the number
fn star_row(rating: u8) -> Line<'static> {
    let filled = "★".repeat(usize::from(rating));
    let empty = "☆".repeat(usize::from(MAX_USER_RATING.saturating_sub(rating)));
    let label = if rating > 0 { format!(" {}", rating) } else { String::new() };

    Line::from(vec![
        Span::styled(filled, Style::default().fg(STAR)),
        Span::styled(empty, Style::default().fg(MUTED)),
        Span::styled(label, Style::default().fg(STAR)),
    ])
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &WatchedSummary) {
    let lines = vec![
        Line::from(Span::styled(
            "MOVIES YOU WATCHED",
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("#️⃣ {} movies  ", summary.count)),
            Span::raw(format!("⭐ {:.2}  ", summary.avg_external_rating)),
            Span::raw(format!("🌟 {:.2}  ", summary.avg_user_rating)),
            Span::raw(format!("⏳ {:.2} min", summary.avg_runtime_minutes)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).style(Style::default().fg(BRIGHT)), area);
}

fn watched_line(entry: &WatchedEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(sanitize_text(&entry.title).into_owned(), Style::default().fg(BRIGHT)),
        Span::styled(
            format!(
                "  ⭐ {}  🌟 {}  ⏳ {} min",
                entry.external_rating, entry.user_rating, entry.runtime_minutes
            ),
            Style::default().fg(MUTED),
        ),
    ])
}

fn render_watched_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let items: Vec<ListItem> =
        state.watched.entries().iter().map(|entry| ListItem::new(watched_line(entry))).collect();

    render_selectable_list(
        frame,
        area,
        Block::default(),
        items,
        state.watched_idx,
        state.focus == Focus::Watched,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (text, style) = match state.status_message {
        Some(message) => {
            let fg = match message.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => ERROR,
            };
            (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
        }
        None => (key_hints(state.focus).to_string(), Style::default().fg(BRIGHT).bg(BAR_BG)),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn key_hints(focus: Focus) -> &'static str {
    match focus {
        Focus::Search => " Type to search | Tab: next pane | F1/F2: toggle boxes | Ctrl+C: quit ",
        Focus::Results => " ↑↓: move | Space: open | Tab: next pane | Enter: search | q: quit ",
        Focus::Watched => " ↑↓: move | d: delete | Tab: next pane | Enter: search | q: quit ",
        Focus::Detail => " 1-9,0: rate | ←→: adjust | a: add | Esc: close | Tab: next pane ",
    }
}
