// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use triage_app::{
    AppCommand, AppEvent, AppState, AssigneeFilter, Locale, Priority, PriorityFilter,
    SeverityColor, SortOrder, Ticket, Transition, derive_view, format_absolute, format_relative,
};

const SORT_MARK_NEWEST: &str = "▼";
const SORT_MARK_OLDEST: &str = "▲";
const CURSOR_MARK: &str = "›";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

/// Data the dashboard reads but never changes.
pub trait AppRuntime {
    fn tickets(&self) -> &[Ticket];
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ViewData {
    cursor: usize,
    help_visible: bool,
    status_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListLine<'a> {
    GroupHeader { priority: Priority, count: usize },
    Card {
        ticket: &'a Ticket,
        focused: bool,
        date: String,
    },
    Blank,
    Empty,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    tracing::info!(tickets = runtime.tickets().len(), "dashboard started");
    let result = event_loop(&mut terminal, state, runtime);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    tracing::info!("dashboard closed");
    result
}

fn event_loop<R: AppRuntime>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    runtime: &R,
) -> Result<()> {
    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    loop {
        process_internal_events(state, runtime, &view_data, &internal_rx);

        let now = runtime.now();
        terminal
            .draw(|frame| render(frame, state, &view_data, runtime.tickets(), now))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")? {
            if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                return Ok(());
            }
        }
    }
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                apply_command(state, runtime.tickets(), AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

/// Replaces `state` with the result of `command`.
fn apply_command(state: &mut AppState, tickets: &[Ticket], command: AppCommand) -> Vec<AppEvent> {
    let Transition { state: next, events } = state.dispatch(tickets, command);
    *state = next;
    events
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn dispatch_and_track<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = apply_command(state, runtime.tickets(), command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
    clamp_cursor(state, runtime.tickets(), view_data);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        view_data.help_visible = false;
        return false;
    }

    let command = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            return false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            move_cursor(state, runtime.tickets(), view_data, 1);
            return false;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_cursor(state, runtime.tickets(), view_data, -1);
            return false;
        }
        KeyCode::Char('g') | KeyCode::Home => {
            view_data.cursor = 0;
            return false;
        }
        KeyCode::Char('G') | KeyCode::End => {
            view_data.cursor = visible_count(state, runtime.tickets()).saturating_sub(1);
            return false;
        }
        KeyCode::Char('0') | KeyCode::Char('a') => AppCommand::SetPriorityFilter(PriorityFilter::All),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            AppCommand::SetPriorityFilter(PriorityFilter::Only(Priority::ALL[index]))
        }
        KeyCode::Char('s') => AppCommand::ToggleSortOrder,
        KeyCode::Char('u') => AppCommand::CycleAssignee,
        KeyCode::Char('U') => AppCommand::SetAssigneeFilter(AssigneeFilter::All),
        KeyCode::Enter => match focused_ticket(state, runtime.tickets(), view_data) {
            Some(ticket) => AppCommand::SelectTicket(ticket.id),
            None => return false,
        },
        KeyCode::Esc => AppCommand::CloseDetail,
        _ => return false,
    };

    dispatch_and_track(state, runtime, view_data, internal_tx, command);
    false
}

fn visible_count(state: &AppState, tickets: &[Ticket]) -> usize {
    derive_view(tickets, &state.view).sorted.len()
}

fn focused_ticket<'a>(
    state: &AppState,
    tickets: &'a [Ticket],
    view_data: &ViewData,
) -> Option<&'a Ticket> {
    derive_view(tickets, &state.view)
        .display_order()
        .get(view_data.cursor)
        .copied()
}

fn move_cursor(state: &AppState, tickets: &[Ticket], view_data: &mut ViewData, delta: isize) {
    let count = visible_count(state, tickets);
    if count == 0 {
        view_data.cursor = 0;
        return;
    }
    let next = view_data.cursor as isize + delta;
    view_data.cursor = next.clamp(0, count as isize - 1) as usize;
}

fn clamp_cursor(state: &AppState, tickets: &[Ticket], view_data: &mut ViewData) {
    let count = visible_count(state, tickets);
    view_data.cursor = view_data.cursor.min(count.saturating_sub(1));
}

fn date_label(ticket: &Ticket, now: OffsetDateTime, locale: Locale) -> String {
    // Future-dated tickets cannot be described relatively; show the date itself.
    format_relative(ticket.created_at, now, locale)
        .unwrap_or_else(|_| format_absolute(ticket.created_at))
}

fn list_lines<'a>(
    state: &AppState,
    tickets: &'a [Ticket],
    cursor: Option<usize>,
    now: OffsetDateTime,
) -> Vec<ListLine<'a>> {
    let view = derive_view(tickets, &state.view);
    if view.is_empty() {
        return vec![ListLine::Empty];
    }

    let mut lines = Vec::new();
    let mut index = 0;
    for (priority, bucket) in view.groups.non_empty() {
        if !lines.is_empty() {
            lines.push(ListLine::Blank);
        }
        lines.push(ListLine::GroupHeader {
            priority,
            count: bucket.len(),
        });
        for &ticket in bucket {
            lines.push(ListLine::Card {
                ticket,
                focused: cursor == Some(index),
                date: date_label(ticket, now, state.locale),
            });
            index += 1;
        }
    }
    lines
}

fn list_line_text(line: &ListLine<'_>, locale: Locale) -> String {
    match line {
        ListLine::GroupHeader { priority, count } => {
            format!("● {} ({count})", priority.label(locale))
        }
        ListLine::Card {
            ticket,
            focused,
            date,
        } => {
            let mark = if *focused { CURSOR_MARK } else { " " };
            format!(
                "{mark} {} [{}] · {date}",
                ticket.title,
                ticket.priority.label(locale)
            )
        }
        ListLine::Blank => String::new(),
        ListLine::Empty => locale.strings().empty_state.to_owned(),
    }
}

fn render_ticket_list_text(
    state: &AppState,
    tickets: &[Ticket],
    cursor: Option<usize>,
    now: OffsetDateTime,
) -> String {
    list_lines(state, tickets, cursor, now)
        .iter()
        .map(|line| list_line_text(line, state.locale))
        .collect::<Vec<_>>()
        .join("\n")
}

fn sort_mark(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Newest => SORT_MARK_NEWEST,
        SortOrder::Oldest => SORT_MARK_OLDEST,
    }
}

fn render_filter_bar_text(state: &AppState) -> String {
    let strings = state.locale.strings();
    let choices = PriorityFilter::CHOICES
        .iter()
        .map(|choice| {
            let label = choice.label(state.locale);
            if *choice == state.view.priority_filter {
                format!("[{label}]")
            } else {
                label.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{}: {choices} | {}: {} {} | {}: {}",
        strings.filters,
        strings.sort,
        state.view.sort_order.label(state.locale),
        sort_mark(state.view.sort_order),
        strings.assignee,
        state.view.assignee_filter.label(state.locale),
    )
}

fn render_detail_text(state: &AppState, tickets: &[Ticket], now: OffsetDateTime) -> String {
    let strings = state.locale.strings();
    let Some(ticket) = state.view.selection.selected_ticket(tickets) else {
        return strings.detail_placeholder.to_owned();
    };
    [
        ticket.title.clone(),
        String::new(),
        strings.heading_priority.to_uppercase(),
        ticket.priority.label(state.locale).to_owned(),
        String::new(),
        strings.heading_created.to_uppercase(),
        date_label(ticket, now, state.locale),
        String::new(),
        strings.heading_status.to_uppercase(),
        ticket.status.clone(),
        String::new(),
        strings.heading_assignee.to_uppercase(),
        ticket.assigned_to.clone(),
        String::new(),
        strings.heading_description.to_uppercase(),
        ticket.description.clone(),
        String::new(),
        strings.heading_id.to_uppercase(),
        format!("#{}", ticket.id),
    ]
    .join("\n")
}

fn status_text(state: &AppState) -> String {
    let default = "j/k move | enter open | esc close | 0-4 priority | s sort | u/U assignee | ? help | q quit";
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "nav: j/k or up/down move | g/G first/last | enter open detail | esc close detail\n\
filter: 0 or a all priorities | 1 critical | 2 high | 3 medium | 4 low\n\
sort: s toggle newest/oldest\n\
assignee: u next assignee | U all assignees\n\
global: ? help | q or ctrl+q quit\n\
help: any key close"
}

/// Plain-text rendering of the whole dashboard, for non-interactive output.
pub fn render_plain(state: &AppState, tickets: &[Ticket], now: OffsetDateTime) -> String {
    let strings = state.locale.strings();
    let mut sections = vec![
        format!("{}\n{}", strings.title, strings.subtitle),
        render_filter_bar_text(state),
        render_ticket_list_text(state, tickets, None, now),
    ];
    if state.view.selection.is_open() {
        sections.push(render_detail_text(state, tickets, now));
    }
    sections.join("\n\n")
}

fn severity_color(severity: SeverityColor) -> Color {
    match severity {
        SeverityColor::Red => Color::Red,
        SeverityColor::Orange => Color::Rgb(249, 115, 22),
        SeverityColor::Yellow => Color::Yellow,
        SeverityColor::Blue => Color::Blue,
    }
}

fn styled_list_line(line: &ListLine<'_>, locale: Locale) -> Line<'static> {
    let text = list_line_text(line, locale);
    match line {
        ListLine::GroupHeader { priority, .. } => Line::from(Span::styled(
            text,
            Style::default()
                .fg(severity_color(priority.severity()))
                .add_modifier(Modifier::BOLD),
        )),
        ListLine::Card {
            ticket, focused, ..
        } => {
            let style = if *focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(severity_color(ticket.priority.severity()))
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(text, style))
        }
        ListLine::Blank => Line::default(),
        ListLine::Empty => Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))),
    }
}

fn filter_bar_line(state: &AppState) -> Line<'static> {
    let strings = state.locale.strings();
    let mut spans = vec![Span::styled(
        format!("{}: ", strings.filters),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for choice in PriorityFilter::CHOICES {
        let color = match choice {
            PriorityFilter::All => Color::White,
            PriorityFilter::Only(priority) => severity_color(priority.severity()),
        };
        let style = if choice == state.view.priority_filter {
            Style::default().fg(Color::Black).bg(color)
        } else {
            Style::default().fg(color)
        };
        spans.push(Span::styled(format!(" {} ", choice.label(state.locale)), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(format!(
        "| {}: {} {} | {}: {}",
        strings.sort,
        state.view.sort_order.label(state.locale),
        sort_mark(state.view.sort_order),
        strings.assignee,
        state.view.assignee_filter.label(state.locale),
    )));
    Line::from(spans)
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    view_data: &ViewData,
    tickets: &[Ticket],
    now: OffsetDateTime,
) {
    let strings = state.locale.strings();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            strings.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            strings.subtitle,
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().title("triage").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    let filters =
        Paragraph::new(filter_bar_line(state)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(filters, layout[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(layout[2]);

    let lines = list_lines(state, tickets, Some(view_data.cursor), now);
    let focused_line = lines
        .iter()
        .position(|line| matches!(line, ListLine::Card { focused: true, .. }))
        .unwrap_or(0);
    let list_height = usize::from(body[0].height.saturating_sub(2)).max(1);
    let scroll = focused_line.saturating_sub(list_height - 1);
    let list = Paragraph::new(
        lines
            .iter()
            .map(|line| styled_list_line(line, state.locale))
            .collect::<Vec<_>>(),
    )
    .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
    .block(Block::default().title("tickets").borders(Borders::ALL));
    frame.render_widget(list, body[0]);

    let detail_title = match state.view.selection.ticket_id() {
        Some(id) => format!("#{id}"),
        None => "detail".to_owned(),
    };
    let detail = Paragraph::new(render_detail_text(state, tickets, now))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(detail_title).borders(Borders::ALL));
    frame.render_widget(detail, body[1]);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, ViewData, focused_ticket, handle_key_event, help_overlay_text,
        process_internal_events, render_detail_text, render_filter_bar_text, render_plain,
        render_ticket_list_text, status_text,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;
    use time::OffsetDateTime;
    use triage_app::{
        AppState, AssigneeFilter, Locale, Priority, PriorityFilter, Selection, SortOrder, Ticket,
        TicketId,
    };
    use triage_store::TicketStore;
    use triage_testkit::{TicketBuilder, fixed_now};

    struct TestRuntime {
        tickets: Vec<Ticket>,
    }

    impl TestRuntime {
        fn seed() -> Self {
            let store = TicketStore::seed().expect("seed tickets are valid");
            Self {
                tickets: store.tickets().to_vec(),
            }
        }

        fn empty() -> Self {
            Self {
                tickets: Vec::new(),
            }
        }
    }

    impl AppRuntime for TestRuntime {
        fn tickets(&self) -> &[Ticket] {
            &self.tickets
        }

        fn now(&self) -> OffsetDateTime {
            fixed_now()
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn run_keys(
        state: &mut AppState,
        runtime: &TestRuntime,
        view_data: &mut ViewData,
        keys: &[KeyEvent],
    ) -> bool {
        let (tx, _rx) = mpsc::channel();
        let mut quit = false;
        for key in keys {
            quit = handle_key_event(state, runtime, view_data, &tx, *key);
        }
        quit
    }

    #[test]
    fn digit_keys_set_priority_filter_in_taxonomy_order() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('1'))]);
        assert_eq!(
            state.view.priority_filter,
            PriorityFilter::Only(Priority::Critical)
        );

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('4'))]);
        assert_eq!(state.view.priority_filter, PriorityFilter::Only(Priority::Low));

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('0'))]);
        assert_eq!(state.view.priority_filter, PriorityFilter::All);
    }

    #[test]
    fn sort_key_toggles_order() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('s'))]);
        assert_eq!(state.view.sort_order, SortOrder::Oldest);
        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('s'))]);
        assert_eq!(state.view.sort_order, SortOrder::Newest);
    }

    #[test]
    fn enter_opens_focused_card_and_esc_closes() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        // display order under defaults: 5, 1, 3, 8, ...
        run_keys(
            &mut state,
            &runtime,
            &mut view_data,
            &[key(KeyCode::Char('j')), key(KeyCode::Enter)],
        );
        assert_eq!(state.view.selection, Selection::Open(TicketId::new(1)));

        run_keys(
            &mut state,
            &runtime,
            &mut view_data,
            &[key(KeyCode::Esc), key(KeyCode::Esc)],
        );
        assert_eq!(state.view.selection, Selection::Closed);
    }

    #[test]
    fn cursor_is_clamped_when_filter_shrinks_the_list() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        run_keys(
            &mut state,
            &runtime,
            &mut view_data,
            &[key(KeyCode::Char('G')), key(KeyCode::Char('1'))],
        );
        assert_eq!(view_data.cursor, 1);
        let focused = focused_ticket(&state, runtime.tickets(), &view_data);
        assert_eq!(focused.map(|t| t.id), Some(TicketId::new(1)));
    }

    #[test]
    fn cursor_stops_at_list_edges() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Up)]);
        assert_eq!(view_data.cursor, 0);

        let downs = vec![key(KeyCode::Down); 20];
        run_keys(&mut state, &runtime, &mut view_data, &downs);
        assert_eq!(view_data.cursor, 7);
    }

    #[test]
    fn enter_on_empty_list_does_nothing() {
        let runtime = TestRuntime::empty();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Enter)]);
        assert_eq!(state.view.selection, Selection::Closed);
    }

    #[test]
    fn assignee_keys_cycle_and_reset() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('u'))]);
        assert_eq!(
            state.view.assignee_filter,
            AssigneeFilter::Named("Laura Carbajal".to_owned())
        );
        assert_eq!(view_data.status_token, 1);

        run_keys(&mut state, &runtime, &mut view_data, &[key(KeyCode::Char('U'))]);
        assert_eq!(state.view.assignee_filter, AssigneeFilter::All);
    }

    #[test]
    fn quit_keys_end_the_loop_and_help_swallows_one_key() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        let quit = run_keys(
            &mut state,
            &runtime,
            &mut view_data,
            &[key(KeyCode::Char('?')), key(KeyCode::Char('q'))],
        );
        assert!(!quit);
        assert!(!view_data.help_visible);

        assert!(run_keys(
            &mut state,
            &runtime,
            &mut view_data,
            &[key(KeyCode::Char('q'))]
        ));
        assert!(run_keys(
            &mut state,
            &runtime,
            &mut view_data,
            &[KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)]
        ));
    }

    #[test]
    fn stale_clear_status_tokens_are_ignored() {
        let runtime = TestRuntime::seed();
        let mut state = AppState {
            status_line: Some("Colaborador: Laura Carbajal".to_owned()),
            ..AppState::default()
        };
        let view_data = ViewData {
            status_token: 2,
            ..ViewData::default()
        };
        let (tx, rx) = mpsc::channel();

        tx.send(InternalEvent::ClearStatus { token: 1 })
            .expect("send stale token");
        process_internal_events(&mut state, &runtime, &view_data, &rx);
        assert!(state.status_line.is_some());

        tx.send(InternalEvent::ClearStatus { token: 2 })
            .expect("send current token");
        process_internal_events(&mut state, &runtime, &view_data, &rx);
        assert!(state.status_line.is_none());
    }

    #[test]
    fn ticket_list_groups_in_taxonomy_order_with_counts() {
        let runtime = TestRuntime::seed();
        let state = AppState::default();
        let text = render_ticket_list_text(&state, runtime.tickets(), Some(0), fixed_now());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "● Crítica (2)");
        assert_eq!(
            lines[1],
            "› Error de autenticación en móvil [Crítica] · Ayer"
        );
        assert!(lines[2].starts_with("  Error en el sistema de pagos"));
        assert_eq!(lines[4], "● Alta (2)");
        assert!(text.contains("● Media (2)"));
        assert!(text.contains("● Baja (2)"));
        assert!(text.contains("05/10/2025"));
    }

    #[test]
    fn ticket_list_skips_empty_groups() {
        let runtime = TestRuntime::seed();
        let state = AppState {
            view: triage_app::ViewSelection {
                priority_filter: PriorityFilter::Only(Priority::High),
                ..Default::default()
            },
            ..AppState::default()
        };
        let text = render_ticket_list_text(&state, runtime.tickets(), None, fixed_now());
        assert!(text.starts_with("● Alta (2)"));
        assert!(!text.contains("Crítica"));
    }

    #[test]
    fn ticket_list_shows_empty_state_message() {
        let state = AppState::default();
        let text = render_ticket_list_text(&state, &[], None, fixed_now());
        assert_eq!(text, "No hay tickets con los filtros seleccionados");

        let english = AppState {
            locale: Locale::En,
            ..AppState::default()
        };
        let text = render_ticket_list_text(&english, &[], None, fixed_now());
        assert_eq!(text, "No tickets match the selected filters");
    }

    #[test]
    fn future_dated_ticket_renders_absolute_date() {
        let tickets = vec![TicketBuilder::new(1).days_before_now(-3).build()];
        let state = AppState::default();
        let text = render_ticket_list_text(&state, &tickets, None, fixed_now());
        assert!(text.ends_with("27/10/2025"), "got {text}");
    }

    #[test]
    fn filter_bar_marks_active_choice_and_sort() {
        let mut state = AppState::default();
        let text = render_filter_bar_text(&state);
        assert!(text.starts_with("Filtros: [Todas] Crítica Alta Media Baja"));
        assert!(text.contains("Ordenar: Más recientes ▼"));
        assert!(text.contains("Colaborador: Todas"));

        state.view.priority_filter = PriorityFilter::Only(Priority::Medium);
        state.view.sort_order = SortOrder::Oldest;
        let text = render_filter_bar_text(&state);
        assert!(text.contains("Todas Crítica Alta [Media] Baja"));
        assert!(text.contains("Más antiguos ▲"));
    }

    #[test]
    fn detail_panel_shows_placeholder_then_ticket_fields() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        assert_eq!(
            render_detail_text(&state, runtime.tickets(), fixed_now()),
            "Selecciona un ticket para ver sus detalles"
        );

        state.view.selection = Selection::Open(TicketId::new(8));
        let text = render_detail_text(&state, runtime.tickets(), fixed_now());
        assert!(text.starts_with("Error en notificaciones push"));
        assert!(text.contains("PRIORIDAD\nAlta"));
        assert!(text.contains("FECHA DE CREACIÓN\nHace 3 días"));
        assert!(text.contains("ESTADO\nEn revisión"));
        assert!(text.contains("ASIGNADO A\nLaura Fernández"));
        assert!(text.ends_with("ID DEL TICKET\n#8"));
    }

    #[test]
    fn plain_render_includes_detail_only_when_open() {
        let runtime = TestRuntime::seed();
        let mut state = AppState::default();
        let closed = render_plain(&state, runtime.tickets(), fixed_now());
        assert!(closed.starts_with("Sistema de Tickets\n"));
        assert!(!closed.contains("ID DEL TICKET"));

        state.view.selection = Selection::Open(TicketId::new(2));
        let open = render_plain(&state, runtime.tickets(), fixed_now());
        assert!(open.ends_with("ID DEL TICKET\n#2"));
    }

    #[test]
    fn status_text_prefixes_status_line() {
        let mut state = AppState::default();
        assert!(status_text(&state).starts_with("j/k move"));
        state.status_line = Some("ticket #9 not found".to_owned());
        assert!(status_text(&state).starts_with("ticket #9 not found | j/k move"));
    }

    #[test]
    fn help_overlay_lists_every_binding_group() {
        let help = help_overlay_text();
        for section in ["nav:", "filter:", "sort:", "assignee:", "global:"] {
            assert!(help.contains(section), "missing {section}");
        }
        assert!(help.contains("1 critical | 2 high | 3 medium | 4 low"));
    }
}
