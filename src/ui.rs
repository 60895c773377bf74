use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{Component, EventContext, EventKind, HandlerResponse, RenderContext};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use crossterm::event::KeyCode;
use pokedex_team::action::Action;
use pokedex_team::state::{AppState, FocusArea, Record, RelationKind};
use pokedex_team::team::MAX_TEAM_SIZE;

use crate::DexComponentId;

const BG_BASE: Color = Color::Rgb(12, 18, 28);
const BG_PANEL: Color = Color::Rgb(20, 32, 46);
const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ACCENT_RED: Color = Color::Rgb(222, 96, 88);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct DexUi {
    dex_list: SelectList,
    relation_list: SelectList,
    team_list: SelectList,
    snapshot_list: SelectList,
    status_bar: StatusBar,
}

impl DexUi {
    pub fn new() -> Self {
        Self {
            dex_list: SelectList::new(),
            relation_list: SelectList::new(),
            team_list: SelectList::new(),
            snapshot_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(3),
            ])
            .split(area);

        render_header(frame, layout[0], state, event_ctx);
        self.render_body(frame, layout[1], state, event_ctx);
        self.render_footer(frame, layout[2], state);
        if state.prompt.active {
            render_prompt(frame, area, state, event_ctx);
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Prompt);
        }
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        match event {
            EventKind::Key(_) => {
                let items = dex_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: list_style(None),
                    behavior: list_behavior(),
                    on_select: Action::DexSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = self
                    .dex_list
                    .handle_event(event, props)
                    .into_iter()
                    .collect();
                handler_response(actions)
            }
            EventKind::Scroll { delta, .. } => {
                handler_response(vec![Action::SelectionMove((*delta * 3) as i16)])
            }
            _ => HandlerResponse::ignored(),
        }
    }

    pub fn handle_relation_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Enter {
                return handler_response(vec![Action::RelationOpen]);
            }
        }
        let items = relation_items(state);
        if items.is_empty() {
            return HandlerResponse::ignored();
        }
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.relation_index.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(Some(BG_PANEL)),
            behavior: list_behavior(),
            on_select: Action::RelationSelect,
            render_item: &|item| item.clone(),
        };
        let actions: Vec<_> = self
            .relation_list
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_team_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        if let EventKind::Key(key) = event {
            let actions = match key.code {
                KeyCode::Char('x') | KeyCode::Delete => state
                    .team
                    .current
                    .get(state.team_index)
                    .map(|member| vec![Action::TeamRemove(member.id)])
                    .unwrap_or_default(),
                KeyCode::Char('C') => vec![Action::TeamClear],
                KeyCode::Char('l') => vec![Action::SnapshotLoad],
                KeyCode::Char('D') => vec![Action::SnapshotDelete],
                KeyCode::Char('<') => {
                    vec![Action::SnapshotSelect(state.snapshot_index.saturating_sub(1))]
                }
                KeyCode::Char('>') => vec![Action::SnapshotSelect(state.snapshot_index + 1)],
                _ => vec![],
            };
            if !actions.is_empty() {
                return handler_response(actions);
            }
        }

        let items = team_items(state);
        if items.is_empty() {
            return HandlerResponse::ignored();
        }
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.team_index.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: list_style(Some(BG_PANEL)),
            behavior: list_behavior(),
            on_select: Action::TeamSelect,
            render_item: &|item| item.clone(),
        };
        let actions: Vec<_> = self
            .team_list
            .handle_event(event, props)
            .into_iter()
            .collect();
        handler_response(actions)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc => vec![Action::SearchCancel],
                KeyCode::Enter => vec![Action::SearchSubmit],
                KeyCode::Backspace => vec![Action::SearchBackspace],
                KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
                _ => vec![],
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_prompt_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc => vec![Action::SavePromptCancel],
                KeyCode::Enter => vec![Action::SavePromptSubmit],
                KeyCode::Backspace => vec![Action::SavePromptBackspace],
                KeyCode::Char(ch) => vec![Action::SavePromptInput(ch)],
                _ => vec![],
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    fn render_body(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
            .split(area);
        self.render_list(frame, columns[0], state, event_ctx);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(8)])
            .split(columns[1]);
        render_detail(frame, rows[0], state);

        let lower = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);
        self.render_relations(frame, lower[0], state, event_ctx);
        self.render_team(frame, lower[1], state, event_ctx);
    }

    fn render_list(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::DexList, area);
        let block = panel_block(
            format!("DEX {}", state.projection.len()),
            state,
            FocusArea::DexList,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items = dex_items(state);
        if items.is_empty() {
            let message = if state.id_search.is_some() {
                "Looking up id..."
            } else if state.pagination.is_loading() {
                "Loading page..."
            } else {
                "No results."
            };
            frame.render_widget(
                Paragraph::new(message).style(Style::default().fg(TEXT_DIM)),
                inner,
            );
            return;
        }
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected_index.min(items.len().saturating_sub(1)),
            is_focused: state.focus == FocusArea::DexList,
            style: list_style(None),
            behavior: list_behavior(),
            on_select: Action::DexSelect,
            render_item: &|item| item.clone(),
        };
        self.dex_list.render(frame, inner, props);
    }

    fn render_relations(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::Evolution, area);
        let block = panel_block("EVOLUTION".to_string(), state, FocusArea::Evolution);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items = relation_items(state);
        if items.is_empty() {
            let message = if state.record_loading.is_some() {
                "Loading..."
            } else {
                "No known evolutions."
            };
            frame.render_widget(
                Paragraph::new(message)
                    .style(Style::default().fg(TEXT_DIM))
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.relation_index.min(items.len().saturating_sub(1)),
            is_focused: state.focus == FocusArea::Evolution,
            style: list_style(Some(BG_PANEL)),
            behavior: list_behavior(),
            on_select: Action::RelationSelect,
            render_item: &|item| item.clone(),
        };
        self.relation_list.render(frame, inner, props);
    }

    fn render_team(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        event_ctx.set_component_area(DexComponentId::Team, area);
        let block = panel_block(
            format!("TEAM {}/{}", state.team.len(), MAX_TEAM_SIZE),
            state,
            FocusArea::Team,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(MAX_TEAM_SIZE as u16),
                Constraint::Length(3),
                Constraint::Min(2),
            ])
            .split(inner);

        let members = team_items(state);
        if members.is_empty() {
            frame.render_widget(
                Paragraph::new("Empty. Press a on a pokemon to add it.")
                    .style(Style::default().fg(TEXT_DIM))
                    .wrap(Wrap { trim: true }),
                rows[0],
            );
        } else {
            let props = SelectListProps {
                items: &members,
                count: members.len(),
                selected: state.team_index.min(members.len().saturating_sub(1)),
                is_focused: state.focus == FocusArea::Team,
                style: list_style(Some(BG_PANEL)),
                behavior: list_behavior(),
                on_select: Action::TeamSelect,
                render_item: &|item| item.clone(),
            };
            self.team_list.render(frame, rows[0], props);
        }

        frame.render_widget(
            Paragraph::new(team_summary(state)).wrap(Wrap { trim: true }),
            rows[1],
        );

        let snapshots = snapshot_items(state);
        let snapshot_block = Block::default()
            .borders(Borders::TOP)
            .title("SAVED")
            .border_style(Style::default().fg(TEXT_DIM));
        let snapshot_area = snapshot_block.inner(rows[2]);
        frame.render_widget(snapshot_block, rows[2]);
        if snapshots.is_empty() {
            frame.render_widget(
                Paragraph::new("No saved teams.").style(Style::default().fg(TEXT_DIM)),
                snapshot_area,
            );
            return;
        }
        let props = SelectListProps {
            items: &snapshots,
            count: snapshots.len(),
            selected: state.snapshot_index.min(snapshots.len().saturating_sub(1)),
            is_focused: false,
            style: list_style(Some(BG_PANEL)),
            behavior: list_behavior(),
            on_select: Action::SnapshotSelect,
            render_item: &|item| item.clone(),
        };
        self.snapshot_list.render(frame, snapshot_area, props);
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let status = state.message.clone().unwrap_or_else(|| {
            let label = if state.pagination.is_loading() {
                "Loading page"
            } else if state.preload_loading {
                "Loading catalog"
            } else if state.id_search.is_some() {
                "Searching"
            } else if state.record_loading.is_some() {
                "Loading pokemon"
            } else {
                return String::new();
            };
            let frame_index = (state.tick % SPINNER.len() as u64) as usize;
            format!("{label} {}", SPINNER[frame_index])
        });
        let (left_hints, center_hints) = status_hints(state);
        let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
        let status_items = [StatusBarItem::span(status_span)];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: Some(BorderStyle {
                    borders: Borders::ALL,
                    style: Style::default().fg(TEXT_DIM),
                    focused_style: Some(Style::default().fg(ACCENT_TEAL)),
                }),
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&left_hints).with_separator("  "),
            center: StatusBarSection::hints(&center_hints).with_separator("  "),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

/// Keys that work from any pane while no text input is open.
pub fn global_key_action(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Char('/') => Action::SearchStart,
        KeyCode::Char('[') => Action::TypeFilterPrev,
        KeyCode::Char(']') => Action::TypeFilterNext,
        KeyCode::Char('c') => Action::TypeFilterClear,
        KeyCode::Char('o') => Action::SortNext,
        KeyCode::Char('n') | KeyCode::Right => Action::PageNext,
        KeyCode::Char('p') | KeyCode::Left => Action::PagePrev,
        KeyCode::Char('g') => Action::PageGoto(1),
        KeyCode::Char('a') => Action::TeamAdd,
        KeyCode::Char('s') => Action::SavePromptStart,
        _ => return None,
    };
    Some(action)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
) {
    if state.search.active {
        event_ctx.set_component_area(DexComponentId::Search, area);
    } else {
        event_ctx.component_areas.remove(&DexComponentId::Search);
    }
    let title_style = Style::default()
        .fg(ACCENT_TEAL)
        .add_modifier(Modifier::BOLD);
    let filter = state
        .query
        .type_filter
        .as_deref()
        .map(|name| name.to_ascii_uppercase())
        .unwrap_or_else(|| "ALL".to_string());
    let search = if state.search.active {
        format!("/{}_", state.query.text)
    } else {
        format!("/{}", state.query.text)
    };
    let pages = &state.pagination;
    let more = if pages.has_more { "+" } else { "" };
    let team_names = state
        .team
        .current
        .iter()
        .map(|member| format_name(&member.name))
        .collect::<Vec<_>>()
        .join(", ");

    let header_text = Text::from(vec![
        Line::from(vec![
            Span::styled(
                format!("PAGE {:02}{more}", pages.current_page),
                title_style,
            ),
            Span::raw("  |  Type: "),
            Span::styled(filter, Style::default().fg(ACCENT_GOLD)),
            Span::raw("  |  Sort: "),
            Span::styled(state.query.sort.label(), Style::default().fg(ACCENT_GOLD)),
            Span::raw("  |  Search: "),
            Span::styled(search, Style::default().fg(ACCENT_TEAL)),
        ]),
        Line::from(vec![
            Span::raw("Cached: "),
            Span::styled(
                state.pokedex.len().to_string(),
                Style::default().fg(ACCENT_TEAL),
            ),
            Span::raw("  |  Team: "),
            Span::styled(team_names, Style::default().fg(ACCENT_TEAL)),
        ]),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
        .title("POKEDEX");
    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(paragraph, area);
}

fn render_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("DATA")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(detail_text(state.detail_record())).wrap(Wrap { trim: true }),
        columns[0],
    );

    let stats_block = Block::default()
        .borders(Borders::LEFT)
        .title("STATS")
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(
        Paragraph::new(stats_text(state.detail_record())).block(stats_block),
        columns[1],
    );
}

fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
) {
    let width = area.width.min(44);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + area.height / 3,
        width,
        height: 3,
    };
    event_ctx.set_component_area(DexComponentId::Prompt, popup);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("SAVE TEAM AS")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_GOLD));
    frame.render_widget(
        Paragraph::new(format!("{}_", state.prompt.input)).block(block),
        popup,
    );
}

fn detail_text(record: Option<&Record>) -> Text<'static> {
    let Some(record) = record else {
        return Text::from("Nothing selected.");
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("#{:03} {}", record.id, format_name(&record.name)),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                record.types.join("/").to_ascii_uppercase(),
                Style::default().fg(ACCENT_GOLD),
            ),
        ]),
        Line::from(format!(
            "Height {:.1} m  Weight {:.1} kg",
            record.height, record.weight
        )),
        Line::from(format!(
            "Abilities: {}",
            record
                .abilities
                .iter()
                .map(|name| format_name(name))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    ];
    for entry in &record.moves {
        let power = entry
            .power
            .map(|power| power.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<16}", format_name(&entry.name))),
            Span::styled(
                format!("{:<9}", entry.move_type),
                Style::default().fg(TEXT_DIM),
            ),
            Span::raw(power),
        ]));
    }
    Text::from(lines)
}

fn stats_text(record: Option<&Record>) -> Text<'static> {
    let Some(record) = record else {
        return Text::from("No stats loaded.");
    };
    let stats = record.stats;
    Text::from(vec![
        Line::from(render_stat("HP", stats.hp)),
        Line::from(render_stat("ATK", stats.attack)),
        Line::from(render_stat("DEF", stats.defense)),
        Line::from(render_stat("SPD", stats.speed)),
    ])
}

fn team_summary(state: &AppState) -> Text<'static> {
    let types = state.team.types();
    let weaknesses = state
        .team
        .weaknesses()
        .into_iter()
        .take(6)
        .map(|weakness| format!("{} x{}", weakness.type_name, weakness.count))
        .collect::<Vec<_>>();
    Text::from(vec![
        Line::from(vec![
            Span::raw("Types: "),
            Span::styled(
                if types.is_empty() {
                    "-".to_string()
                } else {
                    types.join(", ")
                },
                Style::default().fg(ACCENT_GOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("Weak: "),
            Span::styled(
                if weaknesses.is_empty() {
                    "-".to_string()
                } else {
                    weaknesses.join(", ")
                },
                Style::default().fg(ACCENT_RED),
            ),
        ]),
    ])
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active || state.prompt.active {
        let left = vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
        return (left, Vec::new());
    }

    let mut left = Vec::new();
    match state.focus {
        FocusArea::DexList => {
            left.extend([
                StatusBarHint::new("j/k", "Move"),
                StatusBarHint::new("a", "Add"),
                StatusBarHint::new("n/p", "Page"),
            ]);
        }
        FocusArea::Evolution => {
            left.extend([
                StatusBarHint::new("j/k", "Select"),
                StatusBarHint::new("Enter", "Open"),
            ]);
        }
        FocusArea::Team => {
            left.extend([
                StatusBarHint::new("x", "Remove"),
                StatusBarHint::new("C", "Clear"),
                StatusBarHint::new("< >", "Saved"),
                StatusBarHint::new("l", "Load"),
                StatusBarHint::new("D", "Delete"),
            ]);
        }
    }

    let center = vec![
        StatusBarHint::new("Tab", "Focus"),
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("[ ]", "Type"),
        StatusBarHint::new("c", "All types"),
        StatusBarHint::new("o", "Sort"),
        StatusBarHint::new("s", "Save"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .projection_records()
        .map(|record| {
            let marker = if state.team.contains(record.id) {
                "*"
            } else {
                " "
            };
            Line::from(format!(
                "{marker} #{:03} {}",
                record.id,
                format_name(&record.name)
            ))
        })
        .collect()
}

fn relation_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .relations()
        .into_iter()
        .map(|relation| {
            let arrow = match relation.kind {
                RelationKind::EvolvesFrom => "<-",
                RelationKind::EvolvesTo => "->",
            };
            let name = relation
                .name
                .as_deref()
                .map(format_name)
                .unwrap_or_else(|| "?".to_string());
            Line::from(format!("{arrow} #{:03} {name}", relation.id))
        })
        .collect()
}

fn team_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .team
        .current
        .iter()
        .map(|member| {
            Line::from(vec![
                Span::raw(format!("#{:03} {:<12}", member.id, format_name(&member.name))),
                Span::styled(member.types.join("/"), Style::default().fg(TEXT_DIM)),
            ])
        })
        .collect()
}

fn snapshot_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .team
        .saved
        .iter()
        .map(|(name, members)| Line::from(format!("{name} ({})", members.len())))
        .collect()
}

fn list_style(bg: Option<Color>) -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn list_behavior() -> SelectListBehavior {
    SelectListBehavior {
        show_scrollbar: true,
        wrap_navigation: false,
    }
}

fn panel_block(title: String, state: &AppState, area: FocusArea) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, area))
}

fn focus_border(state: &AppState, area: FocusArea) -> Style {
    if state.focus == area {
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_stat(label: &str, value: u16) -> String {
    let bar_len = (value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}")
}
