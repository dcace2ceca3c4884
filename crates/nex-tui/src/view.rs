//! Frame rendering.
//!
//! Pure projection of [`AppState`] onto the terminal; no state changes
//! happen here. Bar figures are drawn as scaled text rows because the
//! stock bar widget cannot represent negative values.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Tabs, Wrap,
};
use ratatui::Frame;

use crate::models::{AppState, CountryMode, Focus, PanelId, Screen, TabId};
use nex_core::ComponentClass;
use crate::panel::{Bar, FigureBody, MetadataPanel, PanelItem, PanelState, Series};
use crate::theme::{get_colors, Colors};

pub fn draw(f: &mut Frame, state: &AppState) {
    let colors = get_colors(state.filter.dark_mode);
    let area = f.size();
    f.render_widget(
        Block::default().style(Style::default().bg(colors.background).fg(colors.text)),
        area,
    );

    if state.screen == Screen::Welcome {
        draw_welcome(f, state, &colors, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    draw_title(f, state, &colors, rows[0]);
    draw_header_cards(f, state, &colors, rows[1]);
    draw_tabs(f, state, &colors, rows[2]);
    draw_body(f, state, &colors, rows[3]);
    draw_footer(f, state, &colors, rows[4]);

    if let Some(explorer) = state.explorer.as_ref().filter(|e| e.visible) {
        draw_explorer(f, state, &colors, explorer, area);
    }
}

///// Landing screen: one summary line per loaded network, the active one
/// highlighted, with the keys to proceed.
fn draw_welcome(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            state.title.clone(),
            Style::default().fg(colors.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Interactive exploration of energy-system network scenarios",
            Style::default().fg(colors.muted),
        )),
        Line::from(""),
    ];

    for label in state.registry.labels() {
        let Some(n) = state.registry.get(label) else {
            continue;
        };
        let summary = format!(
            "{label} — {} buses, {} lines, {} links",
            n.component_count(ComponentClass::Buses),
            n.component_count(ComponentClass::Lines),
            n.component_count(ComponentClass::Links),
        );
        let style = if label == state.filter.active_network {
            Style::default().fg(colors.success).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text)
        };
        let marker = if label == state.filter.active_network {
            "> "
        } else {
            "  "
        };
        lines.push(Line::from(Span::styled(format!("{marker}{summary}"), style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter explore | n next network | q quit",
        Style::default().fg(colors.muted),
    )));

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.primary)),
        );
    f.render_widget(card, centered_rect(area, 70, 60));
}

fn draw_title(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let mut spans = vec![
        Span::styled(
            state.title.clone(),
            Style::default().fg(colors.primary).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("network: {}", state.filter.active_network),
            Style::default().fg(colors.muted),
        ),
    ];
    if state.registry.len() > 1 {
        spans.push(Span::styled(
            format!("  [{} loaded, 'n' cycles]", state.registry.len()),
            Style::default().fg(colors.muted),
        ));
    }
    let title = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.muted)));
    f.render_widget(title, area);
}

fn draw_header_cards(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let n = state.header.counts.len().max(1);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(area);

    for (i, (class, count)) in state.header.counts.iter().enumerate() {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                count.to_string(),
                Style::default().fg(colors.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(class.label(), Style::default().fg(colors.muted))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.muted)));
        f.render_widget(card, cards[i]);
    }
}

fn draw_tabs(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let titles: Vec<Line> = TabId::ALL
        .iter()
        .map(|t| Line::from(format!("{} {}", t.hotkey(), t.label())))
        .collect();
    let selected = TabId::ALL
        .iter()
        .position(|t| *t == state.filter.active_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(colors.muted))
        .highlight_style(Style::default().fg(colors.primary).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.muted)));
    f.render_widget(tabs, area);
}

fn draw_body(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(area);
    draw_sidebar(f, state, colors, cols[0]);

    match state.filter.active_tab {
        TabId::NetworkConfig => {
            let halves = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(cols[1]);
            draw_panel(f, state, colors, PanelId::NetworkMap, halves[0]);
            draw_metadata(f, state, colors, halves[1]);
        }
        tab => {
            if let Some(&id) = tab.panels().first() {
                draw_panel(f, state, colors, id, cols[1]);
            }
        }
    }
}

fn draw_sidebar(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Carriers",
        section_style(colors, state.focus == Focus::Carriers),
    )));
    if state.filter.active_tab.carrier_dependent() {
        for (i, opt) in state.carrier_options.iter().enumerate() {
            let selected = state.filter.selected_carriers.contains(&opt.id);
            lines.push(checklist_line(
                colors,
                &opt.label,
                selected,
                state.focus == Focus::Carriers && i == state.carrier_cursor,
            ));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "not applicable on this tab",
            Style::default().fg(colors.muted).add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::from(""));
    let mode = match state.filter.country_mode {
        CountryMode::All => "All Countries",
        CountryMode::Specific => "Select Countries",
    };
    lines.push(Line::from(Span::styled(
        format!("Countries: {mode} ('m')"),
        section_style(colors, state.focus == Focus::Countries),
    )));
    if state.filter.country_mode == CountryMode::Specific {
        for (i, opt) in state.country_options.iter().enumerate() {
            let selected = state.filter.selected_countries.contains(&opt.id);
            lines.push(checklist_line(
                colors,
                &opt.label,
                selected,
                state.focus == Focus::Countries && i == state.country_cursor,
            ));
        }
    }

    let sidebar = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Filters")
            .border_style(Style::default().fg(colors.muted)),
    );
    f.render_widget(sidebar, area);
}

fn section_style(colors: &Colors, focused: bool) -> Style {
    if focused {
        Style::default().fg(colors.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.text).add_modifier(Modifier::BOLD)
    }
}

fn checklist_line(colors: &Colors, label: &str, selected: bool, under_cursor: bool) -> Line<'static> {
    let marker = if selected { "[x] " } else { "[ ] " };
    let mut style = Style::default().fg(if selected { colors.success } else { colors.text });
    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(Span::styled(format!("{marker}{label}"), style))
}

fn draw_panel(f: &mut Frame, state: &AppState, colors: &Colors, id: PanelId, area: Rect) {
    match state.panel(id) {
        PanelState::NotRendered => {
            draw_notice(f, colors, area, "Loading", "Preparing panel...");
        }
        PanelState::Placeholder(p) => {
            draw_notice(f, colors, area, p.heading(), p.body());
        }
        PanelState::Rendered(items) => {
            if items.is_empty() {
                return;
            }
            let slots = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Ratio(1, items.len() as u32); items.len()])
                .split(area);
            for (item, slot) in items.iter().zip(slots.iter()) {
                draw_item(f, colors, item, *slot);
            }
        }
    }
}

fn draw_notice(f: &mut Frame, colors: &Colors, area: Rect, heading: &str, body: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            heading.to_string(),
            Style::default().fg(colors.warning).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(body.to_string(), Style::default().fg(colors.muted))),
    ];
    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.muted)));
    f.render_widget(notice, area);
}

fn draw_item(f: &mut Frame, colors: &Colors, item: &PanelItem, area: Rect) {
    match item {
        PanelItem::Error { context, message } => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Error rendering {context}"),
                    Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(message.clone(), Style::default().fg(colors.muted))),
            ];
            let err = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.error)));
            f.render_widget(err, area);
        }
        PanelItem::Figure(figure) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(figure.title.clone())
                .border_style(Style::default().fg(colors.muted));
            match &figure.body {
                FigureBody::Area { snapshots, series } => {
                    draw_line_chart(f, block, snapshots, series, GraphType::Line, area);
                }
                FigureBody::Scatter(series) => {
                    draw_line_chart(f, block, &[], series, GraphType::Scatter, area);
                }
                FigureBody::Bars(bars) => {
                    draw_bars(f, colors, block, bars, area);
                }
            }
        }
    }
}

fn draw_line_chart(
    f: &mut Frame,
    block: Block,
    snapshots: &[String],
    series: &[Series],
    graph_type: GraphType,
    area: Rect,
) {
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(s.color))
                .data(&s.points)
        })
        .collect();

    let (x_min, x_max, y_min, y_max) = bounds(series);
    let x_labels: Vec<Span> = if snapshots.is_empty() {
        vec![
            Span::raw(format!("{x_min:.0}")),
            Span::raw(format!("{x_max:.0}")),
        ]
    } else {
        vec![
            Span::raw(snapshots.first().cloned().unwrap_or_default()),
            Span::raw(snapshots.last().cloned().unwrap_or_default()),
        ]
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([x_min, x_max]).labels(x_labels))
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(vec![
            Span::raw(format!("{y_min:.1}")),
            Span::raw(format!("{y_max:.1}")),
        ]));
    f.render_widget(chart, area);
}

fn bounds(series: &[Series]) -> (f64, f64, f64, f64) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;
    for s in series {
        for (x, y) in &s.points {
            x_min = x_min.min(*x);
            x_max = x_max.max(*x);
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
    }
    if x_min > x_max {
        return (0.0, 1.0, 0.0, 1.0);
    }
    if x_min == x_max {
        x_max = x_min + 1.0;
    }
    if y_min == y_max {
        y_max = y_min + 1.0;
        y_min -= 1.0;
    }
    (x_min, x_max, y_min, y_max)
}

fn draw_bars(f: &mut Frame, colors: &Colors, block: Block, bars: &[Bar], area: Rect) {
    let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0).min(24);
    let max_abs = bars.iter().map(|b| b.value.abs()).fold(0.0_f64, f64::max);
    let bar_space = (area.width as usize)
        .saturating_sub(label_width + 16)
        .max(8);

    let lines: Vec<Line> = bars
        .iter()
        .map(|bar| {
            let width = if max_abs > 0.0 {
                ((bar.value.abs() / max_abs) * bar_space as f64).round() as usize
            } else {
                0
            };
            let sign = if bar.value < 0.0 { "-" } else { " " };
            Line::from(vec![
                Span::styled(
                    format!("{:>label_width$} ", truncate(&bar.label, label_width)),
                    Style::default().fg(colors.text),
                ),
                Span::raw(sign),
                Span::styled("█".repeat(width.max(1)), Style::default().fg(bar.color)),
                Span::styled(
                    format!(" {:.1}", bar.value),
                    Style::default().fg(colors.muted),
                ),
            ])
        })
        .collect();

    let chart = Paragraph::new(lines).block(block);
    f.render_widget(chart, area);
}

fn truncate(text: &str, width: usize) -> String {
    if text.len() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn draw_metadata(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Network Metadata")
        .border_style(Style::default().fg(colors.muted));
    let text = match &state.metadata {
        MetadataPanel::NotRendered => "Preparing panel...".to_string(),
        MetadataPanel::Text(text) => text.clone(),
        MetadataPanel::Unavailable(msg) => msg.clone(),
    };
    let style = match &state.metadata {
        MetadataPanel::Unavailable(_) => Style::default().fg(colors.error),
        _ => Style::default().fg(colors.text),
    };
    let body = Paragraph::new(text).style(style).wrap(Wrap { trim: false }).block(block);
    f.render_widget(body, area);
}

fn draw_explorer(
    f: &mut Frame,
    state: &AppState,
    colors: &Colors,
    explorer: &crate::explorer::ExplorerState,
    area: Rect,
) {
    let modal = centered_rect(area, 90, 85);
    f.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(explorer.title.clone())
        .style(Style::default().bg(colors.surface).fg(colors.text))
        .border_style(Style::default().fg(colors.primary));
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    let has_series = explorer.series_table.is_some();
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if has_series {
            vec![
                Constraint::Percentage(50),
                Constraint::Length(1),
                Constraint::Min(3),
            ]
        } else {
            vec![Constraint::Min(3)]
        })
        .split(inner);

    draw_data_table(f, colors, &explorer.static_table, 0, sections[0]);

    if let Some(series) = &explorer.series_table {
        let attr = explorer.selected_attr.as_deref().unwrap_or("-");
        let mut header = format!(
            "Time Series: {attr} ({}/{})  [←/→ attribute, ↑/↓ scroll]",
            explorer
                .series_attrs
                .iter()
                .position(|a| a == attr)
                .map(|i| i + 1)
                .unwrap_or(0),
            explorer.series_attrs.len()
        );
        if let Some(info) = explorer.series_sampling {
            header.push_str(&format!(
                "  sampled {} of {} rows",
                info.shown, info.total
            ));
        }
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                header,
                Style::default().fg(colors.warning),
            ))),
            sections[1],
        );
        draw_data_table(f, colors, series, explorer.scroll, sections[2]);
    }
}

fn draw_data_table(
    f: &mut Frame,
    colors: &Colors,
    table: &nex_core::Table,
    scroll: usize,
    area: Rect,
) {
    let visible = (area.height as usize).saturating_sub(2);
    let start = scroll.min(table.rows.len().saturating_sub(1));
    let header = Row::new(table.columns.clone())
        .style(Style::default().fg(colors.primary).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = table
        .rows
        .iter()
        .skip(start)
        .take(visible)
        .map(|r| Row::new(r.clone()))
        .collect();
    let n_cols = table.columns.len().max(1);
    let widths = vec![Constraint::Ratio(1, n_cols as u32); n_cols];
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .style(Style::default().fg(colors.text));
    f.render_widget(widget, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn draw_footer(f: &mut Frame, state: &AppState, colors: &Colors, area: Rect) {
    let mode = if state.filter.dark_mode { "dark" } else { "light" };
    let hints = format!(
        "q quit | 1-6 tabs | n network | d theme ({mode}) | m countries | Tab focus | Space toggle | b/g/l/k/s/t data"
    );
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(colors.muted),
        ))),
        area,
    );
}
