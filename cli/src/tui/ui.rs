use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};
use tracking_synthesis_core::{SynthesisKind, Tone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::app::App;

struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    positive: Color,
    neutral: Color,
    negative: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    positive: Color::Green,
    neutral: Color::Gray,
    negative: Color::Red,
};

const BAR_WIDTH: u16 = 9;

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => THEME.positive,
        Tone::Neutral => THEME.neutral,
        Tone::Negative => THEME.negative,
    }
}

fn rounded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(title)
}

/// Truncates `label` to at most `width` terminal columns.
pub fn fit_label(label: &str, width: usize) -> String {
    if label.width() <= width {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("SYNTHÈSE  ", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::styled(app.student.name.as_str(), Style::default().fg(THEME.text)),
    ]))
    .alignment(Alignment::Center)
    .block(rounded_block(""));
    f.render_widget(header, chunks[0]);

    let titles: Vec<Line> = SynthesisKind::ALL
        .iter()
        .map(|kind| Line::from(kind.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.selected)
        .style(Style::default().fg(THEME.muted))
        .highlight_style(Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD))
        .block(rounded_block(""));
    f.render_widget(tabs, chunks[1]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    draw_stats(f, app, content[0]);
    draw_chart(f, app, content[1]);

    if let Some(status) = &app.status {
        let status = Paragraph::new(status.as_str()).style(Style::default().fg(Color::Yellow));
        f.render_widget(status, chunks[3]);
    }

    let help = Line::from(vec![
        Span::styled("NAV: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::styled("RELOAD: ", Style::default().fg(THEME.muted)),
        Span::styled("r ", Style::default().fg(THEME.text)),
        Span::styled("EXPORT: ", Style::default().fg(THEME.muted)),
        Span::styled("c/p ", Style::default().fg(THEME.text)),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    f.render_widget(Paragraph::new(help).alignment(Alignment::Center), chunks[4]);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let kind = app.selected_kind();
    let Some(report) = app.current_report() else {
        let lines = vec![Line::from(Span::styled(
            "Non calculée",
            Style::default().fg(THEME.muted),
        ))];
        let title = format!(" {} ", kind.title());
        f.render_widget(Paragraph::new(lines).block(rounded_block(&title)), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            report.period_label.clone(),
            Style::default().fg(THEME.muted),
        )),
        Line::from(""),
    ];

    if report.is_empty() {
        lines.push(Line::from("📊 Aucun item configuré"));
    } else {
        for line in &report.lines {
            lines.push(Line::from(vec![
                Span::styled(format!("{:>5} ", line.signed_value()), Style::default()
                    .fg(tone_color(line.tone()))
                    .add_modifier(Modifier::BOLD)),
                Span::raw(line.label()),
            ]));
        }
    }

    let title = format!(" {} ", kind.title());
    f.render_widget(Paragraph::new(lines).block(rounded_block(&title)), area);
}

fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    let Some(chart_kind) = app.selected_kind().chart_kind() else {
        f.render_widget(rounded_block(" Pas de graphique "), area);
        return;
    };
    let Some(instance) = app.charts.get(chart_kind) else {
        f.render_widget(rounded_block(" Pas de graphique "), area);
        return;
    };
    let spec = &instance.spec;

    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .label(fit_label(&bar.label, BAR_WIDTH as usize))
                .value(bar.value.unsigned_abs())
                .style(Style::default().fg(tone_color(bar.tone)))
                .text_value(tracking_synthesis_core::format_signed(bar.value))
        })
        .collect();

    let title = format!(" {} ", spec.title);
    let chart = BarChart::default()
        .block(rounded_block(&title))
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(spec.max_magnitude());
    f.render_widget(chart, area);
}
