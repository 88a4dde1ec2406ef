use std::time::SystemTime;

use chrono::{DateTime, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Gauge, Paragraph, Tabs,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};
use vitae_core::util::dates::relative_time;
use vitae_core::util::numbers::format_with_commas;
use vitae_protocol::{Size, StyleProperty, ThemeToken};

use crate::app::App;
use crate::logger;
use crate::scene::percent;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::ToastSuccess => Color::Green,
        ThemeToken::ToastError => Color::Red,
        ThemeToken::ToastInfo => Color::Blue,
        ThemeToken::ParticleFill => Color::LightBlue,
        ThemeToken::ParticleLink => Color::DarkGray,
        ThemeToken::FloatingShape => Color::Magenta,
        ThemeToken::CardShadowRaised => Color::Gray,
        ThemeToken::CardShadowResting => Color::DarkGray,
        ThemeToken::RippleFill => Color::White,
        ThemeToken::FocusRing => Color::Yellow,
    }
}

/// Screen regions, shared by drawing and mouse hit-testing.
pub struct Areas {
    pub header: Rect,
    pub hero: Rect,
    pub tagline: Rect,
    pub stats: Rect,
    pub skills: Rect,
    pub status: Rect,
    pub toast: Rect,
    pub footer: Rect,
}

pub fn areas(area: Rect, skill_rows: u16) -> Areas {
    let [header, hero, tagline, stats, skills, status, toast, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(6),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(skill_rows),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    Areas {
        header,
        hero,
        tagline,
        stats,
        skills,
        status,
        toast,
        footer,
    }
}

pub fn skill_rows(app: &App) -> u16 {
    app.markup()
        .skills
        .as_ref()
        .map_or(0, |s| u16::try_from(s.items.len()).unwrap_or(u16::MAX))
}

pub fn draw(frame: &mut Frame, app: &App) {
    let layout = areas(frame.area(), skill_rows(app));
    draw_header(frame, app, layout.header);
    draw_hero(frame, app, layout.hero);
    draw_tagline(frame, app, layout.tagline);
    draw_stats(frame, app, layout.stats);
    draw_skills(frame, app, layout.skills);
    draw_status(frame, app, layout.status);
    draw_toast(frame, app, layout.toast);
    draw_footer(frame, app, layout.footer);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let scene = app.scene();
    let titles = app.nav_titles();
    let active = titles
        .iter()
        .position(|(node, _)| scene.has_class(*node, "active"));
    let navbar = app.markup().navigation.as_ref().and_then(|n| n.navbar);
    let bg = if navbar.is_some_and(|n| scene.has_class(n, "scrolled")) {
        Color::Blue
    } else {
        Color::DarkGray
    };

    let mut tabs = Tabs::new(titles.into_iter().map(|(_, t)| t))
        .style(Style::default().fg(Color::White).bg(bg))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    if let Some(i) = active {
        tabs = tabs.select(i);
    }
    frame.render_widget(tabs, area);
}

fn draw_hero(frame: &mut Frame, app: &App, area: Rect) {
    let scene = app.scene();
    let size = scene.canvas_size.unwrap_or(Size::new(1280.0, 800.0));
    let shapes = scene.floating_shapes();
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" vitae "))
        .marker(Marker::Braille)
        .x_bounds([0.0, size.width])
        .y_bounds([0.0, size.height])
        .paint(|ctx| {
            // Canvas y grows upwards; the page's grows downwards.
            for seg in &scene.lines {
                ctx.draw(&CanvasLine {
                    x1: seg.from.x,
                    y1: size.height - seg.from.y,
                    x2: seg.to.x,
                    y2: size.height - seg.to.y,
                    color: if seg.alpha > 0.05 {
                        Color::Gray
                    } else {
                        Color::DarkGray
                    },
                });
            }
            ctx.layer();
            for circle in &scene.circles {
                ctx.draw(&Points {
                    coords: &[(circle.center.x, size.height - circle.center.y)],
                    color: theme_to_color(circle.color),
                });
            }
            for (left, top) in &shapes {
                ctx.print(
                    left / 100.0 * size.width,
                    size.height - top / 100.0 * size.height,
                    Span::styled("○", Style::default().fg(theme_to_color(ThemeToken::FloatingShape))),
                );
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_tagline(frame: &mut Frame, app: &App, area: Rect) {
    let scene = app.scene();
    let text = app
        .markup()
        .typewriter
        .as_ref()
        .and_then(|tw| scene.text(tw.node))
        .unwrap_or_default();
    // Dim until the page-load intro has faded the hero title in.
    let faded_in = app
        .markup()
        .hero
        .as_ref()
        .and_then(|h| h.intro.first())
        .is_none_or(|title| scene.opacity(*title) > 0.5);
    let style = if faded_in {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    let line = Line::from(vec![
        Span::raw(" I'm a "),
        Span::styled(
            text.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(line).style(style), area);
}

fn draw_stats(frame: &mut Frame, app: &App, area: Rect) {
    let Some(stats) = &app.markup().stats else {
        return;
    };
    let mut spans = vec![Span::raw(" ")];
    for item in &stats.items {
        let value = app
            .scene()
            .text(item.node)
            .and_then(|t| t.parse::<i64>().ok())
            .unwrap_or(0);
        spans.push(Span::styled(
            format!("{}+", format_with_commas(value)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("   "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_skills(frame: &mut Frame, app: &App, area: Rect) {
    let Some(skills) = &app.markup().skills else {
        return;
    };
    let rows = Layout::vertical(vec![Constraint::Length(1); skills.items.len()]).split(area);
    for (i, (item, row)) in skills.items.iter().zip(rows.iter()).enumerate() {
        let level = item
            .progress
            .and_then(|p| app.scene().style(p, StyleProperty::Width))
            .and_then(percent)
            .filter(|l| l.is_finite())
            .unwrap_or(0.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio((level / 100.0).clamp(0.0, 1.0))
            .label(format!("skill {} · {level:.0}%", i + 1));
        frame.render_widget(gauge, *row);
    }
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let scene = app.scene();
    let menu_open = app
        .markup()
        .navigation
        .as_ref()
        .and_then(|n| n.menu)
        .is_some_and(|m| scene.has_class(m, "active"));
    let submit_disabled = app
        .markup()
        .contact
        .as_ref()
        .and_then(|c| c.submit)
        .is_some_and(|s| scene.is_disabled(s));
    let text = format!(
        " y={:.0}  section={}  form={:?}{}  menu={}  modal={}",
        app.scroll_y(),
        app.page().active_section().unwrap_or("-"),
        app.contact_state(),
        if submit_disabled { " (button disabled)" } else { "" },
        if menu_open { "open" } else { "closed" },
        if scene.scroll_locked { "open" } else { "closed" },
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        area,
    );
}

fn draw_toast(frame: &mut Frame, app: &App, area: Rect) {
    if let Some((message, color)) = app.scene().toasts().last() {
        let bg = color.map_or(Color::Blue, theme_to_color);
        frame.render_widget(
            Paragraph::new(format!(" {message} ")).style(Style::default().fg(Color::White).bg(bg)),
            area,
        );
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let now = DateTime::<Utc>::from(SystemTime::now());
    let text = format!(
        " started {} | ↑↓ scroll  tab link  m menu  s send  x invalid  c certificate  esc close  q quit | {}",
        relative_time(&app.started_at(), &now),
        logger::latest().unwrap_or_default(),
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_reserves_a_row_per_skill() {
        let layout = areas(Rect::new(0, 0, 80, 30), 3);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.skills.height, 3);
        assert_eq!(layout.footer.y, 29);
        assert_eq!(layout.hero.y, 1);
        assert_eq!(layout.hero.height, 30 - 9);
    }
}
