use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dslv_viz_core::{Boundary, FrameRecord, Scene, Session};
use dslv_viz_protocol::{Bounds, RenderCommand, ThemeToken};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block,
        canvas::{Canvas, Context, Line, Rectangle},
    },
};

/// Upper bound on scanlines used to shade one filled rectangle.
const MAX_FILL_LINES: usize = 256;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::ItemBoundary => Color::Blue,
        ThemeToken::ItemLabel => Color::White,
        ThemeToken::EdgeIndicator => Color::Green,
        ThemeToken::SourceHighlight => Color::DarkGray,
        ThemeToken::GapHighlight => Color::Gray,
        ThemeToken::FloatIndicator => Color::Red,
        ThemeToken::TouchIndicator => Color::Yellow,
        ThemeToken::ViewBoundary => Color::Gray,
    }
}

/// Logical navigation key for a terminal key, if it is bound.
fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::Right | KeyCode::Char('l') => Some("next"),
        KeyCode::Left | KeyCode::Char('h') => Some("previous"),
        KeyCode::PageDown | KeyCode::Down => Some("page-forward"),
        KeyCode::PageUp | KeyCode::Up => Some("page-backward"),
        _ => None,
    }
}

/// Run the interactive viewer until the user quits, then hand the session
/// back for shutdown.
pub fn run_tui(mut session: Session<Scene>) -> Result<Session<Scene>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| session)
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session<Scene>,
) -> Result<()> {
    let mut status: Option<Boundary> = None;

    loop {
        terminal.draw(|frame| draw(frame, session, status))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                code => {
                    if let Some(step) = key_name(code)
                        .map(|name| session.handle_key(name))
                        .transpose()?
                        .flatten()
                    {
                        status = step.clamped;
                    }
                }
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, session: &Session<Scene>, status: Option<Boundary>) {
    let area = frame.area();

    let header_area = Rect::new(0, 0, area.width, 1);
    let header = Block::default()
        .title(header_text(session, status))
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(header, header_area);

    let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
    let scene = session.surface();
    let bounds = scene.bounds().unwrap_or(Bounds {
        x_min: 0.0,
        x_max: 100.0,
        y_min: -100.0,
        y_max: 0.0,
    });
    let commands = scene.commands();
    let fill_step = bounds.height() / f64::from(content_area.height.max(1) * 4);

    let canvas = Canvas::default()
        .background_color(Color::Black)
        .marker(Marker::Braille)
        .x_bounds([bounds.x_min, bounds.x_max])
        .y_bounds([bounds.y_min, bounds.y_max])
        .paint(|ctx| paint(ctx, &commands, fill_step));
    frame.render_widget(canvas, content_area);
}

fn header_text(session: &Session<Scene>, status: Option<Boundary>) -> String {
    let frame = session.current_frame();
    let mut text = format!(
        " dslv-viz — frame {}/{} | source {} | targets {} | ←→ step | PgUp/PgDn page | q quit ",
        session.current_index(),
        session.navigation().len().saturating_sub(1),
        frame
            .source()
            .map_or_else(|| "-".to_string(), |id| id.to_string()),
        targets(frame),
    );
    if let Some(boundary) = status {
        text.push_str(&format!("| {boundary} "));
    }
    text
}

fn targets(frame: &FrameRecord) -> String {
    let ids: Vec<String> = [frame.first_target(), frame.second_target()]
        .into_iter()
        .flatten()
        .map(|t| format!("{}(+{})", t.id, t.gap_height))
        .collect();
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.join(",")
    }
}

fn paint(ctx: &mut Context, commands: &[RenderCommand], fill_step: f64) {
    // Highlight fills go underneath everything else.
    for cmd in commands {
        if let RenderCommand::DrawRect {
            rect,
            fill: Some(fill),
            ..
        } = cmd
        {
            let color = theme_to_color(*fill);
            let lines = ((rect.h / fill_step.max(f64::EPSILON)) as usize).min(MAX_FILL_LINES);
            for i in 0..=lines {
                let y = rect.y + rect.h * i as f64 / lines.max(1) as f64;
                ctx.draw(&Line {
                    x1: rect.x,
                    y1: y,
                    x2: rect.x + rect.w,
                    y2: y,
                    color,
                });
            }
        }
    }
    ctx.layer();

    for cmd in commands {
        match cmd {
            RenderCommand::DrawLine {
                from, to, color, ..
            } => ctx.draw(&Line {
                x1: from.x,
                y1: from.y,
                x2: to.x,
                y2: to.y,
                color: theme_to_color(*color),
            }),
            RenderCommand::DrawRect {
                rect,
                stroke: Some(stroke),
                ..
            } => ctx.draw(&Rectangle {
                x: rect.x,
                y: rect.y,
                width: rect.w,
                height: rect.h,
                color: theme_to_color(*stroke),
            }),
            RenderCommand::DrawText {
                position,
                text,
                color,
                ..
            } => ctx.print(
                position.x,
                position.y,
                Span::styled(text.clone(), Style::default().fg(theme_to_color(*color))),
            ),
            _ => {}
        }
    }
}
