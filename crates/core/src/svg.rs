//! SVG renderer: converts `RenderCommand` snapshots into standalone SVG strings.

use dslv_viz_protocol::{Bounds, Point, RenderCommand, TextAlign, ThemeToken};

const FALLBACK_BOUNDS: Bounds = Bounds {
    x_min: 0.0,
    x_max: 100.0,
    y_min: -100.0,
    y_max: 0.0,
};

/// Render a list of commands as an SVG document string.
///
/// The plot range comes from the first `SetBounds` command. Plot space has
/// `y` pointing up, so every coordinate is flipped into SVG space.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], dark: bool) -> String {
    let bounds = commands
        .iter()
        .find_map(|cmd| match cmd {
            RenderCommand::SetBounds { bounds } => Some(*bounds),
            _ => None,
        })
        .unwrap_or(FALLBACK_BOUNDS);
    let width = bounds.width();
    let height = bounds.height();
    let to_svg = |p: Point| (p.x - bounds.x_min, bounds.y_max - p.y);

    let mut svg = String::with_capacity(commands.len() * 120);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:11px">"#,
    ));
    let bg = resolve_color(ThemeToken::Background, dark);
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
                dashed,
            } => {
                let stroke = resolve_color(*color, dark);
                let (x1, y1) = to_svg(*from);
                let (x2, y2) = to_svg(*to);
                svg.push_str(&format!(
                    r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{line_width}"{}/>"#,
                    dash(*dashed),
                ));
            }
            RenderCommand::DrawRect {
                rect,
                fill,
                stroke,
                dashed,
            } => {
                let (x, y) = to_svg(Point::new(rect.x, rect.top()));
                let fill = match fill {
                    Some(token) => format!(r#"fill="{}" fill-opacity="0.6""#, resolve_color(*token, dark)),
                    None => r#"fill="none""#.to_string(),
                };
                let stroke = stroke
                    .map(|token| format!(r#" stroke="{}""#, resolve_color(token, dark)))
                    .unwrap_or_default();
                svg.push_str(&format!(
                    r#"<rect x="{x}" y="{y}" width="{}" height="{}" {fill}{stroke}{}/>"#,
                    rect.w,
                    rect.h,
                    dash(*dashed),
                ));
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let (x, y) = to_svg(*position);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{x}" y="{y}" fill="{fill}" text-anchor="{anchor}" dominant-baseline="central">{}</text>"#,
                    escape_xml(text),
                ));
            }
            RenderCommand::SetBounds { .. } => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn dash(dashed: bool) -> &'static str {
    if dashed {
        r#" stroke-dasharray="4 3""#
    } else {
        ""
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#1a1a2e",
            ThemeToken::ItemBoundary => "#448aff",
            ThemeToken::ItemLabel => "#ececec",
            ThemeToken::EdgeIndicator => "#4caf50",
            ThemeToken::SourceHighlight => "#616161",
            ThemeToken::GapHighlight => "#9e9e9e",
            ThemeToken::FloatIndicator => "#f44336",
            ThemeToken::TouchIndicator => "#ffa726",
            ThemeToken::ViewBoundary => "#9e9e9e",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::ItemBoundary => "#1f3fbf",
            ThemeToken::ItemLabel => "#1a1a2e",
            ThemeToken::EdgeIndicator => "#27ae60",
            ThemeToken::SourceHighlight => "#d0d0e0",
            ThemeToken::GapHighlight => "#b3b3b3",
            ThemeToken::FloatIndicator => "#e63946",
            ThemeToken::TouchIndicator => "#e67e22",
            ThemeToken::ViewBoundary => "#b3b3b3",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
