//! HTML rendering of the filmstrip report.
//!
//! The document is self-contained: inline styles, screenshots embedded as
//! data URIs. Overlay boxes are positioned absolutely inside each frame,
//! scaled from viewport coordinates to screenshot pixels.

use crate::correlator::{Overlay, ShiftFragment};
use crate::filmstrip::{FilmFrame, Filmstrip, Report};
use crate::parser::schema::{ImpactedNode, Rect};
use crate::utils::config::{scale, SCREENSHOT_MIME};
use log::info;

const STYLES: &str = r#"
  .container {
    display: flex;
    flex-direction: row;
    flex-wrap: nowrap;
  }
  .img-box {
    position: relative;
    display: inline-block;
    border: 1px solid black;
  }
  .shift-rect-new {
    border: 1px solid red;
  }
  .shift-rect-old {
    border: 1px solid yellow;
  }
  .region-rect {
    opacity: 0.2;
    background-color: red;
  }
  .summary {
    font-family: monospace;
  }
  .score-summary {
  }
  .timestamp {
  }
  footer {
    margin-top: 20px;
    font-size: 0.8em;
    color: #888;
  }
  img {
    border: 1px solid black;
  }
"#;

/// Render the full report document
///
/// **Public** - main entry point for rendering
pub fn render_report(report: &Report<'_>) -> String {
    let mut html = String::new();

    html.push_str("<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Layout shifts</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLES));

    if let Some(url) = report.site_url {
        let url = escape_html(url);
        html.push_str(&format!(
            "<h1>Trace for <a href=\"{}\">{}</a></h1>\n",
            url, url
        ));
    }
    html.push_str(&format!(
        "<p class=\"summary\">{}</p>\n",
        escape_html(&report.stats.summary())
    ));

    html.push_str("<h2>Layout shifts</h2>\n");
    render_filmstrip(&report.shift_strip, &mut html);
    html.push_str("<h2>Full Filmstrip</h2>\n");
    render_filmstrip(&report.full_strip, &mut html);

    html.push_str(&format!(
        "<footer>Generated at {}</footer>\n</body>\n</html>\n",
        escape_html(&report.generated_at)
    ));

    info!("Report rendered ({} bytes)", html.len());
    html
}

/// Render one filmstrip as a horizontal container
pub fn render_filmstrip(strip: &Filmstrip<'_>, out: &mut String) {
    out.push_str("<div class=\"container\">");
    for frame in &strip.frames {
        render_frame(frame, out);
    }
    out.push_str("</div>\n");
}

fn render_frame(frame: &FilmFrame<'_>, out: &mut String) {
    out.push_str(&format!(
        "<div class=\"img-box\"><img src=\"data:{};base64,{}\">",
        SCREENSHOT_MIME,
        escape_html(frame.image)
    ));
    // Old first so new overlays stack on top
    render_fragment(&frame.old, out);
    render_fragment(&frame.new, out);
    out.push_str(&format!(
        "<div class=\"timestamp\">Time: {}</div></div>\n",
        frame.elapsed_ms
    ));
}

fn render_fragment(fragment: &ShiftFragment, out: &mut String) {
    for overlay in &fragment.overlays {
        match overlay {
            Overlay::Region(rect) => render_region(rect, out),
            Overlay::Node { pass, node } => render_node(node, pass.rect_of(node), pass.label(), out),
        }
    }

    if let Some(scores) = &fragment.scores {
        let lines: Vec<String> = scores.iter().map(|s| format!("Score: {:.6}", s)).collect();
        out.push_str(&format!(
            "<div class=\"score-summary\">{}</div>",
            lines.join("<br>")
        ));
    }
}

fn render_node(node: &ImpactedNode, rect: Rect, class_suffix: &str, out: &mut String) {
    let title = format!(
        "Shifted from {} to {} (x, y, width, height)",
        raw_tuple(&node.old_rect),
        raw_tuple(&node.new_rect)
    );
    out.push_str(&format!(
        "<div style=\"{}\" class=\"shift-rect-{}\" title=\"{}\"></div>",
        position_style(&rect),
        class_suffix,
        title
    ));
}

fn render_region(rect: &Rect, out: &mut String) {
    out.push_str(&format!(
        "<div style=\"{}\" class=\"region-rect\" title=\"Region for shift: {} (x, y, width, height)\"></div>",
        position_style(rect),
        raw_tuple(rect)
    ));
}

/// Absolute placement in screenshot pixels
fn position_style(rect: &Rect) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
        scale(rect.x),
        scale(rect.y),
        scale(rect.width),
        scale(rect.height)
    )
}

/// Unscaled tuple, for tooltips
fn raw_tuple(rect: &Rect) -> String {
    format!("{}, {}, {}, {}", rect.x, rect.y, rect.width, rect.height)
}

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
