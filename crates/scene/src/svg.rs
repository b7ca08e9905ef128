use std::fmt::Write;

use crate::components::Shape2D;
use crate::node::Node;
use crate::surface::{Layer, Surface};

/// Formats a coordinate for SVG output: at most three decimals, no trailing
/// zeros, no negative zero.
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Surface {
    /// Serializes the surface as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let vp = self.viewport();
        let (w, h) = (fmt_num(vp.width), fmt_num(vp.height));
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="max-width: 100%; height: auto;">"#
        );
        out.push('\n');
        for layer in self.layers() {
            write_layer(&mut out, self, layer);
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_layer(out: &mut String, surface: &Surface, layer: &Layer) {
    let _ = write!(out, r#"<g class="{}""#, layer.kind.class_name());
    if !layer.transform.is_identity() {
        let _ = write!(out, r#" transform="{}""#, layer.transform);
    }
    if let Some(w) = layer.stroke_width {
        let _ = write!(out, r#" stroke-width="{}""#, fmt_num(w));
    }
    out.push_str(">\n");
    for (_, node) in surface.layer_nodes(layer.kind) {
        write_node(out, node);
    }
    out.push_str("</g>\n");
}

fn write_node(out: &mut String, node: &Node) {
    match &node.shape {
        Shape2D::Path(path) => {
            let _ = write!(out, r#"<path d="{}""#, path.d);
        }
        Shape2D::Circle { center, radius } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius)
            );
        }
        Shape2D::Text { anchor, .. } => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle""#,
                fmt_num(anchor.x),
                fmt_num(anchor.y)
            );
        }
    }

    let paint = &node.paint;
    let fill = match (&paint.fill, &node.shape) {
        (Some(fill), _) => escape_text(fill),
        (None, Shape2D::Text { .. }) => "currentColor".to_string(),
        (None, _) => "none".to_string(),
    };
    let _ = write!(out, r#" fill="{fill}""#);
    if let Some(stroke) = &paint.stroke {
        let _ = write!(out, r#" stroke="{}" stroke-linejoin="round""#, escape_text(stroke));
    }
    if let Some(w) = paint.stroke_width {
        let _ = write!(out, r#" stroke-width="{}""#, fmt_num(w));
    }
    if let Some(size) = paint.font_size {
        let _ = write!(out, r#" font-size="{}""#, fmt_num(size));
    }
    if paint.interactive {
        out.push_str(r#" cursor="pointer""#);
    } else {
        out.push_str(r#" pointer-events="none""#);
    }

    match &node.shape {
        Shape2D::Text { text, .. } => {
            let _ = writeln!(out, ">{}</text>", escape_text(text));
        }
        _ => out.push_str("/>\n"),
    }
}
