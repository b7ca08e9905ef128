use foundation::math::Vec2;
use layers::TooltipStyle;
use scene::svg::escape_text;

use crate::options::Point;

/// Host-owned rich content, referenced by an opaque id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HostNode(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipContent {
    /// Plain text; newlines separate lines.
    Text(String),
    Node(HostNode),
}

/// Built-in formatter: name, then region, location and type lines for the
/// fields that are set.
pub fn default_tooltip(point: &Point) -> TooltipContent {
    let mut lines = vec![point.name.clone()];
    for (label, value) in [
        ("Region", &point.region),
        ("Location", &point.location),
        ("Type", &point.kind),
    ] {
        if !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }
    TooltipContent::Text(lines.join("\n"))
}

/// The single floating tooltip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    content: Option<TooltipContent>,
    /// Point index the tooltip belongs to.
    point: Option<usize>,
    /// Screen position of the tooltip's anchor corner.
    position: Vec2,
}

impl Tooltip {
    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn point(&self) -> Option<usize> {
        self.point
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn show(&mut self, point: usize, content: TooltipContent, pointer: Vec2, offset: Vec2) {
        self.content = Some(content);
        self.point = Some(point);
        self.position = pointer + offset;
    }

    pub fn move_to(&mut self, pointer: Vec2, offset: Vec2) {
        if self.is_visible() {
            self.position = pointer + offset;
        }
    }

    /// Returns `true` if the tooltip was visible.
    pub fn hide(&mut self) -> bool {
        self.point = None;
        self.content.take().is_some()
    }

    /// Absolutely positioned HTML overlay, `None` while hidden.
    pub fn to_html(&self, style: &TooltipStyle) -> Option<String> {
        let body = match self.content.as_ref()? {
            TooltipContent::Text(text) => text
                .lines()
                .map(escape_text)
                .collect::<Vec<_>>()
                .join("<br/>"),
            TooltipContent::Node(node) => format!(r#"<div data-host-node="{}"></div>"#, node.0),
        };
        Some(format!(
            r#"<div class="map-tooltip" style="position: absolute; left: {}px; top: {}px; background-color: {}; color: {}; padding: 8px; border-radius: 8px; font-size: 14px; pointer-events: none;">{body}</div>"#,
            self.position.x,
            self.position.y,
            escape_text(&style.background),
            escape_text(&style.text),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{HostNode, Tooltip, TooltipContent, default_tooltip};
    use crate::options::Point;
    use foundation::math::Vec2;
    use layers::TooltipStyle;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_formatter_skips_empty_fields() {
        let mut p = Point::new("Gangnam Office", 127.03, 37.5);
        p.region = "Seoul".to_string();
        p.kind = "office".to_string();
        assert_eq!(
            default_tooltip(&p),
            TooltipContent::Text("Gangnam Office\nRegion: Seoul\nType: office".to_string())
        );
    }

    #[test]
    fn show_move_hide() {
        let mut t = Tooltip::default();
        let offset = Vec2::new(15.0, -15.0);
        t.show(2, TooltipContent::Text("a".to_string()), Vec2::new(100.0, 100.0), offset);
        assert_eq!(t.position(), Vec2::new(115.0, 85.0));
        assert_eq!(t.point(), Some(2));
        t.move_to(Vec2::new(0.0, 0.0), offset);
        assert_eq!(t.position(), Vec2::new(15.0, -15.0));
        assert!(t.hide());
        assert!(!t.hide());
        t.move_to(Vec2::new(50.0, 50.0), offset);
        assert_eq!(t.position(), Vec2::new(15.0, -15.0));
    }

    #[test]
    fn html_branches_on_content() {
        let style = TooltipStyle::default();
        let mut t = Tooltip::default();
        assert_eq!(t.to_html(&style), None);

        t.show(0, TooltipContent::Text("A & B\nline".to_string()), Vec2::ZERO, Vec2::ZERO);
        let html = t.to_html(&style).unwrap();
        assert!(html.ends_with(">A &amp; B<br/>line</div>"));

        t.show(0, TooltipContent::Node(HostNode(42)), Vec2::ZERO, Vec2::ZERO);
        let html = t.to_html(&style).unwrap();
        assert!(html.contains(r#"<div data-host-node="42"></div>"#));
    }
}
