use crate::graph::{LineageGraph, Node, NodeKind};
use crate::layout::{Point, PositionMap};
use crate::measure::TextMetrics;
use crate::viewport::ViewportState;
use std::fmt::Write;

const BACKGROUND: &str = "#fafafa";
const EDGE_COLOR: &str = "#d9d9d9";
const HIGHLIGHT_COLOR: &str = "#1677ff";
const LABEL_COLOR: &str = "#333";
const DIM_ALPHA: f64 = 0.3;
const ARROW_LEN: f64 = 10.0;
const ARROW_HALF_ANGLE: f64 = std::f64::consts::PI / 6.0;

pub struct SvgRenderer {
    metrics: TextMetrics,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::default(),
        }
    }
}

impl SvgRenderer {
    /// Repaint the whole scene. Never panics on malformed input: edges or
    /// nodes without a known position are skipped. Z-order is edges, then
    /// nodes, then labels, then the legend.
    pub fn render(
        &self,
        graph: &LineageGraph,
        positions: &PositionMap,
        viewport: &ViewportState,
        width: f64,
        height: f64,
    ) -> String {
        if graph.nodes.is_empty() {
            return self.placeholder("No lineage data", width, height);
        }
        log::debug!(
            "render pass: nodes={} edges={} hovered={:?}",
            graph.nodes.len(),
            graph.edges.len(),
            viewport.hovered
        );

        let mut svg = self.open(width, height);
        let hovered = viewport.hovered.as_deref();

        for edge in &graph.edges {
            let (Some(from), Some(to)) = (
                positions.get(edge.source.as_str()),
                positions.get(edge.target.as_str()),
            ) else {
                continue;
            };
            let touches_hover = hovered == Some(edge.source.as_str())
                || hovered == Some(edge.target.as_str());
            let alpha = edge_alpha(hovered, touches_hover);
            self.render_edge(&mut svg, *from, *to, viewport.offset, touches_hover, alpha);
        }

        for node in &graph.nodes {
            let Some(pos) = positions.get(node.id.as_str()) else {
                continue;
            };
            let is_hovered = hovered == Some(node.id.as_str());
            let alpha = node_alpha(graph, hovered, node, is_hovered);
            self.render_node(&mut svg, node, *pos, viewport.offset, is_hovered, alpha);
        }

        self.render_legend(&mut svg, width, height);
        svg.push_str("</svg>\n");
        svg
    }

    /// Centered single-line placeholder, used for the empty-graph and
    /// loading display states.
    pub fn placeholder(&self, text: &str, width: f64, height: f64) -> String {
        let mut svg = self.open(width, height);
        writeln!(
            &mut svg,
            r##"<text class="placeholder" x="{}" y="{}" text-anchor="middle">{}</text>"##,
            width / 2.0,
            height / 2.0,
            escape_xml(text)
        )
        .unwrap();
        svg.push_str("</svg>\n");
        svg
    }

    fn open(&self, width: f64, height: f64) -> String {
        let mut svg = String::new();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        )
        .unwrap();
        writeln!(
            &mut svg,
            r#"<style>
  .node-label {{ font-family: sans-serif; font-size: {}px; fill: {}; }}
  .node-label.hovered {{ font-size: {}px; font-weight: bold; }}
  .legend-label {{ font-family: sans-serif; font-size: {}px; fill: {}; }}
  .placeholder {{ font-family: sans-serif; font-size: 14px; fill: #999; }}
</style>"#,
            self.metrics.label_font_size,
            LABEL_COLOR,
            self.metrics.label_font_size_hovered,
            self.metrics.legend_font_size,
            LABEL_COLOR,
        )
        .unwrap();
        writeln!(
            &mut svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}" />"#,
            width, height, BACKGROUND
        )
        .unwrap();
        svg
    }

    fn render_edge(
        &self,
        svg: &mut String,
        from: Point,
        to: Point,
        offset: Point,
        highlighted: bool,
        alpha: f64,
    ) {
        let (x1, y1) = (from.x + offset.x, from.y + offset.y);
        let (x2, y2) = (to.x + offset.x, to.y + offset.y);
        let (stroke, stroke_width) = if highlighted {
            (HIGHLIGHT_COLOR, 2.0)
        } else {
            (EDGE_COLOR, 1.0)
        };

        writeln!(
            svg,
            r#"<line class="edge" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" opacity="{}" />"#,
            x1, y1, x2, y2, stroke, stroke_width, alpha
        )
        .unwrap();

        // Two-stroke arrowhead at the target end, oriented along the line.
        let angle = (y2 - y1).atan2(x2 - x1);
        for side in [-1.0, 1.0] {
            let theta = angle + std::f64::consts::PI + side * ARROW_HALF_ANGLE;
            writeln!(
                svg,
                r#"<line class="arrow" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" opacity="{}" />"#,
                x2,
                y2,
                x2 + ARROW_LEN * theta.cos(),
                y2 + ARROW_LEN * theta.sin(),
                stroke,
                stroke_width,
                alpha
            )
            .unwrap();
        }
    }

    fn render_node(
        &self,
        svg: &mut String,
        node: &Node,
        pos: Point,
        offset: Point,
        is_hovered: bool,
        alpha: f64,
    ) {
        let x = pos.x + offset.x;
        let y = pos.y + offset.y;
        let r = if is_hovered {
            self.metrics.node_radius_hovered
        } else {
            self.metrics.node_radius
        };
        let fill = node.kind.color();
        let outline = if is_hovered {
            format!(r#" stroke="{}" stroke-width="2""#, HIGHLIGHT_COLOR)
        } else {
            String::new()
        };

        match node.kind {
            NodeKind::Column => {
                writeln!(
                    svg,
                    r#"<circle class="node" cx="{}" cy="{}" r="{}" fill="{}" opacity="{}"{} />"#,
                    x, y, r, fill, alpha, outline
                )
                .unwrap();
            }
            NodeKind::EtlTask => {
                writeln!(
                    svg,
                    r#"<polygon class="node" points="{},{} {},{} {},{} {},{}" fill="{}" opacity="{}"{} />"#,
                    x,
                    y - r,
                    x + r,
                    y,
                    x,
                    y + r,
                    x - r,
                    y,
                    fill,
                    alpha,
                    outline
                )
                .unwrap();
            }
            NodeKind::Table | NodeKind::View | NodeKind::Dataset => {
                writeln!(
                    svg,
                    r#"<rect class="node" x="{}" y="{}" width="{}" height="{}" fill="{}" opacity="{}"{} />"#,
                    x - r,
                    y - r,
                    r * 2.0,
                    r * 2.0,
                    fill,
                    alpha,
                    outline
                )
                .unwrap();
            }
        }

        let class = if is_hovered {
            "node-label hovered"
        } else {
            "node-label"
        };
        writeln!(
            svg,
            r#"<text class="{}" x="{}" y="{}" text-anchor="middle" opacity="{}">{}</text>"#,
            class,
            x,
            y + r + self.metrics.label_offset_y,
            alpha,
            escape_xml(&node.name)
        )
        .unwrap();
    }

    /// Static legend box pinned to the bottom-right corner. Not affected by
    /// the viewport offset.
    fn render_legend(&self, svg: &mut String, width: f64, height: f64) {
        let labels: Vec<&str> = NodeKind::ALL.iter().map(|k| k.label()).collect();
        let (box_w, box_h) = self.metrics.legend_size(&labels);
        let x0 = width - box_w - 12.0;
        let y0 = height - box_h - 12.0;

        writeln!(
            svg,
            r##"<rect class="legend" x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="{}" rx="4" />"##,
            x0, y0, box_w, box_h, EDGE_COLOR
        )
        .unwrap();

        for (row, kind) in NodeKind::ALL.iter().enumerate() {
            let row_y = y0 + self.metrics.legend_padding + row as f64 * self.metrics.legend_row_height;
            writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" />"#,
                x0 + self.metrics.legend_padding,
                row_y,
                self.metrics.legend_swatch,
                self.metrics.legend_swatch,
                kind.color()
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="legend-label" x="{}" y="{}">{}</text>"#,
                x0 + self.metrics.legend_padding + self.metrics.legend_swatch + 6.0,
                row_y + self.metrics.legend_swatch - 1.0,
                kind.label()
            )
            .unwrap();
        }
    }
}

fn edge_alpha(hovered: Option<&str>, touches_hover: bool) -> f64 {
    match hovered {
        Some(_) if !touches_hover => DIM_ALPHA,
        _ => 1.0,
    }
}

/// Hover isolation: when a hover is active, everything outside the hovered
/// node's direct neighborhood is dimmed.
fn node_alpha(graph: &LineageGraph, hovered: Option<&str>, node: &Node, is_hovered: bool) -> f64 {
    match hovered {
        Some(h) if !is_hovered && !graph.is_adjacent(h, &node.id) => DIM_ALPHA,
        _ => 1.0,
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutEngine, LayoutMode};

    fn graph(json: &str) -> LineageGraph {
        LineageGraph::from_json(json).unwrap()
    }

    fn chain() -> LineageGraph {
        graph(
            r#"{
                "nodes": [
                    {"id": "a", "name": "users", "type": "table"},
                    {"id": "b", "name": "load_users", "type": "etl_task"},
                    {"id": "c", "name": "users_ds", "type": "dataset"}
                ],
                "edges": [
                    {"source": "a", "target": "b"},
                    {"source": "b", "target": "c"}
                ]
            }"#,
        )
    }

    fn render(graph: &LineageGraph, viewport: &ViewportState) -> String {
        let positions =
            LayoutEngine::default().compute(graph, LayoutMode::Hierarchical, 400.0, 400.0);
        SvgRenderer::default().render(graph, &positions, viewport, 400.0, 400.0)
    }

    #[test]
    fn test_render_basic() {
        let svg = render(&chain(), &ViewportState::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("users"));
        assert!(svg.contains("load_users"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_empty_graph_placeholder() {
        let g = graph(r#"{"nodes": [], "edges": []}"#);
        let svg = render(&g, &ViewportState::default());
        assert!(svg.contains("No lineage data"));
        assert!(!svg.contains(r#"class="node""#));
    }

    #[test]
    fn test_shapes_by_kind() {
        let svg = render(&chain(), &ViewportState::default());
        // table -> rect, etl_task -> diamond polygon, dataset -> rect
        assert!(svg.contains(r#"<rect class="node""#));
        assert!(svg.contains(r#"<polygon class="node""#));
        let g = graph(
            r#"{"nodes": [{"id": "c1", "name": "c1", "type": "column"}], "edges": []}"#,
        );
        assert!(render(&g, &ViewportState::default()).contains(r#"<circle class="node""#));
    }

    #[test]
    fn test_dangling_edge_skipped() {
        let g = graph(
            r#"{
                "nodes": [{"id": "x", "name": "x", "type": "table"}],
                "edges": [{"source": "x", "target": "ghost"}]
            }"#,
        );
        let svg = render(&g, &ViewportState::default());
        assert!(!svg.contains(r#"class="edge""#));
        assert!(svg.contains(r#"<rect class="node""#));
    }

    #[test]
    fn test_hover_isolation_alpha() {
        let mut vp = ViewportState::default();
        vp.set_hover(Some("a".into()));
        let svg = render(&chain(), &vp);
        // a and its neighbor b stay opaque, c is dimmed, as is edge b->c.
        let dimmed = svg.matches(r#"opacity="0.3""#).count();
        // c's shape + label, plus the b->c edge line and two arrow strokes.
        assert_eq!(dimmed, 5);
    }

    #[test]
    fn test_hovered_edge_highlighted() {
        let mut vp = ViewportState::default();
        vp.set_hover(Some("b".into()));
        let svg = render(&chain(), &vp);
        assert!(svg.contains(&format!(r#"stroke="{}" stroke-width="2""#, HIGHLIGHT_COLOR)));
        // Both edges touch b, nothing is dimmed but nothing else exists.
        assert!(svg.contains(r#"stroke-width="2""#));
    }

    #[test]
    fn test_no_hover_everything_opaque() {
        let svg = render(&chain(), &ViewportState::default());
        assert_eq!(svg.matches(r#"opacity="0.3""#).count(), 0);
    }

    #[test]
    fn test_offset_applied_additively() {
        let g = graph(
            r#"{"nodes": [{"id": "n", "name": "n", "type": "table"}], "edges": []}"#,
        );
        let mut positions = PositionMap::new();
        positions.insert("n".into(), Point::new(100.0, 100.0));
        let mut vp = ViewportState::default();
        vp.offset = Point::new(30.0, -10.0);
        let svg = SvgRenderer::default().render(&g, &positions, &vp, 400.0, 400.0);
        // rect top-left = position + offset - radius
        assert!(svg.contains(r#"x="124" y="84""#));
    }

    #[test]
    fn test_legend_lists_every_kind() {
        let svg = render(&chain(), &ViewportState::default());
        assert!(svg.contains(r#"class="legend""#));
        assert!(svg.contains(r##"fill="#fff""##));
        for kind in NodeKind::ALL {
            assert!(svg.contains(kind.label()), "missing {}", kind.label());
            assert!(svg.contains(kind.color()), "missing {}", kind.color());
        }
    }

    #[test]
    fn test_label_escaped() {
        let g = graph(
            r#"{"nodes": [{"id": "q", "name": "a<b&c", "type": "view"}], "edges": []}"#,
        );
        let svg = render(&g, &ViewportState::default());
        assert!(svg.contains("a&lt;b&amp;c"));
        assert!(!svg.contains("a<b&c"));
    }
}
