pub mod graph;
pub mod interact;
pub mod layout;
pub mod measure;
pub mod render;
pub mod viewport;

use wasm_bindgen::prelude::*;

use graph::LineageGraph;
use layout::{LayoutEngine, LayoutMode, PositionMap};
use render::SvgRenderer;
use viewport::ViewportState;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// The lineage view component exposed to the hosting page. Owns the cached
/// graph, the viewport state, and the canvas size; the host feeds it lineage
/// payloads and pointer events and paints whatever `render` returns. Data
/// fetching, refresh plumbing, and loading spinners over a cached graph
/// stay host-side.
///
/// Zoom scale is not baked into the SVG or the hit test: both work in
/// unscaled canvas coordinates with the pan offset applied additively. The
/// host applies the scale as a CSS transform on the painted output, using
/// `scalePercent` for the zoom label, and hands pointer coordinates back in
/// the same unscaled space.
#[wasm_bindgen]
pub struct LineageView {
    graph: Option<LineageGraph>,
    positions: PositionMap,
    viewport: ViewportState,
    engine: LayoutEngine,
    renderer: SvgRenderer,
    width: f64,
    height: f64,
    loading: bool,
    on_node_click: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl LineageView {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            graph: None,
            positions: PositionMap::new(),
            viewport: ViewportState::default(),
            engine: LayoutEngine::default(),
            renderer: SvgRenderer::default(),
            width,
            height,
            loading: false,
            on_node_click: None,
        }
    }

    /// Replace the graph with a `{nodes, edges}` JSON payload.
    #[wasm_bindgen(js_name = "setGraph")]
    pub fn set_graph(&mut self, payload: &str) -> Result<(), String> {
        let graph = LineageGraph::from_json(payload).map_err(|e| e.to_string())?;
        self.graph = Some(graph);
        self.viewport.set_hover(None);
        self.relayout();
        Ok(())
    }

    #[wasm_bindgen(js_name = "clearGraph")]
    pub fn clear_graph(&mut self) {
        self.graph = None;
        self.positions.clear();
        self.viewport.set_hover(None);
    }

    #[wasm_bindgen(js_name = "setLoading")]
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    #[wasm_bindgen(js_name = "setSize")]
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.relayout();
    }

    /// Switch layout strategy; unknown names are ignored.
    #[wasm_bindgen(js_name = "setMode")]
    pub fn set_mode(&mut self, mode: &str) {
        if let Some(mode) = LayoutMode::from_str(mode) {
            self.viewport.set_mode(mode);
            self.relayout();
        }
    }

    pub fn mode(&self) -> String {
        self.viewport.mode.as_str().to_string()
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    #[wasm_bindgen(js_name = "canZoomIn")]
    pub fn can_zoom_in(&self) -> bool {
        self.viewport.can_zoom_in()
    }

    #[wasm_bindgen(js_name = "canZoomOut")]
    pub fn can_zoom_out(&self) -> bool {
        self.viewport.can_zoom_out()
    }

    #[wasm_bindgen(js_name = "resetView")]
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    #[wasm_bindgen(js_name = "scalePercent")]
    pub fn scale_percent(&self) -> u32 {
        self.viewport.scale_percent()
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        interact::pointer_down(&mut self.viewport, &self.positions, x, y)
    }

    /// Returns true when hover or pan changed and a repaint is needed.
    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        interact::pointer_move(&mut self.viewport, &self.positions, x, y)
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) {
        interact::pointer_up(&mut self.viewport);
    }

    #[wasm_bindgen(js_name = "pointerLeave")]
    pub fn pointer_leave(&mut self) {
        interact::pointer_leave(&mut self.viewport);
    }

    pub fn wheel(&mut self, delta: f64) {
        interact::wheel(&mut self.viewport, delta);
    }

    #[wasm_bindgen(js_name = "hoveredNode")]
    pub fn hovered_node(&self) -> Option<String> {
        self.viewport.hovered.clone()
    }

    #[wasm_bindgen(js_name = "onNodeClick")]
    pub fn set_on_node_click(&mut self, callback: js_sys::Function) {
        self.on_node_click = Some(callback);
    }

    /// Resolve a click to a node id, invoking the registered callback with
    /// the node's JSON. Clicks never mutate the viewport.
    pub fn click(&self, x: f64, y: f64) -> Option<String> {
        let id = interact::click_target(&self.positions, &self.viewport, x, y)?;
        let node = self.graph.as_ref()?.node(id)?;
        if let Some(callback) = &self.on_node_click {
            if let Ok(json) = serde_json::to_string(node) {
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&json));
            }
        }
        Some(id.to_string())
    }

    /// Produce the current frame. Loading without a cached graph shows the
    /// loading placeholder; with a cached graph the stale frame keeps
    /// rendering and the host overlays its own indicator.
    pub fn render(&mut self) -> String {
        match &self.graph {
            None if self.loading => self
                .renderer
                .placeholder("Loading lineage…", self.width, self.height),
            None => self
                .renderer
                .placeholder("No lineage data", self.width, self.height),
            Some(graph) => {
                self.positions =
                    self.engine
                        .compute(graph, self.viewport.mode, self.width, self.height);
                self.renderer
                    .render(graph, &self.positions, &self.viewport, self.width, self.height)
            }
        }
    }

    fn relayout(&mut self) {
        self.positions = match &self.graph {
            Some(graph) => {
                self.engine
                    .compute(graph, self.viewport.mode, self.width, self.height)
            }
            None => PositionMap::new(),
        };
    }
}
