//! Interactive choropleth renderer.
//!
//! The renderer owns the boundary loader, the projected shapes, the shape
//! layer derived from the application's inputs, and the interaction store.
//! The layer is rebuilt from scratch whenever the dataset, theme color, GDP
//! threshold or selection changes; interaction state is kept across rebuilds.
//! Selection changes are never applied here: clicks are returned as
//! [`MapEvent`]s for the owner of the selection.

use super::config::{MapConfig, TiltConfig};
use super::fill::{FillContext, ShapeFill};
use super::interaction::{
    outline_style, tooltip_text, DrawOrder, HoverTransition, InteractionState, OutlineStyle,
    Tooltip,
};
use super::transform::{card_outline, double_click_zoom_factor, wheel_zoom_factor, Presentation};
use crate::data::Dataset;
use crate::geo::{paint_shape, BoundaryChannel, BoundaryResult, GeoError, ShapePaint, ShapeSet};
use crate::state::{SelectionSet, ViewSettings};
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Stroke, Vec2};
use std::sync::Arc;

/// Requests emitted by the map for its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    ToggleSelection(String),
}

/// Progress of the boundary document load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Inputs that decide the shape layer. Any difference triggers a rebuild.
#[derive(Debug, Clone)]
struct LayerKey {
    dataset: Arc<Dataset>,
    theme_color: Color32,
    min_gdp: u64,
    selection: Vec<String>,
}

impl LayerKey {
    fn new(dataset: &Arc<Dataset>, settings: &ViewSettings, selection: &SelectionSet) -> Self {
        Self {
            dataset: Arc::clone(dataset),
            theme_color: settings.theme_color,
            min_gdp: settings.min_gdp.to_bits(),
            selection: selection.to_vec(),
        }
    }
}

impl PartialEq for LayerKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.dataset, &other.dataset)
            && self.theme_color == other.theme_color
            && self.min_gdp == other.min_gdp
            && self.selection == other.selection
    }
}

/// Fills and draw order of every shape for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
struct ShapeLayer {
    fills: Vec<ShapeFill>,
    selected: Vec<bool>,
    order: DrawOrder,
    theme_color: Color32,
}

impl ShapeLayer {
    /// Document order, then selected shapes raised oldest first so the most
    /// recent selection ends up frontmost.
    fn build(
        shapes: &ShapeSet,
        dataset: &Dataset,
        settings: &ViewSettings,
        selection: &SelectionSet,
        config: &MapConfig,
    ) -> Self {
        let fill_ctx = FillContext::new(
            dataset,
            settings,
            selection,
            config.color_exponent,
            config.fallback_max_gdp,
        );
        let fills = shapes.iter().map(|s| fill_ctx.fill_for(&s.name)).collect();
        let selected = shapes.iter().map(|s| selection.contains(&s.name)).collect();

        let mut order = DrawOrder::document(shapes.len());
        for name in selection.iter() {
            if let Some(index) = shapes.iter().position(|s| s.name == name) {
                order.raise(index);
            }
        }

        Self {
            fills,
            selected,
            order,
            theme_color: settings.theme_color,
        }
    }

    fn raise_selected(&mut self, shapes: &ShapeSet, selection: &[String]) {
        for name in selection {
            if let Some(index) = shapes.iter().position(|s| &s.name == name) {
                self.order.raise(index);
            }
        }
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }
}

/// One shape to paint, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub index: usize,
    pub fill: Color32,
    pub outline: OutlineStyle,
}

/// Interactive choropleth of the dataset.
pub struct MapRenderer {
    config: MapConfig,
    loader: BoundaryChannel,
    load_state: LoadState,
    shapes: Option<ShapeSet>,
    layer: Option<ShapeLayer>,
    layer_key: Option<LayerKey>,
    interaction: InteractionState,
    rebuilds: usize,
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl MapRenderer {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            loader: BoundaryChannel::new(),
            load_state: LoadState::Idle,
            shapes: None,
            layer: None,
            layer_key: None,
            interaction: InteractionState::default(),
            rebuilds: 0,
        }
    }

    /// Starts the boundary load on first use.
    pub fn mount(&mut self, ctx: &egui::Context) {
        if self.load_state != LoadState::Idle {
            return;
        }
        log::info!("Loading state boundaries from {}", self.config.boundary_url);
        self.loader.fetch(
            ctx.clone(),
            self.config.boundary_url.clone(),
            self.config.object.clone(),
        );
        self.load_state = LoadState::Loading;
    }

    /// Picks up a finished boundary load, if any.
    pub fn poll(&mut self) {
        if let Some(result) = self.loader.try_recv() {
            self.apply_boundaries(result);
        }
    }

    fn apply_boundaries(&mut self, result: BoundaryResult) {
        match result {
            Ok(geo_shapes) => {
                let shapes = ShapeSet::project(&geo_shapes, &self.config.projection());
                log::info!(
                    "Loaded {} boundaries, {} drawn",
                    geo_shapes.len(),
                    shapes.len()
                );
                self.shapes = Some(shapes);
                self.layer = None;
                self.layer_key = None;
                self.interaction.clear_hover();
                self.load_state = LoadState::Ready;
            }
            Err(GeoError::Cancelled) => {
                log::debug!("Boundary load cancelled");
            }
            Err(e) => {
                log::error!("Failed to load state boundaries: {}", e);
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    #[cfg(test)]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Short status line for the load, empty once the map is ready.
    pub fn status_text(&self) -> String {
        match &self.load_state {
            LoadState::Idle | LoadState::Loading => "Loading map...".to_string(),
            LoadState::Ready => String::new(),
            LoadState::Failed(e) => format!("Map unavailable: {}", e),
        }
    }

    #[cfg(test)]
    pub fn zoom(&self) -> super::transform::ZoomTransform {
        self.interaction.zoom
    }

    #[cfg(test)]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.interaction.tooltip.as_ref()
    }

    /// Number of layer rebuilds so far.
    #[cfg(test)]
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Rebuilds the shape layer if any input changed since the last build.
    pub fn sync(&mut self, dataset: &Arc<Dataset>, settings: &ViewSettings, selection: &SelectionSet) {
        let Some(shapes) = &self.shapes else {
            return;
        };
        let key = LayerKey::new(dataset, settings, selection);
        if self.layer_key.as_ref() == Some(&key) {
            return;
        }

        let mut layer = ShapeLayer::build(shapes, dataset, settings, selection, &self.config);
        if let Some(hovered) = self.interaction.hover {
            layer.order.raise(hovered);
            if let (Some(tooltip), Some(shape)) = (&mut self.interaction.tooltip, shapes.get(hovered)) {
                tooltip.content = tooltip_text(&shape.name, dataset.find(&shape.name));
            }
        }

        self.rebuilds += 1;
        log::debug!(
            "Rebuilt map layer #{} ({} shapes, {} selected)",
            self.rebuilds,
            shapes.len(),
            selection.len()
        );
        self.layer = Some(layer);
        self.layer_key = Some(key);
    }

    /// Topmost shape under a drawing-space point.
    pub fn hit_test(&self, point: Pos2) -> Option<usize> {
        let shapes = self.shapes.as_ref()?;
        let layer = self.layer.as_ref()?;
        shapes.hit_test(point, layer.order.as_slice())
    }

    /// Applies a pointer update. `hit` is the shape under the pointer and
    /// `pos` the pointer position in screen space.
    pub fn pointer(&mut self, hit: Option<usize>, pos: Pos2, dataset: &Dataset) {
        let (Some(shapes), Some(layer)) = (&self.shapes, &mut self.layer) else {
            self.interaction.clear_hover();
            return;
        };

        for transition in self.interaction.track(hit) {
            match transition {
                HoverTransition::Enter(index) => {
                    layer.order.raise(index);
                    self.interaction.tooltip = shapes.get(index).map(|shape| Tooltip {
                        pos,
                        content: tooltip_text(&shape.name, dataset.find(&shape.name)),
                    });
                }
                HoverTransition::Move(_) => {
                    if let Some(tooltip) = &mut self.interaction.tooltip {
                        tooltip.pos = pos;
                    }
                }
                HoverTransition::Leave(_) => {
                    self.interaction.tooltip = None;
                    if let Some(key) = &self.layer_key {
                        layer.raise_selected(shapes, &key.selection);
                    }
                }
            }
        }
    }

    /// Toggle request for a click on `hit`.
    pub fn click(&self, hit: Option<usize>) -> Option<MapEvent> {
        let shape = self.shapes.as_ref()?.get(hit?)?;
        Some(MapEvent::ToggleSelection(shape.name.clone()))
    }

    /// Paint list for the current layer and hover, back to front.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let Some(layer) = &self.layer else {
            return Vec::new();
        };
        layer
            .order
            .as_slice()
            .iter()
            .filter_map(|&index| {
                let fill = layer.fills.get(index)?;
                let hovered = self.interaction.hover == Some(index);
                Some(DrawCommand {
                    index,
                    fill: fill.color,
                    outline: outline_style(hovered, layer.is_selected(index), layer.theme_color),
                })
            })
            .collect()
    }

    /// Presentation tilt in 3D mode.
    pub fn tilt(&self, is_3d: bool) -> Option<TiltConfig> {
        is_3d.then_some(self.config.tilt)
    }

    fn presentation(&self, rect: Rect, is_3d: bool) -> Presentation {
        Presentation::new(
            self.interaction.zoom,
            self.config.drawing_size,
            rect,
            self.tilt(is_3d),
        )
    }

    /// Renders the map into the remaining space of `ui` and returns the
    /// selection requests made this frame.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        dataset: &Arc<Dataset>,
        settings: &ViewSettings,
        selection: &SelectionSet,
    ) -> Vec<MapEvent> {
        self.mount(ui.ctx());
        self.poll();
        self.sync(dataset, settings, selection);

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        self.handle_zoom_pan(&response, rect, settings.is_3d);
        let presentation = self.presentation(rect, settings.is_3d);

        let pointer = response.hover_pos();
        let hit = pointer
            .and_then(|p| presentation.screen_to_drawing(p))
            .and_then(|p| self.hit_test(p));
        self.pointer(hit, pointer.unwrap_or_default(), dataset);

        let mut events = Vec::new();
        if response.clicked() {
            events.extend(self.click(hit));
        }

        // Clip to the tilted plane, which is wider than the rect at the bottom
        let painter = match self.tilt(settings.is_3d) {
            Some(tilt) => {
                let plane = Rect::from_points(&card_outline(rect, 0.0, Some(tilt)));
                painter.with_clip_rect(plane.intersect(ui.clip_rect()))
            }
            None => painter,
        };
        self.paint(&painter, &presentation);
        self.paint_status(ui, &painter, rect);

        events
    }

    fn handle_zoom_pan(&mut self, response: &egui::Response, rect: Rect, is_3d: bool) {
        let presentation = self.presentation(rect, is_3d);

        if response.dragged() {
            if let Some(current) = response.interact_pointer_pos() {
                let previous = current - response.drag_delta();
                if let (Some(a), Some(b)) = (
                    presentation.screen_to_zoomed(previous),
                    presentation.screen_to_zoomed(current),
                ) {
                    self.interaction.zoom.pan(b - a);
                }
            }
        }

        if response.hovered() {
            let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
            if scroll_delta.y != 0.0 {
                let zoom_factor = wheel_zoom_factor(scroll_delta.y);
                if let Some(anchor) = response
                    .hover_pos()
                    .and_then(|p| presentation.screen_to_zoomed(p))
                {
                    self.interaction
                        .zoom
                        .zoom_about(anchor, zoom_factor, self.config.zoom_extent);
                }
                // Keep an enclosing scroll area from scrolling as well
                response
                    .ctx
                    .input_mut(|i| i.smooth_scroll_delta = Vec2::ZERO);
            }
        }

        // Double-click steps the zoom about the pointer
        if response.double_clicked() {
            let shift = response.ctx.input(|i| i.modifiers.shift);
            if let Some(anchor) = response
                .interact_pointer_pos()
                .or(response.hover_pos())
                .and_then(|p| presentation.screen_to_zoomed(p))
            {
                self.interaction.zoom.zoom_about(
                    anchor,
                    double_click_zoom_factor(shift),
                    self.config.zoom_extent,
                );
            }
        }
    }

    fn paint(&self, painter: &Painter, presentation: &Presentation) {
        let Some(shapes) = &self.shapes else {
            return;
        };
        let stroke_scale = presentation.stroke_scale();
        let to_screen = |p: Pos2| presentation.to_screen(p);

        for command in self.draw_commands() {
            let Some(shape) = shapes.get(command.index) else {
                continue;
            };
            let paint = ShapePaint {
                fill: command.fill,
                stroke: Stroke::new(command.outline.width * stroke_scale, command.outline.color),
                shadow: command.outline.shadow,
            };
            paint_shape(painter, shape, paint, &to_screen);
        }

        if let Some(tooltip) = &self.interaction.tooltip {
            paint_tooltip(painter, tooltip);
        }
    }

    fn paint_status(&self, ui: &mut egui::Ui, painter: &Painter, rect: Rect) {
        match &self.load_state {
            LoadState::Idle | LoadState::Loading => {
                let spinner_rect = Rect::from_center_size(rect.center(), Vec2::splat(24.0));
                ui.put(spinner_rect, egui::Spinner::new());
            }
            LoadState::Failed(_) => {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    self.status_text(),
                    FontId::proportional(13.0),
                    Color32::from_rgb(0x9c, 0xa3, 0xaf),
                );
            }
            LoadState::Ready => {}
        }
    }

    #[cfg(test)]
    fn with_shapes(config: MapConfig, shapes: ShapeSet) -> Self {
        let mut renderer = Self::new(config);
        renderer.shapes = Some(shapes);
        renderer.load_state = LoadState::Ready;
        renderer
    }
}

/// Dark rounded label centered above the pointer.
fn paint_tooltip(painter: &Painter, tooltip: &Tooltip) {
    let galley = painter.layout_no_wrap(
        tooltip.content.clone(),
        FontId::proportional(12.0),
        Color32::WHITE,
    );
    let padding = Vec2::new(12.0, 8.0);
    let size = galley.size() + padding * 2.0;
    let bg = Rect::from_center_size(
        tooltip.pos - Vec2::new(0.0, size.y / 2.0 + 8.0),
        size,
    );
    painter.rect_filled(bg, 8.0, Color32::from_black_alpha(204));
    painter.galley(bg.min + padding, galley, Color32::WHITE);
}
