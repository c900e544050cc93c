#![warn(clippy::all)]

//! GDP Atlas - An interactive map of US state GDP.
//!
//! This application renders a choropleth of 2024 state GDP estimates with
//! pan/zoom, hover tooltips and click-to-compare selection, alongside a
//! ranking list, a comparison chart and display settings.

mod data;
mod geo;
mod map;
mod state;
mod ui;

use eframe::egui;
use map::{MapEvent, MapRenderer};
use state::AppState;

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GDP Atlas")
            .with_inner_size([1440.0, 960.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GDP Atlas",
        native_options,
        Box::new(|cc| Ok(Box::new(GdpAtlasApp::new(cc)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("app_canvas")
            .expect("Failed to find app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("app_canvas was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(GdpAtlasApp::new(cc)))),
            )
            .await;

        // Remove the loading text once the app has loaded:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}

/// Main application state and logic.
pub struct GdpAtlasApp {
    /// Dataset, settings and selection
    state: AppState,

    /// Choropleth renderer with its own loader and interaction state
    map: MapRenderer,
}

impl GdpAtlasApp {
    /// Creates a new GdpAtlasApp instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let state = AppState::default();
        log::info!(
            "Loaded {} state records, total {}",
            state.dataset.len(),
            data::format_currency(state.dataset.total_gdp())
        );

        Self {
            state,
            map: MapRenderer::default(),
        }
    }

    fn apply_map_events(&mut self, events: Vec<MapEvent>) {
        for event in events {
            match event {
                MapEvent::ToggleSelection(name) => self.state.toggle_selection(&name),
            }
        }
    }
}

impl eframe::App for GdpAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.status_message = self.map.status_text();

        ui::render_top_bar(ctx, &self.state);
        ui::render_bottom_panel(ctx);
        ui::render_right_panel(ctx, &mut self.state);
        let events = ui::render_canvas(ctx, &mut self.state, &mut self.map);

        self.apply_map_events(events);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        ui::BACKGROUND.to_normalized_gamma_f32()
    }
}
