//! UI modules for the GDP Atlas application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title and economy summary
//! - Central canvas: Choropleth map and state comparison chart
//! - Right panel: Display settings and state rankings
//! - Bottom panel: Data disclaimers

mod bottom_panel;
mod canvas;
mod chart;
mod colors;
mod right_panel;
mod top_bar;

pub use bottom_panel::render_bottom_panel;
pub use canvas::render_canvas;
pub use colors::ui::BACKGROUND;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;
