//! Interactive GDP choropleth.
//!
//! Fill decisions, transforms and interaction bookkeeping are kept free of
//! egui painting so they can be tested directly; [`MapRenderer`] ties them to
//! the boundary loader and the painter.

mod color;
mod config;
mod fill;
mod interaction;
mod renderer;
mod transform;

pub use color::to_hex;
pub use config::TiltConfig;
pub use renderer::{MapEvent, MapRenderer};
pub use transform::{card_outline, Tilt};
