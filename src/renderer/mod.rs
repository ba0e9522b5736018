//! Canvas 2D rendering module
//!
//! Draws sprites as images (falling back to coloured boxes until the images
//! load), the outcome label, and the flip between scenes.

pub mod canvas;

pub use canvas::CanvasRenderer;
