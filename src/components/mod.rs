//! UI components.

pub mod circle_canvas;
