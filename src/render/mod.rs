//! Output rendering: a static SVG diagram, optionally wrapped in an HTML report.

pub mod html;
pub mod svg;

pub use html::render_html_report;
pub use svg::{RenderOptions, render_svg};
