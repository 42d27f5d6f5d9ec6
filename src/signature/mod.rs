//! Signature capture: the pad that records strokes, the rasterizer that turns
//! them into a PNG and the widget and routes that connect them to the browser.

mod endpoint;
mod pad;
mod raster;
mod widget;

pub use endpoint::{clear_signature_endpoint, record_stroke_endpoint};
pub use pad::{PointerEvent, SURFACE_HEIGHT, SURFACE_WIDTH, SignaturePad};
pub use widget::{signature_status, signature_widget};
