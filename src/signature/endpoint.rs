//! Routes that feed the browser's pointer events to the screen's signature pad.

use axum::{
    Extension, Json,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    screen::Screen,
    signature::{PointerEvent, signature_status, signature_widget},
};

/// The pointer events of one stroke, in the order they happened.
#[derive(Debug, Deserialize)]
pub struct StrokeRequest {
    pub events: Vec<PointerEvent>,
}

/// Replay a stroke on the screen's signature pad and return the new status line.
pub async fn record_stroke_endpoint(
    Extension(screen): Extension<Screen>,
    Json(stroke): Json<StrokeRequest>,
) -> Response {
    let mut controller = screen.lock().await;

    if let Err(error) = controller.record_pointer_events(&stroke.events).await {
        tracing::error!("Could not record signature stroke: {error}");
        return error.into_alert_response();
    }

    signature_status(controller.signature()).into_response()
}

/// Clear the screen's signature and return the empty widget.
pub async fn clear_signature_endpoint(Extension(screen): Extension<Screen>) -> Response {
    let mut controller = screen.lock().await;
    controller.clear_signature();

    signature_widget(controller.signature()).into_response()
}
