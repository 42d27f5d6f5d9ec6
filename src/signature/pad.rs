//! The signature pad: a pointer-driven stroke recorder over a fixed surface.

use serde::Deserialize;

use crate::{
    Error,
    signature::raster::{Point, Surface},
};

/// Width of the drawing surface in pixels.
pub const SURFACE_WIDTH: u32 = 400;
/// Height of the drawing surface in pixels.
pub const SURFACE_HEIGHT: u32 = 150;

/// The most pointer events accepted in one call to [SignaturePad::handle_all].
pub const MAX_EVENTS_PER_STROKE: usize = 2_000;
/// The most points a pad accepts between two clears.
pub const MAX_SIGNATURE_POINTS: usize = 10_000;

/// A pointer event over the drawing surface, with coordinates relative to the
/// surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Leave,
}

impl PointerEvent {
    fn adds_point(&self) -> bool {
        matches!(self, Self::Down { .. } | Self::Move { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadState {
    Idle,
    Drawing,
}

/// Records strokes and keeps the most recent snapshot of the surface as the
/// signature.
///
/// - `Idle` → `Drawing` on pointer-down inside the surface, starting a new
///   stroke at the pointer.
/// - While `Drawing`, each pointer-move draws a segment from the previous
///   point onto the surface.
/// - `Drawing` → `Idle` on pointer-up or pointer-leave. The surface is
///   encoded at that moment and stored as the signature.
///
/// Events that do not apply to the current state are ignored.
#[derive(Debug, Clone)]
pub struct SignaturePad {
    state: PadState,
    surface: Surface,
    last_point: Option<Point>,
    point_count: usize,
    signature: String,
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

impl SignaturePad {
    pub fn new() -> Self {
        Self {
            state: PadState::Idle,
            surface: Surface::new(SURFACE_WIDTH, SURFACE_HEIGHT),
            last_point: None,
            point_count: 0,
            signature: String::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PadState {
        self.state
    }

    /// The stored signature as a PNG data URI, empty if none was captured.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn has_signature(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Apply a single pointer event.
    ///
    /// # Errors
    ///
    /// Returns [Error::SignatureEncoding] if the surface could not be encoded
    /// at the end of a stroke. The stroke is still ended.
    pub fn handle(&mut self, event: PointerEvent) -> Result<(), Error> {
        match (self.state, event) {
            (PadState::Idle, PointerEvent::Down { x, y }) => {
                if is_inside_surface(x, y) {
                    self.start_stroke(x, y);
                }
                Ok(())
            }
            // A lost pointer-up: start over from the new position.
            (PadState::Drawing, PointerEvent::Down { x, y }) => {
                self.start_stroke(x, y);
                Ok(())
            }
            (PadState::Drawing, PointerEvent::Move { x, y }) => {
                let point = Point::new(x, y);
                if let Some(last_point) = self.last_point {
                    self.surface.draw_segment(last_point, point);
                }
                self.last_point = Some(point);
                self.point_count += 1;
                Ok(())
            }
            (PadState::Drawing, PointerEvent::Up | PointerEvent::Leave) => self.end_stroke(),
            (PadState::Idle, PointerEvent::Move { .. } | PointerEvent::Up | PointerEvent::Leave) => {
                Ok(())
            }
        }
    }

    /// Apply `events` in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns [Error::SignatureTooLong] without applying any event if there
    /// are more than [MAX_EVENTS_PER_STROKE] events, or if they would take the
    /// pad past [MAX_SIGNATURE_POINTS].
    pub fn handle_all(&mut self, events: &[PointerEvent]) -> Result<(), Error> {
        let new_points = events.iter().filter(|event| event.adds_point()).count();

        if events.len() > MAX_EVENTS_PER_STROKE
            || self.point_count + new_points > MAX_SIGNATURE_POINTS
        {
            tracing::warn!(
                "Rejecting {} pointer events, the pad already has {} points",
                events.len(),
                self.point_count
            );
            return Err(Error::SignatureTooLong);
        }

        events.iter().try_for_each(|event| self.handle(*event))
    }

    /// Wipe the surface and forget the stored signature, abandoning any
    /// stroke in progress.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn start_stroke(&mut self, x: f32, y: f32) {
        self.state = PadState::Drawing;
        self.last_point = Some(Point::new(x, y));
        self.point_count += 1;
    }

    fn end_stroke(&mut self) -> Result<(), Error> {
        self.state = PadState::Idle;
        self.last_point = None;
        self.signature = self.surface.to_data_uri()?;

        Ok(())
    }
}

fn is_inside_surface(x: f32, y: f32) -> bool {
    (0.0..=SURFACE_WIDTH as f32).contains(&x) && (0.0..=SURFACE_HEIGHT as f32).contains(&y)
}
