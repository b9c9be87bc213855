use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::data_types::{AlignedSeries, TimeWindow};
use crate::view_controller::{ViewportController, ZoomDirection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelMode {
    #[default]
    Zoom,
    Pan,
}

/// User input the rendering layer forwards to the viewport.
///
/// Raw events are expected to be coalesced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gesture {
    ZoomIn,
    ZoomOut,
    /// Positive `delta` zooms in (or pans later in time in pan mode).
    Wheel {
        delta: f64,
        mode: WheelMode,
        focal_ratio: f64,
    },
    Drag {
        delta_px: f64,
        width_px: f64,
    },
    Brush {
        start_index: usize,
        end_index: usize,
    },
    Reset,
}

impl ViewportController {
    /// Dispatches a gesture and returns the resulting effective window.
    pub fn apply(&mut self, gesture: &Gesture, series: &AlignedSeries) -> TimeWindow {
        trace!(?gesture, "viewport gesture");
        match *gesture {
            Gesture::ZoomIn => self.zoom(ZoomDirection::In, 0.5),
            Gesture::ZoomOut => self.zoom(ZoomDirection::Out, 0.5),
            Gesture::Wheel {
                delta,
                mode: WheelMode::Zoom,
                focal_ratio,
            } => {
                if delta > 0.0 {
                    self.zoom_wheel(ZoomDirection::In, focal_ratio)
                } else if delta < 0.0 {
                    self.zoom_wheel(ZoomDirection::Out, focal_ratio)
                } else {
                    self.domain()
                }
            }
            Gesture::Wheel {
                delta,
                mode: WheelMode::Pan,
                ..
            } => self.pan_ratio(delta),
            Gesture::Drag { delta_px, width_px } => self.pan_pixels(delta_px, width_px),
            Gesture::Brush {
                start_index,
                end_index,
            } => self
                .sync_from_brush(start_index, end_index, series)
                .unwrap_or_else(|| self.domain()),
            Gesture::Reset => {
                self.reset();
                self.domain()
            }
        }
    }
}
