use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::data_types::{AlignedSeries, BrushRange, Lookback, TimeBounds, TimeWindow, ViewportConfig};
use crate::index_locator::{nearest_index, SnapMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// ViewportController owns the visible time window over a fixed extent and
/// applies zoom, pan and brush interactions to it.
///
/// Every mutation funnels through [`ViewportController::set_domain`], so the
/// window is always inside the bounds and never narrower than the configured
/// minimum (unless the bounds themselves are narrower).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    bounds: TimeBounds,
    config: ViewportConfig,
    /// `None` while the default lookback applies.
    window: Option<TimeWindow>,
}

impl ViewportController {
    pub fn new(bounds: TimeBounds, config: ViewportConfig) -> Self {
        Self {
            bounds,
            config,
            window: None,
        }
    }

    /// Builds a controller over the extent of `series`; `None` when it is empty.
    pub fn for_series(series: &AlignedSeries, config: ViewportConfig) -> Option<Self> {
        series.time_bounds().map(|b| Self::new(b, config))
    }

    pub fn bounds(&self) -> TimeBounds {
        self.bounds
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn is_default(&self) -> bool {
        self.window.is_none()
    }

    fn min_span(&self) -> f64 {
        self.config.min_window_ms.max(0.0).min(self.bounds.span())
    }

    /// The window the renderer should draw.
    pub fn domain(&self) -> TimeWindow {
        match self.window {
            Some(w) => w,
            None => self.default_domain(),
        }
    }

    fn default_domain(&self) -> TimeWindow {
        let max = self.bounds.max as f64;
        let requested = self.config.lookback.span_ms();
        let requested = if requested.is_finite() { requested.max(0.0) } else { 0.0 };
        let span = requested.min(self.bounds.span());
        self.clamp_domain(max - span, max)
    }

    /// Drops any explicit window; the next read uses the lookback again.
    pub fn reset(&mut self) {
        trace!("viewport reset to default lookback");
        self.window = None;
    }

    /// Changes the default lookback and resets to it.
    pub fn set_lookback(&mut self, lookback: Lookback) {
        self.config.lookback = lookback;
        self.reset();
    }

    /// Moves the controller onto new bounds, keeping an explicit window if
    /// one is set (re-clamped to the new extent).
    pub fn rebound(&mut self, bounds: TimeBounds) {
        self.bounds = bounds;
        if let Some(w) = self.window {
            self.window = Some(self.clamp_domain(w.start, w.end));
        }
    }

    /// Pure clamping primitive: closest valid window to `[raw_start, raw_end]`.
    ///
    /// Preserves the requested span where possible and slides the window
    /// back inside the bounds. Idempotent on its own output.
    pub fn clamp_domain(&self, raw_start: f64, raw_end: f64) -> TimeWindow {
        let min = self.bounds.min as f64;
        let max = self.bounds.max as f64;
        let total = self.bounds.span();

        if !raw_start.is_finite() || !raw_end.is_finite() {
            return self.domain();
        }
        if total <= 0.0 {
            return TimeWindow::new(min, min);
        }

        let (start, end) = if raw_start <= raw_end {
            (raw_start, raw_end)
        } else {
            (raw_end, raw_start)
        };
        let span = (end - start).max(self.min_span());
        if span >= total {
            return self.bounds.full_window();
        }

        if start + span > max {
            TimeWindow::new(max - span, max)
        } else if start < min {
            TimeWindow::new(min, min + span)
        } else {
            TimeWindow::new(start, start + span)
        }
    }

    /// Clamps `[raw_start, raw_end]` and stores it as the explicit window.
    pub fn set_domain(&mut self, raw_start: f64, raw_end: f64) -> TimeWindow {
        if !raw_start.is_finite() || !raw_end.is_finite() {
            return self.domain();
        }
        let next = self.clamp_domain(raw_start, raw_end);
        trace!(raw_start, raw_end, window = %next, "viewport domain set");
        self.window = Some(next);
        next
    }

    /// Button zoom centered on the window.
    pub fn zoom(&mut self, direction: ZoomDirection, focal_ratio: f64) -> TimeWindow {
        let factor = match direction {
            ZoomDirection::In => self.config.zoom.button_in,
            ZoomDirection::Out => self.config.zoom.button_out,
        };
        self.zoom_by(factor, focal_ratio)
    }

    /// One wheel notch of zoom around a cursor-relative focal point.
    pub fn zoom_wheel(&mut self, direction: ZoomDirection, focal_ratio: f64) -> TimeWindow {
        let factor = match direction {
            ZoomDirection::In => self.config.zoom.wheel_in,
            ZoomDirection::Out => self.config.zoom.wheel_out,
        };
        self.zoom_by(factor, focal_ratio)
    }

    /// Scales the span by `factor` keeping the time at `focal_ratio` fixed.
    pub fn zoom_by(&mut self, factor: f64, focal_ratio: f64) -> TimeWindow {
        let current = self.domain();
        let total = self.bounds.span();
        if total <= 0.0 || !factor.is_finite() || factor <= 0.0 {
            return current;
        }
        let focal_ratio = if focal_ratio.is_finite() {
            focal_ratio.clamp(0.0, 1.0)
        } else {
            0.5
        };

        let current_span = current.span().max(self.config.min_window_ms.max(0.0));
        let next_span = (current_span * factor).clamp(self.min_span(), total);

        let focal_time = current.start + current_span * focal_ratio;
        let next_start = focal_time - next_span * focal_ratio;
        let next_end = focal_time + next_span * (1.0 - focal_ratio);
        self.set_domain(next_start, next_end)
    }

    /// Shifts the window by `delta_ms`; sticks at the bounds without shrinking.
    pub fn pan(&mut self, delta_ms: f64) -> TimeWindow {
        let current = self.domain();
        if !delta_ms.is_finite() || self.bounds.is_instant() {
            return current;
        }
        let shifted = current.shifted(delta_ms);
        self.set_domain(shifted.start, shifted.end)
    }

    /// Shifts the window by a fraction of its own span.
    pub fn pan_ratio(&mut self, delta_ratio: f64) -> TimeWindow {
        let span = self.domain().span();
        self.pan(delta_ratio * span)
    }

    /// Drag pan from a pixel delta. Dragging right reveals earlier data.
    pub fn pan_pixels(&mut self, delta_px: f64, width_px: f64) -> TimeWindow {
        if !(width_px > 0.0) {
            return self.domain();
        }
        let ratio = self.domain().span() / width_px;
        self.pan(-delta_px * ratio)
    }

    /// Applies a range-selector drag given as sample indices.
    ///
    /// Returns `None` (and leaves the window untouched) for an empty series
    /// or a zero-width selection.
    pub fn sync_from_brush(
        &mut self,
        start_index: usize,
        end_index: usize,
        series: &AlignedSeries,
    ) -> Option<TimeWindow> {
        let last = series.len().checked_sub(1)?;
        let (a, b) = (start_index.min(last), end_index.min(last));
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return None;
        }
        let start = series.get(lo)?.time as f64;
        let end = series.get(hi)?.time as f64;
        Some(self.set_domain(start, end))
    }

    /// Indices a range selector should show so it fully covers the domain.
    pub fn brush_state(&self, series: &AlignedSeries) -> Option<BrushRange> {
        let domain = self.domain();
        let start_index = nearest_index(series.points(), domain.start, SnapMode::Floor)?;
        let end_index = nearest_index(series.points(), domain.end, SnapMode::Ceil)?;
        Some(BrushRange {
            start_index,
            end_index,
        })
    }

    /// Maps a pixel offset to a focal ratio within `[0, 1]`.
    pub fn focal_ratio_at(pixels: f64, total_pixels: f64) -> f64 {
        if !(total_pixels > 0.0) || !pixels.is_finite() {
            return 0.5;
        }
        (pixels / total_pixels).clamp(0.0, 1.0)
    }
}
