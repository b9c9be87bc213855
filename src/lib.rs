//! funding_chart: aligns two venues' funding-rate histories and drives a
//! clamped zoom/pan/brush viewport over the result.

pub mod aligner;
pub mod cache;
pub mod data_types;
pub mod feed;
pub mod gestures;
pub mod index_locator;
pub mod query;
pub mod session;
pub mod utils;
pub mod view_controller;

pub use aligner::{AlignError, Aligner};
pub use data_types::{AlignedPoint, AlignedSeries, RawSample, TimeBounds, TimeWindow};
pub use gestures::{Gesture, WheelMode};
pub use index_locator::{nearest_index, SnapMode};
pub use view_controller::{ViewportController, ZoomDirection};
