use std::sync::Arc;

use crate::foundation::core::{Affine, Rect};
use crate::raster::compose::RasterBuffer;

/// Opaque handle to one retained drawable owned by the platform surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u64);

/// Draw state handed to the surface when a slot is (re)drawn.
#[derive(Clone, Debug)]
pub struct DrawUpdate {
    /// Final placement: layer transform composed with the view transform,
    /// translation snapped to device pixels.
    pub transform: Affine,
    /// Device-space bounds of the drawn rectangle, extents snapped so
    /// adjacent sprites keep sharing edges.
    pub bounds: Rect,
    /// Recolored raster for the slot; `None` for imageless layers.
    pub raster: Option<Arc<RasterBuffer>>,
    /// Whether the layer is currently selected.
    pub selected: bool,
    /// Selection outline thickness in image space; `0` for degenerate
    /// scales.
    pub outline_thickness: f64,
}

/// Retained-mode rendering surface the engine draws through.
///
/// The surface owns one opaque drawable per render slot and is responsible
/// for compositing them; the engine only tells it what each drawable shows
/// and whether it is visible. Implementations are platform visual trees,
/// GPU quad lists, or plain test recorders.
pub trait RenderSurface {
    /// Allocate a retained drawable and return its handle.
    fn create_drawable(&mut self) -> DrawableId;

    /// Replace the drawable's content and placement.
    fn update_drawable(&mut self, id: DrawableId, update: &DrawUpdate);

    /// Show or hide the drawable without destroying it.
    fn set_visible(&mut self, id: DrawableId, visible: bool);

    /// Destroy the drawable.
    fn remove_drawable(&mut self, id: DrawableId);
}
