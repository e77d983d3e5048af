use std::sync::Arc;

use crate::draw::surface::DrawableId;
use crate::foundation::core::Affine;
use crate::raster::compose::RasterBuffer;

/// One retained visual plus its cached derivations for a single layer
/// position.
///
/// Slots are addressed by index within the currently displayed frame's layer
/// list, not by any stable layer identity: slot N serves whichever logical
/// layer occupies position N. Slots past the current frame's layer count are
/// hidden, never destroyed, so a frame with more layers reuses them.
#[derive(Clone, Debug, Default)]
pub(crate) struct RenderSlot {
    /// Platform drawable handle; `None` while detached from a surface.
    pub(crate) drawable: Option<DrawableId>,
    /// Cached layer transform, without the view transform.
    pub(crate) transform: Option<Affine>,
    /// Cached recolored raster; `None` for imageless layers.
    pub(crate) raster: Option<Arc<RasterBuffer>>,
    /// Selection state at the last draw.
    pub(crate) last_selected: bool,
    /// Single-slot invalidation flag.
    pub(crate) dirty: bool,
    /// Whether the drawable was visible at the last pass.
    pub(crate) visible: bool,
}

/// Index-addressed arena of render slots with per-slot and global dirty
/// flags.
///
/// State machine per slot: `Clean -> Dirty -> Recomputed -> Clean`. The
/// global `visual_dirty` flag forces every slot to recompute once (frame or
/// action navigation); `render_dirty` requests a transform-only refresh and
/// is consumed by quick passes.
#[derive(Clone, Debug)]
pub(crate) struct SlotArena {
    slots: Vec<RenderSlot>,
    visual_dirty: bool,
    render_dirty: bool,
}

impl SlotArena {
    /// A fresh arena starts globally dirty so the first pass computes
    /// everything.
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            visual_dirty: true,
            render_dirty: false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Grow the arena to at least `count` slots; existing slots keep their
    /// cached state.
    pub(crate) fn ensure_len(&mut self, count: usize) {
        if self.slots.len() < count {
            self.slots.resize_with(count, RenderSlot::default);
        }
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&RenderSlot> {
        self.slots.get(index)
    }

    /// Mutable slot access; `index` must be within the length established by
    /// a prior [`SlotArena::ensure_len`].
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut RenderSlot {
        debug_assert!(index < self.slots.len(), "slot index past arena length");
        &mut self.slots[index]
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = &mut RenderSlot> {
        self.slots.iter_mut()
    }

    pub(crate) fn visual_dirty(&self) -> bool {
        self.visual_dirty
    }

    pub(crate) fn render_dirty(&self) -> bool {
        self.render_dirty
    }

    /// Force every slot to recompute on the next full pass.
    pub(crate) fn mark_visual_dirty(&mut self) {
        self.visual_dirty = true;
    }

    /// Request a transform-only refresh on the next pass.
    pub(crate) fn mark_render_dirty(&mut self) {
        self.render_dirty = true;
    }

    /// Invalidate a single slot; out-of-range indices are ignored.
    pub(crate) fn mark_slot_dirty(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.dirty = true;
        }
    }

    /// Whether a full pass must recompute slot `index`.
    ///
    /// True when globally dirty, individually dirty, never computed, or when
    /// the selection state differs from the last draw.
    pub(crate) fn needs_recompute(&self, index: usize, selected: bool) -> bool {
        if self.visual_dirty {
            return true;
        }
        match self.slots.get(index) {
            Some(slot) => {
                slot.dirty || slot.transform.is_none() || slot.last_selected != selected
            }
            None => true,
        }
    }

    /// Clear the global flag and the per-slot dirty set after a full pass.
    pub(crate) fn finish_pass(&mut self) {
        self.visual_dirty = false;
        self.render_dirty = false;
        for slot in &mut self.slots {
            slot.dirty = false;
        }
    }

    /// Consume only the transform-refresh flag after a quick pass; pixel
    /// staleness (global and per-slot) is left for the next full pass.
    pub(crate) fn finish_quick_pass(&mut self) {
        self.render_dirty = false;
    }

    /// Take every drawable handle, keeping cached transforms and rasters, and
    /// flag a full recompute so reattachment redraws everything.
    pub(crate) fn detach_all(&mut self) -> Vec<DrawableId> {
        let ids = self
            .slots
            .iter_mut()
            .filter_map(|slot| {
                slot.visible = false;
                slot.drawable.take()
            })
            .collect();
        self.visual_dirty = true;
        ids
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/slots.rs"]
mod tests;
