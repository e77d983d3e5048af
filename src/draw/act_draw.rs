use std::collections::HashSet;

use crate::cache::slots::{RenderSlot, SlotArena};
use crate::draw::surface::{DrawUpdate, RenderSurface};
use crate::foundation::core::{Affine, DeviceScale, Point, Rect};
use crate::model::act::{Act, Layer, SpriteImage};
use crate::raster::compose::PixelCache;
use crate::resolve::anchor::resolve_anchor_correction;
use crate::resolve::frame::resolve_effective_frame;
use crate::transform::layer::{
    compute_layer_transform, outline_thickness, snap_rect, snap_translation,
};

/// Device-pixel width of the selection outline before reciprocal scaling.
const OUTLINE_BASE_PX: f64 = 1.0;

/// Read-only snapshot of the position being rendered.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Action index within the act.
    pub action_index: usize,
    /// Requested frame index; wrapped/bucketed by the frame resolver.
    pub frame_index: usize,
    /// View transform (pan/zoom), composed in at draw time only.
    pub view: Affine,
    /// DPI scale of the presenting surface.
    pub device_scale: DeviceScale,
}

/// Per-hierarchy compositor facade.
///
/// The UI rendering surface calls [`ActDraw::render`] once per frame tick
/// with a read-only view of the act; the facade resolves the effective frame
/// and anchor correction, recomputes only the slots whose inputs changed,
/// and drives the retained drawables of a [`RenderSurface`].
///
/// One `ActDraw` owns the render slots and pixel cache for exactly one act;
/// nothing is shared across facades.
#[derive(Debug)]
pub struct ActDraw {
    slots: SlotArena,
    pixels: PixelCache,
    selection: HashSet<usize>,
}

impl Default for ActDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl ActDraw {
    /// Construct an empty facade; slots are created lazily as frames are
    /// rendered.
    pub fn new() -> Self {
        Self {
            slots: SlotArena::new(),
            pixels: PixelCache::new(),
            selection: HashSet::new(),
        }
    }

    /// Full render pass: recompute geometry and pixels for every stale slot,
    /// redraw those slots, and clear the dirty set.
    #[tracing::instrument(skip_all, fields(act = act.name.as_str(), action = ctx.action_index, frame = ctx.frame_index))]
    pub fn render(
        &mut self,
        act: &Act,
        ctx: &FrameContext,
        surface: &mut dyn RenderSurface,
    ) {
        self.render_impl(act, ctx, surface, false);
        self.slots.finish_pass();
    }

    /// Transform-only refresh: recompose every slot's placement (the view may
    /// have moved) without recomputing any raster. Pixel staleness is left
    /// for the next full [`ActDraw::render`].
    #[tracing::instrument(skip_all, fields(act = act.name.as_str(), action = ctx.action_index, frame = ctx.frame_index))]
    pub fn quick_render(
        &mut self,
        act: &Act,
        ctx: &FrameContext,
        surface: &mut dyn RenderSurface,
    ) {
        self.render_impl(act, ctx, surface, true);
        self.slots.finish_quick_pass();
    }

    fn render_impl(
        &mut self,
        act: &Act,
        ctx: &FrameContext,
        surface: &mut dyn RenderSurface,
        quick: bool,
    ) {
        let resolution = resolve_effective_frame(act, ctx.action_index, ctx.frame_index);
        let correction = resolve_anchor_correction(
            act,
            ctx.action_index,
            resolution.effective,
            resolution.bucket_anchor,
        );
        let Some(frame) = act.try_get_frame(ctx.action_index, resolution.effective) else {
            hide_from(&mut self.slots, 0, surface);
            return;
        };

        self.slots.ensure_len(frame.layers.len());
        for (index, layer) in frame.layers.iter().enumerate() {
            let selected = self.selection.contains(&index);
            let image = act.sprite(layer.sprite_index);
            let (src_width, src_height) = source_dims(layer, image);

            if quick {
                // Geometry is cheap; recompute it unconditionally so property
                // edits land, but never touch the raster.
                let slot = self.slots.slot_mut(index);
                slot.transform =
                    Some(compute_layer_transform(layer, src_width, src_height, correction));
                slot.last_selected = selected;
                push_update(slot, layer, (src_width, src_height), ctx, surface);
            } else if self.slots.needs_recompute(index, selected) {
                tracing::trace!(index, "recomputing render slot");
                let transform =
                    compute_layer_transform(layer, src_width, src_height, correction);
                let raster = image.map(|image| {
                    self.pixels
                        .composite(layer.sprite_index as usize, image, layer.color)
                });
                let slot = self.slots.slot_mut(index);
                slot.transform = Some(transform);
                slot.raster = raster;
                slot.last_selected = selected;
                push_update(slot, layer, (src_width, src_height), ctx, surface);
            } else {
                // Clean slot: the retained drawable already shows the right
                // content. A pending transform-only invalidation still needs
                // its placement recomposed; otherwise just make sure the
                // drawable is visible again.
                let render_dirty = self.slots.render_dirty();
                let slot = self.slots.slot_mut(index);
                if render_dirty {
                    push_update(slot, layer, (src_width, src_height), ctx, surface);
                } else if !slot.visible
                    && let Some(id) = slot.drawable
                {
                    surface.set_visible(id, true);
                    slot.visible = true;
                }
            }
        }

        hide_from(&mut self.slots, frame.layers.len(), surface);
    }

    /// Detach every drawable from `surface` without destroying cached
    /// transforms, rasters, or the pixel cache. The next render pass
    /// recreates drawables and redraws from cache.
    pub fn remove(&mut self, surface: &mut dyn RenderSurface) {
        for id in self.slots.detach_all() {
            surface.remove_drawable(id);
        }
    }

    /// Mark the layer at `index` selected; the next pass redraws its slot
    /// with selection visuals.
    pub fn select(&mut self, index: usize) {
        self.selection.insert(index);
    }

    /// Clear the selection mark for the layer at `index`.
    pub fn deselect(&mut self, index: usize) {
        self.selection.remove(&index);
    }

    /// Clear every selection mark.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Whether the layer at `index` is currently selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(&index)
    }

    /// Force every slot to recompute (geometry and pixels) on the next full
    /// pass: the `VisualInvalidated` hook, raised on navigation to
    /// another frame or action.
    pub fn invalidate_visual(&mut self) {
        self.slots.mark_visual_dirty();
    }

    /// Request a transform-only refresh on the next pass: the
    /// `RenderInvalidated` hook, typically raised on camera changes.
    pub fn invalidate_render(&mut self) {
        self.slots.mark_render_dirty();
    }

    /// Invalidate a single layer slot, e.g. after one property edit, without
    /// touching the others.
    pub fn invalidate_layer(&mut self, index: usize) {
        self.slots.mark_slot_dirty(index);
    }

    /// Topmost layer under `point` (device space), or `None`.
    ///
    /// Layers are tested front-to-back through the inverse of their placed
    /// transform; a cached raster is alpha-tested at the hit pixel, an
    /// uncached one falls back to its rectangle. Imageless and
    /// degenerate-scale layers never hit.
    pub fn hit_test(&self, act: &Act, ctx: &FrameContext, point: Point) -> Option<usize> {
        let resolution = resolve_effective_frame(act, ctx.action_index, ctx.frame_index);
        let correction = resolve_anchor_correction(
            act,
            ctx.action_index,
            resolution.effective,
            resolution.bucket_anchor,
        );
        let frame = act.try_get_frame(ctx.action_index, resolution.effective)?;

        for (index, layer) in frame.layers.iter().enumerate().rev() {
            if layer.sprite_index < 0 {
                continue;
            }
            let image = act.sprite(layer.sprite_index);
            let (src_width, src_height) = source_dims(layer, image);
            if src_width <= 0 || src_height <= 0 {
                continue;
            }

            let transform = self
                .slots
                .slot(index)
                .and_then(|slot| slot.transform)
                .unwrap_or_else(|| {
                    compute_layer_transform(layer, src_width, src_height, correction)
                });
            let placed = ctx.view * transform;
            if placed.determinant().abs() < f64::EPSILON {
                continue;
            }

            let local = placed.inverse() * point;
            if local.x < 0.0
                || local.y < 0.0
                || local.x >= f64::from(src_width)
                || local.y >= f64::from(src_height)
            {
                continue;
            }

            let opaque = match self.slots.slot(index).and_then(|slot| slot.raster.as_ref()) {
                Some(raster) => raster.alpha_at(local.x as u32, local.y as u32) != 0,
                None => true,
            };
            if opaque {
                return Some(index);
            }
        }
        None
    }

    /// Number of raster recolorings performed since construction; exposed
    /// for instrumentation and tests.
    pub fn raster_recomputes(&self) -> u64 {
        self.pixels.recompute_count()
    }
}

fn source_dims(layer: &Layer, image: Option<&SpriteImage>) -> (i32, i32) {
    match image {
        Some(image) => (image.width() as i32, image.height() as i32),
        None => (layer.width, layer.height),
    }
}

fn push_update(
    slot: &mut RenderSlot,
    layer: &Layer,
    (src_width, src_height): (i32, i32),
    ctx: &FrameContext,
    surface: &mut dyn RenderSurface,
) {
    let Some(transform) = slot.transform else {
        return;
    };
    let id = match slot.drawable {
        Some(id) => id,
        None => {
            let id = surface.create_drawable();
            slot.drawable = Some(id);
            id
        }
    };

    let placed = snap_translation(ctx.view * transform, ctx.device_scale);
    let src_rect = Rect::new(0.0, 0.0, f64::from(src_width), f64::from(src_height));
    let bounds = snap_rect(placed.transform_rect_bbox(src_rect), ctx.device_scale);

    surface.update_drawable(
        id,
        &DrawUpdate {
            transform: placed,
            bounds,
            raster: slot.raster.clone(),
            selected: slot.last_selected,
            outline_thickness: outline_thickness(OUTLINE_BASE_PX, layer),
        },
    );
    surface.set_visible(id, true);
    slot.visible = true;
}

fn hide_from(slots: &mut SlotArena, start: usize, surface: &mut dyn RenderSurface) {
    for slot in slots.slots_mut().skip(start) {
        if slot.visible
            && let Some(id) = slot.drawable
        {
            surface.set_visible(id, false);
            slot.visible = false;
        }
    }
}
