//! Actdraw is a sprite transform and compositing engine for layered 2-D
//! character animation.
//!
//! An animated document (an [`Act`]) is a named hierarchy of
//! `Action -> Frame -> Layer` data plus a sprite image table shared by all of
//! its layers. The engine turns one `(action, frame)` position of that
//! hierarchy into device-ready output:
//!
//! 1. **Resolve**: `(action, frame) -> effective frame`, wrapping out-of-range
//!    indices and remapping the 3-bucket compression used by shared
//!    "Head"/"Body" overlay acts (see [`resolve_effective_frame`])
//! 2. **Anchor**: cross-hierarchy anchor chains (body/head/garment) become a
//!    positional correction (see [`resolve_anchor_correction`])
//! 3. **Transform**: each layer's pivot-centered mirror/scale/rotation/offset
//!    composes into one affine placement (see [`compute_layer_transform`])
//! 4. **Raster**: indexed or true-color sprites are recolored by the layer
//!    tint into BGRA buffers, cached by image content hash
//! 5. **Retain**: an incremental slot cache redraws only what changed, through
//!    the opaque drawable handles of a platform [`RenderSurface`]
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Read-only document**: the engine never mutates an [`Act`]; all editing
//!   happens in the surrounding editor, which reports changes back through the
//!   invalidation hooks on [`ActDraw`].
//! - **Infallible rendering**: out-of-range indices, missing anchors, absent
//!   images and degenerate scales all degrade to defined silent fallbacks.
//!   Only document wiring ([`Act::anchor_to`]) can fail.
//! - **Single-threaded**: every pass runs synchronously on the caller's
//!   render callback; nothing blocks or suspends.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod cache;
mod draw;
mod foundation;
mod model;
mod raster;
mod resolve;
mod transform;

pub use draw::act_draw::{ActDraw, FrameContext};
pub use draw::surface::{DrawUpdate, DrawableId, RenderSurface};
pub use foundation::core::{Affine, DeviceScale, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{ActDrawError, ActDrawResult};
pub use model::act::{
    Act, Action, Anchor, Frame, Layer, OVERLAY_ACT_NAMES, SpriteImage,
};
pub use raster::compose::RasterBuffer;
pub use resolve::anchor::resolve_anchor_correction;
pub use resolve::frame::{FrameResolution, resolve_effective_frame};
pub use transform::layer::{
    compute_layer_transform, outline_thickness, snap_rect, snap_translation,
};
