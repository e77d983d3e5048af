use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ActDrawError, ActDrawResult};
use crate::foundation::math::Fnv1a64;

/// Reserved hierarchy names whose short overlay actions stand in for
/// compressed pose ranges of the act they are anchored to.
pub const OVERLAY_ACT_NAMES: [&str; 2] = ["Head", "Body"];

/// Anchor chains are 0, 1 or 2 levels deep in practice; anything past this
/// cap is treated as a wiring error (or a pre-existing cycle).
const MAX_ANCHOR_DEPTH: usize = 4;

/// A per-frame pivot used to align two independently-animated acts at a
/// shared pose. Never used when rendering the anchor's own act.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal pivot offset.
    pub offset_x: i32,
    /// Vertical pivot offset.
    pub offset_y: i32,
}

impl Anchor {
    /// Construct from offsets.
    pub const fn new(offset_x: i32, offset_y: i32) -> Self {
        Self { offset_x, offset_y }
    }
}

/// One positioned, tinted, transformable sub-image within a frame.
///
/// A layer with `sprite_index < 0` renders nothing but still occupies a
/// render slot and participates in selection bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Index into the owning act's sprite table; negative means "no image".
    pub sprite_index: i32,
    /// Horizontal frame position.
    pub offset_x: i32,
    /// Vertical frame position.
    pub offset_y: i32,
    /// Horizontal scale; mirroring folds a sign flip into this at draw time.
    pub scale_x: f32,
    /// Vertical scale.
    pub scale_y: f32,
    /// Rotation in whole degrees.
    pub rotation: i32,
    /// Horizontal mirror flag.
    pub mirror: bool,
    /// RGBA tint multiplied into the source image.
    pub color: Rgba8,
    /// Cached source-image width, used when the sprite table has no entry.
    pub width: i32,
    /// Cached source-image height, used when the sprite table has no entry.
    pub height: i32,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            sprite_index: -1,
            offset_x: 0,
            offset_y: 0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0,
            mirror: false,
            color: Rgba8::WHITE,
            width: 0,
            height: 0,
        }
    }
}

/// An ordered sequence of layers plus optional anchors.
///
/// Only the first anchor is authoritative; later ones are carried for the
/// editor but unused by the engine.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Layers in back-to-front paint order.
    pub layers: Vec<Layer>,
    /// Declared anchors; the engine reads only the first.
    pub anchors: Vec<Anchor>,
}

impl Frame {
    /// The authoritative anchor, if any.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchors.first()
    }
}

/// An ordered sequence of frames plus a playback interval scalar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Action {
    /// Frames in timeline order.
    pub frames: Vec<Frame>,
    /// Frame interval scalar used by playback; not consulted by the engine.
    pub animation_speed: f32,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            animation_speed: 1.0,
        }
    }
}

/// An indexed-palette or true-color source image in the act's sprite table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SpriteImage {
    /// 8-bit indexed image with an RGBA palette (at most 256 entries).
    Indexed {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Row-major palette indices, `width * height` entries.
        pixels: Vec<u8>,
        /// RGBA palette; indices past its length resolve to transparent.
        palette: Vec<Rgba8>,
    },
    /// True-color image stored as row-major straight RGBA8 bytes.
    TrueColor {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Row-major RGBA8 bytes, `width * height * 4` entries.
        rgba8: Vec<u8>,
    },
}

impl SpriteImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Self::Indexed { width, .. } | Self::TrueColor { width, .. } => *width,
        }
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Self::Indexed { height, .. } | Self::TrueColor { height, .. } => *height,
        }
    }

    /// Content-version hash over dimensions, palette and pixel data.
    ///
    /// Any palette edit, pixel edit or image replacement changes this value;
    /// the pixel cache compares it to decide whether a cached recoloring is
    /// still valid.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Fnv1a64::new_default();
        match self {
            Self::Indexed {
                width,
                height,
                pixels,
                palette,
            } => {
                hasher.write_u8(b'I');
                hasher.write_u32(*width);
                hasher.write_u32(*height);
                for entry in palette {
                    hasher.write_bytes(&[entry.r, entry.g, entry.b, entry.a]);
                }
                hasher.write_bytes(pixels);
            }
            Self::TrueColor {
                width,
                height,
                rgba8,
            } => {
                hasher.write_u8(b'T');
                hasher.write_u32(*width);
                hasher.write_u32(*height);
                hasher.write_bytes(rgba8);
            }
        }
        hasher.finish()
    }
}

/// A named sprite hierarchy: ordered actions, a shared sprite table, and an
/// optional anchor reference to another act.
///
/// The act is pure document data owned by the editor; the engine only reads
/// it and caches derived artifacts keyed by layer position and image
/// identity.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Act {
    /// Hierarchy name; "Head" and "Body" carry overlay semantics
    /// (see [`OVERLAY_ACT_NAMES`]).
    pub name: String,
    /// Ordered actions.
    pub actions: Vec<Action>,
    /// Sprite image table shared by all layers of this act.
    pub sprites: Vec<SpriteImage>,
    /// Anchor reference chain; editor wiring, not document data.
    #[serde(skip)]
    anchored_to: Option<Arc<Act>>,
}

impl Act {
    /// Construct an act with no anchor reference.
    pub fn new(
        name: impl Into<String>,
        actions: Vec<Action>,
        sprites: Vec<SpriteImage>,
    ) -> Self {
        Self {
            name: name.into(),
            actions,
            sprites,
            anchored_to: None,
        }
    }

    /// The act this one is anchored to, if any.
    pub fn anchored_to(&self) -> Option<&Arc<Act>> {
        self.anchored_to.as_ref()
    }

    /// Anchor this act to `target` (or clear the reference with `None`).
    ///
    /// An act must not be anchored to itself, directly or transitively;
    /// chains deeper than [`MAX_ANCHOR_DEPTH`] are rejected for the same
    /// reason.
    pub fn anchor_to(&mut self, target: Option<Arc<Act>>) -> ActDrawResult<()> {
        if let Some(target) = &target {
            let mut depth = 0usize;
            let mut link = Some(target);
            while let Some(act) = link {
                if act.name == self.name {
                    return Err(ActDrawError::validation(format!(
                        "act '{}' must not be anchored to itself",
                        self.name
                    )));
                }
                depth += 1;
                if depth > MAX_ANCHOR_DEPTH {
                    return Err(ActDrawError::validation(
                        "anchor chain too deep (cycle?)",
                    ));
                }
                link = act.anchored_to.as_ref();
            }
        }
        self.anchored_to = target;
        Ok(())
    }

    /// Action at `action_index`, if declared.
    pub fn action(&self, action_index: usize) -> Option<&Action> {
        self.actions.get(action_index)
    }

    /// Positional frame lookup; `None` when either index is out of range.
    pub fn try_get_frame(&self, action_index: usize, frame_index: usize) -> Option<&Frame> {
        self.actions.get(action_index)?.frames.get(frame_index)
    }

    /// Sprite table lookup; `None` for negative or out-of-range indices.
    pub fn sprite(&self, sprite_index: i32) -> Option<&SpriteImage> {
        let index = usize::try_from(sprite_index).ok()?;
        self.sprites.get(index)
    }

    /// Whether this act carries the reserved overlay semantics.
    pub fn is_overlay(&self) -> bool {
        OVERLAY_ACT_NAMES.contains(&self.name.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/act.rs"]
mod tests;
