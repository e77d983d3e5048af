use std::ops::Range;

use crate::model::act::Act;

/// Action index ranges whose overlay poses are stored compressed.
const BUCKET_ACTION_RANGES: [Range<usize>; 2] = [0..8, 16..24];

/// Number of frames an overlay action uses to represent a full pose range.
const BUCKET_COUNT: usize = 3;

/// Result of [`resolve_effective_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameResolution {
    /// Frame index to read layers from.
    pub effective: usize,
    /// Original requested frame index, kept when the bucket rule fired so
    /// the anchor resolver can retry reference lookups with it.
    pub bucket_anchor: Option<usize>,
}

/// Resolve the frame an act actually displays for `(action_index, requested)`.
///
/// Default rule: out-of-range frame indices wrap via modulo; an empty (or
/// missing) action clamps to frame `0`.
///
/// Bucket rule: the reserved "Head"/"Body" overlay acts store certain pose
/// ranges compressed to exactly [`BUCKET_COUNT`] frames. When this act is an
/// overlay, the action index falls in one of [`BUCKET_ACTION_RANGES`], the
/// action holds exactly 3 frames, and the anchored-to act declares a non-empty
/// frame range for the same action, the requested index is bucketed into one
/// of 3 equal-width groups of the richer act's range: `[0,g) -> 0`,
/// `[g,2g) -> 1`, `[2g,inf) -> 2` where `g = reference_count / 3`.
pub fn resolve_effective_frame(
    act: &Act,
    action_index: usize,
    requested: usize,
) -> FrameResolution {
    if let Some(resolution) = resolve_bucketed(act, action_index, requested) {
        return resolution;
    }

    let frame_count = act
        .action(action_index)
        .map(|action| action.frames.len())
        .unwrap_or(0);
    let effective = if frame_count == 0 {
        0
    } else {
        requested % frame_count
    };
    FrameResolution {
        effective,
        bucket_anchor: None,
    }
}

fn resolve_bucketed(act: &Act, action_index: usize, requested: usize) -> Option<FrameResolution> {
    if !act.is_overlay() {
        return None;
    }
    if !BUCKET_ACTION_RANGES
        .iter()
        .any(|range| range.contains(&action_index))
    {
        return None;
    }
    let action = act.action(action_index)?;
    if action.frames.len() != BUCKET_COUNT {
        return None;
    }

    let reference = act.anchored_to()?;
    let reference_count = reference.action(action_index)?.frames.len();
    let group = reference_count / BUCKET_COUNT;
    if group == 0 {
        return None;
    }

    Some(FrameResolution {
        effective: (requested / group).min(BUCKET_COUNT - 1),
        bucket_anchor: Some(requested),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/frame.rs"]
mod tests;
