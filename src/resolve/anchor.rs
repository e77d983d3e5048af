use crate::foundation::core::Vec2;
use crate::model::act::{Act, Anchor};

/// Resolve the positional correction that aligns `act`'s frame with the
/// act(s) it is anchored to.
///
/// Returns `(0, 0)` when the act has no anchor reference, when the current
/// frame declares no anchor, or when no reference frame/anchor resolves;
/// missing anchor data is never an error.
///
/// The reference frame is looked up at `(action_index, frame_index)` first;
/// when absent (the reference act has fewer frames, e.g. an overlay pair with
/// both reserved names set), the lookup retries at `bucket_anchor`. When the
/// chain has a second level and that level resolves, its correction
/// *replaces* the first level's rather than adding to it (preserved
/// reference behavior).
pub fn resolve_anchor_correction(
    act: &Act,
    action_index: usize,
    frame_index: usize,
    bucket_anchor: Option<usize>,
) -> Vec2 {
    let Some(current) = act
        .try_get_frame(action_index, frame_index)
        .and_then(|frame| frame.anchor())
    else {
        return Vec2::ZERO;
    };
    let Some(reference) = act.anchored_to() else {
        return Vec2::ZERO;
    };

    let mut correction =
        level_diff(reference, current, action_index, frame_index, bucket_anchor)
            .unwrap_or(Vec2::ZERO);

    if let Some(second) = reference.anchored_to()
        && let Some(diff) = level_diff(second, current, action_index, frame_index, bucket_anchor)
    {
        correction = diff;
    }

    correction
}

fn level_diff(
    reference: &Act,
    current: &Anchor,
    action_index: usize,
    frame_index: usize,
    bucket_anchor: Option<usize>,
) -> Option<Vec2> {
    let frame = reference
        .try_get_frame(action_index, frame_index)
        .or_else(|| {
            bucket_anchor.and_then(|retry| reference.try_get_frame(action_index, retry))
        })?;
    let anchor = frame.anchor()?;
    Some(Vec2::new(
        f64::from(anchor.offset_x - current.offset_x),
        f64::from(anchor.offset_y - current.offset_y),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/anchor.rs"]
mod tests;
