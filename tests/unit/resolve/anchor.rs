use super::*;
use std::sync::Arc;

use crate::model::act::{Action, Frame};

fn frame_with_anchor(x: i32, y: i32) -> Frame {
    Frame {
        layers: vec![],
        anchors: vec![Anchor::new(x, y)],
    }
}

fn act_with(name: &str, frames: Vec<Frame>) -> Act {
    Act::new(
        name,
        vec![Action {
            frames,
            animation_speed: 1.0,
        }],
        vec![],
    )
}

#[test]
fn zero_correction_without_anchor_reference() {
    let act = act_with("Garment", vec![frame_with_anchor(3, 4)]);
    assert_eq!(resolve_anchor_correction(&act, 0, 0, None), Vec2::ZERO);
}

#[test]
fn zero_correction_when_current_frame_has_no_anchor() {
    let body = Arc::new(act_with("Body", vec![frame_with_anchor(10, 10)]));
    let mut head = act_with("Head", vec![Frame::default()]);
    head.anchor_to(Some(body)).unwrap();
    assert_eq!(resolve_anchor_correction(&head, 0, 0, None), Vec2::ZERO);
}

#[test]
fn zero_correction_when_reference_frame_lacks_anchor() {
    let body = Arc::new(act_with("Body", vec![Frame::default()]));
    let mut head = act_with("Head", vec![frame_with_anchor(1, 2)]);
    head.anchor_to(Some(body)).unwrap();
    assert_eq!(resolve_anchor_correction(&head, 0, 0, None), Vec2::ZERO);
}

#[test]
fn single_level_correction_is_anchor_difference() {
    let body = Arc::new(act_with("Body", vec![frame_with_anchor(10, 20)]));
    let mut head = act_with("Head", vec![frame_with_anchor(3, 5)]);
    head.anchor_to(Some(body)).unwrap();
    assert_eq!(
        resolve_anchor_correction(&head, 0, 0, None),
        Vec2::new(7.0, 15.0)
    );
}

#[test]
fn reference_lookup_retries_at_bucket_anchor_frame() {
    // Reference declares 6 frames; current frame index 2 comes from the
    // 3-frame compressed overlay, so the direct lookup succeeds; shrink the
    // reference instead so index 2 misses and the original request (5) also
    // misses or hits depending on the retry.
    let body = act_with(
        "Body",
        vec![
            frame_with_anchor(0, 0),
            frame_with_anchor(1, 1),
            frame_with_anchor(2, 2),
            frame_with_anchor(3, 3),
            frame_with_anchor(4, 4),
            frame_with_anchor(99, 99),
        ],
    );
    let body = Arc::new(body);

    let mut head = act_with(
        "Head",
        vec![
            frame_with_anchor(0, 0),
            frame_with_anchor(0, 0),
            frame_with_anchor(0, 0),
        ],
    );
    head.anchor_to(Some(body)).unwrap();

    // Direct hit: effective frame 2 exists in the reference.
    assert_eq!(
        resolve_anchor_correction(&head, 0, 2, Some(5)),
        Vec2::new(2.0, 2.0)
    );

    // Force a miss: frame index past the reference range retries at the
    // bucket anchor frame (5 -> anchor (99, 99)).
    assert_eq!(
        resolve_anchor_correction(&head, 0, 7, None),
        Vec2::ZERO // current frame 7 does not exist either
    );
    let mut tall_head = act_with(
        "Head",
        (0..8).map(|_| frame_with_anchor(0, 0)).collect(),
    );
    tall_head.anchor_to(head.anchored_to().cloned()).unwrap();
    assert_eq!(
        resolve_anchor_correction(&tall_head, 0, 7, Some(5)),
        Vec2::new(99.0, 99.0)
    );
}

#[test]
fn second_chain_level_replaces_first_level_correction() {
    let body = Arc::new(act_with("Body", vec![frame_with_anchor(100, 200)]));
    let mut head = act_with("Head", vec![frame_with_anchor(10, 20)]);
    head.anchor_to(Some(body)).unwrap();
    let head = Arc::new(head);

    let mut garment = act_with("Garment", vec![frame_with_anchor(1, 2)]);
    garment.anchor_to(Some(head)).unwrap();

    let correction = resolve_anchor_correction(&garment, 0, 0, None);
    // Replace, not add: the final correction is the second-level diff
    // (body - garment), not (head - garment) + (body - garment).
    assert_eq!(correction, Vec2::new(99.0, 198.0));
    assert_ne!(correction, Vec2::new(9.0 + 99.0, 18.0 + 198.0));
}

#[test]
fn unresolvable_second_level_keeps_first_level_correction() {
    let body = Arc::new(act_with("Body", vec![Frame::default()]));
    let mut head = act_with("Head", vec![frame_with_anchor(10, 20)]);
    head.anchor_to(Some(body)).unwrap();
    let head = Arc::new(head);

    let mut garment = act_with("Garment", vec![frame_with_anchor(1, 2)]);
    garment.anchor_to(Some(head)).unwrap();

    assert_eq!(
        resolve_anchor_correction(&garment, 0, 0, None),
        Vec2::new(9.0, 18.0)
    );
}
