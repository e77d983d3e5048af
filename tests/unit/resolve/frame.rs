use super::*;
use std::sync::Arc;

use crate::model::act::{Action, Frame};

fn act_with_frames(name: &str, action_count: usize, frame_count: usize) -> Act {
    let actions = (0..action_count)
        .map(|_| Action {
            frames: (0..frame_count).map(|_| Frame::default()).collect(),
            animation_speed: 1.0,
        })
        .collect();
    Act::new(name, actions, vec![])
}

fn head_anchored_to_body(body_frames: usize) -> Act {
    let body = Arc::new(act_with_frames("Body", 24, body_frames));
    let mut head = act_with_frames("Head", 24, 3);
    head.anchor_to(Some(body)).unwrap();
    head
}

#[test]
fn wraps_requested_frame_via_modulo() {
    let act = act_with_frames("Garment", 1, 5);
    for k in 0..4usize {
        for offset in 0..5usize {
            let requested = k * 5 + offset;
            let resolution = resolve_effective_frame(&act, 0, requested);
            assert_eq!(resolution.effective, offset);
            assert_eq!(resolution.bucket_anchor, None);
        }
    }
}

#[test]
fn clamps_to_zero_when_action_is_empty_or_missing() {
    let act = act_with_frames("Garment", 1, 0);
    assert_eq!(resolve_effective_frame(&act, 0, 7).effective, 0);
    assert_eq!(resolve_effective_frame(&act, 9, 7).effective, 0);
}

#[test]
fn buckets_compressed_overlay_ranges() {
    // group = 8 / 3 = 2: [0,2) -> 0, [2,4) -> 1, [4, inf) -> 2
    let head = head_anchored_to_body(8);
    let expected = [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2), (100, 2)];
    for (requested, bucket) in expected {
        let resolution = resolve_effective_frame(&head, 0, requested);
        assert_eq!(resolution.effective, bucket, "requested {requested}");
        assert_eq!(resolution.bucket_anchor, Some(requested));
    }
}

#[test]
fn bucket_rule_applies_in_second_reserved_action_range() {
    let head = head_anchored_to_body(6);
    // group = 2 again, action 16 is inside [16, 24)
    assert_eq!(resolve_effective_frame(&head, 16, 3).effective, 1);
    assert_eq!(resolve_effective_frame(&head, 23, 5).effective, 2);
}

#[test]
fn bucket_rule_skips_actions_outside_reserved_ranges() {
    let head = head_anchored_to_body(8);
    // action 8 is outside [0,8) and [16,24): default modulo over 3 frames
    assert_eq!(resolve_effective_frame(&head, 8, 5).effective, 2);
    assert_eq!(resolve_effective_frame(&head, 8, 5).bucket_anchor, None);
}

#[test]
fn bucket_rule_requires_reserved_name() {
    let body = Arc::new(act_with_frames("Body", 24, 8));
    let mut garment = act_with_frames("Garment", 24, 3);
    garment.anchor_to(Some(body)).unwrap();
    let resolution = resolve_effective_frame(&garment, 0, 5);
    assert_eq!(resolution.effective, 2); // 5 % 3
    assert_eq!(resolution.bucket_anchor, None);
}

#[test]
fn bucket_rule_requires_exactly_three_frames() {
    let body = Arc::new(act_with_frames("Body", 24, 8));
    let mut head = act_with_frames("Head", 24, 4);
    head.anchor_to(Some(body)).unwrap();
    let resolution = resolve_effective_frame(&head, 0, 5);
    assert_eq!(resolution.effective, 1); // 5 % 4
    assert_eq!(resolution.bucket_anchor, None);
}

#[test]
fn zero_group_falls_through_to_modulo() {
    // reference has 2 frames: group = 2 / 3 = 0
    let head = head_anchored_to_body(2);
    let resolution = resolve_effective_frame(&head, 0, 5);
    assert_eq!(resolution.effective, 2); // 5 % 3
    assert_eq!(resolution.bucket_anchor, None);
}

#[test]
fn unanchored_overlay_uses_default_rule() {
    let head = act_with_frames("Head", 24, 3);
    let resolution = resolve_effective_frame(&head, 0, 5);
    assert_eq!(resolution.effective, 2);
    assert_eq!(resolution.bucket_anchor, None);
}
