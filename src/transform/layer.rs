use crate::foundation::core::{Affine, DeviceScale, Rect, Vec2};
use crate::model::act::Layer;

/// Compose the final affine placement of one layer.
///
/// The composition applied to a point, first listed first:
///
/// 1. center the image on its own pivot: translate by
///    `(-((w+1)/2) + extra_x, -((h+1)/2))` in integer math, where
///    `extra_x = -((w+1) % 2)` when mirrored (keeps even-width mirrored
///    sprites pixel-aligned) and `0` otherwise;
/// 2. scale, with the mirror flag folded into the sign of X;
/// 3. rotate by the layer's rotation in degrees;
/// 4. translate to the frame position plus the anchor correction.
///
/// The view transform (pan/zoom) is composed in only at draw time, never
/// here, so cached layer transforms stay valid across camera changes.
pub fn compute_layer_transform(
    layer: &Layer,
    src_width: i32,
    src_height: i32,
    correction: Vec2,
) -> Affine {
    let center_x = (src_width + 1) / 2;
    let center_y = (src_height + 1) / 2;
    let extra_x = if layer.mirror {
        -((src_width + 1) % 2)
    } else {
        0
    };
    let center = Affine::translate((
        f64::from(-center_x + extra_x),
        f64::from(-center_y),
    ));

    let scale_x = f64::from(layer.scale_x) * if layer.mirror { -1.0 } else { 1.0 };
    let scale = Affine::scale_non_uniform(scale_x, f64::from(layer.scale_y));

    let rotate = Affine::rotate(f64::from(layer.rotation).to_radians());

    let position = Affine::translate((
        f64::from(layer.offset_x) + correction.x,
        f64::from(layer.offset_y) + correction.y,
    ));

    position * rotate * scale * center
}

/// Selection-outline thickness in image space for a layer drawn at
/// `base_px` device pixels.
///
/// The outline divides by the layer scale so it stays a constant on-screen
/// width; a zero scale on either axis yields thickness `0` instead of a
/// division fault.
pub fn outline_thickness(base_px: f64, layer: &Layer) -> f64 {
    if layer.scale_x == 0.0 || layer.scale_y == 0.0 {
        return 0.0;
    }
    let max_scale = f64::from(layer.scale_x.abs().max(layer.scale_y.abs()));
    base_px / max_scale
}

/// Snap only the translation component of `transform` to device pixels.
///
/// Scale and rotation stay continuous; rounding translation to the nearest
/// `1 / device_scale` avoids 1-pixel seams between adjacent sprites at
/// fractional zoom levels.
pub fn snap_translation(transform: Affine, device_scale: DeviceScale) -> Affine {
    let t = transform.translation();
    transform.with_translation(Vec2::new(device_scale.snap(t.x), device_scale.snap(t.y)))
}

/// Snap a drawn rectangle's extents to device pixels.
///
/// Width and height fall out of the snapped extents rather than being
/// snapped directly, so two rectangles sharing an edge keep sharing it.
pub fn snap_rect(rect: Rect, device_scale: DeviceScale) -> Rect {
    Rect::new(
        device_scale.snap(rect.x0),
        device_scale.snap(rect.y0),
        device_scale.snap(rect.x1),
        device_scale.snap(rect.y1),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/transform/layer.rs"]
mod tests;
