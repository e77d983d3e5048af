use super::*;

#[test]
fn device_scale_rejects_degenerate_values() {
    assert!(DeviceScale::new(0.0).is_err());
    assert!(DeviceScale::new(-1.0).is_err());
    assert!(DeviceScale::new(f64::NAN).is_err());
    assert!(DeviceScale::new(1.25).is_ok());
}

#[test]
fn device_scale_validates_on_conversion() {
    // Deserialization goes through TryFrom, so decoded documents cannot
    // smuggle in a scale that new() would reject.
    assert!(DeviceScale::try_from(0.0).is_err());
    assert!(DeviceScale::try_from(f64::INFINITY).is_err());
    assert_eq!(DeviceScale::try_from(2.0).unwrap(), DeviceScale::new(2.0).unwrap());
}

#[test]
fn snap_rounds_to_device_pixel_multiples() {
    let one = DeviceScale::ONE;
    assert_eq!(one.snap(3.4), 3.0);
    assert_eq!(one.snap(3.6), 4.0);

    let two = DeviceScale::new(2.0).unwrap();
    assert_eq!(two.snap(3.3), 3.5);
    assert_eq!(two.snap(3.2), 3.0);
}

#[test]
fn white_tint_is_all_channels_max() {
    let white = Rgba8::WHITE;
    assert_eq!((white.r, white.g, white.b, white.a), (255, 255, 255, 255));
    assert_eq!(Rgba8::TRANSPARENT.a, 0);
}
