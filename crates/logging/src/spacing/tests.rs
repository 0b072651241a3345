use super::Spacing;

#[test]
fn spacing_conversions_round_trip() {
    assert_eq!(Spacing::from(true), Spacing::Pad);
    assert_eq!(Spacing::from(false), Spacing::AsIs);

    let pad: bool = Spacing::Pad.into();
    assert!(pad);

    let pad: bool = Spacing::AsIs.into();
    assert!(!pad);
}

#[test]
fn default_spacing_pads() {
    assert_eq!(Spacing::default(), Spacing::Pad);
}
