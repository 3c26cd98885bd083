use crate::*;

#[test]
fn sign_classifier_is_three_way() {
    let c = SignColorClassifier;
    assert_eq!(c.color_for(-0.5), ColorToken::Negative);
    assert_eq!(c.color_for(0.0), ColorToken::Neutral);
    assert_eq!(c.color_for(-0.0), ColorToken::Neutral);
    assert_eq!(c.color_for(f64::NAN), ColorToken::Neutral);
    assert_eq!(c.color_for(3.0), ColorToken::Positive);
}

#[test]
fn interval_color_needs_both_bounds_on_one_side() {
    assert_eq!(ColorToken::for_interval(-5.0, -1.0), ColorToken::Negative);
    assert_eq!(ColorToken::for_interval(1.0, 5.0), ColorToken::Positive);
    assert_eq!(ColorToken::for_interval(-2.0, 4.0), ColorToken::Neutral);
    assert_eq!(ColorToken::for_interval(0.0, 4.0), ColorToken::Neutral);
    assert_eq!(ColorToken::for_interval(-4.0, 0.0), ColorToken::Neutral);
    assert_eq!(ColorToken::for_interval(0.0, 0.0), ColorToken::Neutral);
}

#[test]
fn closures_can_stand_in_for_the_classifier() {
    let always_positive = |_: f64| ColorToken::Positive;
    assert_eq!(always_positive.color_for(-10.0), ColorToken::Positive);
}

#[test]
fn default_palette_matches_track_colors() {
    let palette = ColorPalette::default();
    assert_eq!(palette.css(ColorToken::Negative), "#f00");
    assert_eq!(palette.css(ColorToken::Neutral), "#a0a0a0");
    assert_eq!(palette.css(ColorToken::Positive), "#239126");
}

#[test]
fn tokens_serialize_lowercase() {
    assert_eq!(
        serde_json::to_value(ColorToken::Negative).unwrap(),
        serde_json::json!("negative")
    );
    assert_eq!(ColorToken::Positive.to_string(), "positive");
}
