// Host-side tests for record validation, the feedback form model and colors.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod model {
        include!("../src/core/model.rs");
    }
}

use crate::core::color::*;
use crate::core::model::*;
use chrono::{TimeZone, Utc};

fn new_candle() -> NewCandle {
    NewCandle {
        name: "Evening Calm".to_string(),
        recipient_name: "Sam".to_string(),
        color: "#f5e6d3".to_string(),
        scents: vec![
            Scent::new("Lavender", "floral and soft", 0.7).with_color("#b57edc"),
            Scent::new("Cedar", "dry wood", 0.3).with_color("#8b5a2b"),
        ],
        aromatherapy_description: None,
        recommended_uses: vec!["reading".to_string()],
        image_url: None,
        video_url: None,
    }
}

fn candle() -> Candle {
    new_candle().into_candle("c1".to_string(), Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

#[test]
fn complete_candle_is_valid() {
    assert_eq!(new_candle().validate(), Ok(()));
}

#[test]
fn candle_requires_top_level_fields() {
    let mut c = new_candle();
    c.name = "  ".to_string();
    assert_eq!(c.validate(), Err(ValidationError::MissingField("name")));

    let mut c = new_candle();
    c.recipient_name.clear();
    assert_eq!(c.validate(), Err(ValidationError::MissingField("recipient_name")));

    let mut c = new_candle();
    c.color.clear();
    assert_eq!(c.validate(), Err(ValidationError::MissingField("color")));

    let mut c = new_candle();
    c.scents.clear();
    assert_eq!(c.validate(), Err(ValidationError::NoScents));
}

#[test]
fn candle_holds_at_most_four_scents() {
    let mut c = new_candle();
    c.scents.push(Scent::new("Vanilla", "sweet", 0.4).with_color("#f3e5ab"));
    c.scents.push(Scent::new("Citrus", "bright", 0.5).with_color("#ffa500"));
    assert_eq!(c.validate(), Ok(()));

    c.scents.push(Scent::new("Mint", "cool", 0.2).with_color("#98ff98"));
    assert_eq!(
        c.validate(),
        Err(ValidationError::TooManyScents { count: 5, max: 4 })
    );
}

#[test]
fn search_matches_candle_or_recipient_ignoring_case() {
    let c = candle();
    assert!(c.matches_search("evening"));
    assert!(c.matches_search("CALM"));
    assert!(c.matches_search("sa"));
    assert!(c.matches_search(""));
    assert!(c.matches_search("   "));
    assert!(!c.matches_search("morning"));
}

#[test]
fn candle_rejects_incomplete_scents() {
    let mut c = new_candle();
    c.scents[1].description.clear();
    assert_eq!(
        c.validate(),
        Err(ValidationError::ScentField {
            index: 1,
            field: "description"
        })
    );

    let mut c = new_candle();
    c.scents[0].color = None;
    assert_eq!(
        c.validate(),
        Err(ValidationError::ScentField {
            index: 0,
            field: "color"
        })
    );

    let mut c = new_candle();
    c.scents[0].intensity = 1.5;
    assert!(matches!(
        c.validate(),
        Err(ValidationError::IntensityOutOfRange { .. })
    ));

    let mut c = new_candle();
    c.scents[1].name = "Lavender".to_string();
    assert_eq!(
        c.validate(),
        Err(ValidationError::DuplicateScent("Lavender".to_string()))
    );
}

#[test]
fn scent_json_color_is_optional() {
    let s: Scent = serde_json::from_str(r#"{"name":"Smoke","description":"","intensity":0.4}"#)
        .expect("valid scent");
    assert_eq!(s.color, None);
    assert_eq!(s.rgb(), Rgb::BLACK);
}

#[test]
fn clamped_intensity_guards_the_render_math() {
    assert_eq!(Scent::new("a", "", -0.5).clamped_intensity(), 0.0);
    assert_eq!(Scent::new("a", "", 2.0).clamped_intensity(), 1.0);
    assert_eq!(Scent::new("a", "", f32::NAN).clamped_intensity(), 0.0);
    assert_eq!(Scent::new("a", "", 0.25).clamped_intensity(), 0.25);
}

#[test]
fn feedback_validation_checks_ratings() {
    let ok = NewFeedback {
        candle_id: "c1".to_string(),
        scent_feedback: vec![ScentRating::new("Lavender", 0.5)],
        comment: None,
    };
    assert_eq!(ok.validate(), Ok(()));

    let mut bad = ok.clone();
    bad.scent_feedback[0].intensity = f32::NAN;
    assert!(matches!(
        bad.validate(),
        Err(ValidationError::IntensityOutOfRange { .. })
    ));

    let mut bad = ok.clone();
    bad.candle_id.clear();
    assert_eq!(bad.validate(), Err(ValidationError::MissingField("candle_id")));
}

#[test]
fn feedback_record_drops_blank_comment() {
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let f = NewFeedback {
        candle_id: "c1".to_string(),
        scent_feedback: vec![],
        comment: Some("   ".to_string()),
    };
    assert_eq!(f.into_record(at).comment, None);

    let f = NewFeedback {
        candle_id: "c1".to_string(),
        scent_feedback: vec![],
        comment: Some("  warm  ".to_string()),
    };
    assert_eq!(f.into_record(at).comment.as_deref(), Some("warm"));
}

#[test]
fn draft_starts_every_scent_at_the_middle() {
    let draft = FeedbackDraft::for_candle(&candle());
    assert_eq!(draft.candle_id, "c1");
    assert_eq!(draft.ratings.len(), 2);
    assert_eq!(draft.rating("Lavender"), Some(0.5));
    assert_eq!(draft.rating("Cedar"), Some(0.5));
    assert_eq!(draft.rating("Rose"), None);
}

#[test]
fn draft_snaps_and_clamps_ratings() {
    let mut draft = FeedbackDraft::for_candle(&candle());
    assert!(draft.set_rating("Lavender", 0.73));
    assert!((draft.rating("Lavender").unwrap() - 0.7).abs() < 1e-5);
    assert!(draft.set_rating("Cedar", 3.0));
    assert_eq!(draft.rating("Cedar"), Some(1.0));
    assert!(draft.set_rating("Cedar", -1.0));
    assert_eq!(draft.rating("Cedar"), Some(0.0));
    assert!(!draft.set_rating("Rose", 0.2));
}

#[test]
fn draft_nudges_by_slider_steps() {
    let mut draft = FeedbackDraft::for_candle(&candle());
    assert!(draft.nudge("Lavender", 2));
    assert!((draft.rating("Lavender").unwrap() - 0.7).abs() < 1e-5);
    assert!(draft.nudge("Lavender", -10));
    assert_eq!(draft.rating("Lavender"), Some(0.0));
    assert!(!draft.nudge("Rose", 1));
}

#[test]
fn draft_becomes_a_valid_submission() {
    let mut draft = FeedbackDraft::for_candle(&candle());
    draft.comment = "  lovely gift ".to_string();
    let submission = draft.into_submission();
    assert_eq!(submission.validate(), Ok(()));
    assert_eq!(submission.comment.as_deref(), Some("lovely gift"));

    let blank = FeedbackDraft::for_candle(&candle()).into_submission();
    assert_eq!(blank.comment, None);
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgb::parse_hex("#b57edc"), Ok(Rgb::new(0xb5, 0x7e, 0xdc)));
    assert_eq!(Rgb::parse_hex("#FFF"), Ok(Rgb::new(255, 255, 255)));
    assert_eq!(Rgb::parse_hex(" #000000 "), Ok(Rgb::BLACK));
}

#[test]
fn bad_colors_are_reported() {
    assert!(matches!(Rgb::parse_hex("b57edc"), Err(ColorError::MissingHash(_))));
    assert!(matches!(Rgb::parse_hex("#12345"), Err(ColorError::BadLength(_))));
    assert!(matches!(Rgb::parse_hex("#zzzzzz"), Err(ColorError::BadDigit(_))));
    assert!(matches!(Rgb::parse_hex("#ééé"), Err(ColorError::BadDigit(_))));
    assert!(matches!(Rgb::parse_hex("#+f+f+f"), Err(ColorError::BadDigit(_))));
    assert!(matches!(Rgb::parse_hex("#+ff"), Err(ColorError::BadDigit(_))));
    assert!(matches!(Rgb::parse_hex("#-1ffff"), Err(ColorError::BadDigit(_))));
}

#[test]
fn missing_or_bad_color_falls_back_to_black() {
    assert_eq!(Rgb::from_optional(None), Rgb::BLACK);
    assert_eq!(Rgb::from_optional(Some("")), Rgb::BLACK);
    assert_eq!(Rgb::from_optional(Some("teal")), Rgb::BLACK);
    assert_eq!(Rgb::from_optional(Some("#0f0")), Rgb::new(0, 255, 0));
}

#[test]
fn css_rgba_clamps_alpha() {
    let c = Rgb::new(10, 20, 30);
    assert_eq!(c.css_rgba(0.5), "rgba(10, 20, 30, 0.500)");
    assert_eq!(c.css_rgba(2.0), "rgba(10, 20, 30, 1.000)");
    assert_eq!(c.css_rgba(f32::NAN), "rgba(10, 20, 30, 0.000)");
    assert_eq!(c.to_string(), "#0a141e");
}
