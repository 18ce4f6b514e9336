use super::color::Rgb;
use super::constants::{FEEDBACK_DEFAULT_RATING, FEEDBACK_RATING_STEP, MAX_SCENTS_PER_CANDLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Record types shared by the visualization, the feedback summary and the
// store. Field names follow the JSON the pages exchange (snake_case).

pub type CandleId = String;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("a candle needs at least one scent")]
    NoScents,
    #[error("a candle holds at most {max} scents, got {count}")]
    TooManyScents { count: usize, max: usize },
    #[error("scent #{index} is missing `{field}`")]
    ScentField { index: usize, field: &'static str },
    #[error("scent `{0}` appears more than once")]
    DuplicateScent(String),
    #[error("intensity for `{name}` must be within [0, 1], got {value}")]
    IntensityOutOfRange { name: String, value: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub intensity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Scent {
    pub fn new(name: impl Into<String>, description: impl Into<String>, intensity: f32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            intensity,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Intensity clamped to [0, 1]; NaN reads as 0.
    #[inline]
    pub fn clamped_intensity(&self) -> f32 {
        if self.intensity.is_finite() {
            self.intensity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[inline]
    pub fn rgb(&self) -> Rgb {
        Rgb::from_optional(self.color.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub id: CandleId,
    pub name: String,
    pub recipient_name: String,
    pub color: String,
    pub scents: Vec<Scent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aromatherapy_description: Option<String>,
    #[serde(default)]
    pub recommended_uses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Candle {
    /// Case-insensitive substring match on the candle or recipient name. A
    /// blank term matches every candle.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self.recipient_name.to_lowercase().contains(&term)
    }
}

/// Payload for creating a candle, or replacing an existing one's contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCandle {
    pub name: String,
    pub recipient_name: String,
    pub color: String,
    pub scents: Vec<Scent>,
    #[serde(default)]
    pub aromatherapy_description: Option<String>,
    #[serde(default)]
    pub recommended_uses: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

pub type CandleUpdate = NewCandle;

impl NewCandle {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.recipient_name.trim().is_empty() {
            return Err(ValidationError::MissingField("recipient_name"));
        }
        if self.color.trim().is_empty() {
            return Err(ValidationError::MissingField("color"));
        }
        if self.scents.is_empty() {
            return Err(ValidationError::NoScents);
        }
        if self.scents.len() > MAX_SCENTS_PER_CANDLE {
            return Err(ValidationError::TooManyScents {
                count: self.scents.len(),
                max: MAX_SCENTS_PER_CANDLE,
            });
        }
        for (index, scent) in self.scents.iter().enumerate() {
            if scent.name.trim().is_empty() {
                return Err(ValidationError::ScentField { index, field: "name" });
            }
            if scent.description.trim().is_empty() {
                return Err(ValidationError::ScentField {
                    index,
                    field: "description",
                });
            }
            if scent.color.as_deref().map_or(true, |c| c.trim().is_empty()) {
                return Err(ValidationError::ScentField {
                    index,
                    field: "color",
                });
            }
            check_intensity(&scent.name, scent.intensity)?;
            if self.scents[..index].iter().any(|s| s.name == scent.name) {
                return Err(ValidationError::DuplicateScent(scent.name.clone()));
            }
        }
        Ok(())
    }

    pub fn into_candle(self, id: CandleId, created_at: DateTime<Utc>) -> Candle {
        Candle {
            id,
            name: self.name,
            recipient_name: self.recipient_name,
            color: self.color,
            scents: self.scents,
            aromatherapy_description: self.aromatherapy_description,
            recommended_uses: self.recommended_uses,
            image_url: self.image_url,
            video_url: self.video_url,
            created_at,
        }
    }
}

fn check_intensity(name: &str, value: f32) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::IntensityOutOfRange {
            name: name.to_string(),
            value,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScentRating {
    pub scent_name: String,
    pub intensity: f32,
}

impl ScentRating {
    pub fn new(scent_name: impl Into<String>, intensity: f32) -> Self {
        Self {
            scent_name: scent_name.into(),
            intensity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub candle_id: CandleId,
    #[serde(default)]
    pub scent_feedback: Vec<ScentRating>,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A recipient's submission before the store stamps it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub candle_id: CandleId,
    pub scent_feedback: Vec<ScentRating>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewFeedback {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.candle_id.trim().is_empty() {
            return Err(ValidationError::MissingField("candle_id"));
        }
        for (index, rating) in self.scent_feedback.iter().enumerate() {
            if rating.scent_name.trim().is_empty() {
                return Err(ValidationError::ScentField {
                    index,
                    field: "scent_name",
                });
            }
            check_intensity(&rating.scent_name, rating.intensity)?;
        }
        Ok(())
    }

    pub fn into_record(self, created_at: DateTime<Utc>) -> FeedbackRecord {
        FeedbackRecord {
            candle_id: self.candle_id,
            scent_feedback: self.scent_feedback,
            comment: self
                .comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            created_at,
        }
    }
}

/// Form state for the "share your experience" card: one slider per scent.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackDraft {
    pub candle_id: CandleId,
    pub ratings: Vec<ScentRating>,
    pub comment: String,
}

impl FeedbackDraft {
    pub fn for_candle(candle: &Candle) -> Self {
        Self {
            candle_id: candle.id.clone(),
            ratings: candle
                .scents
                .iter()
                .map(|s| ScentRating::new(s.name.clone(), FEEDBACK_DEFAULT_RATING))
                .collect(),
            comment: String::new(),
        }
    }

    pub fn rating(&self, scent_name: &str) -> Option<f32> {
        self.ratings
            .iter()
            .find(|r| r.scent_name == scent_name)
            .map(|r| r.intensity)
    }

    /// Set a slider value, snapped to the slider step. Returns false for
    /// scents the candle does not have.
    pub fn set_rating(&mut self, scent_name: &str, value: f32) -> bool {
        match self.ratings.iter_mut().find(|r| r.scent_name == scent_name) {
            Some(r) => {
                r.intensity = snap_rating(value);
                true
            }
            None => false,
        }
    }

    pub fn nudge(&mut self, scent_name: &str, steps: i32) -> bool {
        match self.rating(scent_name) {
            Some(current) => {
                self.set_rating(scent_name, current + steps as f32 * FEEDBACK_RATING_STEP)
            }
            None => false,
        }
    }

    pub fn into_submission(self) -> NewFeedback {
        let comment = self.comment.trim();
        NewFeedback {
            candle_id: self.candle_id,
            scent_feedback: self.ratings,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        }
    }
}

#[inline]
fn snap_rating(value: f32) -> f32 {
    if !value.is_finite() {
        return FEEDBACK_DEFAULT_RATING;
    }
    let steps = (value / FEEDBACK_RATING_STEP).round();
    (steps * FEEDBACK_RATING_STEP).clamp(0.0, 1.0)
}
