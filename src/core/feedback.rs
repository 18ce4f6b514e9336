use super::constants::{RECENT_COMMENT_LIMIT, VERDICT_TOO_LIGHT_BELOW, VERDICT_TOO_STRONG_ABOVE};
use super::model::FeedbackRecord;
use fnv::FnvHashMap;
use serde::Serialize;

/// Where an average rating lands on the "too light / perfect / too strong"
/// slider the recipients used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    TooLight,
    Perfect,
    TooStrong,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScentFeedbackSummary {
    pub name: String,
    pub average_intensity: f32,
    pub sample_count: usize,
}

impl ScentFeedbackSummary {
    pub fn verdict(&self) -> Verdict {
        if self.average_intensity < VERDICT_TOO_LIGHT_BELOW {
            Verdict::TooLight
        } else if self.average_intensity > VERDICT_TOO_STRONG_ABOVE {
            Verdict::TooStrong
        } else {
            Verdict::Perfect
        }
    }

    pub fn ratings_label(&self) -> String {
        match self.sample_count {
            1 => "1 rating".to_string(),
            n => format!("{n} ratings"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FeedbackSummary {
    /// One entry per rated scent, in first-seen order.
    pub summaries: Vec<ScentFeedbackSummary>,
    pub recent_comments: Vec<String>,
}

impl FeedbackSummary {
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty() && self.recent_comments.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScentFeedbackSummary> {
        self.summaries.iter().find(|s| s.name == name)
    }
}

pub fn aggregate(records: &[FeedbackRecord]) -> FeedbackSummary {
    aggregate_with_limit(records, RECENT_COMMENT_LIMIT)
}

/// Average every scent's ratings across `records` and keep the first
/// `comment_limit` non-empty comments as written. Scents nobody rated are
/// absent.
pub fn aggregate_with_limit(records: &[FeedbackRecord], comment_limit: usize) -> FeedbackSummary {
    let mut index: FnvHashMap<&str, usize> = FnvHashMap::default();
    let mut totals: Vec<(&str, f64, usize)> = Vec::new();

    for record in records {
        for rating in &record.scent_feedback {
            let slot = *index.entry(rating.scent_name.as_str()).or_insert_with(|| {
                totals.push((rating.scent_name.as_str(), 0.0, 0));
                totals.len() - 1
            });
            let (_, sum, count) = &mut totals[slot];
            *sum += rating.intensity as f64;
            *count += 1;
        }
    }

    let summaries = totals
        .into_iter()
        .map(|(name, sum, count)| ScentFeedbackSummary {
            name: name.to_string(),
            average_intensity: (sum / count as f64) as f32,
            sample_count: count,
        })
        .collect();

    let recent_comments = records
        .iter()
        .filter_map(|r| r.comment.as_deref())
        .filter(|c| !c.is_empty())
        .take(comment_limit)
        .map(str::to_string)
        .collect();

    FeedbackSummary {
        summaries,
        recent_comments,
    }
}
