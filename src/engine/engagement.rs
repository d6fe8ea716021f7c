use std::cmp::Ordering;
use std::hash::Hash;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One time-stamped engagement observation. Samples are immutable once
/// recorded and are never deduplicated; a repeated reading simply counts
/// twice in its bucket's mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSample {
    pub timestamp: DateTime<Utc>,
    /// Engagement level on a 0-100 scale.
    pub engagement: f64,
    pub reach: u64,
    pub active_users: u64,
}

impl EngagementSample {
    pub fn day_of_week(&self) -> Weekday {
        self.timestamp.weekday()
    }

    pub fn hour_of_day(&self) -> u32 {
        self.timestamp.hour()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketScore<K> {
    pub bucket: K,
    pub average_engagement: f64,
    pub sample_count: usize,
}

/// Group samples by `key_fn`, average engagement per group, and return the
/// top `top_n` buckets sorted by descending mean. Ties keep first-appearance
/// order: grouping preserves insertion order and the sort is stable, so the
/// result is deterministic for a fixed input ordering. Buckets with no
/// samples are never emitted, so the mean never divides by zero.
pub fn rank_buckets<K, F>(
    samples: &[EngagementSample],
    key_fn: F,
    top_n: usize,
) -> Vec<BucketScore<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&EngagementSample) -> K,
{
    let mut groups: IndexMap<K, (f64, usize)> = IndexMap::new();
    for sample in samples {
        let entry = groups.entry(key_fn(sample)).or_insert((0.0, 0));
        entry.0 += sample.engagement;
        entry.1 += 1;
    }

    let mut ranked: Vec<BucketScore<K>> = groups
        .into_iter()
        .map(|(bucket, (sum, count))| BucketScore {
            bucket,
            average_engagement: sum / count as f64,
            sample_count: count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_engagement
            .partial_cmp(&a.average_engagement)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

/// Best posting days. Same operation as [`rank_hours`], only the bucket
/// extractor differs.
pub fn rank_days(samples: &[EngagementSample], top_n: usize) -> Vec<BucketScore<Weekday>> {
    rank_buckets(samples, EngagementSample::day_of_week, top_n)
}

/// Best posting hours (0-23).
pub fn rank_hours(samples: &[EngagementSample], top_n: usize) -> Vec<BucketScore<u32>> {
    rank_buckets(samples, EngagementSample::hour_of_day, top_n)
}
