//! Per-creator reductions over the flat list of dataset items.
//!
//! Items are keyed by the merge key of `channel.username`, ordered newest
//! first within each key, capped at `cap` items per key, and then reduced
//! three ways:
//!
//! - **profile**: first non-missing `channel.url` and `channel.bio`, maximum
//!   `channel.followers`;
//! - **stats**: median `views`, median `bookmarks`, first non-missing `title`,
//!   latest `uploadedAtFormatted`;
//! - **media**: `video.cover` of each retained item, in order.
//!
//! The stats reduction only exists when the data carries both `views` and
//! `bookmarks`; the media reduction only when it carries `video`.

use std::cmp::Ordering;
use std::collections::HashMap;

use vidscout_core::merge_key;

use crate::record::{Field, RawRecord};

/// Owner name used when an item has no `channel.username`.
pub const UNKNOWN_OWNER: &str = "Unknown";

const RECENCY_FIELD: &str = "uploadedAtFormatted";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileAggregate {
    pub profile_url: Option<String>,
    pub bio: Option<String>,
    pub followers: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsAggregate {
    pub play_median: Option<f64>,
    pub collect_median: Option<f64>,
    pub title: Option<String>,
    pub last_post_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaAggregate {
    /// Thumbnail per retained item, newest first. Items without a cover
    /// keep their slot as `None`.
    pub images: Vec<Option<String>>,
}

/// The three per-key tables. A `None` table means its source fields never
/// appeared in the data, so its columns do not exist downstream.
#[derive(Debug, Clone, Default)]
pub struct Aggregates {
    pub profiles: Option<HashMap<String, ProfileAggregate>>,
    pub stats: Option<HashMap<String, StatsAggregate>>,
    pub media: Option<HashMap<String, MediaAggregate>>,
}

impl Aggregates {
    /// Widest media list across all keys; the number of image columns.
    #[must_use]
    pub fn media_width(&self) -> usize {
        self.media
            .as_ref()
            .and_then(|m| m.values().map(|a| a.images.len()).max())
            .unwrap_or(0)
    }
}

/// A recency value as found on an item. Numeric values (JSON numbers or
/// numeric strings) compare numerically with each other and rank below
/// textual ones; text compares lexically, which orders ISO-8601 timestamps.
#[derive(Debug, Clone)]
struct Recency {
    text: String,
    number: Option<f64>,
}

impl Recency {
    fn from_field(field: Field<'_>) -> Option<Self> {
        let text = field.as_text()?;
        Some(Self {
            number: field.as_number(),
            text,
        })
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.text.cmp(&other.text),
        }
    }
}

struct Keyed {
    key: String,
    recency: Option<Recency>,
    record: RawRecord,
}

/// Reduces `records` into [`Aggregates`], keeping at most `cap` items per key.
///
/// An empty input produces empty [`Aggregates`] with every table `None`.
#[must_use]
pub fn aggregate(records: Vec<RawRecord>, cap: usize) -> Aggregates {
    if records.is_empty() {
        return Aggregates::default();
    }

    let has_recency = records.iter().any(|r| r.has_key(RECENCY_FIELD));
    let has_stats = records.iter().any(|r| r.has_key("views"))
        && records.iter().any(|r| r.has_key("bookmarks"));
    let has_media = records.iter().any(|r| r.has_key("video"));

    let mut keyed: Vec<Keyed> = records
        .into_iter()
        .map(|record| {
            let owner = record
                .nested("channel", "username")
                .as_text()
                .unwrap_or_else(|| UNKNOWN_OWNER.to_owned());
            Keyed {
                key: merge_key(&owner),
                recency: Recency::from_field(record.field(RECENCY_FIELD)),
                record,
            }
        })
        .collect();

    if has_recency {
        // Stable: equal timestamps keep their input relative order.
        keyed.sort_by(|a, b| {
            a.key
                .cmp(&b.key)
                .then_with(|| newest_first(a.recency.as_ref(), b.recency.as_ref()))
        });
    }

    let retained = truncate_per_key(keyed, cap);
    tracing::debug!(retained = retained.len(), cap, "items retained after per-key cap");

    Aggregates {
        profiles: Some(reduce_profiles(&retained)),
        stats: has_stats.then(|| reduce_stats(&retained)),
        media: has_media.then(|| reduce_media(&retained)),
    }
}

/// Descending order with missing values last.
fn newest_first(a: Option<&Recency>, b: Option<&Recency>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.compare(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn truncate_per_key(keyed: Vec<Keyed>, cap: usize) -> Vec<Keyed> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    keyed
        .into_iter()
        .filter(|item| {
            let count = seen.entry(item.key.clone()).or_insert(0);
            *count += 1;
            *count <= cap
        })
        .collect()
}

fn reduce_profiles(items: &[Keyed]) -> HashMap<String, ProfileAggregate> {
    let mut out: HashMap<String, ProfileAggregate> = HashMap::new();
    for item in items {
        let acc = out.entry(item.key.clone()).or_default();
        if acc.profile_url.is_none() {
            acc.profile_url = item.record.nested("channel", "url").as_text();
        }
        if acc.bio.is_none() {
            acc.bio = item.record.nested("channel", "bio").as_text();
        }
        if let Some(followers) = item.record.nested("channel", "followers").as_number() {
            acc.followers = Some(acc.followers.map_or(followers, |f| f.max(followers)));
        }
    }
    out
}

#[derive(Default)]
struct StatsAccumulator {
    plays: Vec<f64>,
    collects: Vec<f64>,
    title: Option<String>,
    last_post_date: Option<Recency>,
}

fn reduce_stats(items: &[Keyed]) -> HashMap<String, StatsAggregate> {
    let mut accs: HashMap<String, StatsAccumulator> = HashMap::new();
    for item in items {
        let acc = accs.entry(item.key.clone()).or_default();
        if let Some(views) = item.record.field("views").as_number() {
            acc.plays.push(views);
        }
        if let Some(bookmarks) = item.record.field("bookmarks").as_number() {
            acc.collects.push(bookmarks);
        }
        if acc.title.is_none() {
            acc.title = item.record.field("title").as_text();
        }
        if let Some(date) = &item.recency {
            if acc
                .last_post_date
                .as_ref()
                .is_none_or(|cur| date.compare(cur) == Ordering::Greater)
            {
                acc.last_post_date = Some(date.clone());
            }
        }
    }

    accs.into_iter()
        .map(|(key, acc)| {
            let stats = StatsAggregate {
                play_median: median(acc.plays),
                collect_median: median(acc.collects),
                title: acc.title,
                last_post_date: acc.last_post_date.map(|r| r.text),
            };
            (key, stats)
        })
        .collect()
}

fn reduce_media(items: &[Keyed]) -> HashMap<String, MediaAggregate> {
    let mut out: HashMap<String, MediaAggregate> = HashMap::new();
    for item in items {
        out.entry(item.key.clone())
            .or_default()
            .images
            .push(item.record.nested("video", "cover").as_text());
    }
    out
}

/// Median of the values; mean of the two middle values for even counts.
pub(crate) fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
