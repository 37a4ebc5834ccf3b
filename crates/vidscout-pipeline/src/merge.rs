//! Left join of the per-key aggregates onto the caller's identity list.
//!
//! The identity list is the anchor: the output has exactly one row per
//! identity, in input order, whatever the service returned. Identities the
//! service knew nothing about get [`SENTINEL`] in every derived column.

use vidscout_core::Identity;

use crate::aggregate::{Aggregates, MediaAggregate, ProfileAggregate, StatsAggregate};
use crate::contact::extract_contact;
use crate::table::{format_number, Column, Table, SENTINEL};

/// Builds the enriched table. Columns appear only for aggregates that exist;
/// when nothing was collected the table holds just the name column.
#[must_use]
pub fn merge(identities: &[Identity], aggregates: &Aggregates) -> Table {
    let media_width = aggregates.media_width();

    let mut columns = vec![Column::Name];
    if aggregates.profiles.is_some() {
        columns.extend([Column::ProfileUrl, Column::Bio, Column::Followers]);
    }
    if aggregates.stats.is_some() {
        columns.extend([
            Column::PlayMedian,
            Column::CollectMedian,
            Column::Title,
            Column::LastPostDate,
        ]);
    }
    if aggregates.media.is_some() {
        columns.extend((1..=media_width).map(Column::Image));
    }
    if aggregates.profiles.is_some() {
        columns.push(Column::Email);
    }

    let rows: Vec<Vec<String>> = identities
        .iter()
        .map(|identity| {
            let profile = aggregates
                .profiles
                .as_ref()
                .and_then(|m| m.get(&identity.key));
            let stats = aggregates.stats.as_ref().and_then(|m| m.get(&identity.key));
            let media = aggregates.media.as_ref().and_then(|m| m.get(&identity.key));

            columns
                .iter()
                .map(|column| {
                    cell_value(*column, identity, profile, stats, media)
                        .unwrap_or_else(|| SENTINEL.to_owned())
                })
                .collect::<Vec<String>>()
        })
        .collect();

    Table { columns, rows }
}

fn cell_value(
    column: Column,
    identity: &Identity,
    profile: Option<&ProfileAggregate>,
    stats: Option<&StatsAggregate>,
    media: Option<&MediaAggregate>,
) -> Option<String> {
    match column {
        Column::Name => Some(identity.name.clone()),
        Column::ProfileUrl => profile?.profile_url.clone(),
        Column::Bio => profile?.bio.clone(),
        Column::Followers => profile?.followers.map(format_number),
        // A joined profile always gets an address, possibly empty; only a
        // missing profile row yields the sentinel.
        Column::Email => profile.map(|p| extract_contact(p.bio.as_deref())),
        Column::PlayMedian => stats?.play_median.map(format_number),
        Column::CollectMedian => stats?.collect_median.map(format_number),
        Column::Title => stats?.title.clone(),
        Column::LastPostDate => stats?.last_post_date.clone(),
        Column::Image(n) => media?.images.get(n.checked_sub(1)?)?.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn ids(names: &[&str]) -> Vec<Identity> {
        names.iter().map(|n| Identity::new(*n)).collect()
    }

    fn profile(bio: Option<&str>, followers: f64) -> ProfileAggregate {
        ProfileAggregate {
            profile_url: Some("https://v.example/@x".to_owned()),
            bio: bio.map(str::to_owned),
            followers: Some(followers),
        }
    }

    #[test]
    fn nothing_collected_yields_name_column_only() {
        let table = merge(&ids(&["a", "b"]), &Aggregates::default());
        assert_eq!(table.columns, vec![Column::Name]);
        assert_eq!(table.rows, vec![vec!["a".to_owned()], vec!["b".to_owned()]]);
    }

    #[test]
    fn row_count_and_order_follow_identities() {
        let mut profiles = HashMap::new();
        profiles.insert("zed".to_owned(), profile(None, 1.0));
        profiles.insert("ghost".to_owned(), profile(None, 2.0));
        let aggs = Aggregates {
            profiles: Some(profiles),
            stats: None,
            media: None,
        };

        let table = merge(&ids(&["Zed", "amy", "bob"]), &aggs);
        let names: Vec<&str> = (0..table.rows.len())
            .filter_map(|r| table.cell(r, Column::Name))
            .collect();
        assert_eq!(names, vec!["Zed", "amy", "bob"]);
        assert_eq!(table.cell(0, Column::Followers), Some("1"));
    }

    #[test]
    fn unmatched_identity_gets_sentinel_everywhere_but_name() {
        let mut profiles = HashMap::new();
        profiles.insert("amy".to_owned(), profile(Some("hi"), 10.0));
        let mut stats = HashMap::new();
        stats.insert(
            "amy".to_owned(),
            StatsAggregate {
                play_median: Some(5.0),
                collect_median: Some(1.0),
                title: Some("t".to_owned()),
                last_post_date: Some("2026-01-01".to_owned()),
            },
        );
        let mut media = HashMap::new();
        media.insert(
            "amy".to_owned(),
            MediaAggregate {
                images: vec![Some("c1".to_owned()), Some("c2".to_owned())],
            },
        );
        let aggs = Aggregates {
            profiles: Some(profiles),
            stats: Some(stats),
            media: Some(media),
        };

        let table = merge(&ids(&["amy", "nobody"]), &aggs);
        let row = &table.rows[1];
        assert_eq!(row[0], "nobody");
        assert!(row[1..].iter().all(|cell| cell == SENTINEL), "{row:?}");
    }

    #[test]
    fn email_is_empty_when_bio_has_no_address() {
        let mut profiles = HashMap::new();
        profiles.insert("amy".to_owned(), profile(Some("just vibes"), 10.0));
        profiles.insert("bo".to_owned(), profile(None, 10.0));
        let aggs = Aggregates {
            profiles: Some(profiles),
            stats: None,
            media: None,
        };

        let table = merge(&ids(&["amy", "bo"]), &aggs);
        assert_eq!(table.cell(0, Column::Email), Some(""));
        assert_eq!(table.cell(1, Column::Email), Some(""));
        assert_eq!(table.cell(1, Column::Bio), Some(SENTINEL));
    }

    #[test]
    fn email_extracted_from_joined_bio() {
        let mut profiles = HashMap::new();
        profiles.insert(
            "amy".to_owned(),
            profile(Some("contact me at a.b+c@example.co for info"), 10.0),
        );
        let aggs = Aggregates {
            profiles: Some(profiles),
            stats: None,
            media: None,
        };

        let table = merge(&ids(&[" AMY "]), &aggs);
        assert_eq!(table.cell(0, Column::Email), Some("a.b+c@example.co"));
        assert_eq!(table.cell(0, Column::Name), Some(" AMY "));
    }

    #[test]
    fn short_media_lists_are_padded_with_sentinel() {
        let mut profiles = HashMap::new();
        profiles.insert("amy".to_owned(), profile(None, 1.0));
        profiles.insert("bo".to_owned(), profile(None, 1.0));
        let mut media = HashMap::new();
        media.insert(
            "amy".to_owned(),
            MediaAggregate {
                images: vec![Some("a1".to_owned()), None, Some("a3".to_owned())],
            },
        );
        media.insert(
            "bo".to_owned(),
            MediaAggregate {
                images: vec![Some("b1".to_owned())],
            },
        );
        let aggs = Aggregates {
            profiles: Some(profiles),
            stats: None,
            media: Some(media),
        };

        let table = merge(&ids(&["amy", "bo"]), &aggs);
        assert_eq!(table.cell(0, Column::Image(2)), Some(SENTINEL));
        assert_eq!(table.cell(0, Column::Image(3)), Some("a3"));
        assert_eq!(table.cell(1, Column::Image(1)), Some("b1"));
        assert_eq!(table.cell(1, Column::Image(3)), Some(SENTINEL));
        assert_eq!(table.column_index(Column::Image(4)), None);
    }
}
