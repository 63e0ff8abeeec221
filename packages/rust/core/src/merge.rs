//! Merge of listing stubs with their detail records.

use glean_listing::strip_ordinal;
use glean_shared::{DetailRecord, MovieRecord, StubRecord};

/// Combine stubs with their (possibly missing) details, in stub order.
///
/// `details[i]` must belong to `stubs[i]`; extra entries on either side are dropped.
pub fn merge(stubs: &[StubRecord], details: Vec<Option<DetailRecord>>) -> Vec<MovieRecord> {
    stubs
        .iter()
        .zip(details)
        .map(|(stub, detail)| merge_one(stub, detail.as_ref()))
        .collect()
}

/// Merge a single stub.
///
/// Without a detail record the raw listing title is used as-is; it already
/// carries the ordinal. With one, the position marker is prepended to the
/// first non-empty of: original title, primary title, listing title minus
/// its ordinal.
pub fn merge_one(stub: &StubRecord, detail: Option<&DetailRecord>) -> MovieRecord {
    let title = match detail {
        None => stub.search_title.clone(),
        Some(detail) => format!("{}{}", stub.position, resolve_base_title(stub, detail)),
    };

    MovieRecord {
        id: stub.id.clone(),
        title,
        year: stub.year.clone(),
        rating: stub.rating.clone(),
    }
}

fn resolve_base_title<'a>(stub: &'a StubRecord, detail: &'a DetailRecord) -> &'a str {
    [
        detail.original_title.as_deref(),
        detail.primary_title.as_deref(),
        Some(strip_ordinal(&stub.search_title)),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|t| !t.is_empty())
    .unwrap_or(stub.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(id: &str, position: &str, title: &str) -> StubRecord {
        StubRecord {
            id: id.into(),
            position: position.into(),
            search_title: title.into(),
            year: "1999".into(),
            rating: "8.1".into(),
        }
    }

    fn detail(original: Option<&str>, primary: Option<&str>) -> DetailRecord {
        DetailRecord {
            id: None,
            original_title: original.map(String::from),
            primary_title: primary.map(String::from),
        }
    }

    #[test]
    fn missing_detail_uses_listing_title_verbatim() {
        let s = stub("tt0120737", "4. ", "4. The Lord of the Rings");
        let record = merge_one(&s, None);
        assert_eq!(record.title, "4. The Lord of the Rings");
        assert_eq!(record.year, "1999");
        assert_eq!(record.rating, "8.1");
    }

    #[test]
    fn original_title_wins() {
        let s = stub("tt0211915", "2. ", "2. Amélie");
        let d = detail(Some("Le fabuleux destin d'Amélie Poulain"), Some("Amélie"));
        assert_eq!(
            merge_one(&s, Some(&d)).title,
            "2. Le fabuleux destin d'Amélie Poulain"
        );
    }

    #[test]
    fn primary_title_when_original_missing_or_empty() {
        let s = stub("tt0133093", "1. ", "1. Matrix");
        assert_eq!(
            merge_one(&s, Some(&detail(None, Some("The Matrix")))).title,
            "1. The Matrix"
        );
        assert_eq!(
            merge_one(&s, Some(&detail(Some(""), Some("The Matrix")))).title,
            "1. The Matrix"
        );
    }

    #[test]
    fn listing_title_without_ordinal_as_last_resort() {
        let s = stub("tt0068646", "3. ", "3. The Godfather");
        assert_eq!(
            merge_one(&s, Some(&detail(None, None))).title,
            "3. The Godfather"
        );
    }

    #[test]
    fn title_is_never_empty() {
        let s = stub("tt0000001", "9. ", "");
        assert_eq!(merge_one(&s, Some(&detail(None, Some("  ")))).title, "9. tt0000001");
    }

    #[test]
    fn merge_keeps_stub_order() {
        let stubs = vec![
            stub("tt1", "1. ", "1. One"),
            stub("tt2", "2. ", "2. Two"),
            stub("tt3", "3. ", "3. Three"),
        ];
        let details = vec![
            Some(detail(None, Some("Uno"))),
            None,
            Some(detail(Some("Tres"), None)),
        ];

        let records = merge(&stubs, details);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(ids, vec!["tt1", "tt2", "tt3"]);
        assert_eq!(titles, vec!["1. Uno", "2. Two", "3. Tres"]);
    }
}
