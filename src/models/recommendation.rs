use std::fmt::Display;

use super::Genre;

/// Slots in the global "recommended for you" row
pub const TOP_PICKS_SLOTS: usize = 20;
/// Slots in per-show, per-genre and per-service rows
pub const CATEGORY_SLOTS: usize = 10;

/// A precomputed recommendation table and its row width
///
/// Table names are only ever produced by the constructors below, from
/// statically declared names, so they are safe to place in query text.
/// Subject keys never are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecommendationTable {
    name: String,
    slot_count: usize,
}

impl RecommendationTable {
    /// Global per-user table, keyed by user id
    pub fn top_picks() -> Self {
        Self {
            name: "rec_top_picks".to_string(),
            slot_count: TOP_PICKS_SLOTS,
        }
    }

    /// Per-show similarity table, keyed by show id
    pub fn show_similar() -> Self {
        Self {
            name: "rec_show_similar".to_string(),
            slot_count: CATEGORY_SLOTS,
        }
    }

    /// Per-genre table, keyed by user id
    pub fn genre(genre: Genre) -> Self {
        Self {
            name: format!("rec_genre_{}", genre.key()),
            slot_count: CATEGORY_SLOTS,
        }
    }

    /// Per-service popularity table, keyed by service name
    pub fn service_popularity() -> Self {
        Self {
            name: "rec_service_popular".to_string(),
            slot_count: CATEGORY_SLOTS,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Column holding the 1-based slot `index`
    pub fn slot_column(index: usize) -> String {
        format!("rec_{}", index)
    }
}

impl Display for RecommendationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Raw slot values of one recommendation row, slot 1 first
///
/// Slots may be individually absent; a gap is not a terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationRow {
    pub slots: Vec<Option<String>>,
}

impl RecommendationRow {
    pub fn new(slots: Vec<Option<String>>) -> Self {
        Self { slots }
    }

    /// Builds a dense row from the given ids
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: ids.into_iter().map(|id| Some(id.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_widths() {
        assert_eq!(RecommendationTable::top_picks().slot_count(), 20);
        assert_eq!(RecommendationTable::show_similar().slot_count(), 10);
        assert_eq!(RecommendationTable::genre(Genre::Horror).slot_count(), 10);
        assert_eq!(RecommendationTable::service_popularity().slot_count(), 10);
    }

    #[test]
    fn test_genre_table_name() {
        assert_eq!(
            RecommendationTable::genre(Genre::Horror).name(),
            "rec_genre_horror"
        );
        assert_eq!(
            RecommendationTable::genre(Genre::TalkShowTvComedies).to_string(),
            "rec_genre_talk_show_tv_comedies"
        );
    }

    #[test]
    fn test_slot_column() {
        assert_eq!(RecommendationTable::slot_column(1), "rec_1");
        assert_eq!(RecommendationTable::slot_column(20), "rec_20");
    }
}
