//! Section providers
//!
//! Each provider maps one recommendation source to zero or more row
//! sections. `plan` lines them up in priority order and
//! `SectionContext::fan_out` reads them all through one bounded stream.
//! Missing data never fails: an absent row, a dangling favorite or an id
//! that no longer resolves simply yields no carousel. Store failures
//! propagate to the caller.

use std::collections::HashSet;

use futures::{stream, StreamExt, TryStreamExt};
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::AppResult,
    models::{Carousel, Rating, RecommendationTable, UserPreferences},
    services::{row_reader::RowReader, title_resolver::TitleIndex},
};

pub const GLOBAL_RECOMMENDED_TITLE: &str = "Recommended For You";
pub const DISCOVERY_TITLE: &str = "Try a Random Movie";

pub fn favorite_similar_title(show_title: &str) -> String {
    format!("{} Lovers also Loved", show_title)
}

pub fn liked_similar_title(show_title: &str) -> String {
    format!("Because you liked {}", show_title)
}

pub fn genre_interest_title(genre_label: &str) -> String {
    format!("{} You Might Like", genre_label)
}

pub fn service_popularity_title(service_label: &str) -> String {
    format!("Popular on {}", service_label)
}

/// Everything a provider reads, loaded once per aggregation
#[derive(Clone, Copy)]
pub struct SectionContext<'a> {
    pub reader: &'a RowReader,
    pub catalog: &'a TitleIndex,
    pub preferences: &'a UserPreferences,
    pub ratings: &'a [Rating],
    /// Row lookups in flight at once during fan-out
    pub concurrency: usize,
}

/// One candidate carousel backed by a single recommendation row
#[derive(Debug, Clone, PartialEq)]
pub struct RowSection {
    pub table: RecommendationTable,
    pub subject_key: String,
    pub heading: String,
}

impl<'a> SectionContext<'a> {
    fn user_key(&self) -> String {
        self.preferences.user_id.to_string()
    }

    /// Reads and resolves one row, dropping the carousel if nothing resolves
    async fn row_carousel(&self, section: RowSection) -> AppResult<Option<Carousel>> {
        let ids = self
            .reader
            .read_row(&section.table, &section.subject_key)
            .await?;
        if ids.is_empty() {
            return Ok(None);
        }

        let items = self.catalog.resolve(&ids);
        if items.len() < ids.len() {
            tracing::debug!(
                table = %section.table,
                subject_key = %section.subject_key,
                dropped = ids.len() - items.len(),
                "Dropped unresolvable or repeated ids"
            );
        }

        Ok(Carousel::new(section.heading, items).non_empty())
    }

    /// Runs row sections with at most `concurrency` lookups in flight
    ///
    /// `buffered` yields results in input order, so output order matches
    /// `sections` no matter which lookup finishes first.
    pub async fn fan_out(&self, sections: Vec<RowSection>) -> AppResult<Vec<Carousel>> {
        if sections.is_empty() {
            return Ok(Vec::new());
        }

        let carousels: Vec<Option<Carousel>> = stream::iter(sections)
            .map(|section| self.row_carousel(section))
            .buffered(self.concurrency.max(1))
            .try_collect()
            .await?;

        Ok(carousels.into_iter().flatten().collect())
    }
}

/// Global-Recommended: the user's row in the top picks table
pub fn global_section(ctx: &SectionContext<'_>) -> RowSection {
    RowSection {
        table: RecommendationTable::top_picks(),
        subject_key: ctx.user_key(),
        heading: GLOBAL_RECOMMENDED_TITLE.to_string(),
    }
}

/// Favorite-Movie-Similar: shows similar to the user's favorite
///
/// Omitted when no favorite is set or the favorite no longer resolves.
pub fn favorite_section(ctx: &SectionContext<'_>) -> Option<RowSection> {
    let favorite = ctx.preferences.favorite()?;

    let Some(name) = ctx.catalog.title_of(favorite) else {
        tracing::debug!(show_id = %favorite, "Favorite show does not resolve");
        return None;
    };

    Some(RowSection {
        table: RecommendationTable::show_similar(),
        subject_key: favorite.to_string(),
        heading: favorite_similar_title(name),
    })
}

/// Liked-Show-Similar: one section per highly rated show, in rating order
///
/// A show qualifies when rated at or above the liked threshold, is not the
/// favorite (already covered) and resolves in the catalog.
pub fn liked_sections(ctx: &SectionContext<'_>) -> Vec<RowSection> {
    let favorite = ctx.preferences.favorite();

    ctx.ratings
        .iter()
        .filter(|rating| rating.is_liked())
        .filter(|rating| Some(rating.show_id.as_str()) != favorite)
        .filter_map(|rating| {
            let name = ctx.catalog.title_of(&rating.show_id)?;
            Some(RowSection {
                table: RecommendationTable::show_similar(),
                subject_key: rating.show_id.clone(),
                heading: liked_similar_title(name),
            })
        })
        .collect()
}

/// Genre-Interest: one section per flagged genre, in fixed enumeration order
pub fn genre_sections(ctx: &SectionContext<'_>) -> Vec<RowSection> {
    let user_key = ctx.user_key();

    ctx.preferences
        .interested_genres()
        .map(|genre| RowSection {
            table: RecommendationTable::genre(genre),
            subject_key: user_key.clone(),
            heading: genre_interest_title(genre.label()),
        })
        .collect()
}

/// Streaming-Service-Popularity: one section per flagged service
pub fn service_sections(ctx: &SectionContext<'_>) -> Vec<RowSection> {
    ctx.preferences
        .subscribed_services()
        .map(|service| RowSection {
            table: RecommendationTable::service_popularity(),
            subject_key: service.key().to_string(),
            heading: service_popularity_title(service.label()),
        })
        .collect()
}

/// Every row-backed section of the home screen, in priority order
pub fn plan(ctx: &SectionContext<'_>) -> Vec<RowSection> {
    let mut sections = vec![global_section(ctx)];
    sections.extend(favorite_section(ctx));
    sections.extend(liked_sections(ctx));
    sections.extend(genre_sections(ctx));
    sections.extend(service_sections(ctx));
    sections
}

/// Discovery-Filler: a random sample of titles the user has not rated
///
/// Always produced, even when empty.
pub fn discovery_filler<R: Rng + ?Sized>(
    catalog: &TitleIndex,
    ratings: &[Rating],
    sample_size: usize,
    rng: &mut R,
) -> Carousel {
    let rated: HashSet<&str> = ratings.iter().map(|r| r.show_id.as_str()).collect();

    let mut candidates: Vec<&str> = catalog
        .ids()
        .iter()
        .map(String::as_str)
        .filter(|id| !rated.contains(id))
        .collect();

    let take = sample_size.min(candidates.len());
    let (sample, _) = candidates.partial_shuffle(rng, take);

    Carousel::new(DISCOVERY_TITLE, catalog.resolve(&sample[..]))
}
