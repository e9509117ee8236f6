use crate::interest_flags;

interest_flags! {
    /// Genre interest flags carried by users and titles
    ///
    /// Declaration order is the order Genre-Interest carousels appear in.
    pub enum Genre {
        Action => ("action", "action", "Action"),
        Adventure => ("adventure", "adventure", "Adventure"),
        AnimeSeries => ("anime_series", "anime_series", "Anime Series"),
        BritishSeries => ("british_series", "british_series", "British TV Shows"),
        Children => ("children", "children", "Children's Movies"),
        Comedies => ("comedies", "comedies", "Comedies"),
        InternationalComedyDramas => (
            "international_comedy_dramas",
            "international_comedy_dramas",
            "International Comedy Dramas"
        ),
        InternationalComedies => (
            "international_comedies",
            "international_comedies",
            "International Comedies"
        ),
        RomanticComedies => ("romantic_comedies", "romantic_comedies", "Romantic Comedies"),
        CrimeTvDocuseries => ("crime_tv_docuseries", "crime_tv_docuseries", "Crime TV Docuseries"),
        Documentaries => ("documentaries", "documentaries", "Documentaries"),
        InternationalDocumentaries => (
            "international_documentaries",
            "international_documentaries",
            "International Documentaries"
        ),
        Docuseries => ("docuseries", "docuseries", "Docuseries"),
        Dramas => ("dramas", "dramas", "Dramas"),
        InternationalDramas => ("international_dramas", "international_dramas", "International Dramas"),
        RomanticDramas => ("romantic_dramas", "romantic_dramas", "Romantic Dramas"),
        Family => ("family", "family", "Family Movies"),
        Fantasy => ("fantasy", "fantasy", "Fantasy"),
        Horror => ("horror", "horror", "Horror Movies"),
        InternationalThrillers => (
            "international_thrillers",
            "international_thrillers",
            "International Thrillers"
        ),
        InternationalTvRomanticDramas => (
            "international_tv_romantic_dramas",
            "international_tv_romantic_dramas",
            "International TV Romantic Dramas"
        ),
        Kids => ("kids", "kids", "Kids' TV"),
        Language => ("language", "language", "Language TV Shows"),
        Musicals => ("musicals", "musicals", "Musicals"),
        NatureTv => ("nature_tv", "nature_tv", "Nature TV"),
        RealityTv => ("reality_tv", "reality_tv", "Reality TV"),
        Spirituality => ("spirituality", "spirituality", "Spirituality"),
        ActionTv => ("action_tv", "action_tv", "TV Action"),
        ComedyTv => ("comedy_tv", "comedy_tv", "TV Comedies"),
        DramaTv => ("drama_tv", "drama_tv", "TV Dramas"),
        TalkShowTvComedies => (
            "talk_show_tv_comedies",
            "talk_show_tv_comedies",
            "Talk Shows & TV Comedies"
        ),
        Thrillers => ("thrillers", "thrillers", "Thrillers"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_genre_enumeration_has_32_flags() {
        assert_eq!(Genre::ALL.len(), 32);
    }

    #[test]
    fn test_genre_enumeration_order_is_fixed() {
        assert_eq!(Genre::ALL[0], Genre::Action);
        assert_eq!(Genre::ALL[18], Genre::Horror);
        assert_eq!(Genre::ALL[31], Genre::Thrillers);
    }

    #[test]
    fn test_genre_columns_are_unique_identifiers() {
        let columns: HashSet<&str> = Genre::ALL.iter().map(|g| g.column()).collect();
        assert_eq!(columns.len(), Genre::ALL.len());

        for genre in Genre::ALL {
            assert!(genre
                .key()
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_genre_label() {
        assert_eq!(Genre::Horror.label(), "Horror Movies");
        assert_eq!(Genre::Horror.to_string(), "Horror Movies");
    }

    #[test]
    fn test_genre_serde() {
        let json = serde_json::to_string(&Genre::CrimeTvDocuseries).unwrap();
        assert_eq!(json, r#""crime_tv_docuseries""#);
    }
}
