mod carousel;
mod genre;
mod macros;
mod rating;
mod recommendation;
mod streaming_service;
mod title;
mod user_preferences;

pub use carousel::{Carousel, CarouselItem, CarouselSet};
pub use genre::Genre;
pub use rating::{Rating, LIKED_THRESHOLD};
pub use recommendation::{
    RecommendationRow, RecommendationTable, CATEGORY_SLOTS, TOP_PICKS_SLOTS,
};
pub use streaming_service::StreamingService;
pub use title::{Title, TitleView};
pub use user_preferences::UserPreferences;

/// Identifier of a user record
pub type UserId = i32;
