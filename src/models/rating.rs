use serde::{Deserialize, Serialize};

use super::UserId;

/// Lowest rating that counts as "liked"
pub const LIKED_THRESHOLD: i32 = 4;

/// One user's rating of one show, on a 1..=5 scale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub user_id: UserId,
    pub show_id: String,
    pub rating: i32,
}

impl Rating {
    pub fn new(user_id: UserId, show_id: impl Into<String>, rating: i32) -> Self {
        Self {
            user_id,
            show_id: show_id.into(),
            rating,
        }
    }

    pub fn is_liked(&self) -> bool {
        self.rating >= LIKED_THRESHOLD
    }
}
