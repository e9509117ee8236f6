use serde::{Deserialize, Serialize};

/// One display-ready recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub show_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Poster path derived from the title
    pub image_url: String,
}

/// A named, ordered row of items shown under one heading
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Carousel {
    pub title: String,
    pub items: Vec<CarouselItem>,
}

impl Carousel {
    pub fn new(title: impl Into<String>, items: Vec<CarouselItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// Returns `None` when nothing survived resolution
    pub fn non_empty(self) -> Option<Self> {
        if self.items.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn show_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.show_id.as_str())
    }
}

/// A user's home screen: display name plus carousels in priority order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSet {
    pub display_name: String,
    pub carousels: Vec<Carousel>,
}

impl CarouselSet {
    pub fn titles(&self) -> Vec<&str> {
        self.carousels.iter().map(|c| c.title.as_str()).collect()
    }
}
