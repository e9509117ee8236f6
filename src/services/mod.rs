pub mod carousels;
pub mod row_reader;
pub mod sections;
pub mod stores;
pub mod title_resolver;

pub use carousels::CarouselBuilder;
pub use row_reader::RowReader;
pub use stores::{MemoryStore, PgStore, Stores};
pub use title_resolver::TitleIndex;
