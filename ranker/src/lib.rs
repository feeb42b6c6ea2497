pub mod load;
pub mod search;

pub use load::{canonicalize, load_pages};
pub use search::{RankedPage, SearchEngine, SearchHit, SearchResponse};
