pub mod aggregator;
pub mod cache;
pub mod enrich;
pub mod error;
pub mod geocode;

pub use aggregator::{PlaceSearch, SearchConfig, SearchRequest};
pub use cache::{geocode_key, places_key, Clock, SystemClock, TtlCache};
pub use error::SearchError;
