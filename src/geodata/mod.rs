//! Loading provider results from the local cache or the providers themselves.

mod cache;
mod collection;
mod places;
mod store;

pub use cache::{cache_file_name, file_age, read_cache, write_cache, ProviderGeodata};
pub use collection::{GeodataCollection, PlaceComparison};
pub use places::PlaceQuery;
pub use store::{GeodataStore, LoadPolicy};
