pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use client::GooglePlacesClient;
pub use error::PlacesError;
pub use provider::{GeocodeHit, PlaceDetails, PlaceProvider, RawPlace, ReviewData};
