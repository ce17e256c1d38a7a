pub mod aggregate;
pub mod engine;
pub mod favorites;
pub mod geo;
pub mod normalize;
pub mod search;

pub use crate::domain::model::{
    Coordinates, FavoriteEntry, RawCourt, RawSlot, SearchCriteria, Slot, SortKey, Venue,
};
pub use crate::domain::ports::AvailabilitySource;
pub use crate::utils::error::Result;
