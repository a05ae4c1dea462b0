//! # Suburb Scout Explorer
//!
//! Session state for browsing a suburb's listings: filters, a swipe deck for
//! shortlisting and a month-by-month listing timeline. `Dashboard` ties them
//! together and recomputes the market analysis on every change.

pub mod dashboard;
pub mod error;
pub mod filters;
pub mod swipe;
pub mod timeline;

pub use dashboard::Dashboard;
pub use error::ExplorerError;
pub use filters::PropertyFilter;
pub use swipe::{Swipe, SwipeDeck, SwipeDirection};
pub use timeline::{Frame, PlaybackState, Timeline};
