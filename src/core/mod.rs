pub mod auth;
pub mod catalog;
pub mod detail;
pub mod map_controller;
pub mod markers;
pub mod places;
pub mod route;

pub use crate::domain::model::{LatLng, MarkedVenue, MarkerId, MarkerKind};
pub use crate::domain::ports::{ConfigProvider, MapSurface, TokenStore};
pub use crate::utils::error::Result;
