// Domain layer: models and ports (the seams to the map SDK, storage and the page).

pub mod model;
pub mod ports;
