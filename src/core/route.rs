use crate::core::map_controller::MapController;
use crate::domain::model::{MarkerId, Route};
use crate::domain::ports::MapSurface;
use crate::utils::error::{ClientError, Result};

impl<M: MapSurface> MapController<M> {
    /// Requests a driving route from the reference location to the marker and
    /// draws it. The info window is closed whether or not a route was found.
    pub async fn show_route(&mut self, marker: MarkerId) -> Result<Route> {
        let result = self.request_route(marker).await;
        match &result {
            Ok(route) => self.map.render_route(route),
            Err(e) => tracing::error!("❌ Directions request failed: {}", e),
        }
        self.map.close_info_window();
        result
    }

    async fn request_route(&self, marker: MarkerId) -> Result<Route> {
        let directions = self
            .directions
            .clone()
            .ok_or_else(|| ClientError::MissingConfigError {
                field: "maps.api_key".to_string(),
            })?;

        let destination = self
            .registry
            .get(marker)
            .map(|entry| entry.location)
            .ok_or_else(|| ClientError::ValidationError {
                message: format!("Unknown marker {}", marker),
            })?;

        directions
            .driving_route(self.settings.reference, destination)
            .await
    }
}
