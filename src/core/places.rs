use crate::core::map_controller::MapController;
use crate::domain::model::NearbySearch;
use crate::domain::ports::MapSurface;

impl<M: MapSurface> MapController<M> {
    /// Runs the nearby-places search around the reference location and puts a
    /// marker on every result. Further pages are requested only after the
    /// configured page delay. A failed page is logged and ends the search;
    /// markers from earlier pages stay.
    pub async fn fetch_nearby_places(&mut self) -> usize {
        let Some(places) = self.places.clone() else {
            tracing::warn!("No places service configured, skipping nearby search");
            return 0;
        };

        let request = NearbySearch {
            location: self.settings.reference,
            radius_meters: self.settings.places_radius,
            place_type: self.settings.places_type.clone(),
        };

        let mut created = 0;
        let mut pages = 0;
        let mut next = places.nearby_search(&request).await;

        loop {
            let page = match next {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!("❌ {}", e);
                    break;
                }
            };
            pages += 1;

            for place in &page.results {
                self.create_place_marker(place);
                created += 1;
            }
            tracing::debug!("Places page {}: {} results", pages, page.results.len());

            let Some(token) = page.next_page_token else {
                break;
            };

            // 下一頁的 token 需要等一段時間才會生效
            tokio::time::sleep(self.settings.page_delay).await;
            next = places.next_page(&token).await;
        }

        tracing::info!("📍 {} nearby places marked ({} pages)", created, pages);
        created
    }
}
