//! HTTP handler functions for the heritage map API.

use actix_web::{HttpResponse, web};
use heritage_map_browser::lookup::run_lookup;
use heritage_map_server_models::{
    ApiHealth, ApiSelection, ApiStreets, SelectBuildingRequest, SelectStreetRequest,
    ThresholdRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        building_count: state.buildings.features.len(),
    })
}

/// `GET /api/buildings`
///
/// Returns the sanitized building points as a `GeoJSON` collection.
pub async fn buildings(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.buildings)
}

/// `GET /api/boundary`
pub async fn boundary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.boundary)
}

/// `GET /api/streets`
///
/// Returns the street ranking at the current threshold.
pub async fn streets(state: web::Data<AppState>) -> HttpResponse {
    let browser = state.browser();
    HttpResponse::Ok().json(ApiStreets::from(&*browser))
}

/// `GET /api/overall`
pub async fn overall(state: web::Data<AppState>) -> HttpResponse {
    let browser = state.browser();
    HttpResponse::Ok().json(browser.overall())
}

/// `GET /api/selection`
pub async fn selection(state: web::Data<AppState>) -> HttpResponse {
    selection_response(&state)
}

/// `POST /api/selection/building`
///
/// A map click. The street selection follows the building.
pub async fn select_building(
    state: web::Data<AppState>,
    body: web::Json<SelectBuildingRequest>,
) -> HttpResponse {
    if let Err(e) = state.browser().select_building(body.id) {
        log::warn!("Rejected building selection: {e}");
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string()
        }));
    }
    selection_response(&state)
}

/// `DELETE /api/selection/building`
pub async fn clear_building(state: web::Data<AppState>) -> HttpResponse {
    state.browser().clear_building();
    selection_response(&state)
}

/// `POST /api/selection/street`
///
/// A click in the street ranking.
pub async fn select_street(
    state: web::Data<AppState>,
    body: web::Json<SelectStreetRequest>,
) -> HttpResponse {
    state.browser().select_street(body.into_inner().street);
    selection_response(&state)
}

/// `DELETE /api/selection/street`
pub async fn clear_street(state: web::Data<AppState>) -> HttpResponse {
    state.browser().clear_street();
    selection_response(&state)
}

/// `PUT /api/threshold`
pub async fn set_threshold(
    state: web::Data<AppState>,
    body: web::Json<ThresholdRequest>,
) -> HttpResponse {
    state.browser().set_min_street_count(body.min_street_count);
    selection_response(&state)
}

/// `POST /api/summary`
///
/// Runs the external summary lookup for the selected building. The
/// state lock is released while the lookup is in flight; if the
/// selection changes meanwhile, the result is discarded.
pub async fn fetch_summary(state: web::Data<AppState>) -> HttpResponse {
    let ticket = state.browser().begin_lookup();

    if let Some(ticket) = ticket {
        let result = run_lookup(state.summary_source.as_ref(), &ticket).await;
        if !state.browser().apply_lookup(&ticket, result) {
            log::info!(
                "Selection changed during lookup for building {}; result discarded",
                ticket.building_id()
            );
        }
    }

    selection_response(&state)
}

/// `DELETE /api/summary`
pub async fn clear_summary(state: web::Data<AppState>) -> HttpResponse {
    state.browser().clear_lookup();
    selection_response(&state)
}

fn selection_response(state: &AppState) -> HttpResponse {
    let browser = state.browser();
    HttpResponse::Ok().json(ApiSelection::from(&*browser))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use async_trait::async_trait;
    use geojson::GeoJson;
    use heritage_map_buildings::dataset::Dataset;
    use heritage_map_summary::{SummaryError, SummaryResponse, SummarySource};
    use serde_json::{Value, json};

    use crate::{AppState, configure_api};

    /// Fails every lookup except for the simplified title of the first
    /// building, which is reported as missing.
    struct FlakySource;

    #[async_trait]
    impl SummarySource for FlakySource {
        fn id(&self) -> &str {
            "flaky"
        }

        async fn fetch(&self, query: &str) -> Result<SummaryResponse, SummaryError> {
            if query == "Hop Exchange" {
                Ok(SummaryResponse::NotFound)
            } else {
                Err(SummaryError::Status { status: 500 })
            }
        }
    }

    fn state() -> web::Data<AppState> {
        let mut features = Vec::new();
        for i in 0..5 {
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-0.09, 51.50 + f64::from(i) / 1000.0] },
                "properties": {
                    "NAME": if i == 0 { "Former Hop Exchange at Southwark Street" } else { "Warehouse" },
                    "GRADE": "II",
                    "STREET": "Southwark Street",
                    "DATE_OF_LISTING": "1972-07-01"
                }
            }));
        }
        features.push(json!({ "type": "Feature", "geometry": null, "properties": {} }));

        let dataset = Dataset::from_collection(&json!({ "features": features }));
        let boundary: GeoJson = r#"{ "type": "FeatureCollection", "features": [] }"#
            .parse()
            .unwrap();
        web::Data::new(AppState::new(dataset, boundary, Arc::new(FlakySource)))
    }

    #[actix_web::test]
    async fn serves_health_and_buildings() {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["buildingCount"], 5);

        let req = test::TestRequest::get().uri("/api/buildings").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().map(Vec::len), Some(5));
    }

    #[actix_web::test]
    async fn building_selection_drives_sidebar() {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;

        let req = test::TestRequest::post()
            .uri("/api/selection/building")
            .set_json(json!({ "id": 2 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["street"], "Southwark Street");
        assert_eq!(body["sidebar"]["title"], "Selected street: Southwark Street");
        assert_eq!(body["story"]["tags"][0], "Corridor rank: 1 (5 listed buildings)");

        let req = test::TestRequest::put()
            .uri("/api/threshold")
            .set_json(json!({ "minStreetCount": 6 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["minStreetCount"], 6);
        assert_eq!(body["street"], "Southwark Street");
        assert_eq!(body["sidebar"]["title"], "All buildings");
    }

    #[actix_web::test]
    async fn unknown_building_is_not_found() {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;

        let req = test::TestRequest::post()
            .uri("/api/selection/building")
            .set_json(json!({ "id": 99 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn summary_error_after_miss_is_reported() {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;

        let req = test::TestRequest::post()
            .uri("/api/selection/building")
            .set_json(json!({ "id": 0 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post().uri("/api/summary").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["status"], "error");

        let req = test::TestRequest::delete().uri("/api/summary").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["status"], "idle");
        assert_eq!(body["canLookup"], true);
    }

    #[actix_web::test]
    async fn summary_without_selection_stays_idle() {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;

        let req = test::TestRequest::post().uri("/api/summary").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["summary"]["status"], "idle");
        assert_eq!(body["canLookup"], false);
    }

    #[actix_web::test]
    async fn serves_overall_and_decade_bins() {
        let app = test::init_service(App::new().app_data(state()).configure(configure_api)).await;

        let req = test::TestRequest::get().uri("/api/overall").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["gradeCounts"]["II"], 5);
        assert_eq!(body["yearCounts"]["1972"], 5);

        let req = test::TestRequest::get().uri("/api/selection").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sidebar"]["title"], "All buildings");
        assert_eq!(
            body["sidebar"]["decadeCounts"],
            json!([{ "decade": 1970, "label": "1970s", "count": 5 }])
        );
    }
}
