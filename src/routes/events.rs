use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::GeoMatcher;
use crate::models::{GeoMatchRequest, HealthResponse, ErrorResponse};
use crate::services::EventSource;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<dyn GeoMatcher>,
    pub events: Arc<dyn EventSource>,
}

/// Configure all event-matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/events", web::post().to(match_events));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, events_loaded) = match state.events.get() {
        Ok(events) => ("healthy", events.len()),
        Err(e) => {
            tracing::warn!("Health check could not read events: {}", e);
            ("degraded", 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        events_loaded,
    })
}

/// Match loaded events to the nearest point of interest
///
/// POST /events
///
/// Request body:
/// ```json
/// {
///   "points_of_interest": [
///     {"name": "string", "lat": 48.8566, "lon": 2.3522}
///   ]
/// }
/// ```
async fn match_events(
    state: web::Data<AppState>,
    req: web::Json<GeoMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let pois = &req.points_of_interest;
    tracing::info!("Matching events against {} points of interest", pois.len());

    match state.matcher.match_pois(pois) {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => {
            tracing::error!("Failed to get events from datasource: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to match events".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::models::{Event, MatchResult};
    use crate::routes::json_config;
    use crate::services::{SourceError, StaticEventSource};
    use actix_web::{http::StatusCode, test, App};

    struct FailingSource;

    impl EventSource for FailingSource {
        fn get(&self) -> Result<Vec<Event>, SourceError> {
            Err(SourceError::Unavailable("storage offline".to_string()))
        }
    }

    fn state_with(source: Arc<dyn EventSource>) -> AppState {
        AppState {
            matcher: Arc::new(Matcher::haversine(source.clone())),
            events: source,
        }
    }

    fn paris_state() -> AppState {
        state_with(Arc::new(StaticEventSource::new(vec![
            Event::new(48.8566, 2.3522, "imp"),
            Event::new(48.8567, 2.3523, "click"),
            Event::new(40.7589, -73.9851, "click"),
        ])))
    }

    #[actix_web::test]
    async fn test_match_events_ok() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(paris_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(serde_json::json!({
                "points_of_interest": [
                    {"name": "Eiffel", "lat": 48.8566, "lon": 2.3522},
                    {"name": "TimesSquare", "lat": 40.7589, "lon": -73.9851}
                ]
            }))
            .to_request();

        let results: Vec<MatchResult> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].poi.name, "Eiffel");
        assert_eq!((results[0].impressions, results[0].clicks), (1, 1));
        assert_eq!(results[1].poi.name, "TimesSquare");
        assert_eq!((results[1].impressions, results[1].clicks), (0, 1));
    }

    #[actix_web::test]
    async fn test_match_events_response_keys() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(paris_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(serde_json::json!({
                "points_of_interest": [{"Name": "Eiffel", "Lat": 48.8566, "Lon": 2.3522}]
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            serde_json::json!([
                {"Name": "Eiffel", "Lat": 48.8566, "Lon": 2.3522, "Impressions": 1, "Clicks": 2}
            ])
        );
    }

    #[actix_web::test]
    async fn test_match_events_without_content_type() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(paris_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/events")
            .set_payload(r#"{"points_of_interest": [{"name": "Eiffel", "lat": 48.8566, "lon": 2.3522}]}"#)
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_match_events_invalid_json_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(paris_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/events")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_match_events_empty_pois_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(paris_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(serde_json::json!({"points_of_interest": []}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_match_events_source_failure_is_internal_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(Arc::new(FailingSource))))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(serde_json::json!({
                "points_of_interest": [{"name": "Test", "lat": 0.0, "lon": 0.0}]
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_health_reports_loaded_events() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(paris_state()))
                .app_data(json_config())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(health.status, "healthy");
        assert_eq!(health.events_loaded, 3);
    }
}
