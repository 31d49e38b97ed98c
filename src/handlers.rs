use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Local;
use log::{error, info};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::manager_forecast::daily_summaries;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::CitySuggestion;

const MIN_SUGGESTION_QUERY: usize = 2;

#[derive(Deserialize, Debug)]
struct CityParams {
    city: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CoordinateParams {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SuggestionParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Registers all weather routes
///
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search)
        .service(coordinates)
        .service(forecast)
        .service(suggestions);
}

#[get("/api/weather/search")]
async fn search(params: web::Query<CityParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let Some(city) = non_empty(&params.city) else {
        return error_response(StatusCode::BAD_REQUEST, "City parameter is required");
    };

    match data.owm.current_by_city(city).await {
        Ok(current) => HttpResponse::Ok().json(current),
        Err(e) => owm_error_response(e, "City not found", "Failed to fetch weather data"),
    }
}

#[get("/api/weather/coordinates")]
async fn coordinates(params: web::Query<CoordinateParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let lat = non_empty(&params.lat).and_then(|v| v.parse::<f64>().ok());
    let lon = non_empty(&params.lon).and_then(|v| v.parse::<f64>().ok());
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return error_response(StatusCode::BAD_REQUEST, "Latitude and longitude parameters are required");
    };

    match data.owm.current_by_coordinates(lat, lon).await {
        Ok(current) => HttpResponse::Ok().json(current),
        Err(e) => owm_error_response(e, "Weather data not found", "Failed to fetch weather data"),
    }
}

#[get("/api/weather/forecast")]
async fn forecast(params: web::Query<CityParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let Some(city) = non_empty(&params.city) else {
        return error_response(StatusCode::BAD_REQUEST, "City parameter is required");
    };

    match data.owm.forecast_samples(city).await {
        Ok(samples) => HttpResponse::Ok().json(daily_summaries(&samples, &Local::now())),
        Err(e) => owm_error_response(e, "Forecast data not found", "Failed to fetch forecast data"),
    }
}

#[get("/api/weather/suggestions")]
async fn suggestions(params: web::Query<SuggestionParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let query = params.q.as_deref().unwrap_or_default();
    if query.chars().count() < MIN_SUGGESTION_QUERY {
        return HttpResponse::Ok().json(Vec::<CitySuggestion>::new());
    }

    match data.owm.suggestions(query).await {
        Ok(cities) => HttpResponse::Ok().json(cities),
        Err(e) => {
            error!("failed to get suggestions: {}", e);
            HttpResponse::Ok().json(Vec::<CitySuggestion>::new())
        }
    }
}

/// Returns the parameter value unless it is missing or empty
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Builds a JSON error body with the given status
fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

/// Maps a failed upstream request to a response
///
/// # Arguments
///
/// * 'e' - the upstream error
/// * 'not_found' - message used when upstream rejected the request
/// * 'failed' - message used for any other failure
fn owm_error_response(e: OWMError, not_found: &str, failed: &str) -> HttpResponse {
    error!("failed to get data from OpenWeatherMap: {}", e);

    match e {
        OWMError::NotFound(_) => error_response(StatusCode::NOT_FOUND, not_found),
        _ => error_response(StatusCode::INTERNAL_SERVER_ERROR, failed),
    }
}
