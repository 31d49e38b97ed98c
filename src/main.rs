mod errors;
mod handlers;
mod initialization;
mod logging;
mod manager_forecast;
mod manager_owm;

use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_owm::OWM;

pub struct AppState {
    pub owm: OWM,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let owm_config = &config.open_weather_map;
    let state = web::Data::new(AppState {
        owm: OWM::new(
            &owm_config.api_key,
            &owm_config.base_url,
            owm_config.timeout_secs,
            owm_config.suggestion_limit,
        )?,
    });

    info!("starting web server on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
