use std::sync::Arc;

use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use university_assistant::config::Settings;
use university_assistant::openwebui::{OpenWebUiApi, OpenWebUiClient};
use university_assistant::services::{ChatService, DocumentService};
use university_assistant::web::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting University AI Assistant backend");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client: Arc<dyn OpenWebUiApi> = match OpenWebUiClient::new(&settings) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize Open WebUI client: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = Data::new(AppState {
        chat: ChatService::new(client.clone(), settings.default_model.clone()),
        documents: DocumentService::new(client),
    });

    let upload_limit = settings.max_upload_bytes;

    info!("Listening on {}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(upload_limit)
                    .memory_limit(upload_limit),
            )
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
