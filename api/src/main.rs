use actix_web::{web, HttpServer};
use anyhow::Context;
use std::sync::Arc;

use otc_api::{create_app, telemetry, DynAppState};
use otc_core::{
    CodeDispatcher, InMemoryUserDirectory, OtcService, OtcServiceConfig, PasscodeService,
    UserDirectory,
};
use otc_infra::{create_sms_service, create_store, SmsCodeDispatcher, SmsConfig, SmsService};
use otc_shared::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first, then a plain .env for anything left unset
    let _ = dotenvy::from_filename(Environment::from_env().env_file());
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        store = %config.cache.backend,
        code_length = config.otc.code_length,
        ttl_seconds = config.otc.ttl_seconds,
        max_attempts = config.otc.max_attempts,
        "Starting OTC service"
    );

    let store = create_store(&config.cache)
        .await
        .context("failed to initialise code store")?;

    let sms_config = SmsConfig::from_env().context("invalid SMS configuration")?;
    let sms = create_sms_service(&sms_config).context("failed to initialise SMS provider")?;
    let dispatcher: Arc<dyn CodeDispatcher> = Arc::new(SmsCodeDispatcher::<dyn SmsService>::new(Arc::from(sms)));

    let directory: Arc<dyn UserDirectory> =
        Arc::new(InMemoryUserDirectory::from_config(&config.directory));
    tracing::info!(users = config.directory.users.len(), "User directory loaded");

    let otc = OtcService::new(store, OtcServiceConfig::from(&config.otc));
    let passcode_service = Arc::new(PasscodeService::new(directory, otc, dispatcher));
    let app_state: web::Data<DynAppState> = web::Data::new(DynAppState::new(passcode_service));

    let bind_address = config.server.bind_address();
    let allowed_origins = config.server.allowed_origins.clone();
    tracing::info!(address = %bind_address, "Server listening");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &allowed_origins));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}
