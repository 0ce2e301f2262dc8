use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App,
};

use crate::auth::TokenKeys;
use crate::config::Config;
use crate::error::AppError;
use crate::routes;
use crate::services::{AuthService, TaskService};
use crate::store::Store;

/// Method, path, status, size and latency for every request.
pub const LOG_FORMAT: &str = "%a \"%r\" %s %b %Dms";

/// Shared handles for one running application. Clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub keys: TokenKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, keys: TokenKeys, bcrypt_cost: u32) -> Result<Self, AppError> {
        Ok(Self {
            auth: AuthService::new(store.clone(), keys.clone(), bcrypt_cost)?,
            tasks: TaskService::new(store),
            keys,
        })
    }

    pub fn from_config(store: Arc<dyn Store>, config: &Config) -> Result<Self, AppError> {
        Self::new(
            store,
            TokenKeys::new(&config.jwt_secret, config.jwt_ttl_secs),
            config.bcrypt_cost,
        )
    }
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

/// Builds the full application: app data, routes, CORS and request logging.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state.auth))
        .app_data(web::Data::new(state.tasks))
        .app_data(web::Data::new(state.keys))
        .wrap(cors())
        .wrap(Logger::new(LOG_FORMAT))
        .configure(routes::config)
}
