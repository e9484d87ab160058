//! Service entry-point: wires adapters to services and serves the REST API.

use std::env;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use tracing::warn;
use url::Url;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use adopt_a_pet_backend::domain::{
    AccountService, CatalogService, LikeService, MirrorService, TokenService,
};
use adopt_a_pet_backend::inbound::http::state::HttpState;
use adopt_a_pet_backend::inbound::http::{catalog, likes, users};
use adopt_a_pet_backend::outbound::persistence::{
    DbPool, DieselLikeRepository, DieselMirrorRepository, DieselUserRepository, PoolConfig,
};
use adopt_a_pet_backend::outbound::petfinder::{PetfinderCredentials, PetfinderHttpSource};
use adopt_a_pet_backend::outbound::security::BcryptHasher;
#[cfg(debug_assertions)]
use adopt_a_pet_backend::ApiDoc;

const DEFAULT_PETFINDER_BASE_URL: &str = "https://api.petfinder.com/v2";
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

fn required_env(name: &str) -> io::Result<String> {
    env::var(name).map_err(|_| io::Error::other(format!("{name} must be set")))
}

fn session_key() -> io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = required_env("DATABASE_URL")?;
    let base_url = env::var("PETFINDER_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_PETFINDER_BASE_URL.to_owned());
    let base_url = Url::parse(&base_url)
        .map_err(|e| io::Error::other(format!("invalid PETFINDER_BASE_URL: {e}")))?;
    let credentials = PetfinderCredentials::new(
        required_env("PETFINDER_CLIENT_ID")?,
        required_env("PETFINDER_CLIENT_SECRET")?,
    );

    let key = session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| io::Error::other(e.to_string()))?;

    // One reqwest adapter serves as both the token and the catalog source.
    let upstream = Arc::new(
        PetfinderHttpSource::new(base_url, credentials, UPSTREAM_TIMEOUT)
            .map_err(|e| io::Error::other(format!("failed to build upstream client: {e}")))?,
    );
    let token_service = TokenService::new(Arc::clone(&upstream));

    let accounts = AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(BcryptHasher),
    );
    let catalog_service = CatalogService::new(token_service.clone(), Arc::clone(&upstream));
    let like_service = LikeService::new(
        MirrorService::new(
            token_service,
            Arc::clone(&upstream),
            Arc::new(DieselMirrorRepository::new(pool.clone())),
        ),
        Arc::new(DieselLikeRepository::new(pool)),
    );

    let state = web::Data::new(HttpState::new(
        Arc::new(accounts),
        Arc::new(catalog_service),
        Arc::new(like_service),
    ));

    HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(users::signup)
            .service(users::login)
            .service(users::logout)
            .service(users::update_profile)
            .service(users::delete_account)
            .service(users::liked_animals)
            .service(users::liked_organizations)
            .service(users::show_user)
            .service(catalog::list_animals)
            .service(catalog::animal_types)
            .service(catalog::animal_details)
            .service(catalog::list_organizations)
            .service(catalog::organization_details)
            .service(likes::toggle_animal)
            .service(likes::toggle_organization);

        let app = App::new().app_data(state.clone()).service(api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .run()
    .await
}
