#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the heritage map application.
//!
//! Loads the listed building points and the borough boundary once at
//! startup, then serves them to the `MapLibre` front end along with the
//! street ranking, the sidebar statistics, and the selection/summary
//! lookup endpoints. All session state lives in a single
//! [`Browser`] behind a mutex.

mod handlers;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use geojson::GeoJson;
use heritage_map_browser::Browser;
use heritage_map_buildings::dataset::{Dataset, load_boundary};
use heritage_map_summary::SummarySource;
use heritage_map_summary::registry::default_source;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`).
    pub bind_addr: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Building points `GeoJSON` (`BUILDINGS_PATH`).
    pub buildings_path: PathBuf,
    /// Borough boundary `GeoJSON` (`BOUNDARY_PATH`).
    pub boundary_path: PathBuf,
    /// Built front end directory (`STATIC_DIR`).
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            buildings_path: PathBuf::from("data/buildings_points_wgs84.json"),
            boundary_path: PathBuf::from("data/southwark_boundary_wgs84.json"),
            static_dir: PathBuf::from("app/dist"),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from environment variables, falling back to
    /// [`ServerConfig::default`] for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            buildings_path: get("BUILDINGS_PATH").map_or(defaults.buildings_path, PathBuf::from),
            boundary_path: get("BOUNDARY_PATH").map_or(defaults.boundary_path, PathBuf::from),
            static_dir: get("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        }
    }
}

/// Shared application state.
pub struct AppState {
    browser: Mutex<Browser>,
    /// Source used by the summary lookup endpoint.
    pub summary_source: Arc<dyn SummarySource>,
    /// Sanitized building points, pre-rendered for the map layer.
    pub buildings: geojson::FeatureCollection,
    /// Boundary overlay, served as loaded.
    pub boundary: GeoJson,
}

impl AppState {
    /// Creates the state for one dataset.
    #[must_use]
    pub fn new(dataset: Dataset, boundary: GeoJson, summary_source: Arc<dyn SummarySource>) -> Self {
        let buildings = dataset.to_geojson();
        Self {
            browser: Mutex::new(Browser::new(Arc::new(dataset))),
            summary_source,
            buildings,
            boundary,
        }
    }

    /// Locks the session state.
    ///
    /// # Panics
    ///
    /// Panics if the `Mutex` is poisoned.
    pub fn browser(&self) -> MutexGuard<'_, Browser> {
        self.browser.lock().expect("Browser state mutex poisoned")
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/buildings", web::get().to(handlers::buildings))
            .route("/boundary", web::get().to(handlers::boundary))
            .route("/streets", web::get().to(handlers::streets))
            .route("/overall", web::get().to(handlers::overall))
            .route("/selection", web::get().to(handlers::selection))
            .route(
                "/selection/building",
                web::post().to(handlers::select_building),
            )
            .route(
                "/selection/building",
                web::delete().to(handlers::clear_building),
            )
            .route("/selection/street", web::post().to(handlers::select_street))
            .route("/selection/street", web::delete().to(handlers::clear_street))
            .route("/threshold", web::put().to(handlers::set_threshold))
            .route("/summary", web::post().to(handlers::fetch_summary))
            .route("/summary", web::delete().to(handlers::clear_summary)),
    );
}

/// Starts the heritage map API server.
///
/// Reads [`ServerConfig`] from the environment, loads the building
/// dataset and boundary overlay, and serves until shutdown. A missing or
/// invalid boundary file is logged and replaced with an empty overlay.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the building dataset cannot be
/// loaded, the summary source cannot be built, or the HTTP server fails
/// to bind.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env();

    log::info!("Loading buildings from {}...", config.buildings_path.display());
    let dataset = Dataset::load(&config.buildings_path).map_err(std::io::Error::other)?;

    let boundary = load_boundary(&config.boundary_path).unwrap_or_else(|e| {
        log::warn!(
            "No boundary overlay ({}): {e}",
            config.boundary_path.display()
        );
        GeoJson::FeatureCollection(geojson::FeatureCollection {
            bbox: None,
            features: Vec::new(),
            foreign_members: None,
        })
    });

    let summary_source: Arc<dyn SummarySource> =
        Arc::from(default_source().map_err(std::io::Error::other)?);

    let state = web::Data::new(AppState::new(dataset, boundary, summary_source));
    let static_dir = config.static_dir.clone();

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn config_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn config_reads_overrides() {
        let env = BTreeMap::from([
            ("PORT", "9000"),
            ("BUILDINGS_PATH", "/srv/buildings.json"),
        ]);
        let config = ServerConfig::from_lookup(|k| env.get(k).map(ToString::to_string));
        assert_eq!(config.port, 9000);
        assert_eq!(config.buildings_path, PathBuf::from("/srv/buildings.json"));
        assert_eq!(config.bind_addr, "127.0.0.1");
    }

    #[test]
    fn unparseable_port_falls_back() {
        let config = ServerConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8080);
    }
}
