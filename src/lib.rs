pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::{toml_config::TomlConfig, ClientSettings};

pub use adapters::{
    console::{ConsoleNavigator, ConsoleStatus, HeadlessMap},
    google::GoogleMapsClient,
    http::ApiClient,
    storage::{LocalStorage, MemoryStorage},
};
pub use core::{
    auth::{AuthClient, AuthOutcome},
    catalog::Catalog,
    map_controller::{MapController, MapSettings},
};
pub use utils::error::{ClientError, Result};
