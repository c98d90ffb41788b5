use crate::config::toml_config::TomlConfig;
use crate::config::ClientSettings;
use crate::domain::model::RegistrationForm;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cultech")]
#[command(about = "Events and venues discovery client: map markers, routes and sign-in")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true)]
    pub maps_base_url: Option<String>,

    #[arg(long, global = true, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub maps_api_key: Option<String>,

    /// Where the session token is kept
    #[arg(long, global = true)]
    pub storage_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in with username and password
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register(RegisterArgs),
    /// Sign in with a Google identity credential (JWT)
    Google {
        #[arg(long)]
        credential: String,
    },
    /// List all venues
    Venues,
    /// Show one venue
    Venue { id: i64 },
    /// List all events
    Events,
    /// Show one event
    Event { id: i64 },
    /// List the comments of an event
    Comments { event_id: i64 },
    /// Show one event comment
    Comment { id: i64 },
    /// List the signed-in user's favorite events
    Favorites,
    /// Like an event
    Like { event_id: i64 },
    /// Create an event from a JSON file
    CreateEvent {
        #[arg(long)]
        file: PathBuf,
    },
    /// Load the map: nearby places, venues and events
    Map {
        /// Click marker N and show its description
        #[arg(long)]
        describe: Option<usize>,
        /// Click marker N and draw the route to it
        #[arg(long)]
        route: Option<usize>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long)]
    pub password: String,
    #[arg(long)]
    pub password_again: String,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long)]
    pub organizer: bool,
}

impl From<&RegisterArgs> for RegistrationForm {
    fn from(args: &RegisterArgs) -> Self {
        Self {
            username: args.username.clone(),
            email: args.email.clone(),
            password: args.password.clone(),
            password_again: args.password_again.clone(),
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            is_organizer: args.organizer,
        }
    }
}

impl CliConfig {
    /// Defaults, then the config file, then flags.
    pub fn resolve(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        if let Some(url) = &self.api_base_url {
            settings.api_base_url = url.clone();
        }
        if let Some(url) = &self.maps_base_url {
            settings.maps_base_url = url.clone();
        }
        if let Some(key) = &self.maps_api_key {
            settings.maps_api_key = Some(key.clone());
        }
        if let Some(path) = &self.storage_path {
            settings.storage_path = path.clone();
        }

        Ok(settings)
    }
}
