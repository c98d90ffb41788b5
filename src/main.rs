use clap::Parser;
use cultech_client::core::ConfigProvider;
use cultech_client::domain::model::{MarkerId, NewEvent, RegistrationForm};
use cultech_client::domain::ports::TokenStore;
use cultech_client::utils::error::{ClientError, ErrorSeverity};
use cultech_client::utils::{logger, validation::Validate};
use cultech_client::{
    ApiClient, AuthClient, Catalog, CliConfig, ClientSettings, Command, ConsoleNavigator,
    ConsoleStatus, GoogleMapsClient, HeadlessMap, LocalStorage, MapController, MapSettings,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cultech client");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config.command, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(command: &Command, settings: &ClientSettings) -> cultech_client::Result<()> {
    let tokens: Arc<dyn TokenStore> = Arc::new(LocalStorage::new(settings.storage_path()));
    let api = ApiClient::new(settings.api_base_url(), tokens)?;

    match command {
        Command::Login { username, password } => {
            let auth = auth_client(api, settings);
            auth.login(username, password).await?.into_result()?;
        }
        Command::Register(args) => {
            let auth = auth_client(api, settings);
            auth.register(&RegistrationForm::from(args))
                .await?
                .into_result()?;
        }
        Command::Google { credential } => {
            let auth = auth_client(api, settings);
            auth.sign_in_with_google(credential).await?.into_result()?;
        }
        Command::Venues => print_json(&api.get_venues().await?)?,
        Command::Venue { id } => print_json(&api.get_venue(*id).await?)?,
        Command::Events => print_json(&api.get_events().await?)?,
        Command::Event { id } => {
            let detail = api.get_event(*id).await?;
            print_json(&detail.event)?;
            if let Some(location) = &detail.location {
                print_json(location)?;
            }
        }
        Command::Comments { event_id } => print_json(&api.get_event_comments(*event_id).await?)?,
        Command::Comment { id } => print_json(&api.get_event_comment(*id).await?)?,
        Command::Favorites => print_json(&api.get_favorite_events().await?)?,
        Command::Like { event_id } => {
            api.like_event(*event_id).await?;
            println!("✅ Liked event {}", event_id);
        }
        Command::CreateEvent { file } => {
            let data = std::fs::read(file)?;
            let event: NewEvent = serde_json::from_slice(&data)?;
            api.create_event(&event).await?;
            println!("✅ Event '{}' created", event.title);
        }
        Command::Map { describe, route } => {
            run_map(api, settings, *describe, *route).await?;
        }
    }

    Ok(())
}

fn auth_client(api: ApiClient, settings: &ClientSettings) -> AuthClient {
    AuthClient::new(
        api,
        Arc::new(ConsoleStatus::new()),
        Arc::new(ConsoleNavigator),
        settings.redirect_url(),
        settings.redirect_delay(),
    )
}

async fn run_map(
    api: ApiClient,
    settings: &ClientSettings,
    describe: Option<usize>,
    route: Option<usize>,
) -> cultech_client::Result<()> {
    let mut controller = MapController::new(HeadlessMap::new(), MapSettings::from_config(settings));
    match settings.maps_api_key() {
        Some(key) => {
            let google = Arc::new(GoogleMapsClient::new(settings.maps_base_url(), key)?);
            controller = controller.with_places(google.clone()).with_directions(google);
        }
        None => tracing::warn!("No maps API key configured, nearby places and routes are disabled"),
    }

    controller.init().await;

    let catalog = Catalog::new(api);
    // 各自失敗不影響另一邊
    let events = catalog.load_events(&mut controller).await.unwrap_or_else(|e| {
        tracing::error!("Error fetching events: {}", e);
        Vec::new()
    });
    let venues = catalog.load_venues(&mut controller).await.unwrap_or_else(|e| {
        tracing::error!("Error fetching venues: {}", e);
        Vec::new()
    });

    println!("Upcoming Events");
    for card in &events {
        println!("  {} | {} | {}", card.date_label, card.title, card.summary);
    }
    println!("Venues");
    for card in &venues {
        println!("  {}", card.label);
    }
    println!("Markers");
    for (index, spec) in controller.map().markers.iter().enumerate() {
        println!("  [{}] {:?} {} {}", index, spec.kind, spec.title, spec.position);
    }

    if let Some(index) = describe {
        let marker = MarkerId(index);
        if controller.on_marker_click(marker) {
            if let Some(panel) = controller.show_description(marker) {
                println!("{}", panel.title);
                println!("{}", panel.description);
                println!("{}", panel.likes_and_comments);
                for image in &panel.images {
                    println!("  {}", image);
                }
            }
        }
    }

    if let Some(index) = route {
        let marker = MarkerId(index);
        if controller.on_marker_click(marker) {
            let route = controller.show_route(marker).await?;
            println!(
                "🚗 {} ({}, {})",
                route.summary, route.distance_text, route.duration_text
            );
        } else {
            return Err(ClientError::ValidationError {
                message: format!("No marker with index {}", index),
            });
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> cultech_client::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
