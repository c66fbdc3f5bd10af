//! Command dispatch

pub mod dashboard;
pub mod resource;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::{AdminError, Result};
use crate::transport::HttpTransport;
use indicatif::{ProgressBar, ProgressStyle};
use sonrisas_common::{Appointment, Dentist, Notice, Office, Patient, Radiograph, ResourceClient};
use std::time::Duration;

/// Everything a command needs to talk to the backend
pub struct Context {
    pub client: ResourceClient<HttpTransport>,
    pub base_url: String,
    pub recent: usize,
}

impl Context {
    pub fn new(config: &Config, api_url: Option<&str>) -> Result<Self> {
        let base_url = config.resolve_base_url(api_url)?;
        let timeout = config.timeout_seconds.map(Duration::from_secs);
        tracing::debug!(base_url = %base_url, ?timeout, "using backend");
        Ok(Self {
            client: ResourceClient::new(HttpTransport::new(&base_url, timeout)?),
            base_url,
            recent: config.recent_radiographs,
        })
    }
}

/// Spinner on stderr while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a page notice; an error notice fails the command
pub fn report(notice: Option<&Notice>) -> Result<()> {
    match notice {
        Some(notice) if notice.is_error() => Err(AdminError::Notice(notice.message.clone())),
        Some(notice) => {
            println!("{}", crate::render::notice(notice));
            Ok(())
        }
        None => Ok(()),
    }
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let command = match cli.command {
        Commands::Config { set_api_url, set_recent, show } => {
            return run_config(config, set_api_url, set_recent, show)
        }
        command => command,
    };

    let ctx = Context::new(&config, cli.api_url.as_deref())?;
    match command {
        Commands::Patients { action } => resource::run::<Patient>(&ctx, action).await,
        Commands::Appointments { action } => resource::run::<Appointment>(&ctx, action).await,
        Commands::Dentists { action } => resource::run::<Dentist>(&ctx, action).await,
        Commands::Offices { action } => resource::run::<Office>(&ctx, action).await,
        Commands::Radiographs { action } => resource::run::<Radiograph>(&ctx, action).await,
        Commands::Dashboard => dashboard::run_dashboard(&ctx).await,
        Commands::Overview => dashboard::run_overview(&ctx).await,
        Commands::Config { .. } => Ok(()),
    }
}

fn run_config(
    mut config: Config,
    set_api_url: Option<String>,
    set_recent: Option<usize>,
    show: bool,
) -> Result<()> {
    let mut changed = false;

    if let Some(url) = set_api_url {
        config.set_api_base_url(&url)?;
        println!("✔ URL base guardada: {}", config.api_base_url);
        changed = true;
    }

    if let Some(recent) = set_recent {
        if recent == 0 {
            return Err(AdminError::InvalidArgument(
                "la cantidad de radiografías debe ser mayor que 0".into(),
            ));
        }
        config.recent_radiographs = recent;
        config.save()?;
        println!("✔ Radiografías recientes: {}", recent);
        changed = true;
    }

    if show || !changed {
        println!("Configuración:");
        println!("  Archivo: {}", Config::config_path()?.display());
        println!("  URL base: {}", config.api_base_url);
        println!("  Radiografías recientes: {}", config.recent_radiographs);
        println!(
            "  Tiempo de espera: {}",
            config
                .timeout_seconds
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "sin límite".into())
        );
    }

    Ok(())
}
