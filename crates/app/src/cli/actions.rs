use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use freemate_application::ports::{Clock, Notifier, SessionStorage};
use freemate_application::{ApiClient, AuthService, RegistrationService, TokenStore};
use freemate_domain::{
    ClientConfig, DEFAULT_DATE_FORMAT, RegistrationForm, format_date, validate_email,
    validate_password,
};
use freemate_infrastructure::{MemorySessionStorage, ReqwestTransport, SystemClock, load_config};
use tracing::info;

use crate::notifier::ConsoleNotifier;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    SendMail { email: String },
    CheckUsername { username: String },
    Register(RegistrationForm),
    Login { username: String, password: String },
    ShowConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub config_path: Option<PathBuf>,
    pub task: Task,
}

/// Adapters and services for one run.
struct Services {
    tokens: Arc<TokenStore>,
    registration: RegistrationService,
    auth: AuthService,
}

impl Services {
    fn build(config: ClientConfig) -> Result<Self> {
        let config = Arc::new(config);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());
        let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
        let transport = ReqwestTransport::new().context("failed to build HTTP client")?;

        let tokens = Arc::new(TokenStore::new(&config.token, clock.clone(), storage.clone()));
        let client = Arc::new(ApiClient::new(
            config,
            Arc::new(transport),
            tokens.clone(),
            notifier.clone(),
        ));

        Ok(Self {
            tokens,
            registration: RegistrationService::new(client.clone(), notifier.clone(), clock, storage),
            auth: AuthService::new(client, notifier),
        })
    }
}

pub async fn run(action: Action) -> Result<()> {
    let (config, source) = load_config(action.config_path.as_deref(), |name| {
        std::env::var(name).ok()
    })?;
    info!(?source, base_url = %config.base_url, "Using configuration");

    if action.task == Task::ShowConfig {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let services = Services::build(config)?;

    match action.task {
        Task::SendMail { email } => {
            if !validate_email(&email) {
                bail!("not a valid email address: {email}");
            }
            services.registration.send_verification_email(&email).await?;
        }
        Task::CheckUsername { username } => {
            if services.registration.check_username_duplicate(&username).await {
                println!("{username} is not available");
            } else {
                println!("{username} is available");
            }
        }
        Task::Register(form) => {
            if !validate_email(&form.email) {
                bail!("not a valid email address: {}", form.email);
            }
            if !validate_password(&form.password) {
                bail!("password must be at least 6 characters");
            }
            services.registration.register(form).await?;
        }
        Task::Login { username, password } => {
            let nickname = services.auth.login(&username, &password).await?;
            println!("Welcome, {nickname}");
            println!("Session: {}", services.tokens.status().await.display_message());
            if let Some(expires_at) = services.tokens.snapshot().await.expires_at {
                println!("Expires on: {}", format_date(&expires_at, DEFAULT_DATE_FORMAT));
            }
        }
        Task::ShowConfig => {}
    }

    Ok(())
}
