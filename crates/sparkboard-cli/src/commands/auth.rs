use clap::Subcommand;
use sparkboard_core::storage::credentials;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the forecast API key in the OS keyring
    SetForecastKey { key: String },
    /// Remove the stored forecast API key
    ClearForecastKey,
    /// Report whether a forecast API key is available
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetForecastKey { key } => {
            if key.trim().is_empty() {
                return Err("forecast key must not be empty".into());
            }
            credentials::set_forecast_api_key(&key)?;
            println!("forecast key saved");
        }
        AuthAction::ClearForecastKey => {
            credentials::clear_forecast_api_key()?;
            println!("forecast key removed");
        }
        AuthAction::Status => {
            let from_env = std::env::var(credentials::FORECAST_KEY_ENV)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            if from_env {
                println!("forecast: configured ({})", credentials::FORECAST_KEY_ENV);
            } else if credentials::forecast_api_key().is_some() {
                println!("forecast: configured (keyring)");
            } else {
                println!("forecast: not configured");
            }
        }
    }
    Ok(())
}
