use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text, required};
use weather_lookup_core::{
    Config, WeatherLookup, WeatherProvider, config::DEFAULT_BASE_URL,
    provider::provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Current weather for a city")]
pub struct Cli {
    /// WeatherAPI.com key; overrides the one in the config file.
    #[arg(long, global = true, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key (and optionally a custom endpoint).
    Configure,

    /// Show current weather for a city.
    Show {
        /// City or location name.
        city: String,

        /// Print the raw result as JSON instead of messages.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, json } => {
                let provider = load_provider(self.api_key)?;
                let mut lookup = WeatherLookup::new();
                lookup.submit_search(provider.as_ref(), &city).await;

                match (json, lookup.result()) {
                    (true, Some(result)) => println!(
                        "{}",
                        serde_json::to_string_pretty(result)
                            .context("Failed to serialize weather result")?
                    ),
                    _ => render(&lookup),
                }

                if lookup.error_message().is_some() {
                    Ok(ExitCode::FAILURE)
                } else {
                    Ok(ExitCode::SUCCESS)
                }
            }
            Command::Interactive => {
                let provider = load_provider(self.api_key)?;
                interactive(provider.as_ref()).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_provider(api_key: Option<String>) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let config = Config::load()?.with_api_key_override(api_key);
    provider_from_config(&config)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut prompt = Password::new("WeatherAPI.com key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();
    if config.is_configured() {
        prompt = prompt.with_help_message("Leave empty to keep the current key");
    } else {
        prompt = prompt.with_validator(required!("An API key is required"));
    }
    let api_key = prompt.prompt().context("Failed to read API key")?;
    if !config.update_api_key(&api_key) {
        println!("Keeping the existing API key.");
    }

    let current = config.weatherapi.base_url().to_string();
    let base_url = Text::new("API base URL:")
        .with_default(&current)
        .prompt()
        .context("Failed to read base URL")?;
    let base_url = base_url.trim().trim_end_matches('/');
    config.weatherapi.base_url =
        (!base_url.is_empty() && base_url != DEFAULT_BASE_URL).then(|| base_url.to_string());

    let path = config.save()?;
    tracing::info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn interactive(provider: &dyn WeatherProvider) -> anyhow::Result<()> {
    let mut lookup = WeatherLookup::new();

    loop {
        let input = match Text::new("City:")
            .with_placeholder("Enter a city name")
            .with_initial_value(lookup.query_text())
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        let Some(ticket) = lookup.begin_search(&input) else {
            render(&lookup);
            continue;
        };

        eprintln!("{}", lookup.button_label());
        let outcome = provider.current(ticket.location()).await;
        lookup.complete_search(ticket, outcome);
        render(&lookup);
    }

    Ok(())
}

/// Error line first, then the three result rows.
fn render(lookup: &WeatherLookup) {
    if let Some(message) = lookup.error_message() {
        eprintln!("{message}");
    }

    if let Some(rows) = lookup.result_rows_now() {
        for row in rows {
            println!("{:<12} {}", format!("{}:", row.label), row.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_city_and_json_flag() {
        let cli = Cli::try_parse_from(["weather-lookup", "-vv", "show", "New York", "--json"])
            .expect("arguments should parse");

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn api_key_flag_is_global() {
        let cli = Cli::try_parse_from(["weather-lookup", "interactive", "--api-key", "KEY"])
            .expect("arguments should parse");

        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
        assert!(matches!(cli.command, Command::Interactive));
    }
}
