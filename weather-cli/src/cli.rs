use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use weather_widget_core::{Config, Session, Submitted, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Weather lookup widget")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default location.
    Configure,

    /// Show the current weather for a location.
    Show {
        /// Location name; defaults to the configured location.
        location: Option<String>,

        /// Print the display state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for locations repeatedly. An empty line or `:q` quits.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => show(location, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let location = Text::new("Default location:")
        .with_default(cfg.default_location())
        .prompt()
        .context("Failed to read default location")?;

    cfg.api_key = non_blank(&api_key);
    cfg.default_location = non_blank(&location);

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

/// Blank answers leave the setting unset.
fn non_blank(answer: &str) -> Option<String> {
    Some(answer.trim()).filter(|a| !a.is_empty()).map(str::to_owned)
}

async fn show(location: Option<String>, json: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let location = location.unwrap_or_else(|| cfg.default_location().to_string());
    let session = Session::new(provider_from_config(&cfg)?);

    session.submit(&location).await?;

    if json {
        if let Some(state) = session.display() {
            println!("{}", render::render_json(&state)?);
        }
    } else if let Some(card) = render::render_session(&session) {
        println!("{card}");
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let session = Session::new(provider_from_config(&cfg)?);

    loop {
        let input = tokio::task::spawn_blocking(|| {
            Text::new("Location:").with_placeholder("Enter your location").prompt()
        })
        .await
        .context("Prompt task failed")?;

        let location = match input {
            Ok(location) => location,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        let location = location.trim();
        if location.is_empty() || location == ":q" {
            break;
        }

        let handle = session.spawn_submit(location)?;
        let session = session.clone();
        tokio::spawn(async move {
            match handle.await {
                Ok(Submitted::Applied) => {
                    if let Some(card) = render::render_session(&session) {
                        println!("\n{card}\n");
                    }
                }
                Ok(Submitted::Stale) => {}
                Err(err) => tracing::error!(error = %err, "lookup task failed"),
            }
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answers_are_not_saved() {
        assert_eq!(non_blank(""), None);
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(" Hanoi "), Some("Hanoi".to_string()));
    }
}
