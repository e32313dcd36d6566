use std::process::ExitCode;

use anyhow::Context;
use chrono::{Days, Local};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use meteo_core::{Config, Outcome, Region, Widget};

use crate::view::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Prévisions météo par code postal")]
pub struct Cli {
    /// Ignore the config file and use the built-in endpoints.
    #[arg(long, global = true)]
    pub config_defaults: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the forecast for a postal code and a date.
    Show {
        /// Five-digit French postal code, e.g. "75001".
        postal_code: String,

        /// Date as YYYY-MM-DD, at most 16 days ahead.
        date: String,
    },

    /// Prompt for the postal code and the date.
    Ask,

    /// Edit the service endpoints interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let config = if self.config_defaults {
            Config::default()
        } else {
            Config::load()?
        };

        match self.command {
            Command::Show { postal_code, date } => {
                let widget = Widget::from_config(config);
                let mut view = TerminalView::new();
                view.set_input(Region::PostalCode, postal_code);
                view.set_input(Region::Date, date);
                widget.attach(&mut view);

                let outcome = widget.check_weather(&mut view).await;
                finish(&view, &outcome)
            }
            Command::Ask => {
                let widget = Widget::from_config(config);
                let mut view = TerminalView::new();
                widget.attach(&mut view);

                let postal_code = Text::new("Code postal :")
                    .with_help_message("5 chiffres, Entrée pour valider")
                    .prompt()?;
                view.set_input(Region::PostalCode, postal_code);

                let tomorrow = Local::now()
                    .date_naive()
                    .checked_add_days(Days::new(1))
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                let earliest = view
                    .attribute(Region::Date, "min")
                    .unwrap_or_default()
                    .to_string();
                let date = Text::new("Date (AAAA-MM-JJ) :")
                    .with_default(&tomorrow)
                    .with_help_message(&format!("à partir du {earliest}, 16 jours au plus"))
                    .prompt()?;
                view.set_input(Region::Date, date);

                // The prompt returns on Enter.
                match widget.on_key_press(&mut view, Region::Date, "Enter").await {
                    Some(outcome) => finish(&view, &outcome),
                    None => Ok(ExitCode::SUCCESS),
                }
            }
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn finish(view: &TerminalView, outcome: &Outcome) -> anyhow::Result<ExitCode> {
    view.print(&mut std::io::stdout().lock())
        .context("Failed to write forecast to stdout")?;

    Ok(match outcome {
        Outcome::Shown(_) => ExitCode::SUCCESS,
        Outcome::Failed(_) | Outcome::NoInputs => ExitCode::FAILURE,
    })
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.geocoding_url = Text::new("Service de géocodage :")
        .with_default(&config.geocoding_url)
        .prompt()?;
    config.forecast_url = Text::new("Service de prévisions :")
        .with_default(&config.forecast_url)
        .prompt()?;
    config.radar_url = Text::new("Site radar :")
        .with_default(&config.radar_url)
        .prompt()?;
    config.radar_layer = Text::new("Calque radar :")
        .with_default(&config.radar_layer)
        .prompt()?;
    config.radar_zoom = CustomType::<u8>::new("Zoom radar :")
        .with_default(config.radar_zoom)
        .with_error_message("Entrez un nombre entre 0 et 255")
        .prompt()?;

    let path = config.save()?;
    println!("Configuration enregistrée dans {}", path.display());
    Ok(())
}
