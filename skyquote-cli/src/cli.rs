use std::{fmt, sync::Arc};

use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use inquire::{CustomType, InquireError, Select};
use skyquote_core::{App, Config, Coordinates, LocationSource};

use crate::{render, terminal::TerminalSink};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyquote", version, about = "A random quote and the weather where you are")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load one quote and the current weather, then exit.
    Show(LocationArgs),

    /// Load everything, then keep offering new quotes until you quit.
    Watch(LocationArgs),

    /// Choose where your location comes from.
    Configure,
}

/// Per-run location overrides.
#[derive(Debug, Clone, Args)]
pub struct LocationArgs {
    /// Latitude to use instead of the configured source.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude to use instead of the configured source.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Behave as if no location capability exists.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub no_location: bool,
}

impl LocationArgs {
    fn apply(&self, config: &mut Config) {
        if self.no_location {
            config.location.source = LocationSource::Unsupported;
        } else if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            config.set_fixed_location(Coordinates::new(lat, lon));
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    NewQuote,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NewQuote => f.write_str("New quote"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show(location) => {
                let (app, sink) = build_app(&location)?;
                app.on_load().await;
                print!("{}", render::card(sink.state()));
            }
            Command::Watch(location) => {
                let (app, sink) = build_app(&location)?;
                app.on_load().await;
                print!("{}", render::card(sink.state()));

                while let Action::NewQuote = prompt_action().await? {
                    app.request_new_quote().await;
                    print!("{}", render::card(sink.state()));
                }
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

fn build_app(location: &LocationArgs) -> anyhow::Result<(App, Arc<TerminalSink>)> {
    let mut config = Config::load()?;
    location.apply(&mut config);
    tracing::debug!("Using location source '{}'", config.location.source);

    let sink = Arc::new(TerminalSink::new());
    let app = App::from_config(&config, sink.clone())?;
    Ok((app, sink))
}

async fn prompt_action() -> anyhow::Result<Action> {
    let answer = tokio::task::spawn_blocking(|| {
        Select::new("What next?", vec![Action::NewQuote, Action::Quit]).prompt()
    })
    .await
    .context("Prompt task failed")?;

    match answer {
        Ok(action) => Ok(action),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(Action::Quit),
        Err(err) => Err(err).context("Failed to read selection"),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let source = Select::new("Where should your location come from?", LocationSource::all().to_vec())
        .with_help_message("ip: approximate, from your IP address · fixed: coordinates you enter · denied: never share · none: no location support")
        .prompt()
        .context("Failed to read location source")?;

    if source == LocationSource::Fixed {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number")
            .prompt()
            .context("Failed to read longitude")?;

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            bail!("Coordinates out of range: latitude must be within ±90, longitude within ±180.");
        }

        config.set_fixed_location(Coordinates::new(latitude, longitude));
    } else {
        config.location.source = source;
    }

    config.save()?;
    println!(
        "Saved location source '{}' to {}",
        config.location.source,
        Config::config_file_path()?.display()
    );

    Ok(())
}
