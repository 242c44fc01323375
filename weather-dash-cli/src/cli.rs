use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use weather_dash_core::{Config, Dashboard, Notice, SubmitOutcome, provider_from_config};

use crate::render;

const HELP: &str = "\
Type a city name and press Enter to add a card.
  :rm <city>   remove the card for <city> (exact name)
  :rm          pick a card to remove
  :help        show this help
  :q, :quit    exit (Esc / Ctrl-C work too)";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Current weather cards for your cities")]
pub struct Cli {
    /// Grid width in columns (default: $COLUMNS or 80).
    #[arg(long, global = true)]
    pub width: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard (the default).
    Dashboard,

    /// Add the given cities in order and print the resulting cards.
    Show {
        /// City names, e.g. `Berlin "New York"`.
        #[arg(required = true)]
        cities: Vec<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let width = render::terminal_width(self.width);
        tracing::debug!(width, columns = render::columns_for(width), "grid layout");

        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure(),
            Command::Show { cities } => show(cities, width).await,
            Command::Dashboard => interactive(width).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    cfg.set_api_key(api_key);
    let path = cfg.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

fn new_dashboard() -> anyhow::Result<Dashboard> {
    let cfg = Config::from_env()?;
    Ok(Dashboard::new(provider_from_config(&cfg)))
}

async fn show(cities: Vec<String>, width: usize) -> anyhow::Result<()> {
    let mut dash = new_dashboard()?;

    for city in cities {
        dash.set_input(city);
        if let Some(line) = describe(dash.submit().await) {
            println!("{line}");
        }
    }

    // Notices were printed per city above.
    dash.dismiss_notice();
    print!("{}", render::render_dashboard(&dash, width));
    Ok(())
}

async fn interactive(width: usize) -> anyhow::Result<()> {
    let mut dash = new_dashboard()?;
    println!("{HELP}\n");
    print!("{}", render::render_dashboard(&dash, width));

    loop {
        let line = match Text::new("City:")
            .with_initial_value(dash.input())
            .with_help_message(":help for commands")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match Action::parse(&line) {
            Action::Quit => break,
            Action::Help => {
                println!("{HELP}");
                continue;
            }
            Action::Remove(Some(city)) => {
                if !dash.remove(&city) {
                    println!("No card named \"{city}\"");
                }
            }
            Action::Remove(None) => pick_and_remove(&mut dash)?,
            Action::Submit(text) => {
                let blank = text.trim().is_empty();
                dash.set_input(text);
                if !blank {
                    println!("Loading…");
                }
                dash.submit().await;
            }
        }

        print!("\n{}", render::render_dashboard(&dash, width));
    }

    Ok(())
}

fn pick_and_remove(dash: &mut Dashboard) -> anyhow::Result<()> {
    let names: Vec<String> = dash.cities().iter().map(|r| r.city.clone()).collect();
    if names.is_empty() {
        println!("No cards to remove");
        return Ok(());
    }

    match Select::new("Remove which card?", names).prompt() {
        Ok(city) => {
            dash.remove(&city);
            Ok(())
        }
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// One line summarising a submit, for the non-interactive `show` command.
fn describe(outcome: SubmitOutcome) -> Option<String> {
    match outcome {
        SubmitOutcome::Ignored => None,
        SubmitOutcome::Busy => Some("A lookup is already in progress".to_string()),
        SubmitOutcome::Added(record) => Some(format!("Added {}", record.city)),
        SubmitOutcome::Duplicate(city) => Some(format!("{city}: City already added")),
        SubmitOutcome::Failed(err) => Some(Notice::from(&err).to_string()),
    }
}

/// What a line typed at the prompt asks for.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Submit(String),
    Remove(Option<String>),
    Help,
    Quit,
}

impl Action {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        match trimmed {
            ":q" | ":quit" => return Action::Quit,
            ":help" | ":h" | ":?" => return Action::Help,
            _ => {}
        }

        if let Some(rest) = trimmed.strip_prefix(":rm") {
            if rest.is_empty() {
                return Action::Remove(None);
            }
            if rest.starts_with(char::is_whitespace) {
                return Action::Remove(Some(rest.trim().to_string()));
            }
        }

        Action::Submit(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_dash_core::{FetchError, error::StatusCode};

    #[test]
    fn plain_text_is_a_submission() {
        assert_eq!(Action::parse("New York"), Action::Submit("New York".into()));
        assert_eq!(Action::parse("   "), Action::Submit("   ".into()));
    }

    #[test]
    fn remove_with_and_without_city() {
        assert_eq!(Action::parse(":rm São Paulo "), Action::Remove(Some("São Paulo".into())));
        assert_eq!(Action::parse(":rm"), Action::Remove(None));
        assert_eq!(Action::parse(" :rm  "), Action::Remove(None));
    }

    #[test]
    fn rm_prefix_needs_a_separator() {
        assert_eq!(Action::parse(":rmx"), Action::Submit(":rmx".into()));
    }

    #[test]
    fn quit_and_help() {
        assert_eq!(Action::parse(":q"), Action::Quit);
        assert_eq!(Action::parse(":quit"), Action::Quit);
        assert_eq!(Action::parse(":help"), Action::Help);
    }

    #[test]
    fn describe_uses_user_messages() {
        let err = FetchError::NotFound {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(describe(SubmitOutcome::Failed(err)).as_deref(), Some("City not found"));
        assert_eq!(describe(SubmitOutcome::Ignored), None);
        assert_eq!(
            describe(SubmitOutcome::Duplicate("Paris".into())).as_deref(),
            Some("Paris: City already added")
        );
    }

    #[test]
    fn cli_parses_show_with_width() {
        let cli = Cli::try_parse_from(["weather-dash", "--width", "100", "show", "Berlin", "Oslo"])
            .expect("valid args");

        assert_eq!(cli.width, Some(100));
        match cli.command {
            Some(Command::Show { cities }) => assert_eq!(cities, ["Berlin", "Oslo"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["weather-dash"]).expect("valid args");
        assert!(cli.command.is_none());
    }
}
