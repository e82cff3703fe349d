use agenda_template_client::jsonapi::TIMESTAMP_FORMAT;
use agenda_template_client::{AgendaTemplateClient, AnyResource, ClientError, Config, RemoteResource};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line access to the agenda template service
#[derive(Parser, Debug)]
#[command(name = "atc", version, about, long_about = None)]
struct Args {
    /// Base URL of the service (overrides AGENDA_TEMPLATE_API_URL and the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Remember --base-url in the config file
    #[arg(long, global = true)]
    save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show an agenda template with its items and rating question
    Template {
        /// Template slug or id
        slug: String,
        #[arg(long)]
        user: i64,
        #[arg(long)]
        soapbox: i64,
    },
    /// Show a suggested goal with its milestones
    Goal {
        id: i64,
        /// Extra query string
        #[arg(long, default_value = "include=milestones")]
        query: String,
    },
    /// List items added or updated since a date
    Items {
        /// Format: "YYYY-MM-DD HH:MM:SS"
        #[arg(long)]
        since: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("atc started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("agenda-template-client").join("atc.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".agenda-template-client").join("atc.log");
    }
    PathBuf::from("atc.log")
}

/// User-facing message for a client error
fn format_error(error: &ClientError) -> String {
    match error {
        ClientError::AgendaTemplateNotFound => "Agenda template not found.".to_string(),
        ClientError::GoalNotFound => "Suggested goal not found.".to_string(),
        ClientError::ItemNotFound => "No items found, or the service is unavailable.".to_string(),
        ClientError::MissingBaseUrl => {
            "No service URL configured. Use --base-url or set AGENDA_TEMPLATE_API_URL.".to_string()
        }
        ClientError::Transport(_) => {
            "The agenda template service did not respond. Check your network connection.".to_string()
        }
        other => other.to_string(),
    }
}

fn describe(resource: &AnyResource) -> String {
    let title = match resource {
        AnyResource::AgendaItem(item) => item.title(),
        AnyResource::Milestone(milestone) => milestone.body(),
        other => other.resource().str_attribute("title"),
    };
    format!("{} {}", resource.identifier(), title.unwrap_or("-"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();
    if let Some(base_url) = &args.base_url {
        if args.save {
            config.set_base_url(base_url).context("Failed to save configuration")?;
        } else {
            config.base_url = Some(base_url.clone());
        }
    }

    if let Err(err) = run(&args.command, &config).await {
        match err.downcast_ref::<ClientError>() {
            Some(client_error) => eprintln!("Error: {}", format_error(client_error)),
            None => eprintln!("Error: {err:?}"),
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(command: &Command, config: &Config) -> Result<()> {
    let client = AgendaTemplateClient::from_config(config)?;

    match command {
        Command::Template { slug, user, soapbox } => {
            let template = client.get_agenda_template_model(*user, *soapbox, slug).await?;

            println!(
                "{} ({})",
                template.name().unwrap_or("-"),
                template.channel_type().unwrap_or("-")
            );
            for item in template.agenda_items() {
                println!("  {}", describe(&item));
            }
            if let Some(question) = template.meeting_rating_question() {
                if let Some(question) = question.as_meeting_rating_question() {
                    println!("  ? {}", question.question().unwrap_or("-"));
                    for response in question.responses()? {
                        println!("    {} {}", response.emoji, response.text);
                    }
                }
            }
        }
        Command::Goal { id, query } => {
            let goal = client.get_suggested_goal_model(*id, Some(query.as_str())).await?;

            println!("{} {}", goal.icon().unwrap_or(""), goal.title().unwrap_or("-"));
            for milestone in goal.milestones() {
                println!("  {}", describe(&milestone));
            }
        }
        Command::Items { since } => {
            let since = NaiveDateTime::parse_from_str(since, TIMESTAMP_FORMAT)
                .with_context(|| format!("Invalid date {:?}, expected YYYY-MM-DD HH:MM:SS", since))?;
            let items = client.get_recently_added_or_updated_items(since).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}
