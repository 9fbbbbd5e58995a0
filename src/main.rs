/*!
 * esi-remote CLI
 *
 * Inspect and drive a running FwESI scenario from the command line.
 */

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use esi_remote::{
    cli_style::{
        self, actions_table, actors_table, enums_table, print_error, print_info, print_success,
        properties_table, saves_table, section_header, Icons, Theme,
    },
    config::{LogLevel, RemoteConfig},
    error::{EsiError, Result, EXIT_SUCCESS},
    logging, EsiRemote,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "esi-remote")]
#[command(version, about = "Remote control for the FwESI fire brigade simulator", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// FwESI host, e.g. http://192.168.0.20
    #[arg(long, global = true)]
    host: Option<String>,

    /// FwESI remote-control port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Log level
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevelArg>,

    /// Write logs as JSON to this file instead of stderr
    #[arg(long, value_name = "FILE", global = true)]
    log: Option<PathBuf>,

    /// Verbose logging (debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the save files, sub saves included
    Saves,

    /// Show the active scenario
    Active,

    /// List operator actors
    Actors {
        /// Only actors of this type, e.g. emergency_vehicle
        #[arg(long = "type", value_name = "TYPE")]
        actor_type: Option<String>,

        /// Only visible (true) or hidden (false) actors
        #[arg(long, value_parser = BoolishValueParser::new())]
        visible: Option<bool>,
    },

    /// Show one actor with its properties, enums and actions
    Actor { id: i64 },

    /// Load a save by its absolute path
    Load { path: String },

    /// Show or hide an actor
    Visible {
        id: i64,
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        visible: bool,
    },

    /// Set a property; the value is converted to the property's type
    Set {
        id: i64,
        property: String,
        value: String,
    },

    /// Select an enum value by name
    Enum {
        id: i64,
        #[arg(value_name = "ENUM")]
        property_enum: String,
        value: String,
    },

    /// Trigger an action
    Trigger { id: i64, action: String },

    /// Move a numeric property from START to END over time
    Ramp {
        id: i64,
        property: String,
        #[arg(allow_negative_numbers = true)]
        start: f64,
        #[arg(allow_negative_numbers = true)]
        end: f64,

        /// Duration of the ramp
        #[arg(long, default_value = "1.0")]
        seconds: f64,
    },

    /// Print the effective configuration, or write it to a file
    Config {
        #[arg(long, value_name = "FILE")]
        write: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

fn main() {
    let code = match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!("{} error: {:?}", e.category(), e);
            print_error(&e.to_string(), hint(&e));
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn hint(err: &EsiError) -> Option<&'static str> {
    match err {
        e if e.is_transient() => {
            Some("Is FwESI running with the remote-control server enabled? Check --host and --port.")
        }
        EsiError::ActorNotFound(_) => Some("Run `esi-remote actors` to list the actor ids."),
        EsiError::MemberNotFound { .. } | EsiError::UnknownEnumValue { .. } => {
            Some("Run `esi-remote actor <ID>` to see what the actor offers.")
        }
        EsiError::SaveNotFound(_) => Some("Run `esi-remote saves` to list the save paths."),
        _ => None,
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => RemoteConfig::from_file(path)?,
        None => RemoteConfig::default(),
    };

    // CLI flags override the file
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if cli.log.is_some() {
        config.log_file = cli.log;
    }
    config.verbose |= cli.verbose;
    config.validate()?;

    if let Err(e) = logging::init_logging(&config) {
        cli_style::print_warning(&format!("Failed to initialize logging: {}", e));
    }

    if let Commands::Config { ref write } = cli.command {
        return handle_config_command(&config, write.as_deref());
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| EsiError::Other(format!("Failed to start async runtime: {}", e)))?;
    runtime.block_on(execute(cli.command, &config))
}

fn handle_config_command(config: &RemoteConfig, write: Option<&Path>) -> Result<()> {
    match write {
        Some(path) => {
            config.to_file(path)?;
            print_success(&format!("Configuration written to {}", path.display()));
        }
        None => {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| EsiError::Config(format!("Failed to serialize config: {}", e)))?;
            print!("{}", rendered);
        }
    }
    Ok(())
}

async fn execute(command: Commands, config: &RemoteConfig) -> Result<()> {
    let mut remote = EsiRemote::connect(config).await?;

    match command {
        Commands::Saves => {
            section_header("Saves");
            println!("{}", saves_table(remote.save_files(), remote.active()));
        }
        Commands::Active => {
            let active = remote.active();
            print_info(&format!(
                "Active scenario: {} {}",
                Theme::header(active.scenario_name()),
                Theme::muted(format!("(id {})", active.scenario_id()))
            ));
        }
        Commands::Actors {
            actor_type,
            visible,
        } => {
            let mut actors = remote.operator_actors();
            if let Some(actor_type) = actor_type {
                actors = actors.by_attribute("type", actor_type);
            }
            if let Some(visible) = visible {
                actors = actors.by_attribute("is_visible", visible);
            }

            if actors.is_empty() {
                cli_style::print_warning("No operator actors match");
            } else {
                section_header("Operator actors");
                println!("{}", actors_table(actors));
            }
        }
        Commands::Actor { id } => print_actor(&remote, id)?,
        Commands::Load { path } => {
            remote.load_save(&path).await?;
            print_success(&format!(
                "Loaded '{}' {} active scenario is now '{}'",
                path,
                Icons::ARROW_RIGHT,
                remote.active().scenario_name()
            ));
        }
        Commands::Visible { id, visible } => {
            remote.set_visible(id, visible).await?;
            print_success(&format!(
                "Actor {} is now {}",
                id,
                if visible { "visible" } else { "hidden" }
            ));
        }
        Commands::Set {
            id,
            property,
            value,
        } => {
            remote.set_property(id, &property, value.as_str()).await?;
            let current = remote
                .operator_actor(id)
                .and_then(|actor| actor.property(&property))
                .map(|p| p.value().to_string())
                .unwrap_or(value);
            print_success(&format!("{} of actor {} set to {}", property, id, current));
        }
        Commands::Enum {
            id,
            property_enum,
            value,
        } => {
            remote.set_enum_value(id, &property_enum, &value).await?;
            print_success(&format!("{} of actor {} set to {}", property_enum, id, value));
        }
        Commands::Trigger { id, action } => {
            remote.trigger_action(id, &action).await?;
            print_success(&format!("Triggered {} on actor {}", action, id));
        }
        Commands::Ramp {
            id,
            property,
            start,
            end,
            seconds,
        } => {
            let duration = Duration::try_from_secs_f64(seconds).map_err(|_| {
                EsiError::InvalidValue(format!("'{}' is not a valid number of seconds", seconds))
            })?;
            let steps = remote
                .ramp_property(id, &property, start, end, duration)
                .await?;
            print_success(&format!(
                "Ramped {} of actor {} from {} to {} in {} steps",
                property, id, start, end, steps
            ));
        }
        Commands::Config { .. } => unreachable!("handled before connecting"),
    }

    Ok(())
}

fn print_actor(remote: &EsiRemote, id: i64) -> Result<()> {
    let actor = remote
        .operator_actor(id)
        .ok_or(EsiError::ActorNotFound(id))?;

    section_header(&format!("{} (id {})", actor.name(), actor.id()));
    println!(
        "  type: {}   {}",
        actor.actor_type(),
        if actor.is_visible() {
            Theme::success(format!("{} visible", Icons::SUCCESS))
        } else {
            Theme::muted(format!("{} hidden", Icons::ERROR))
        }
    );

    if !actor.properties().is_empty() {
        section_header("Properties");
        println!("{}", properties_table(actor));
    }
    if !actor.property_enums().is_empty() {
        section_header("Enums");
        println!("{}", enums_table(actor));
    }
    if !actor.actions().is_empty() {
        section_header("Actions");
        println!("{}", actions_table(actor));
    }
    if !actor.property_arrays().is_empty() {
        section_header("Property arrays");
        for array in actor.property_arrays() {
            let raw = serde_json::to_string(array.fields())?;
            println!("  {}", Theme::muted(raw));
        }
    }

    Ok(())
}
