//! Console greeter bootstrapped with rightturn
//!
//! The command line is stored verbatim in the directions and parsed with
//! clap only inside the run callback. Configuration comes from
//! `appsettings.toml` (or `--config`) and `RIGHTTURN_DEMO__*` variables.
//!
//! ```toml
//! [greeting]
//! name = "world"
//! repeat = 2
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use dill::{component, interface};
use rightturn::{Args, Turn, resolve_service};
use rightturn_config::{ConfigLoader, FigmentConfiguration};
use rightturn_logging::TracingLogging;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment prefix for demo configuration
pub const DEMO_ENV_PREFIX: &str = "RIGHTTURN_DEMO";

/// Command line interface for the demo greeter
#[derive(Parser, Debug)]
#[command(name = "rightturn-demo")]
#[command(about = "Greets from a service resolved through rightturn")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name to greet, overriding the configured one
    #[arg(short, long)]
    pub name: Option<String>,
}

/// `[greeting]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreetingSettings {
    pub name: String,
    pub repeat: u32,
}

impl Default for GreetingSettings {
    fn default() -> Self {
        Self {
            name: "world".to_string(),
            repeat: 1,
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct DemoDefaults {
    greeting: GreetingSettings,
}

/// Produces greeting lines
pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

#[component]
#[interface(dyn Greeter)]
pub struct ConsoleGreeter;

impl Greeter for ConsoleGreeter {
    fn greet(&self, name: &str) -> String {
        format!("Hello, {name}!")
    }
}

/// Bootstrap the greeter and print the greetings
///
/// Returns the process exit code; failures are reported on stderr by the
/// unhandled error handler.
pub fn run(args: Args) -> rightturn::Result<i32> {
    let cli = match Cli::try_parse_from(args.iter()) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(anyhow::Error::new)?;
            return Ok(0);
        }
        Err(err) => return Err(anyhow::Error::new(err).into()),
    };

    let mut loader = ConfigLoader::new()
        .with_env_prefix(DEMO_ENV_PREFIX)
        .with_defaults(DemoDefaults::default());
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }

    Turn::new()
        .with_directions()
        .add_direction(args)
        .with_configuration(
            FigmentConfiguration::new(loader).with_section::<GreetingSettings>("greeting"),
        )
        .with_logging(TracingLogging::from_configuration())
        .with_services(|services| {
            services.add_transient::<dyn Greeter, ConsoleGreeter>();
        })
        .with_unhandled_error_code(|err| {
            eprintln!("error: {err}");
            err.exit_code()
        })
        .run_with_provider(|provider| {
            let greeter = resolve_service::<dyn Greeter>(provider)?;
            let settings = resolve_service::<GreetingSettings>(provider)?;
            let args = resolve_service::<Args>(provider)?;

            let name = cli.name.as_deref().unwrap_or(&settings.name);
            for _ in 0..settings.repeat {
                println!("{}", greeter.greet(name));
            }
            debug!(args = args.len(), repeat = settings.repeat, "Greeting finished");
            Ok(0)
        })
}
