use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use botmill::infrastructure::config::to_properties_string;
use botmill::plugins::builtin_registry;
use botmill::{
    BotMill, ConfigLoader, Configuration, DiscoveryError, DiscoveryPolicy, ResourceSearchPath, CONFIG_PATH,
};

#[derive(Parser)]
#[command(name = "botmill")]
#[command(about = "Load BotMill configuration and activate bot definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Resource directory searched before the defaults (repeatable)
    #[arg(short, long = "resource-dir", global = true)]
    resource_dir: Vec<PathBuf>,

    /// Properties resource name
    #[arg(long, default_value = CONFIG_PATH, global = true)]
    resource: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and run bot definition discovery
    Check {
        #[arg(long, value_enum, default_value_t = PolicyArg::FailFast)]
        policy: PolicyArg,
    },
    /// Print the loaded configuration
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Properties)]
        format: OutputFormat,
    },
    /// Print a starter properties file
    InitConfig,
    /// Show version
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Abort on the first failing bot definition
    FailFast,
    /// Run every bot definition and report all failures
    CollectAll,
}

impl From<PolicyArg> for DiscoveryPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FailFast => DiscoveryPolicy::FailFast,
            PolicyArg::CollectAll => DiscoveryPolicy::CollectAll,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Properties,
    Json,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let loader = build_loader(&cli.resource_dir, &cli.resource);

    let code = match cli.command {
        Commands::Check { policy } => check(loader, policy.into()),
        Commands::Show { format } => show(&loader, format),
        Commands::InitConfig => {
            init_config();
            0
        }
        Commands::Version => {
            println!("botmill v{}", env!("CARGO_PKG_VERSION"));
            0
        }
    };

    std::process::exit(code);
}

fn build_loader(resource_dirs: &[PathBuf], resource: &str) -> ConfigLoader {
    let mut search_path = ResourceSearchPath::from_env();
    for dir in resource_dirs.iter().rev() {
        search_path.prepend(dir.clone());
    }
    ConfigLoader::new(search_path).with_resource_name(resource)
}

/// Print an error followed by its causes
fn report_error(e: &dyn std::error::Error) {
    eprintln!("{}", e);
    let mut cause = e.source();
    while let Some(inner) = cause {
        eprintln!("  caused by: {}", inner);
        cause = inner.source();
    }
}

fn check(loader: ConfigLoader, policy: DiscoveryPolicy) -> i32 {
    let registry = match builtin_registry() {
        Ok(registry) => registry,
        Err(e) => {
            report_error(&e);
            return 1;
        }
    };

    let mut botmill = BotMill::new(loader, registry).with_policy(policy);
    tracing::info!(
        "Searching for {} in {:?}",
        botmill.loader().resource_name(),
        botmill.loader().search_path().dirs()
    );

    match botmill.start() {
        Ok(report) => {
            println!(
                "configuration: {} entries, bot definitions: {} of {} activated",
                botmill.configuration().len(),
                report.activated.len(),
                botmill.registry().len()
            );
            0
        }
        Err(DiscoveryError::Multiple(failures)) => {
            eprintln!("Configuration error: {} bot definitions failed", failures.len());
            for failure in &failures {
                report_error(failure);
            }
            1
        }
        Err(e) => {
            report_error(&e);
            1
        }
    }
}

fn show(loader: &ConfigLoader, format: OutputFormat) -> i32 {
    let config = match loader.try_load() {
        Ok(config) => config,
        Err(e) => {
            report_error(&e);
            return 1;
        }
    };

    match format {
        OutputFormat::Properties => print!("{}", to_properties_string(&config, None)),
        OutputFormat::Json => match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize configuration: {}", e);
                return 1;
            }
        },
    }
    0
}

fn init_config() {
    let config: Configuration = [("bot.name", "botmill"), ("bot.prefix", "/")].into_iter().collect();
    print!("{}", to_properties_string(&config, Some("BotMill configuration")));
    println!("\n# Save this as {} on the resource path and adjust as needed.", CONFIG_PATH);
}
