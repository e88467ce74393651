//! Thani bot entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Resolve effective log level (CLI `-v` flags > env > config)
//!   4. Init logger once
//!   5. Build the model provider and probe it
//!   6. Build the response router
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Run comms channels until shutdown

use std::sync::Arc;

use thani_bot::{config, error, llm, logger, persona, router::ResponseRouter, subsystems};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), error::AppError> {
    // Optional file.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    let mut config = config::load(args.config_path.as_deref())?;

    // Without -i the console stays off (daemon-safe default).
    if !args.interactive {
        config.comms.pty.enabled = false;
    }

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        bot_name = %config.bot_name,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        interactive = %args.interactive,
        "config loaded"
    );

    let provider = llm::providers::build(&config.llm, config.llm_api_key.clone())?;
    if let Err(e) = provider.ping().await {
        warn!(provider = provider.name(), "model endpoint not reachable, replies will use fallbacks until it is: {e}");
    }

    let system_prompt = persona::prompt::persona_prompt(&config.persona.prompts_dir, &config.persona.persona_file);
    let router = Arc::new(
        ResponseRouter::builder(provider)
            .settings(config.router.clone())
            .facts(config.facts.clone())
            .system_prompt(system_prompt)
            .build(),
    );

    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            ctrlc_token.cancel();
        }
    });

    print_startup_summary(&config, router.provider().name(), args.interactive);

    let comms = subsystems::comms::start(&config, router, shutdown.clone());
    let result = comms.join().await;

    // Channels may end on EOF rather than Ctrl-C.
    shutdown.cancel();

    if args.interactive {
        use std::io::Write as _;
        println!("\nPoyi varaam ...");
        let _ = std::io::stdout().flush();
    }
    result
}

fn print_startup_summary(config: &config::Config, provider: &str, interactive: bool) {
    let http = if config.comms.http.enabled && cfg!(feature = "channel-axum") {
        format!("http://{}", config.comms.http.bind)
    } else {
        "disabled".to_string()
    };
    let console = if config.comms.pty.enabled && cfg!(feature = "channel-pty") { "enabled" } else { "disabled" };

    println!("┌────────────────────────────────────────────────────────┐");
    println!("│ {:<54} │", format!("{} ({})", persona::DISPLAY_NAME, config.bot_name));
    println!("│ {:<54} │", format!("pid={} mode={}", std::process::id(), if interactive { "interactive" } else { "daemon" }));
    println!("│ {:<54} │", format!("llm: provider={provider} model={}", config.llm.openai.model));
    println!("│ {:<54} │", format!("console: {console}"));
    println!("│ {:<54} │", format!("http: {http}"));
    println!("└────────────────────────────────────────────────────────┘");
}

struct CliArgs {
    log_level: Option<&'static str>,
    interactive: bool,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut interactive = false;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: thani-bot [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -i, --interactive          Chat on the console");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-i" | "--interactive" => interactive = true,
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    CliArgs { log_level: logger::verbosity_level(verbosity), interactive, config_path }
}
