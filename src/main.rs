mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::{Cli, Commands};
use retain_units::app::{
    build_controller, GenerationContext, PanelValues, ProcessOutcome, RetainController,
};
use retain_units::config::Config;
use retain_units::host::{GenerationRequest, RequestFileUnits};
use retain_units::records::{ConfigStore, SaveOutcome, NONE_CHOICE};
use retain_units::ui::run_settings_panel;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = resolve_config(&cli);

    match cli.command {
        Commands::List => list_configs(&config)?,
        Commands::Save { ref name, ref request } => {
            run_generation(&config, request, None, &PanelValues::save_as(name.as_str()))?;
        }
        Commands::Load {
            ref name,
            ref request,
            ref output,
        } => {
            run_generation(
                &config,
                request,
                output.as_deref(),
                &PanelValues::load(name.as_str()),
            )?;
        }
        Commands::Run {
            ref request,
            ref name,
            ref select,
        } => {
            let panel = PanelValues {
                config_name: name.clone(),
                selected_config: select.clone(),
            };
            run_generation(&config, request, None, &panel)?;
        }
        Commands::Panel {
            ref request,
            no_watch,
        } => {
            let config = config.with_watch_store(!no_watch);
            let store = ConfigStore::from_config(&config);
            store.prepare()?;
            let title = RetainController::<RequestFileUnits>::title();
            match run_settings_panel(&store, title, config.watch_store)? {
                Some(panel) => run_generation(&config, request, None, &panel)?,
                None => println!("Cancelled."),
            }
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Config {
    let mut config = Config::builtin().with_env_overrides();
    if let Some(dir) = &cli.dir {
        config = config.with_store_dir(dir);
    }
    if let Some(dir) = &cli.extension_dir {
        config = config.with_extension_dir(dir);
    }
    config
}

fn list_configs(config: &Config) -> Result<()> {
    let store = ConfigStore::from_config(config);
    let names = store.list()?;
    if names.is_empty() {
        println!("No saved configurations in {}", store.dir().display());
        return Ok(());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// One generation: pre-process with `panel`, persist the request if it changed, post-process.
fn run_generation(
    config: &Config,
    request_path: &Path,
    output: Option<&Path>,
    panel: &PanelValues,
) -> Result<()> {
    let mut controller = build_controller(config)?;
    let mut request = GenerationRequest::load(request_path)
        .with_context(|| format!("Failed to open request {}", request_path.display()))?;

    let mut ctx = GenerationContext::new();
    let outcome = controller.process(&mut ctx, &mut request, panel);
    controller.postprocess(&mut ctx);

    match &outcome {
        ProcessOutcome::Loaded { name, units } => {
            let target = output.unwrap_or(request_path);
            request.save(target)?;
            println!(
                "Applied '{}' ({} unit(s)) to {}",
                name,
                units,
                target.display()
            );
        }
        ProcessOutcome::Saved(SaveOutcome::Saved { name, path }) => {
            println!("Saved '{}' to {}", name, path.display());
        }
        ProcessOutcome::Saved(SaveOutcome::AlreadyExists { name, .. }) => {
            println!("'{}' already exists; nothing written.", name);
        }
        ProcessOutcome::NotFound { name } => {
            println!("No saved configuration named '{}'.", name);
        }
        ProcessOutcome::Disabled => {
            println!("ControlNet extension unavailable; request left unchanged.");
        }
        ProcessOutcome::Failed { action, message } => {
            println!("Could not {} configuration: {}", action, message);
        }
        ProcessOutcome::Idle | ProcessOutcome::AlreadyRan => {
            println!("Nothing to do (no name given, selection is {}).", NONE_CHOICE);
        }
    }

    info!("Generation finished: {:?}", outcome);
    Ok(())
}
