//! Job insight: structured analysis of free-text job descriptions

use clap::Parser;
use job_insight::analysis::JobAnalyzer;
use job_insight::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use job_insight::config::Config;
use job_insight::error::{JobInsightError, Result};
use job_insight::model::{ModelManager, T5Generator};
use job_insight::output::ReportGenerator;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            input,
            model,
            no_model,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&input, &["txt", "md"])
                .map_err(JobInsightError::InvalidInput)?;
            let output_format =
                cli::parse_output_format(&output).map_err(JobInsightError::InvalidInput)?;

            info!("Analyzing job description from {}", input.display());
            let text = std::fs::read_to_string(&input)?;

            let mut analyzer = JobAnalyzer::new(config.clone());
            if !no_model {
                match load_generator(&config, model).await {
                    Ok(generator) => analyzer = analyzer.with_generator(generator),
                    Err(e) => {
                        warn!("Generative model unavailable ({}), continuing with extractive summarization", e);
                    }
                }
            }

            let result = analyzer.analyze(&text).await?;

            let use_colors = config.output.color_output && save.is_none();
            let report = ReportGenerator::new(use_colors, detailed || config.output.detailed)
                .format(&result, &output_format)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, &report)?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", report),
            }
            Ok(())
        }

        Commands::Models { action } => run_models_command(action, config).await,

        Commands::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        JobInsightError::Configuration(format!("Failed to render config: {}", e))
                    })?;
                    println!("{}", content);
                }
                ConfigAction::Reset => {
                    Config::default().save()?;
                    info!("Configuration reset to defaults");
                }
            }
            Ok(())
        }
    }
}

async fn run_models_command(action: ModelAction, config: Config) -> Result<()> {
    config.ensure_models_dir()?;
    let mut manager =
        ModelManager::new(config.models_dir(), config.models.available_models.clone()).await?;

    match action {
        ModelAction::List => {
            for model in manager.list_available() {
                let status = if manager.is_downloaded(&model.name) {
                    "downloaded"
                } else {
                    "available"
                };
                println!(
                    "{:<16} {:>6} MB  {:<11} {}",
                    model.name, model.size_mb, status, model.description
                );
            }
        }
        ModelAction::Download { name } => {
            let path = manager.download(&name).await?;
            info!("Model '{}' downloaded to {}", name, path.display());
        }
        ModelAction::Remove { name } => {
            manager.remove(&name).await?;
            info!("Model '{}' removed", name);
        }
    }
    Ok(())
}

/// Resolve, download if needed, and load the generation model
async fn load_generator(
    config: &Config,
    requested: Option<String>,
) -> Result<Box<T5Generator>> {
    config.ensure_models_dir()?;
    let mut manager =
        ModelManager::new(config.models_dir(), config.models.available_models.clone()).await?;

    let name = match requested {
        Some(name) => name,
        None => manager.auto_select(&config.models.default_model)?,
    };

    let model_path: PathBuf = match manager.model_path(&name) {
        Some(path) => path,
        None => {
            info!("Model '{}' not found locally, downloading", name);
            manager.download(&name).await?
        }
    };

    let generator = T5Generator::load(&model_path)?;
    Ok(Box::new(generator))
}
