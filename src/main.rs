//! Alternance matcher: score candidate profiles against job offers

use alternance_matcher::cli::{self, Cli, Commands, ConfigAction};
use alternance_matcher::config::{Config, OutputFormat};
use alternance_matcher::error::{MatcherError, Result};
use alternance_matcher::input::InputManager;
use alternance_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use alternance_matcher::output::report::{Report, ReportBody};
use alternance_matcher::processing::MatchEngine;
use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

/// Batches at least this large get a progress bar on the console.
const PROGRESS_THRESHOLD: usize = 20;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    debug!("Configuration loaded from {}", path.display());
    Ok(config)
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Match {
            profile,
            job,
            detailed,
            output,
            save,
        } => {
            validate_json_input(&profile, "Profile")?;
            validate_json_input(&job, "Job offer")?;

            let start_time = Instant::now();
            let engine = MatchEngine::new(&config)?;
            let mut input_manager = InputManager::new();

            let profile_value = input_manager.load_json(&profile).await?;
            let job_value = input_manager.load_json(&job).await?;

            info!("Scoring {} against {}", profile.display(), job.display());
            let outcome = engine.calculate_match_value(Some(&profile_value), Some(&job_value));

            let report = Report::new(
                ReportBody::Match(outcome),
                vec![display_path(&profile), display_path(&job)],
                start_time.elapsed().as_millis() as u64,
            );
            emit_report(&report, &config, output.as_deref(), detailed, save.as_deref())
        }

        Commands::Batch {
            profile,
            jobs,
            top,
            detailed,
            output,
            save,
        } => {
            validate_json_input(&profile, "Profile")?;
            validate_json_input(&jobs, "Job offers")?;

            let start_time = Instant::now();
            let engine = MatchEngine::new(&config)?;
            let mut input_manager = InputManager::new();

            let profile_value = input_manager.load_json(&profile).await?;
            let job_values = input_manager.load_job_values(&jobs).await?;
            info!("Scoring {} job offers", job_values.len());

            let format = resolve_format(&config, output.as_deref())?;
            let mut batch = if format == OutputFormat::Console && job_values.len() >= PROGRESS_THRESHOLD {
                let pb = ProgressBar::new(job_values.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} offres")
                        .map_err(|e| MatcherError::OutputFormatting(e.to_string()))?
                        .progress_chars("#>-"),
                );
                let batch = engine.calculate_batch_value_with_progress(Some(&profile_value), &job_values, || pb.inc(1));
                pb.finish_and_clear();
                batch
            } else {
                engine.calculate_batch_value(Some(&profile_value), &job_values)
            };

            if let Some(top) = top {
                batch.truncate(top);
            }

            let report = Report::new(
                ReportBody::Batch(batch),
                vec![display_path(&profile), display_path(&jobs)],
                start_time.elapsed().as_millis() as u64,
            );
            emit_report(&report, &config, output.as_deref(), detailed, save.as_deref())
        }

        Commands::Skills {
            text,
            file,
            output,
            save,
        } => {
            let start_time = Instant::now();
            let engine = MatchEngine::new(&config)?;

            let (text, sources) = match (text, file) {
                (Some(text), _) => (text, Vec::new()),
                (None, Some(file)) => {
                    cli::validate_file_extension(&file, &["txt", "md", "markdown", "json"])
                        .map_err(|e| MatcherError::InvalidInput(format!("Text file: {}", e)))?;
                    let text = InputManager::new().read_text(&file).await?;
                    (text, vec![display_path(&file)])
                }
                (None, None) => {
                    return Err(MatcherError::InvalidInput(
                        "Provide --text or --file".to_string(),
                    ))
                }
            };

            let analysis = engine.analyze_skills(&text);
            debug!("Found {} skills", analysis.skills_count);

            let report = Report::new(
                ReportBody::Skills(analysis),
                sources,
                start_time.elapsed().as_millis() as u64,
            );
            emit_report(&report, &config, output.as_deref(), false, save.as_deref())
        }

        Commands::Recommend {
            profile,
            targets,
            output,
            save,
        } => {
            validate_json_input(&profile, "Profile")?;

            let start_time = Instant::now();
            let engine = MatchEngine::new(&config)?;
            let mut input_manager = InputManager::new();

            let candidate = input_manager.load_profile(&profile).await?;
            let mut sources = vec![display_path(&profile)];

            let target_jobs = match &targets {
                Some(path) => {
                    validate_json_input(path, "Target offers")?;
                    sources.push(display_path(path));
                    input_manager.load_jobs(path).await?
                }
                None => Vec::new(),
            };

            let recommendations = engine.profile_recommendations(&candidate, &target_jobs);

            let report = Report::new(
                ReportBody::Recommendations(recommendations),
                sources,
                start_time.elapsed().as_millis() as u64,
            );
            emit_report(&report, &config, output.as_deref(), false, save.as_deref())
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        MatcherError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", content);
                }
                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
    }
}

fn validate_json_input(path: &Path, label: &str) -> Result<()> {
    cli::validate_file_extension(path, &["json"])
        .map_err(|e| MatcherError::InvalidInput(format!("{} file: {}", label, e)))
}

fn resolve_format(config: &Config, output: Option<&str>) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(MatcherError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn emit_report(
    report: &Report,
    config: &Config,
    output: Option<&str>,
    detailed: bool,
    save: Option<&Path>,
) -> Result<()> {
    let format = resolve_format(config, output)?;
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(
        use_colors,
        detailed || config.output.detailed,
        true,
        true,
    );

    let content = generator.generate_report(report, &format)?;

    match save {
        Some(path) => {
            // A directory target gets a generated file name.
            let path = if path.is_dir() {
                let source = report
                    .metadata
                    .sources
                    .first()
                    .map(String::as_str)
                    .unwrap_or(report.body.kind());
                path.join(suggest_filename(&format, source, true))
            } else {
                path.to_path_buf()
            };
            let path = path.as_path();

            save_report_to_file(&content, path).map_err(|e| {
                MatcherError::OutputFormatting(format!("Failed to save report to {}: {}", path.display(), e))
            })?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}
