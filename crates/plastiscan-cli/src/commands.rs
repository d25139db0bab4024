//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{output_grades, output_impact, output_report, ImpactSummary};
use indicatif::{ProgressBar, ProgressStyle};
use plastiscan_app::config::Config;
use plastiscan_app::{logging, Screen, ScanReport, ScreenFlowController};
use plastiscan_domain::{lookup_all, resolve, ItemWeight};
use plastiscan_types::{OutputFormat, Result, ScanError};
use plastiscan_vision::ANALYSIS_STEPS;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

const TICK: Duration = Duration::from_millis(100);

/// Options for a headless scan
struct ScanOptions {
    image: Option<PathBuf>,
    camera: bool,
    weight: Option<f64>,
    animate: bool,
    output_format: OutputFormat,
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    logging::init(if cli.verbose { "debug" } else { config.log_level.as_str() });
    debug!(path = ?Config::config_path().ok(), "configuration loaded");

    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Scan {
            image,
            camera,
            weight,
            seed,
            no_animation,
        } => {
            if seed.is_some() {
                config.seed = seed;
            }
            cmd_scan(
                &config,
                ScanOptions {
                    image,
                    camera,
                    weight,
                    animate: !no_animation && output_format == OutputFormat::Table,
                    output_format,
                },
            )
        }

        Commands::Grades => output_grades(output_format, lookup_all()),

        Commands::Impact { grade, weight } => {
            let grade = resolve(&grade)?;
            output_impact(
                output_format,
                &ImpactSummary::new(grade, ItemWeight::clamped(weight)),
            )
        }

        Commands::Config {
            show,
            set_delay,
            set_timeout,
            set_steps,
            set_duration,
            set_frames_dir,
            set_output,
            set_log_level,
            reset,
        } => cmd_config(
            show,
            ConfigUpdate {
                delay: set_delay,
                timeout: set_timeout,
                steps: set_steps,
                duration: set_duration,
                frames_dir: set_frames_dir,
                output: set_output,
                log_level: set_log_level,
            },
            reset,
        ),
    }
}

fn cmd_scan(config: &Config, options: ScanOptions) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(async {
        let mut flow = ScreenFlowController::from_config(config, Handle::current());

        if options.camera {
            flow.start_camera()?;
            flow.capture_photo()?;
        } else {
            flow.upload(options.image.as_deref())?;
        }

        wait_for_grade(&mut flow).await?;

        if let Some(weight) = options.weight {
            flow.set_weight(weight)?;
        }

        if options.animate {
            show_count_up(&mut flow).await?;
        }

        let report = ScanReport::from_session(flow.session()).ok_or(ScanError::AnalysisCancelled)?;
        flow.scan_another()?;
        Ok::<_, plastiscan_types::Error>(report)
    })?;

    output_report(options.output_format, &report)
}

async fn wait_for_grade(flow: &mut ScreenFlowController) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message("Analyzing your item...");

    let mut ticker = tokio::time::interval(TICK);
    while flow.screen() == Screen::Analyzing {
        ticker.tick().await;
        pb.tick();
        if let Some(caption) = ANALYSIS_STEPS[..flow.visible_steps()].last() {
            pb.set_message(*caption);
        }
        if let Err(e) = flow.pump() {
            pb.abandon_with_message("Analysis did not complete");
            return Err(e.into());
        }
    }

    let grade = flow
        .session()
        .detected_grade
        .map(|g| g.to_string())
        .unwrap_or_default();
    pb.finish_with_message(format!("Detected {}", grade));
    Ok(())
}

async fn show_count_up(flow: &mut ScreenFlowController) -> Result<()> {
    let Some(target) = flow.target_impact() else {
        return Ok(());
    };

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut ticker = tokio::time::interval(TICK / 4);
    while flow.is_animating() {
        ticker.tick().await;
        flow.pump()?;
        let shown = flow.displayed_impact();
        if target.carbon > 0.0 {
            pb.set_position((shown.carbon / target.carbon * 100.0).round() as u64);
        }
        pb.set_message(format!(
            "{:.2} kg CO₂ · {:.1} L · {:.1} MJ",
            shown.carbon, shown.water, shown.energy
        ));
    }
    pb.finish();
    Ok(())
}

/// Values to write with `config --set-*`
struct ConfigUpdate {
    delay: Option<u64>,
    timeout: Option<u64>,
    steps: Option<u32>,
    duration: Option<u64>,
    frames_dir: Option<PathBuf>,
    output: Option<OutputFormat>,
    log_level: Option<String>,
}

impl ConfigUpdate {
    /// Apply to `config`; true if anything was set
    fn apply(self, config: &mut Config) -> bool {
        let mut modified = false;

        if let Some(delay) = self.delay {
            config.analysis_delay_ms = delay;
            modified = true;
        }

        if let Some(timeout) = self.timeout {
            config.analysis_timeout_ms = (timeout > 0).then_some(timeout);
            modified = true;
        }

        if let Some(steps) = self.steps {
            config.animation_steps = steps.max(1);
            modified = true;
        }

        if let Some(duration) = self.duration {
            config.animation_duration_ms = duration;
            modified = true;
        }

        if let Some(dir) = self.frames_dir {
            config.camera_frames_dir = Some(dir);
            modified = true;
        }

        if let Some(output_format) = self.output {
            config.output_format = output_format;
            modified = true;
        }

        if let Some(level) = self.log_level {
            config.log_level = level;
            modified = true;
        }

        modified
    }
}

fn cmd_config(show: bool, update: ConfigUpdate, reset: bool) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = update.apply(&mut config);

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
