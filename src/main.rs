use clap::error::ErrorKind;
use clap::Parser;
use shutter_trigger::adapters::{
    open_hardware, JsonProgressFile, NoProgress, RecordingSleeper, SimulatedTrigger, TokioSleeper,
};
use shutter_trigger::config::cli::is_argument_count_error;
use shutter_trigger::core::{ConfigProvider, ProgressSink, Sleeper, TriggerPort};
use shutter_trigger::utils::duration::format_hms;
use shutter_trigger::utils::logger;
use shutter_trigger::core::sequencer::RunOutcome;
use shutter_trigger::{CliConfig, SequencePlan, Sequencer};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if is_argument_count_error(e.kind()) => {
            println!("Not enough arguments: 3 required");
            println!("{}", e.render());
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return Ok(ExitCode::FAILURE);
        }
    };

    let file = match config.load_toml() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let verbose = config.verbose || file.as_ref().is_some_and(|f| f.verbose());
    if config.log_json || file.as_ref().is_some_and(|f| f.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting shutter-trigger");
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.settings(file.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let plan = config.plan();
    println!(
        "exposure = {:?}, photo count = {}, delay = {:?}",
        plan.exposure, plan.shots, plan.interval
    );

    let progress: Box<dyn ProgressSink> = match settings.progress_path() {
        Some(path) => Box::new(JsonProgressFile::new(path)),
        None => Box::new(NoProgress),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if config.dry_run {
        tracing::info!("DRY RUN - GPIO lines are simulated and waits are skipped");
        let sleeper = RecordingSleeper::new();
        let sequencer = Sequencer::new(
            SimulatedTrigger::new(),
            sleeper.clone(),
            progress,
            settings.offset(),
        );
        let code = runtime.block_on(drive(sequencer, &plan));
        println!("Planned duration: {}", format_hms(sleeper.total()));
        return Ok(code);
    }

    let trigger = match open_hardware(&settings) {
        Ok(trigger) => trigger,
        Err(e) => {
            tracing::error!("{}", e);
            println!("Error: GPIO setup failed");
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("GPIO ready");

    let sequencer = Sequencer::new(trigger, TokioSleeper, progress, settings.offset());
    Ok(runtime.block_on(drive(sequencer, &plan)))
}

/// Runs the plan until it finishes, fails or Ctrl-C arrives. The lines are released in every case.
async fn drive<T, S, P>(mut sequencer: Sequencer<T, S, P>, plan: &SequencePlan) -> ExitCode
where
    T: TriggerPort,
    S: Sleeper,
    P: ProgressSink,
{
    let outcome = sequencer.run_until(plan, interrupted()).await;
    println!("GPIO released");

    match &outcome {
        RunOutcome::Finished(report) => println!(
            "✅ {} photos taken in {}",
            report.shots_taken,
            format_hms(report.elapsed())
        ),
        RunOutcome::Failed(e) => {
            tracing::error!("Sequence failed: {}", e);
            eprintln!("❌ {}", e);
        }
        RunOutcome::Interrupted => println!("Interrupted"),
    }

    ExitCode::from(outcome.exit_code())
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Ctrl-C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}
