//! Command-line interface entry point for `coursereturn`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use course_return::config::Config;
use course_return::core::RequestForm;
use course_return::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use course_return::{debug, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
    debug!("Effective log level: {level}");

    let outcome = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Evaluate {
            student_id,
            last_active,
            current,
            cancelled,
            different_course,
            format,
            output,
            save,
        } => {
            let form = RequestForm {
                student_id,
                is_cancelled: cancelled,
                is_same_course: !different_course,
                last_active_semester: last_active,
                current_semester: current.unwrap_or_default(),
            };
            let options = commands::evaluate::OutputOptions {
                format,
                output,
                save,
            };
            commands::evaluate::run(form, &options, &config)
        }
        Command::Gap { start, end } => commands::gap::run(&start, &end),
    };

    if let Err(message) = outcome {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
