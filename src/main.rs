use std::process::ExitCode;

use clap::Parser;

use prompt_selector::cli::{Args, SelectorConfig};
use prompt_selector::error::SelectorError;
use prompt_selector::report::{self, PromptDocument};
use prompt_selector::{app, open_session};

fn run(config: &SelectorConfig) -> Result<(), SelectorError> {
    let path = &config.image_path;
    let mut session = open_session(path, config.max_width, config.max_height)?;

    let overlay = session.overlay();
    let display = (overlay.width(), overlay.height());
    if let Some(line) = report::scale_line(session.original_size(), display, session.scale()) {
        println!("{}", line);
    }
    println!("{}", report::banner(session.original_size()));

    let title = app::window_title(path);
    app::run(&mut session, &title)?;

    // window is gone by now
    report::print_report(&session.finish());

    if config.json {
        let doc = PromptDocument::from_session(path, &session);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{:?}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
