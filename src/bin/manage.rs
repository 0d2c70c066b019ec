//! manage: project management entry point.
//! Usage: manage <setup|dev|prod|clean|status|help>

use std::process;

use question_pdf_api::{
    config::Config,
    manage::{Command, ProjectManager, help_text},
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MANAGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let Some(arg) = std::env::args().nth(1) else {
        print!("{}", help_text());
        return;
    };

    let command = match arg.parse::<Command>() {
        Ok(command) => command,
        Err(unknown) => {
            println!("Unknown command: {}", unknown);
            print!("{}", help_text());
            process::exit(1);
        }
    };

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine project root: {}", e);
            process::exit(1);
        }
    };

    let manager = ProjectManager::new(root, Config::from_env());
    if let Err(e) = manager.run(command) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
