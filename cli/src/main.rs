//! ranger-bootstrap - fetch, unpack and launch the Night's Watch Ranger agent

use clap::Parser;

use ranger_bootstrap::cli::Cli;
use ranger_bootstrap::domain::error::{error_label, exit_code};
use ranger_bootstrap::output::json;

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = cli.run() {
        let code = exit_code(&e);
        match json::format_error(&format!("{e:#}"), error_label(&e), code) {
            Ok(body) if json_mode => println!("{body}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(code);
    }
}
