//! CLI binary for `chapters`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the
//! library.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use chapters::cli::{open_session, run, Cli, Command, Menu};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.command == Some(Command::Version) {
        println!("chapters v{}", chapters::VERSION);
        return ExitCode::SUCCESS;
    }

    let (mut store, log) = match open_session(cli.db.as_deref(), Path::new(".")) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error connecting to database: {e}");
            return ExitCode::from(1);
        }
    };

    let Some(command) = cli.command else {
        let mut menu = Menu::new(io::stdin().lock(), io::stdout().lock());
        if let Err(e) = menu.run(&mut store, &log) {
            eprintln!("Error reading input: {e}");
            return ExitCode::from(1);
        }
        return ExitCode::SUCCESS;
    };

    let output = run(&command, &mut store, &log);
    for line in output.stdout {
        println!("{line}");
    }
    for line in output.stderr {
        eprintln!("{line}");
    }
    output.exit_code
}
