use std::fs;

use clap::Parser;
use rill::run_source;

/// rill is a small, dynamically typed scripting language with first-class
/// functions, closures and tracebacks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells rill to look at a file instead of an inline script.
    #[arg(short, long)]
    file: bool,

    /// Suppresses echoing the script's final value.
    #[arg(short, long)]
    quiet: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let (name, script) = if args.file {
        let text = fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        });
        (args.contents.clone(), text)
    } else {
        ("<script>".to_string(), args.contents.clone())
    };

    match run_source(&name, &script) {
        Ok(value) => {
            if !args.quiet && !value.is_none() {
                println!("{value}");
            }
        },
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        },
    }
}
