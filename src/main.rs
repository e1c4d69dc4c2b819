//! Command-line front end: parse a material file and print it back.
//!
//! Usage:
//!   fxmat [PATH] [--format text|json|json-pretty] [--explain] [--crlf] [--trailing-newline]
//!
//! Reads stdin when no path is given. Set `RUST_LOG=debug` to log every line
//! that is kept verbatim.

use clap::{Arg, ArgAction, Command};
use fxmat_rust::{explain, json, split_lines, LineEnding, LineError, MaterialFile, RenderOptions};

use std::io::{self, Read};

fn main() {
    env_logger::init();

    let matches = Command::new("fxmat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse a ray-mmd material file and render it back")
        .arg(
            Arg::new("path")
                .help("Material file to read (stdin when omitted)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json", "json-pretty"])
                .default_value("text"),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Report lines kept verbatim and why, on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("crlf")
                .long("crlf")
                .help("Join rendered lines with CRLF")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trailing-newline")
                .long("trailing-newline")
                .help("End the rendered text with a line terminator")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let file = match matches.get_one::<String>("path") {
        Some(path) => MaterialFile::load(path).unwrap_or_else(|e| {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }),
        None => {
            let mut input = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut input) {
                eprintln!("error: cannot read stdin: {}", e);
                std::process::exit(1);
            }
            MaterialFile::from_text("<stdin>", &input)
        }
    };

    let options = RenderOptions {
        line_ending: if matches.get_flag("crlf") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        },
        trailing_newline: matches.get_flag("trailing-newline"),
    };

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    match format {
        "json" => println!("{}", json::to_json(file.document())),
        "json-pretty" => println!("{}", json::to_json_pretty(file.document())),
        _ => print!("{}", file.render_with(&options)),
    }

    if matches.get_flag("explain") {
        let source = file.render();
        report(&source, &explain(&source));
    }
}

fn report(source: &str, errors: &[(usize, LineError)]) {
    let lines: Vec<&str> = split_lines(source).collect();

    for (line_num, err) in errors {
        let line_text = lines.get(*line_num).unwrap_or(&"");

        eprintln!("NOTE AT LINE {}:", line_num + 1);
        eprintln!("{}", line_text);

        let mut underline = String::new();
        for _ in 0..err.column {
            underline.push(' ');
        }
        underline.push('^');

        eprintln!("{}", underline);
        eprintln!("kept verbatim: {}", err.kind);
        eprintln!();
    }
}
