use clap::{arg, value_parser, Arg, ArgAction, ArgMatches, Command};
use converters::convert_image;
use log::LevelFilter;
use std::path::PathBuf;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let matches = cli_matches();
    converters::logging::setup(verbosity(&matches))?;

    let input: &PathBuf = matches.get_one("input").unwrap();
    let output: &PathBuf = matches.get_one("output").unwrap();

    println!("Converting {} to {}...", input.display(), output.display());
    let summary = convert_image(input, output)?;
    println!("Image size: {}x{}", summary.width, summary.height);
    println!("Converted {} pixels ({} bytes)", summary.pixels, summary.bytes);
    println!("Done! Created {}", output.display());

    Ok(())
}

fn cli_matches() -> ArgMatches {
    let command = Command::new("png2rgb565")
        .version("0.1.0")
        .about("Converts an image to a raw little-endian RGB565 pixel stream")
        .args([
            arg!(<input> "Input image file").value_parser(value_parser!(PathBuf)),
            arg!(<output> "Output binary file").value_parser(value_parser!(PathBuf)),
            Arg::new("verbosity")
                .short('v')
                .help("Verbosity level: -v for warnings, -vv for info, -vvv for debug, -vvvv for trace")
                .action(ArgAction::Count),
        ]);

    match command.try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit with 1, help and version requests with 0.
            std::process::exit(i32::from(e.use_stderr()));
        }
    }
}

fn verbosity(matches: &ArgMatches) -> LevelFilter {
    match matches.get_count("verbosity") {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
