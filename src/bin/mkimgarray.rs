use clap::{arg, value_parser, Arg, ArgAction, ArgMatches, Command};
use converters::write_image_dsc;
use log::LevelFilter;
use std::path::PathBuf;

// Asset pipeline defaults: Default.png was 480x480. The dimensions are not
// derived from the blob, a mismatched blob is emitted as-is.
const DEFAULT_BLOB: &str = "Default.bin";
const DEFAULT_OUTPUT: &str = "src/ui_img_default_png.c";
const DEFAULT_VAR_NAME: &str = "ui_img_default_png";
const DEFAULT_WIDTH: u32 = 480;
const DEFAULT_HEIGHT: u32 = 480;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let matches = cli_matches();
    converters::logging::setup(verbosity(&matches))?;

    let blob: &PathBuf = matches.get_one("blob").unwrap();
    let output: &PathBuf = matches.get_one("output").unwrap();
    let var_name: &String = matches.get_one("var-name").unwrap();
    let width: u32 = *matches.get_one("width").unwrap();
    let height: u32 = *matches.get_one("height").unwrap();

    write_image_dsc(blob, output, var_name, width, height)?;
    println!("Wrote {}", output.display());

    Ok(())
}

fn cli_matches() -> ArgMatches {
    let command = Command::new("mkimgarray")
        .version("0.1.0")
        .about("Embeds an RGB565 pixel blob into an LVGL image descriptor C source file")
        .args([
            arg!(--blob <FILE> "Input pixel blob")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_BLOB),
            arg!(--output <FILE> "Generated C source file")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_OUTPUT),
            arg!(--"var-name" <NAME> "Variable name of the emitted descriptor")
                .value_parser(value_parser!(String))
                .default_value(DEFAULT_VAR_NAME),
            arg!(--width <PIXELS> "Descriptor width, not validated against the blob")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_WIDTH.to_string()),
            arg!(--height <PIXELS> "Descriptor height, not validated against the blob")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_HEIGHT.to_string()),
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
