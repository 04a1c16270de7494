use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

/// Routes diagnostics to stderr so they never mix with the tools' stdout
/// output. Progress lines stay on stdout and bypass the logger entirely.
pub fn setup(verbosity: LevelFilter) -> anyhow::Result<()> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .level(verbosity)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
