use clap::Parser;
use radviz::{Args, RadConfig, commands, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(&args.log_level, args.log_file.as_deref())?;

    let config = RadConfig::load(args.config.as_deref())?.with_overrides(args.data_dir, args.temp_dir);
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        temp_dir = %config.temp_dir.display(),
        "Configuration resolved"
    );

    let written = commands::run(&config, args.command)?;
    for path in &written {
        println!("{}", path.display());
    }

    tracing::debug!(files = written.len(), "Done");
    Ok(())
}
