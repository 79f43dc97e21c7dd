use clap::Parser;
use segplace::*;
use std::fs;
use std::process;

fn main() {
    // Initialize logger with custom format to hide module paths
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{} {} segplace] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.args()
            )
        })
        .init();

    // Parse CLI arguments
    let args = Cli::parse();

    // Set debug logging if requested
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the placement
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Cli) -> error::Result<()> {
    args.validate()?;

    let content = match fs::read_to_string(&args.input) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PcbError::InputNotFound(args.input.clone()).into());
        }
        Err(e) => {
            return Err(AppError::Other(format!(
                "Failed to read '{}': {}",
                args.input.display(),
                e
            )));
        }
    };

    log::info!("Read {} bytes from '{}'", content.len(), args.input.display());

    let (modified, report) = placer::place(&content, &args.placement_config())?;

    fs::write(&args.output, modified).map_err(|e| {
        AppError::Other(format!(
            "Failed to write '{}': {}",
            args.output.display(),
            e
        ))
    })?;

    log::debug!(
        "placed {}/{} displays and {}/{} resistors",
        report.displays_placed,
        report.displays_found,
        report.resistors_placed,
        report.resistors_found
    );
    println!(
        "\n✓ Processing complete. The modified file has been saved as '{}'",
        args.output.display()
    );

    Ok(())
}
