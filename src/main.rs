use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

use ldapctl::batch::{ControlBatch, ControlSummary};
use ldapctl::config::{parse_log_level, Action, CliArgs};
use ldapctl::Config;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        parse_log_level(&args.log_level)
    };

    // Logs go to stderr so stdout stays parseable.
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_cli_args(args)?;

    match config.action {
        Action::Encode(mut request) => {
            let control = request.to_wire()?;
            debug!("Encoded control {}", control.oid());

            println!("oid: {}", control.oid());
            println!("critical: {}", control.critical());
            if control.has_value() {
                println!("value: {}", config.output.render(&control.value()));
            }
        }
        Action::Decode(path) => {
            info!("Decoding controls from {}", path.display());

            let controls = ControlBatch::load(&path)?.transform()?;
            let summaries: Vec<ControlSummary> =
                controls.iter().map(ControlSummary::from).collect();
            print!("{}", serde_yaml::to_string(&summaries)?);
        }
    }

    Ok(())
}
