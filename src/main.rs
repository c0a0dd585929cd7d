use std::process::ExitCode;

use clap::Parser;
use devmgr::{
    audit::AuditLog,
    cli::{self, App, Cli},
    command::SystemRunner,
    config::Config,
    privilege::Identity,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Err(e) if cli::is_informational(&e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        args => args,
    };

    let filter = match args.as_ref().map_or(0, |a| a.verbose) {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    let identity = Identity::effective();
    let audit = AuditLog::new(&config.log_path, identity.name().map(str::to_owned));

    match App::new(&config, &identity, &audit, &SystemRunner).run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "exiting");
            ExitCode::FAILURE
        }
    }
}
