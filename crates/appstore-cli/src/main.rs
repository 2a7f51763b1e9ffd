use appstore_cli::commands::verbosity;
use appstore_cli::{build_cli, run};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    appstore_site::logging::init(verbosity(&matches));

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    match run(&matches, &mut out, &mut err).await {
        Ok(status) => status.into(),
        Err(e) => {
            let _ = writeln!(err, "Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
