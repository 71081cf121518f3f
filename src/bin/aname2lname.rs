use std::process::ExitCode;

use krb5_localname::{check, CheckError, Krb5Mapper};
use tracing_subscriber::EnvFilter;

const PROG: &str = "aname2lname";
const PRINCIPAL: &str = "user@EXAMPLE.COM";
const EXPECTED: &str = "user";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), CheckError> {
    let mapper = Krb5Mapper::new().map_err(CheckError::Map)?;
    check(&mapper, PRINCIPAL, EXPECTED)
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => {
            eprintln!("{PROG}: ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{PROG}: {err}");
            ExitCode::FAILURE
        }
    }
}
