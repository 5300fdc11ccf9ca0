//! Stack deployer entry point
//!
//! One-shot command line tool: inputs come from the host environment
//! (`INPUT_*` variables, CI-runner style) or from `--key=value`
//! arguments, which take precedence. Exits non-zero on any failure.

use std::env;

use stackdeploy::app::run::run;
use stackdeploy::config::{ArgsConfig, EnvConfig, Layered};
use stackdeploy::utils::version_info;

#[tokio::main]
async fn main() {
    let args = ArgsConfig::parse(env::args().skip(1));

    // Print version and exit
    if args.contains("version") {
        println!("{}", serde_json::to_string_pretty(&version_info()).unwrap());
        return;
    }

    let config = Layered::new().with(args).with(EnvConfig);

    if let Err(e) = run(&config).await {
        eprintln!("Deployment failed: {e}");
        std::process::exit(1);
    }
}
