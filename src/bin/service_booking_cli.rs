use std::{env, process};

use service_booking::{
    cli::{run_cli, usage, CliOptions},
    init,
};

#[tokio::main]
async fn main() {
    init();

    let options = match CliOptions::parse(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {err}\n{}", usage());
            process::exit(2);
        }
    };

    if let Err(err) = run_cli(options).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
