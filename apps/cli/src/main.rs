#![warn(clippy::all, clippy::pedantic)]

#[tokio::main]
async fn main() {
    let code = checkup_cli::execute(None).await;
    std::process::exit(code);
}
