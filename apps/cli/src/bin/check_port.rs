#![warn(clippy::all, clippy::pedantic)]

use checkup::CheckKind;

#[tokio::main]
async fn main() {
    let code = checkup_cli::execute(Some(CheckKind::Port)).await;
    std::process::exit(code);
}
