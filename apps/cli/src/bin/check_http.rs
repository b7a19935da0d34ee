#![warn(clippy::all, clippy::pedantic)]

use checkup::CheckKind;

#[tokio::main]
async fn main() {
    let code = checkup_cli::execute(Some(CheckKind::Http)).await;
    std::process::exit(code);
}
