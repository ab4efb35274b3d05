mod cli;
mod demo;
mod infra;
mod routes;
mod search;
mod server;

use haulsite::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
