mod cli;
mod infra;
mod routes;
mod server;

use hr_saas::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
