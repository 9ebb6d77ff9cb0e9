mod cli;
mod infra;
mod routes;
mod server;

use hoa_connect::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
