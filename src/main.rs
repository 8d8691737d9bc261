#![allow(non_snake_case)]

mod app;
mod cli;
mod clients;
mod config;
mod models;
mod service;
mod views;

use crate::clients::api_client::HttpSchedulerApi;
use crate::config::AppConfig;

#[tokio::main]
async fn main() {
    env_logger::init();
    let config = AppConfig::load();
    let api = HttpSchedulerApi::new(config.api_url());
    cli::cli(&api).await;
}
