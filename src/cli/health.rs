use super::ui;
use crate::service::{FxService, HealthStatus};
use anyhow::Result;

pub async fn run(service: &FxService) -> Result<()> {
    let report = service.health().await;
    let status = match report.status {
        HealthStatus::Ok => ui::style_text("ok", ui::StyleType::TotalValue),
        HealthStatus::Degraded => ui::style_text("degraded", ui::StyleType::Error),
    };
    println!("Status: {status}");
    println!("API reachable: {}", report.api_reachable);
    Ok(())
}
