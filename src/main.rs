use std::sync::Arc;

use anyhow::Result;
use choo_core::Config;
use choo_services::{Task, TodoClient};
use choo_view::{DateFormatter, DisplayZone, SyncController};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    choo_core::init()?;

    let (config, _) = Config::load_validated()?;
    let zone = DisplayZone::from(config.display.time_zone()?);
    let client = TodoClient::new(&config.server)?;

    tracing::info!("Syncing with {}", client.base_url());

    let mut controller = SyncController::new(
        Arc::new(client),
        DateFormatter::new(zone),
        tokio::runtime::Handle::current(),
    );
    controller.start();
    controller.settle().await;

    if !controller.store().is_loaded() {
        anyhow::bail!("Could not load tasks from {}", config.server.base_url);
    }

    if let Some(user) = controller.store().user() {
        println!("{}", user.name);
    }
    println!("{} remaining", controller.remaining_count());

    println!("\nPinned");
    for task in controller.pinned_tasks() {
        print_task(&controller, task);
    }

    println!("\nTasks");
    for task in controller.non_pinned_tasks() {
        print_task(&controller, task);
    }

    Ok(())
}

fn print_task(controller: &SyncController, task: &Task) {
    let check = if task.done { "x" } else { " " };
    println!(
        "  [{}] {} - {} {}",
        check,
        task.task,
        controller.relative_label(&task.due),
        controller.overdue_marker(task)
    );
}
