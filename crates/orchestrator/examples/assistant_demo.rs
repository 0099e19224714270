//! End-to-end demo of the assistant pipeline.
//!
//! Wires the classifier chain (remote providers if configured, rule
//! fallback otherwise), the in-memory domain actions and the booking
//! service, feeds a handful of requests through, then runs one recurrence
//! tick to show the out-of-band engine.
//!
//! Run with:
//!
//! ```bash
//! cargo run -p orchestrator --example assistant_demo
//! ```

use std::sync::Arc;

use orchestrator::{Assistant, InMemoryActions};
use recurrence::{InMemoryRecurrenceStore, RecurrenceEngine, RecurrenceRule, TaskTemplate};
use room_booking::BookingService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let actions = Arc::new(InMemoryActions::new());
    let booking = Arc::new(BookingService::with_default_rooms());
    let assistant = Assistant::from_env(actions, booking);

    let requests = [
        "remind me to call the dentist tomorrow at 10:00",
        "create a task to fix the printer",
        "show me my tasks",
        "book a 30-minute team meeting Friday at 14:30 in meeting room B",
        "what is 12 * 8?",
        "email bob@example.com about the launch",
        "how are you today",
    ];

    for text in requests {
        let response = assistant.handle("demo-user", text).await;
        println!("\n> {}", text);
        println!(
            "  [{}] {}",
            response.intent,
            response.message.as_deref().unwrap_or("(no message)")
        );
    }

    // The recurrence engine lives outside the request path; one manual tick
    // stands in for the 5-minute scheduler.
    let store = Arc::new(InMemoryRecurrenceStore::new());
    let now = chrono::Local::now().naive_local();

    let rule = RecurrenceRule::new("FREQ=WEEKLY", now);
    let mut template = TaskTemplate::new(rule.id.clone(), "water the office plants");
    template.due_date = Some(now);

    store.add_rule(rule).await;
    store.add_template(template).await;

    let engine = RecurrenceEngine::new(store);
    let report = engine.run_tick(now).await;
    println!(
        "\nrecurrence tick: spawned {} task instance(s), {} rule(s) processed",
        report.instances_spawned, report.rules_processed
    );
}
