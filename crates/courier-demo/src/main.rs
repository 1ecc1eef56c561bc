use courier_core::ChatServer;
use courier_types::{DeliveryStatus, UndoOutcome};
use tracing::info;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging; delivery and block notices come out as tracing events.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier=info,courier_core=info".into()),
        )
        .init();

    let server = ChatServer::new();
    let alice = server.register("Alice")?;
    let bob = server.register("Bob")?;
    let charlie = server.register("Charlie")?;

    alice.send(names(&["Bob", "Charlie"]), "Hello Bob and Charlie!")?;
    bob.send(names(&["Alice"]), "Hi Alice!")?;
    charlie.send(names(&["Bob"]), "Hey Bob!")?;

    match alice.undo_last_message()? {
        UndoOutcome::Undone { .. } => info!("Alice undid the last message."),
        UndoOutcome::NothingToUndo => info!("Alice has no message to undo."),
    }

    bob.block("Alice")?;

    let report = alice.send(names(&["Bob"]), "This message won't reach Bob!")?;
    if report.status_for("Bob") == Some(DeliveryStatus::Blocked) {
        info!("Bob did not receive Alice's last message.");
    }

    println!("Charlie's chat history:");
    for message in charlie.messages_with("Alice")? {
        println!("From: {}, Content: {}", message.sender, message.content);
    }

    Ok(())
}
