//! avosc OSC Monitor
//!
//! Listens for avatar parameters and prints every event:
//! - Built-in updates
//! - Newly discovered dynamic parameters
//! - Dropped messages
//!
//! Usage: `osc-monitor [config.json]`

use std::path::PathBuf;
use std::sync::Arc;

use avosc_core::ParameterEvent;
use avosc_runtime::{init_tracing, Listener, ListenerConfig, ParameterContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => ListenerConfig::load(&path)?,
        None => ListenerConfig::default(),
    };

    init_tracing(config.log_format);

    let context = Arc::new(ParameterContext::from_config(&config)?);
    let listener = Listener::new(Arc::clone(&context));

    let addr = listener
        .start(context.listen_port(), |event| match &event {
            ParameterEvent::DynamicParameterCreated { .. } => println!("✨ {}", event),
            ParameterEvent::MessageDropped { .. } => println!("⚠️  {}", event),
            _ => println!("   {}", event),
        })
        .await?;

    println!("Listening for OSC on {} ({} built-in parameters)", addr, context.registry().len());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    listener.shutdown().await;

    let snapshot = context.store().snapshot();
    let stats = listener.stats();
    println!();
    println!("Datagrams: {}", stats.datagrams_received);
    println!("Applied:   {}", stats.messages_applied());
    println!("Dropped:   {}", stats.messages_dropped());
    println!("Dynamic parameters seen: {}", snapshot.dynamic.len());
    for param in &snapshot.dynamic {
        let latest = param
            .latest_value()
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!("  {:<32} {:<8} {}", param.name(), param.parameter_type(), latest);
    }

    tracing::info!("Monitor exiting");
    Ok(())
}
