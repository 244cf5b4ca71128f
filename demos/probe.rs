use std::env;

use tablebase_explorer::{ClassifiedMove, ExplorerConfig, HttpTablebase, ProbeOrchestrator};
use tracing_subscriber::EnvFilter;

fn print_bucket<'a>(title: &str, moves: impl Iterator<Item = &'a ClassifiedMove>) {
    println!("{title}:");
    for m in moves {
        println!("  {:<8} {}", m.algebraic_notation, m.badge());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Read the position, e.g. "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"
    let input = env::args().skip(1).collect::<Vec<_>>().join(" ");

    // 2. Connect to the lookup service (TABLEBASE_ENDPOINT overrides the default)
    let config = ExplorerConfig::from_env()?;
    println!("Using tablebase at {}", config.endpoint);
    let mut explorer = ProbeOrchestrator::new(HttpTablebase::new(&config)?);

    // 3. Probe
    if let Some(pending) = explorer.probe_fen(&input, true) {
        let completion = pending.resolve().await;
        explorer.complete(completion);
    }

    // 4. Output
    let view = explorer.view();
    println!("------------------------------------------------");
    println!("{}", view.position);
    println!("{}", view.status);
    if let Some(note) = view.note {
        println!("{note}");
    }
    println!("------------------------------------------------");
    print_bucket("Winning", view.moves.winning());
    print_bucket("Drawing", view.moves.drawing());
    print_bucket("Losing", view.moves.losing());

    Ok(())
}
