//! Headless battle simulator.
//!
//! Loads fighters from content files, lets the random AI play both sides and
//! prints the outcome as JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! BATTLE_ME=vegeta BATTLE_FOE=piccolo BATTLE_SEED=7 RUST_LOG=debug cargo run -p battle-sim
//! ```

mod config;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::Side;
use battle_runtime::{BattleSession, SessionConfig};

use crate::config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let sim = SimConfig::from_env();
    tracing::info!(content = %sim.content_dir.display(), me = %sim.me, foe = %sim.foe, "starting simulation");

    let factory = ContentFactory::new(&sim.content_dir);
    let catalog = factory.load_attacks()?;
    let roster = factory.load_roster()?;
    let me = roster
        .combatant(&sim.me, &catalog)
        .with_context(|| format!("cannot field '{}'", sim.me))?;
    let foe = roster
        .combatant(&sim.foe, &catalog)
        .with_context(|| format!("cannot field '{}'", sim.foe))?;

    let config = SessionConfig {
        battle_config: factory.load_config()?,
        seed: sim.seed,
        ..SessionConfig::default()
    };

    let session = BattleSession::builder()
        .config(config)
        .combatant(Side::Me, me)
        .combatant(Side::Foe, foe)
        .ai(Side::Me)
        .ai(Side::Foe)
        .build()?;
    tracing::info!(seed = session.seed(), "session ready");

    let outcome = session.run().await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
