use clap::Subcommand;
use mindgarden_core::storage::{Config, Database};
use mindgarden_core::{MirrorEvent, VillainKey, VillainProgressEngine};

#[derive(Subcommand)]
pub enum VillainAction {
    /// Print the current villain state as JSON
    Status,
    /// List the six adversaries
    Roster,
    /// Choose the active adversary (health resets to full)
    Select {
        /// One of: doubt, pressure, comparison, failure, negativity, impatience
        key: String,
    },
    /// Apply damage to the active adversary
    Damage {
        /// Damage amount; defaults to the configured per-session damage
        #[arg(long)]
        amount: Option<u32>,
    },
    /// Archive the active adversary as defeated
    Defeat,
}

pub fn run(action: VillainAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let engine = VillainProgressEngine::new(&db);

    match action {
        VillainAction::Status => {
            let state = engine.state()?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        VillainAction::Roster => {
            let roster: Vec<_> = VillainKey::ALL.iter().map(|k| k.info()).collect();
            println!("{}", serde_json::to_string_pretty(&roster)?);
        }
        VillainAction::Select { key } => {
            let key: VillainKey = key.parse()?;
            engine.select_villain(key)?;
            let state = engine.state()?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        VillainAction::Damage { amount } => {
            let config = Config::load()?;
            let amount = amount.unwrap_or(config.gamification.damage_per_session);
            let health = engine.apply_damage(amount)?;
            let state = engine.state()?;
            let json = serde_json::json!({
                "villain": state.current_villain,
                "health": health,
                "defeatable": health == 0,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        VillainAction::Defeat => {
            let config = Config::load()?;
            let defeated = engine.defeat_current_villain()?;
            let state = engine.state()?;
            super::mirror::best_effort_push(
                &config,
                MirrorEvent::villain_defeated(
                    &config.profile.user_id,
                    defeated,
                    state.defeated_villains.len(),
                ),
            );
            let json = serde_json::json!({
                "defeated": defeated,
                "total_defeats": state.defeated_villains.len(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}
