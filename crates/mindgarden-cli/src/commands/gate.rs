use clap::Subcommand;
use mindgarden_core::storage::{Config, Database};
use mindgarden_core::{DailyGateKeeper, GatePurpose};

#[derive(Subcommand)]
pub enum GateAction {
    /// Check-and-mark a gate; the first caller on a given day wins
    Check {
        /// first_note_of_day or garden_popup_shown
        purpose: String,
        /// User to scope the flag to; defaults to the configured profile
        #[arg(long)]
        user: Option<String>,
        /// Gate date, YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove a gate flag (manual reset)
    Clear {
        purpose: String,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Garbage-collect stale gate flags
    Sweep {
        /// Days of flags to keep
        #[arg(long, default_value = "30")]
        keep_days: u32,
        #[arg(long)]
        user: Option<String>,
    },
}

fn resolve_user(user: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match user {
        Some(user) => Ok(user),
        None => Ok(Config::load()?.profile.user_id),
    }
}

pub fn run(action: GateAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let gates = DailyGateKeeper::new(&db);

    match action {
        GateAction::Check {
            purpose,
            user,
            date,
        } => {
            let purpose: GatePurpose = purpose.parse()?;
            let user = resolve_user(user)?;
            let today = super::resolve_date(date)?;
            let first_today = gates.check_and_mark(purpose, &user, today);
            let json = serde_json::json!({
                "purpose": purpose,
                "user": user,
                "date": today,
                "first_today": first_today,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        GateAction::Clear {
            purpose,
            user,
            date,
        } => {
            let purpose: GatePurpose = purpose.parse()?;
            let user = resolve_user(user)?;
            let today = super::resolve_date(date)?;
            gates.clear(purpose, &user, today)?;
            println!("gate cleared");
        }
        GateAction::Sweep { keep_days, user } => {
            let user = resolve_user(user)?;
            let today = chrono::Utc::now().date_naive();
            let removed = gates.sweep_stale(&user, today, keep_days)?;
            println!("removed {removed} stale gate flag(s)");
        }
    }
    Ok(())
}
