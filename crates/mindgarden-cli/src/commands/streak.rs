use clap::Subcommand;
use mindgarden_core::garden;
use mindgarden_core::storage::{Config, Database};
use mindgarden_core::{DailyGateKeeper, GatePurpose, StreakTracker};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Print the current streak as JSON
    Show,
    /// Record a qualifying activity (defaults to today)
    Record {
        /// Activity date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Zero the streak
    Reset,
    /// Garden progression for the current streak
    Garden,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let tracker = StreakTracker::new(&db);

    match action {
        StreakAction::Show => {
            let json = serde_json::json!({
                "streak": tracker.streak()?,
                "last_activity": tracker.last_activity()?,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        StreakAction::Record { date } => {
            let today = super::resolve_date(date)?;
            let streak = tracker.record_activity(today)?;
            let json = serde_json::json!({
                "streak": streak,
                "garden_stage": garden::stage_for_streak(streak),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        StreakAction::Reset => {
            tracker.reset()?;
            println!("streak reset");
        }
        StreakAction::Garden => {
            let config = Config::load()?;
            let streak = tracker.streak()?;
            let today = chrono::Utc::now().date_naive();
            let gates = DailyGateKeeper::new(&db);
            // The popup message renders at most once per calendar day.
            let show_message = config.gamification.garden_popup
                && gates.check_and_mark(
                    GatePurpose::GardenPopupShown,
                    &config.profile.user_id,
                    today,
                );
            let json = serde_json::json!({
                "streak": streak,
                "stage": garden::stage_for_streak(streak),
                "stage_count": garden::STAGE_COUNT,
                "message": show_message.then(garden::encouragement),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}
