use clap::Subcommand;
use mindgarden_core::garden;
use mindgarden_core::storage::{Config, Database, SessionKind};
use mindgarden_core::{
    DailyGateKeeper, GatePurpose, MirrorEvent, StreakTracker, VillainProgressEngine,
};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a completed session and advance the gamification state
    Complete {
        /// journal or meditation
        kind: String,
        /// Session length in minutes
        #[arg(long, default_value = "10")]
        duration: u64,
        /// Session date, YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let SessionAction::Complete {
        kind,
        duration,
        date,
    } = action;
    let kind: SessionKind = kind.parse()?;
    let config = Config::load()?;
    let db = Database::open()?;
    let today = super::resolve_date(date)?;

    db.record_session(kind, duration, chrono::Utc::now())?;

    let tracker = StreakTracker::new(&db);
    let streak = tracker.record_activity(today)?;

    // One session's worth of damage while an adversary is active.
    let engine = VillainProgressEngine::new(&db);
    let villain = match engine.state()?.current_villain {
        Some(key) => {
            let health = engine.apply_damage(config.gamification.damage_per_session)?;
            Some(serde_json::json!({
                "villain": key,
                "health": health,
                "defeatable": health == 0,
            }))
        }
        None => None,
    };

    let gates = DailyGateKeeper::new(&db);
    let first_note_of_day = kind == SessionKind::Journal
        && gates.check_and_mark(GatePurpose::FirstNoteOfDay, &config.profile.user_id, today);

    super::mirror::best_effort_push(
        &config,
        MirrorEvent::session_completed(&config.profile.user_id, kind, today, duration),
    );

    // Printed only once every local write above has succeeded, so the
    // caller never celebrates state that didn't persist.
    let json = serde_json::json!({
        "kind": kind,
        "streak": streak,
        "garden_stage": garden::stage_for_streak(streak),
        "villain": villain,
        "first_note_of_day": first_note_of_day,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
