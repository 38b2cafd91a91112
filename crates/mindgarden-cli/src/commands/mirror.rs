use clap::Subcommand;
use mindgarden_core::mirror::{flush_queue, MirrorClient, MirrorEvent, MirrorQueue, MirrorStatus};
use mindgarden_core::storage::{Database, KeyValueStore};
use mindgarden_core::Config;

const LAST_FLUSH_KEY: &str = "mirror_last_flush";

#[derive(Subcommand)]
pub enum MirrorAction {
    /// Show the offline mirror queue status
    Status,
    /// Upload queued events to the data service
    Flush,
}

pub fn run(action: MirrorAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MirrorAction::Status => {
            let db = Database::open()?;
            let mut queue = MirrorQueue::new();
            queue.load()?;
            let last_mirror_at = db
                .get(LAST_FLUSH_KEY)?
                .and_then(|raw| serde_json::from_str(&raw).ok());
            let status = MirrorStatus {
                last_mirror_at,
                pending_count: queue.len(),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        MirrorAction::Flush => {
            let config = Config::load()?;
            let client = MirrorClient::from_config(&config.mirror)?;
            let mut queue = MirrorQueue::new();
            queue.load()?;

            let runtime = tokio::runtime::Runtime::new()?;
            let pushed = runtime.block_on(flush_queue(&mut queue, &client));
            queue.persist()?;

            if pushed > 0 {
                let db = Database::open()?;
                db.set(
                    LAST_FLUSH_KEY,
                    &serde_json::to_string(&chrono::Utc::now())?,
                )?;
            }
            println!("pushed {pushed} event(s), {} pending", queue.len());
        }
    }
    Ok(())
}

/// Try to upload immediately; park the event in the offline queue when the
/// service is unreachable. Mirror failures never fail the caller.
pub(crate) fn best_effort_push(config: &Config, event: MirrorEvent) {
    if !config.mirror.enabled {
        return;
    }
    let client = match MirrorClient::from_config(&config.mirror) {
        Ok(client) => client,
        Err(_) => return,
    };

    let result = tokio::runtime::Runtime::new()
        .map_err(|e| e.to_string())
        .and_then(|runtime| {
            runtime
                .block_on(client.push(&event))
                .map_err(|e| e.to_string())
        });

    if let Err(e) = result {
        eprintln!("Warning: mirror push failed: {e}");
        let mut queue = MirrorQueue::new();
        if let Err(e) = queue.load() {
            eprintln!("Warning: could not load mirror queue: {e}");
        }
        queue.enqueue(event);
        if let Err(e) = queue.persist() {
            eprintln!("Warning: could not persist mirror queue: {e}");
        }
    }
}
