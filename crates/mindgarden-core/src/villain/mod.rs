mod engine;
mod roster;

pub use engine::{VillainProgressEngine, VillainState, DEFAULT_DAMAGE, MAX_HEALTH};
pub use roster::{VillainInfo, VillainKey};
