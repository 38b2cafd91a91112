//! Garden progression derived from the activity streak.
//!
//! The garden is the visual face of the streak: each consecutive day of
//! practice grows it one milestone further. Early milestones come quickly,
//! later ones are spaced out; past the last milestone the garden advances
//! one stage per additional ten days until the final stage.

use rand::seq::SliceRandom;

/// Streak day at which each garden stage unlocks.
const MILESTONES: [u32; 11] = [1, 2, 4, 7, 11, 14, 21, 28, 31, 40, 50];

/// Total number of garden stages.
pub const STAGE_COUNT: usize = 15;

const MESSAGES: [&str; 4] = [
    "Nurture your Meditation Garden.\nEach session is a seed. Skip a day, and your garden may disappear.\nStay consistent, and watch it bloom.",
    "Every meditation helps your garden grow.\nWater it daily to keep it alive and thriving.\nEven one small session makes a difference.",
    "Your Meditation Garden grows with every session.\nMiss a day? You'll have to restart your garden.",
    "Daily practice = daily growth.\nYour streak fuels your garden. Keep going, one day at a time.",
];

/// Map a streak to a 0-based garden stage index.
///
/// Streak 0 and 1 both map to the first stage; the last stage is reached at
/// 81+ days and the index never exceeds `STAGE_COUNT - 1`.
pub fn stage_for_streak(streak: u32) -> usize {
    let last_milestone = MILESTONES[MILESTONES.len() - 1];
    if streak <= last_milestone {
        let mut idx = 0;
        for (i, milestone) in MILESTONES.iter().enumerate() {
            if streak >= *milestone {
                idx = i;
            }
        }
        idx
    } else {
        let extra = ((streak - last_milestone) / 10) as usize;
        (MILESTONES.len() + extra).min(STAGE_COUNT - 1)
    }
}

/// A rotating encouragement line for the garden popup.
pub fn encouragement() -> &'static str {
    let mut rng = rand::thread_rng();
    MESSAGES.choose(&mut rng).copied().unwrap_or(MESSAGES[0])
}
