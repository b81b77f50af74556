use crate::recovery::Recovery;
use serde::{Deserialize, Deserializer, Serialize};

/// One expedition slot from the daily notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expedition {
    /// Upstream reports either a bare boolean or a status string ("Finished").
    #[serde(default, alias = "status", deserialize_with = "finished_flag")]
    pub finished: bool,
}

fn finished_flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Status(String),
    }
    Ok(match Flag::deserialize(d)? {
        Flag::Bool(b) => b,
        Flag::Status(s) => s.eq_ignore_ascii_case("finished"),
    })
}

/// The daily-note snapshot as fetched from the account API.
///
/// Every field is optional or defaulted: the upstream payload omits fields
/// freely (teapot fields are absent entirely until the player unlocks it),
/// and absence must never fail the decode. Defaults are documented per field;
/// anything smarter than a plain default belongs in [`crate::Report::build`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    /// Current resin; defaults to 0 when missing.
    #[serde(default)]
    pub current_resin: u32,
    /// Resin cap; defaults to 0 when missing.
    #[serde(default)]
    pub max_resin: u32,
    /// Time until resin is full, in whatever encoding upstream picked.
    #[serde(default, alias = "resin_recovery_time")]
    pub resin_recovery: Option<Recovery>,
    /// Commissions completed today.
    #[serde(default, alias = "finished_task_num")]
    pub finished_commissions: Option<u32>,
    /// Daily commission count; the reporter defaults this to 4.
    #[serde(default, alias = "total_task_num")]
    pub max_commissions: Option<u32>,
    /// Whether the extra commission reward was claimed.
    #[serde(default, alias = "is_extra_task_reward_received")]
    pub claimed_commission_reward: Option<bool>,
    /// Expedition slots; empty when none are running.
    #[serde(default)]
    pub expeditions: Vec<Expedition>,
    /// Teapot currency on hand; absent until the teapot is unlocked.
    #[serde(default, alias = "current_home_coin")]
    pub teapot_currency: Option<u64>,
    /// Teapot currency cap; absent until the teapot is unlocked.
    #[serde(default, alias = "max_home_coin")]
    pub teapot_currency_max: Option<u64>,
    /// Time until the teapot currency caps out.
    #[serde(default, alias = "home_coin_recovery_time")]
    pub teapot_recovery: Option<Recovery>,
}
