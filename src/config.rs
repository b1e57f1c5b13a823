use crate::model::Roster;
use crate::rotation::{AnchorCalendar, Rota};
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Paramètres de déploiement de la rotation.
///
/// Les valeurs par défaut alignent le cycle sur l'historique coordonné à la
/// main (premier samedi du cycle : 2026-02-21).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotaConfig {
    pub anchor_weekday: Weekday,
    pub anchor_start: NaiveDate,
    pub anchor_end: NaiveDate,
    pub anchor_offset: i64,
    pub horizon_end: NaiveDate,
}

impl Default for RotaConfig {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or(NaiveDate::MAX);
        Self {
            anchor_weekday: Weekday::Sat,
            anchor_start: start,
            anchor_end: end,
            anchor_offset: 5,
            horizon_end: end,
        }
    }
}

impl RotaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.anchor_end < self.anchor_start {
            bail!("anchor_end must be after anchor_start");
        }
        if self.calendar().is_empty() {
            bail!("anchor range contains no {:?}", self.anchor_weekday);
        }
        if self.horizon_end < self.anchor_start {
            bail!("horizon_end must be after anchor_start");
        }
        if self.horizon_end > self.anchor_end {
            bail!("horizon_end must not go past anchor_end");
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
        let config: RotaConfig = serde_json::from_slice(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn calendar(&self) -> AnchorCalendar {
        AnchorCalendar::new(self.anchor_weekday, self.anchor_start, self.anchor_end)
    }

    pub fn rota(&self, roster: Roster) -> Rota {
        Rota::new(self.calendar(), self.anchor_offset).with_roster(roster)
    }
}
