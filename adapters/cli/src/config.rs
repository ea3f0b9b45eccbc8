use std::{fs, path::Path, time::Duration};

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;
use word_siege_core::RoundSettings;
use word_siege_system_modifiers::{EffectKind, EquippedItem};

const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Settings and loadout used to run a session.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SessionConfig {
    /// Tunable constants of the simulation.
    pub(crate) settings: RoundSettings,
    /// Items equipped for the round.
    pub(crate) equipped: Vec<EquippedItem>,
}

impl SessionConfig {
    /// Loads the configuration file, falling back to defaults when none is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid session config at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).context("failed to parse session config toml contents")?;
        if file.version != SUPPORTED_CONFIG_VERSION {
            bail!(
                "unsupported session config version {}; expected {}",
                file.version,
                SUPPORTED_CONFIG_VERSION
            );
        }

        let settings = file.round.apply(RoundSettings::default())?;

        let mut equipped = Vec::with_capacity(file.equipped.len());
        for item in file.equipped {
            let effect: EffectKind = item
                .effect
                .parse()
                .with_context(|| format!("item `{}` grants an unknown effect", item.name))?;
            ensure!(
                item.value.is_finite(),
                "item `{}` has a non-finite value",
                item.name
            );
            equipped.push(EquippedItem::new(item.name, effect, item.value));
        }

        Ok(Self { settings, equipped })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    round: RoundOverrides,
    #[serde(default)]
    equipped: Vec<ItemEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoundOverrides {
    tick_interval_ms: Option<u64>,
    round_duration_secs: Option<u64>,
    base_castle_hp: Option<u32>,
    castle_damage: Option<u32>,
    base_speed: Option<f32>,
    base_monster_hp: Option<f32>,
    spawn_interval_ms: Option<u64>,
    boss_spawn_gap_ms: Option<u64>,
}

impl RoundOverrides {
    fn apply(self, defaults: RoundSettings) -> Result<RoundSettings> {
        let settings = RoundSettings {
            tick_interval: self
                .tick_interval_ms
                .map_or(defaults.tick_interval, Duration::from_millis),
            round_duration: self
                .round_duration_secs
                .map_or(defaults.round_duration, Duration::from_secs),
            base_castle_hp: self.base_castle_hp.unwrap_or(defaults.base_castle_hp),
            castle_damage: self.castle_damage.unwrap_or(defaults.castle_damage),
            base_speed: self.base_speed.unwrap_or(defaults.base_speed),
            base_monster_hp: self.base_monster_hp.unwrap_or(defaults.base_monster_hp),
            spawn_interval: self
                .spawn_interval_ms
                .map_or(defaults.spawn_interval, Duration::from_millis),
            boss_spawn_gap: self
                .boss_spawn_gap_ms
                .map_or(defaults.boss_spawn_gap, Duration::from_millis),
        };

        ensure!(
            !settings.tick_interval.is_zero(),
            "round.tick_interval_ms must be positive"
        );
        ensure!(
            !settings.round_duration.is_zero(),
            "round.round_duration_secs must be positive"
        );
        ensure!(
            settings.base_castle_hp > 0,
            "round.base_castle_hp must be positive"
        );
        ensure!(
            settings.base_speed.is_finite() && settings.base_speed > 0.0,
            "round.base_speed must be a positive number"
        );
        ensure!(
            settings.base_monster_hp.is_finite() && settings.base_monster_hp > 0.0,
            "round.base_monster_hp must be a positive number"
        );
        Ok(settings)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemEntry {
    name: String,
    effect: String,
    value: f32,
}
