#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Aggregates the effects of equipped cosmetic items into round modifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use word_siege_core::Modifiers;

const EFFECT_COUNT: usize = 8;

/// Named numeric effects an equipped item may contribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Flat castle hit points.
    CastleHpFlat,
    /// Castle hit points in percent.
    CastleHpPercent,
    /// Minion slow in percent.
    MonsterSlow,
    /// Boss slow in percent.
    BossSlow,
    /// Combo shields granted per round.
    ComboShield,
    /// Error shields granted per round.
    ForgiveError,
    /// Coin bonus in percent.
    BonusCoins,
    /// Coin and experience bonus in percent.
    BonusCoinsXp,
}

impl EffectKind {
    /// Every effect kind in declaration order.
    pub const ALL: [EffectKind; EFFECT_COUNT] = [
        Self::CastleHpFlat,
        Self::CastleHpPercent,
        Self::MonsterSlow,
        Self::BossSlow,
        Self::ComboShield,
        Self::ForgiveError,
        Self::BonusCoins,
        Self::BonusCoinsXp,
    ];

    /// Stable name used by item catalogues and configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CastleHpFlat => "castle_hp_flat",
            Self::CastleHpPercent => "castle_hp_percent",
            Self::MonsterSlow => "monster_slow",
            Self::BossSlow => "boss_slow",
            Self::ComboShield => "combo_shield",
            Self::ForgiveError => "forgive_error",
            Self::BonusCoins => "bonus_coins",
            Self::BonusCoinsXp => "bonus_coins_xp",
        }
    }

    const fn is_percentage(self) -> bool {
        matches!(
            self,
            Self::CastleHpPercent
                | Self::MonsterSlow
                | Self::BossSlow
                | Self::BonusCoins
                | Self::BonusCoinsXp
        )
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error raised when an effect name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown effect `{0}`")]
pub struct EffectParseError(String);

impl FromStr for EffectKind {
    type Err = EffectParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == trimmed)
            .ok_or_else(|| EffectParseError(trimmed.to_owned()))
    }
}

/// Single cosmetic item currently equipped by the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    /// Display name of the item.
    pub name: String,
    /// Effect granted by the item.
    pub effect: EffectKind,
    /// Magnitude of the effect.
    pub value: f32,
}

impl EquippedItem {
    /// Creates a new equipped item description.
    #[must_use]
    pub fn new(name: impl Into<String>, effect: EffectKind, value: f32) -> Self {
        Self {
            name: name.into(),
            effect,
            value,
        }
    }
}

/// Read-only provider of aggregated effect values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierProvider {
    totals: [f32; EFFECT_COUNT],
}

impl ModifierProvider {
    /// Sums the effects of every equipped item.
    #[must_use]
    pub fn from_equipped(items: &[EquippedItem]) -> Self {
        let mut totals = [0.0; EFFECT_COUNT];
        for item in items {
            if item.value.is_finite() {
                totals[slot(item.effect)] += item.value;
            }
        }
        Self { totals }
    }

    /// Aggregated value of a named effect, clamped to its valid range.
    #[must_use]
    pub fn value(&self, effect: EffectKind) -> f32 {
        let total = self.totals[slot(effect)];
        if effect.is_percentage() {
            total.clamp(0.0, 100.0)
        } else {
            total.max(0.0)
        }
    }

    /// Captures the modifiers consumed by the engine at round start.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            castle_hp_flat: whole(self.value(EffectKind::CastleHpFlat)),
            castle_hp_percent: self.value(EffectKind::CastleHpPercent),
            monster_slow_percent: self.value(EffectKind::MonsterSlow),
            boss_slow_percent: self.value(EffectKind::BossSlow),
            combo_shields: whole(self.value(EffectKind::ComboShield)),
            error_shields: whole(self.value(EffectKind::ForgiveError)),
            bonus_coins_percent: self.value(EffectKind::BonusCoins),
            bonus_both_percent: self.value(EffectKind::BonusCoinsXp),
        }
    }
}

fn slot(effect: EffectKind) -> usize {
    effect as usize
}

fn whole(value: f32) -> u32 {
    value.floor().clamp(0.0, u32::MAX as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_names_round_trip_through_from_str() {
        for kind in EffectKind::ALL {
            assert_eq!(kind.name().parse::<EffectKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_effect_name_is_rejected() {
        let error = "double_damage".parse::<EffectKind>().unwrap_err();
        assert_eq!(error.to_string(), "unknown effect `double_damage`");
    }

    #[test]
    fn empty_loadout_yields_neutral_modifiers() {
        let provider = ModifierProvider::from_equipped(&[]);
        assert_eq!(provider.modifiers(), Modifiers::default());
    }

    #[test]
    fn effects_sum_across_items() {
        let provider = ModifierProvider::from_equipped(&[
            EquippedItem::new("Oak Gate", EffectKind::CastleHpFlat, 15.0),
            EquippedItem::new("Stone Gate", EffectKind::CastleHpFlat, 10.0),
            EquippedItem::new("Lucky Charm", EffectKind::ComboShield, 1.0),
            EquippedItem::new("Eraser", EffectKind::ForgiveError, 2.0),
            EquippedItem::new("Gold Pouch", EffectKind::BonusCoins, 20.0),
        ]);
        let modifiers = provider.modifiers();
        assert_eq!(modifiers.castle_hp_flat, 25);
        assert_eq!(modifiers.combo_shields, 1);
        assert_eq!(modifiers.error_shields, 2);
        assert_eq!(modifiers.bonus_coins_percent, 20.0);
        assert_eq!(provider.value(EffectKind::BossSlow), 0.0);
    }

    #[test]
    fn percentages_are_clamped() {
        let provider = ModifierProvider::from_equipped(&[
            EquippedItem::new("Frost Rune", EffectKind::MonsterSlow, 70.0),
            EquippedItem::new("Frost Crown", EffectKind::MonsterSlow, 70.0),
            EquippedItem::new("Cursed Coin", EffectKind::BonusCoins, -30.0),
        ]);
        assert_eq!(provider.value(EffectKind::MonsterSlow), 100.0);
        assert_eq!(provider.value(EffectKind::BonusCoins), 0.0);
    }

    #[test]
    fn fractional_shields_round_down() {
        let provider = ModifierProvider::from_equipped(&[EquippedItem::new(
            "Half Shield",
            EffectKind::ComboShield,
            1.5,
        )]);
        assert_eq!(provider.modifiers().combo_shields, 1);
    }
}
