//! Playable character identities and their special abilities.
//!
//! Each [`Character`] maps to exactly one [`Ability`]. The identity is fixed
//! when the actor is constructed; switching character builds a new actor.
//!
//! The ability bookkeeping that every character shares (cooldown and the
//! short "active" window) lives in [`AbilityState`]; only the payload in
//! [`AbilityEffect`] differs per variant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::components::timer::countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    /// Launches a kinetic wave that pushes enemies back.
    Striker,
    /// Opens a hack window; the only double-jumper.
    Hacker,
    /// Self-buff that boosts speed and heals over time.
    Brawler,
}

impl Character {
    pub const ALL: [Character; 3] = [Character::Striker, Character::Hacker, Character::Brawler];

    pub fn ability(self) -> Ability {
        match self {
            Character::Striker => Ability::KineticWave,
            Character::Hacker => Ability::Hack,
            Character::Brawler => Ability::Berserk,
        }
    }

    /// Section name used in the INI configuration.
    pub fn config_key(self) -> &'static str {
        match self {
            Character::Striker => "striker",
            Character::Hacker => "hacker",
            Character::Brawler => "brawler",
        }
    }
}

impl FromStr for Character {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Character::ALL
            .into_iter()
            .find(|c| c.config_key() == wanted)
            .ok_or_else(|| format!("unknown character '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    KineticWave,
    Hack,
    Berserk,
}

/// Per-variant payload of a running ability.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AbilityEffect {
    #[default]
    Idle,
    /// The wave itself is a projectile entity; nothing to track here.
    KineticWave,
    Hack {
        window: f32,
    },
    Berserk {
        remaining: f32,
        heal_accumulator: f32,
    },
}

/// Shared ability gate plus the running effect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbilityState {
    /// Seconds until the ability may be used again.
    pub cooldown_remaining: f32,
    /// Short window in which the activation is considered "active" (animation state).
    pub active_timer: f32,
    pub effect: AbilityEffect,
}

impl AbilityState {
    pub fn ready(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    pub fn is_active(&self) -> bool {
        self.active_timer > 0.0
    }

    pub fn is_hacking(&self) -> bool {
        matches!(self.effect, AbilityEffect::Hack { window } if window > 0.0)
    }

    pub fn is_berserk(&self) -> bool {
        matches!(self.effect, AbilityEffect::Berserk { remaining, .. } if remaining > 0.0)
    }

    /// Arm the gate: start the cooldown and the active window, install `effect`.
    pub fn activate(&mut self, cooldown: f32, active_duration: f32, effect: AbilityEffect) {
        self.cooldown_remaining = cooldown;
        self.active_timer = active_duration;
        self.effect = effect;
    }

    /// Advance the shared timers. Returns `true` when the running effect ended this tick.
    ///
    /// Berserk healing is handled by the actor, which owns health; this only
    /// counts the buff duration down.
    pub fn tick(&mut self, dt: f32) -> bool {
        countdown(&mut self.cooldown_remaining, dt);
        countdown(&mut self.active_timer, dt);
        let active = self.is_active();
        let ended = match &mut self.effect {
            AbilityEffect::Idle => false,
            AbilityEffect::KineticWave => !active,
            AbilityEffect::Hack { window } => countdown(window, dt),
            AbilityEffect::Berserk { remaining, .. } => countdown(remaining, dt),
        };
        if ended {
            self.effect = AbilityEffect::Idle;
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_character_has_distinct_ability() {
        assert_eq!(Character::Striker.ability(), Ability::KineticWave);
        assert_eq!(Character::Hacker.ability(), Ability::Hack);
        assert_eq!(Character::Brawler.ability(), Ability::Berserk);
    }

    #[test]
    fn test_parse_character_name() {
        assert_eq!("striker".parse::<Character>(), Ok(Character::Striker));
        assert_eq!(" Hacker ".parse::<Character>(), Ok(Character::Hacker));
        assert!("wizard".parse::<Character>().is_err());
    }

    #[test]
    fn test_fresh_state_is_ready() {
        let s = AbilityState::default();
        assert!(s.ready());
        assert!(!s.is_active());
        assert_eq!(s.effect, AbilityEffect::Idle);
    }

    #[test]
    fn test_activate_sets_cooldown_and_active_window() {
        let mut s = AbilityState::default();
        s.activate(5.0, 0.3, AbilityEffect::Hack { window: 4.0 });
        assert!(!s.ready());
        assert!(s.is_active());
        assert!(s.is_hacking());
    }

    #[test]
    fn test_active_window_independent_of_cooldown() {
        let mut s = AbilityState::default();
        s.activate(5.0, 0.3, AbilityEffect::Hack { window: 4.0 });
        s.tick(0.5);
        assert!(!s.is_active());
        assert!(s.is_hacking());
        assert!(!s.ready());
    }

    #[test]
    fn test_hack_window_expires() {
        let mut s = AbilityState::default();
        s.activate(5.0, 0.3, AbilityEffect::Hack { window: 1.0 });
        assert!(!s.tick(0.6));
        assert!(s.tick(0.6));
        assert!(!s.is_hacking());
        assert_eq!(s.effect, AbilityEffect::Idle);
    }

    #[test]
    fn test_kinetic_wave_effect_ends_with_active_window() {
        let mut s = AbilityState::default();
        s.activate(2.0, 0.2, AbilityEffect::KineticWave);
        assert!(!s.tick(0.1));
        assert!(s.tick(0.2));
        assert_eq!(s.effect, AbilityEffect::Idle);
    }

    #[test]
    fn test_timers_never_negative() {
        let mut s = AbilityState::default();
        s.activate(1.0, 0.1, AbilityEffect::Berserk {
            remaining: 0.5,
            heal_accumulator: 0.0,
        });
        for _ in 0..10 {
            s.tick(1.0);
        }
        assert_eq!(s.cooldown_remaining, 0.0);
        assert_eq!(s.active_timer, 0.0);
        assert!(s.ready());
    }
}
