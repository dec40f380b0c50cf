//! Simulation tuning resource.
//!
//! Holds every tunable constant the simulation reads: gravity, jump and
//! movement feel, dash, combat, abilities and the per-character stats.
//! Values start from safe built-in defaults and can be overridden from an
//! INI file. The configuration is read once at startup and treated as
//! immutable for the run.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! gravity = 1800
//! terminal_velocity = 900
//! max_delta = 0.05
//!
//! [movement]
//! jump_velocity = -650
//! coyote_time = 0.1
//! jump_buffer = 0.12
//!
//! [hacker]
//! move_speed = 280
//! max_jumps = 2
//! ```
//!
//! Missing sections or keys keep their current values.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::character::Character;

const DEFAULT_CONFIG_PATH: &str = "./stompcore.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsTuning {
    /// Downward acceleration in units/s².
    pub gravity: f32,
    /// Maximum downward speed in units/s.
    pub terminal_velocity: f32,
    /// Upper bound on a frame delta, in seconds.
    pub max_delta: f32,
    /// Gap left between bodies after a collision snap.
    pub collision_epsilon: f32,
    /// Falling below this `y` kills the actor.
    pub death_zone_y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementTuning {
    /// Initial vertical speed of a jump. Negative is up.
    pub jump_velocity: f32,
    /// Factor applied to upward speed when jump is released early.
    pub jump_cut: f32,
    /// Horizontal speed multiplier per 60 Hz frame with no directional input.
    pub friction: f32,
    /// Below this horizontal speed, friction snaps velocity to zero.
    pub friction_stop_threshold: f32,
    pub coyote_time: f32,
    pub jump_buffer: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashTuning {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombatTuning {
    pub max_health: i32,
    pub invincibility: f32,
    pub respawn_delay: f32,
    pub attack_cooldown: f32,
    pub attack_duration: f32,
    /// Width of the attack hitbox in front of the actor.
    pub attack_reach: f32,
    pub attack_damage: i32,
    /// Base stomp tolerance, scaled by the character's stomp multiplier.
    pub stomp_tolerance: f32,
    /// Vertical velocity given to the actor after a stomp. Negative is up.
    pub stomp_bounce: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityTuning {
    /// Length of the shared "active" window after any ability use.
    pub active_duration: f32,
    pub wave_speed: f32,
    pub wave_range: f32,
    pub wave_radius: f32,
    pub wave_push: f32,
    pub wave_stun: f32,
    pub hack_duration: f32,
    pub hack_radius: f32,
    pub berserk_duration: f32,
    pub berserk_speed_multiplier: f32,
    /// Health points restored per second while berserk.
    pub berserk_heal_rate: f32,
    /// Exponential decay rate of enemy knockback velocity, per second.
    pub knockback_decay: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    pub move_speed: f32,
    pub max_jumps: u8,
    pub stomp_multiplier: f32,
    pub ability_cooldown: f32,
}

impl CharacterStats {
    pub fn can_air_jump(&self) -> bool {
        self.max_jumps > 1
    }
}

/// Simulation tuning resource.
///
/// Inserted once into the world by the orchestrator and read by every
/// simulation system through `Res<GameConfig>`.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub physics: PhysicsTuning,
    pub movement: MovementTuning,
    pub dash: DashTuning,
    pub combat: CombatTuning,
    pub ability: AbilityTuning,
    pub striker: CharacterStats,
    pub hacker: CharacterStats,
    pub brawler: CharacterStats,
    /// Actor box size.
    pub actor_size: Vec2,
    /// Cell size of the projectile/enemy broad-phase grid.
    pub grid_cell_size: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self {
            physics: PhysicsTuning {
                gravity: 1800.0,
                terminal_velocity: 900.0,
                max_delta: 0.05,
                collision_epsilon: 0.01,
                death_zone_y: 2000.0,
            },
            movement: MovementTuning {
                jump_velocity: -650.0,
                jump_cut: 0.5,
                friction: 0.8,
                friction_stop_threshold: 10.0,
                coyote_time: 0.1,
                jump_buffer: 0.12,
            },
            dash: DashTuning {
                speed: 650.0,
                duration: 0.18,
                cooldown: 0.75,
            },
            combat: CombatTuning {
                max_health: 5,
                invincibility: 1.0,
                respawn_delay: 1.5,
                attack_cooldown: 0.35,
                attack_duration: 0.15,
                attack_reach: 40.0,
                attack_damage: 1,
                stomp_tolerance: 12.0,
                stomp_bounce: -450.0,
            },
            ability: AbilityTuning {
                active_duration: 0.3,
                wave_speed: 420.0,
                wave_range: 360.0,
                wave_radius: 40.0,
                wave_push: 320.0,
                wave_stun: 0.6,
                hack_duration: 4.0,
                hack_radius: 120.0,
                berserk_duration: 6.0,
                berserk_speed_multiplier: 1.5,
                berserk_heal_rate: 0.5,
                knockback_decay: 6.0,
            },
            striker: CharacterStats {
                move_speed: 260.0,
                max_jumps: 1,
                stomp_multiplier: 1.0,
                ability_cooldown: 2.5,
            },
            hacker: CharacterStats {
                move_speed: 280.0,
                max_jumps: 2,
                stomp_multiplier: 1.0,
                ability_cooldown: 6.0,
            },
            brawler: CharacterStats {
                move_speed: 230.0,
                max_jumps: 1,
                stomp_multiplier: 1.5,
                ability_cooldown: 10.0,
            },
            actor_size: Vec2::new(32.0, 48.0),
            grid_cell_size: 64.0,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a default configuration bound to a custom file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn character(&self, character: Character) -> &CharacterStats {
        match character {
            Character::Striker => &self.striker,
            Character::Hacker => &self.hacker,
            Character::Brawler => &self.brawler,
        }
    }

    fn character_mut(&mut self, character: Character) -> &mut CharacterStats {
        match character {
            Character::Striker => &mut self.striker,
            Character::Hacker => &mut self.hacker,
            Character::Brawler => &mut self.brawler,
        }
    }

    /// Load configuration from the INI file at `config_path`.
    ///
    /// Missing values retain their current values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        info!("Loaded simulation config from {:?}", self.config_path);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str, target: &mut f32| {
            if let Some(v) = config.getfloat(section, key).ok().flatten() {
                *target = v as f32;
            }
        };

        // [physics]
        float("physics", "gravity", &mut self.physics.gravity);
        float("physics", "terminal_velocity", &mut self.physics.terminal_velocity);
        float("physics", "max_delta", &mut self.physics.max_delta);
        float("physics", "collision_epsilon", &mut self.physics.collision_epsilon);
        float("physics", "death_zone_y", &mut self.physics.death_zone_y);

        // [movement]
        float("movement", "jump_velocity", &mut self.movement.jump_velocity);
        float("movement", "jump_cut", &mut self.movement.jump_cut);
        float("movement", "friction", &mut self.movement.friction);
        float(
            "movement",
            "friction_stop_threshold",
            &mut self.movement.friction_stop_threshold,
        );
        float("movement", "coyote_time", &mut self.movement.coyote_time);
        float("movement", "jump_buffer", &mut self.movement.jump_buffer);

        // [dash]
        float("dash", "speed", &mut self.dash.speed);
        float("dash", "duration", &mut self.dash.duration);
        float("dash", "cooldown", &mut self.dash.cooldown);

        // [combat]
        if let Some(v) = config.getint("combat", "max_health").ok().flatten() {
            self.combat.max_health = (v as i32).max(1);
        }
        float("combat", "invincibility", &mut self.combat.invincibility);
        float("combat", "respawn_delay", &mut self.combat.respawn_delay);
        float("combat", "attack_cooldown", &mut self.combat.attack_cooldown);
        float("combat", "attack_duration", &mut self.combat.attack_duration);
        float("combat", "attack_reach", &mut self.combat.attack_reach);
        if let Some(v) = config.getint("combat", "attack_damage").ok().flatten() {
            self.combat.attack_damage = v as i32;
        }
        float("combat", "stomp_tolerance", &mut self.combat.stomp_tolerance);
        float("combat", "stomp_bounce", &mut self.combat.stomp_bounce);

        // [ability]
        float("ability", "active_duration", &mut self.ability.active_duration);
        float("ability", "wave_speed", &mut self.ability.wave_speed);
        float("ability", "wave_range", &mut self.ability.wave_range);
        float("ability", "wave_radius", &mut self.ability.wave_radius);
        float("ability", "wave_push", &mut self.ability.wave_push);
        float("ability", "wave_stun", &mut self.ability.wave_stun);
        float("ability", "hack_duration", &mut self.ability.hack_duration);
        float("ability", "hack_radius", &mut self.ability.hack_radius);
        float("ability", "berserk_duration", &mut self.ability.berserk_duration);
        float(
            "ability",
            "berserk_speed_multiplier",
            &mut self.ability.berserk_speed_multiplier,
        );
        float("ability", "berserk_heal_rate", &mut self.ability.berserk_heal_rate);
        float("ability", "knockback_decay", &mut self.ability.knockback_decay);

        // [striker] [hacker] [brawler]
        for character in Character::ALL {
            let section = character.config_key();
            let mut stats = self.character(character).clone();
            float(section, "move_speed", &mut stats.move_speed);
            float(section, "stomp_multiplier", &mut stats.stomp_multiplier);
            float(section, "ability_cooldown", &mut stats.ability_cooldown);
            if let Some(v) = config.getuint(section, "max_jumps").ok().flatten() {
                match u8::try_from(v) {
                    Ok(n) => stats.max_jumps = n.max(1),
                    Err(_) => warn!(
                        "[{}] max_jumps = {} is out of range, keeping {}",
                        section, v, stats.max_jumps
                    ),
                }
            }
            *self.character_mut(character) = stats;
        }

        // [actor]
        float("actor", "width", &mut self.actor_size.x);
        float("actor", "height", &mut self.actor_size.y);

        // [broadphase]
        float("broadphase", "cell_size", &mut self.grid_cell_size);
    }

    /// Save configuration to the INI file at `config_path`.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("physics", "gravity", self.physics.gravity.to_string());
        set("physics", "terminal_velocity", self.physics.terminal_velocity.to_string());
        set("physics", "max_delta", self.physics.max_delta.to_string());
        set("physics", "collision_epsilon", self.physics.collision_epsilon.to_string());
        set("physics", "death_zone_y", self.physics.death_zone_y.to_string());

        set("movement", "jump_velocity", self.movement.jump_velocity.to_string());
        set("movement", "jump_cut", self.movement.jump_cut.to_string());
        set("movement", "friction", self.movement.friction.to_string());
        set(
            "movement",
            "friction_stop_threshold",
            self.movement.friction_stop_threshold.to_string(),
        );
        set("movement", "coyote_time", self.movement.coyote_time.to_string());
        set("movement", "jump_buffer", self.movement.jump_buffer.to_string());

        set("dash", "speed", self.dash.speed.to_string());
        set("dash", "duration", self.dash.duration.to_string());
        set("dash", "cooldown", self.dash.cooldown.to_string());

        set("combat", "max_health", self.combat.max_health.to_string());
        set("combat", "invincibility", self.combat.invincibility.to_string());
        set("combat", "respawn_delay", self.combat.respawn_delay.to_string());
        set("combat", "attack_cooldown", self.combat.attack_cooldown.to_string());
        set("combat", "attack_duration", self.combat.attack_duration.to_string());
        set("combat", "attack_reach", self.combat.attack_reach.to_string());
        set("combat", "attack_damage", self.combat.attack_damage.to_string());
        set("combat", "stomp_tolerance", self.combat.stomp_tolerance.to_string());
        set("combat", "stomp_bounce", self.combat.stomp_bounce.to_string());

        set("ability", "active_duration", self.ability.active_duration.to_string());
        set("ability", "wave_speed", self.ability.wave_speed.to_string());
        set("ability", "wave_range", self.ability.wave_range.to_string());
        set("ability", "wave_radius", self.ability.wave_radius.to_string());
        set("ability", "wave_push", self.ability.wave_push.to_string());
        set("ability", "wave_stun", self.ability.wave_stun.to_string());
        set("ability", "hack_duration", self.ability.hack_duration.to_string());
        set("ability", "hack_radius", self.ability.hack_radius.to_string());
        set("ability", "berserk_duration", self.ability.berserk_duration.to_string());
        set(
            "ability",
            "berserk_speed_multiplier",
            self.ability.berserk_speed_multiplier.to_string(),
        );
        set("ability", "berserk_heal_rate", self.ability.berserk_heal_rate.to_string());
        set("ability", "knockback_decay", self.ability.knockback_decay.to_string());

        for character in Character::ALL {
            let section = character.config_key();
            let stats = self.character(character);
            set(section, "move_speed", stats.move_speed.to_string());
            set(section, "max_jumps", stats.max_jumps.to_string());
            set(section, "stomp_multiplier", stats.stomp_multiplier.to_string());
            set(section, "ability_cooldown", stats.ability_cooldown.to_string());
        }

        set("actor", "width", self.actor_size.x.to_string());
        set("actor", "height", self.actor_size.y.to_string());
        set("broadphase", "cell_size", self.grid_cell_size.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved simulation config to {:?}", self.config_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let c = GameConfig::new();
        assert!(c.physics.gravity > 0.0);
        assert!(c.movement.jump_velocity < 0.0);
        assert!(c.combat.stomp_bounce < 0.0);
        assert!(c.physics.max_delta > 0.0);
        assert_eq!(c.hacker.max_jumps, 2);
        assert!(c.hacker.can_air_jump());
        assert!(!c.striker.can_air_jump());
        assert!(!c.brawler.can_air_jump());
    }

    #[test]
    fn test_character_lookup() {
        let c = GameConfig::new();
        assert_eq!(c.character(Character::Brawler).stomp_multiplier, 1.5);
        assert_eq!(c.character(Character::Hacker).max_jumps, 2);
    }

    #[test]
    fn test_load_from_str_overrides_only_present_keys() {
        let mut c = GameConfig::new();
        let text = "[physics]\ngravity = 1000\n\n[hacker]\nmax_jumps = 3\nmove_speed = 300.5\n";
        c.load_from_str(text).unwrap();
        assert_eq!(c.physics.gravity, 1000.0);
        assert_eq!(c.physics.terminal_velocity, 900.0);
        assert_eq!(c.hacker.max_jumps, 3);
        assert_eq!(c.hacker.move_speed, 300.5);
        assert_eq!(c.striker.move_speed, 260.0);
    }

    #[test]
    fn test_load_integer_sections() {
        let mut c = GameConfig::new();
        c.load_from_str("[combat]\nmax_health = 8\nattack_damage = 2\n")
            .unwrap();
        assert_eq!(c.combat.max_health, 8);
        assert_eq!(c.combat.attack_damage, 2);
    }

    #[test]
    fn test_max_jumps_never_zero() {
        let mut c = GameConfig::new();
        c.load_from_str("[striker]\nmax_jumps = 0\n").unwrap();
        assert_eq!(c.striker.max_jumps, 1);
    }

    #[test]
    fn test_oversized_max_jumps_keeps_default() {
        let mut c = GameConfig::new();
        c.load_from_str("[hacker]\nmax_jumps = 256\n").unwrap();
        assert_eq!(c.hacker.max_jumps, 2);
        c.load_from_str("[hacker]\nmax_jumps = 3\n").unwrap();
        assert_eq!(c.hacker.max_jumps, 3);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let mut c = GameConfig::new();
        c.load_from_str("[dash]\nspeed = fast\n").unwrap();
        assert_eq!(c.dash.speed, 650.0);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut c = GameConfig::with_path("./definitely/not/here.ini");
        assert!(c.load_from_file().is_err());
        assert_eq!(c.physics.gravity, 1800.0);
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!(
            "stompcore_config_test_{}.ini",
            std::process::id()
        ));
        let mut c = GameConfig::with_path(&path);
        c.dash.cooldown = 1.25;
        c.brawler.max_jumps = 2;
        c.save_to_file().unwrap();

        let mut reloaded = GameConfig::with_path(&path);
        reloaded.load_from_file().unwrap();
        assert_eq!(reloaded.dash.cooldown, 1.25);
        assert_eq!(reloaded.brawler.max_jumps, 2);
        let _ = std::fs::remove_file(&path);
    }
}
