//! The player-controlled actor and its layered state machine.
//!
//! An [`Actor`] is a [`KinematicBody`] plus several orthogonal sub-machines:
//!
//! - **Grounding**: airborne/grounded, driven by the collision pass through
//!   [`Actor::begin_ground_pass`] and [`Actor::finish_ground_pass`].
//! - **Jump**: ground jump, air jumps (double-jumpers only), coyote time,
//!   jump buffering and variable jump height.
//! - **Horizontal movement**: direct velocity control with frame-rate aware
//!   friction; dashing overrides it entirely.
//! - **Health**: damage gated by invincibility, death and timed respawn.
//! - **Ability**: one per-character special with a shared cooldown gate.
//! - **Attack**: short cooldown; the hit itself is resolved by the
//!   orchestrator through [`Actor::take_pending_attack`].
//!
//! Every timer is decremented with [`countdown`] and clamps at zero. Gated
//! actions (jump, dash, attack, ability) silently do nothing when their gate
//! is closed; the jump buffer is the only queued input.
//!
//! [`Actor::update`] returns the events it produced instead of storing
//! one-frame flags on the actor.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::aabb::Aabb;
use crate::components::character::{Ability, AbilityEffect, AbilityState, Character};
use crate::components::kinematicbody::KinematicBody;
use crate::components::timer::countdown;
use crate::events::simulation::SimEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;

/// Events produced by one actor update.
pub type ActorEvents = SmallVec<[SimEvent; 4]>;

/// Horizontal orientation. Vertical facing is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing for a horizontal intent, `None` when there is none.
    pub fn from_sign(x: f32) -> Option<Self> {
        if x < 0.0 {
            Some(Facing::Left)
        } else if x > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpState {
    /// Jumps left before landing, the ground jump included.
    pub jumps_remaining: u8,
    /// Ascending from a jump and still eligible for the release cut.
    pub is_jumping: bool,
    /// Jump input was released since the last jump.
    pub jump_released: bool,
    pub coyote_timer: f32,
    pub buffer_timer: f32,
}

impl JumpState {
    fn fresh(max_jumps: u8) -> Self {
        Self {
            jumps_remaining: max_jumps,
            is_jumping: false,
            jump_released: true,
            coyote_timer: 0.0,
            buffer_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashState {
    pub dashing: bool,
    pub timer: f32,
    pub cooldown: f32,
    /// -1 or 1 while dashing.
    pub direction: f32,
}

/// Result of [`Actor::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead, invincible, or a non-positive amount.
    Ignored,
    Hurt,
    Killed,
}

#[derive(Component, Debug, Clone)]
pub struct Actor {
    pub body: KinematicBody,
    character: Character,
    pub health: i32,
    pub max_health: i32,
    pub invincible_timer: f32,
    pub dead: bool,
    pub respawn_timer: f32,
    pub spawn_point: Vec2,
    pub facing: Facing,
    pub jump: JumpState,
    pub dash: DashState,
    pub ability: AbilityState,
    pub attack_cooldown: f32,
    /// Attack animation window.
    pub attack_timer: f32,
    pending_attack: bool,
}

impl Actor {
    pub fn new(character: Character, spawn_point: Vec2, config: &GameConfig) -> Self {
        let stats = config.character(character);
        Self {
            body: KinematicBody::new(spawn_point, config.actor_size),
            character,
            health: config.combat.max_health,
            max_health: config.combat.max_health,
            invincible_timer: 0.0,
            dead: false,
            respawn_timer: 0.0,
            spawn_point,
            facing: Facing::default(),
            jump: JumpState::fresh(stats.max_jumps),
            dash: DashState::default(),
            ability: AbilityState::default(),
            attack_cooldown: 0.0,
            attack_timer: 0.0,
            pending_attack: false,
        }
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.dashing
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    pub fn is_hacking(&self) -> bool {
        self.ability.is_hacking()
    }

    pub fn is_berserk(&self) -> bool {
        self.ability.is_berserk()
    }

    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    /// Current horizontal run speed, including the berserk boost.
    pub fn move_speed(&self, config: &GameConfig) -> f32 {
        let base = config.character(self.character).move_speed;
        if self.is_berserk() {
            base * config.ability.berserk_speed_multiplier
        } else {
            base
        }
    }

    pub fn set_spawn_point(&mut self, spawn_point: Vec2) {
        self.spawn_point = spawn_point;
    }

    /// Advance the actor by one frame: timers, input, then gravity and integration.
    ///
    /// Collision correction is not part of this call; the orchestrator runs
    /// the platform pass afterwards.
    pub fn update(&mut self, input: &InputState, config: &GameConfig, dt: f32) -> ActorEvents {
        let mut events = ActorEvents::new();

        if self.dead {
            if countdown(&mut self.respawn_timer, dt) {
                self.respawn(config);
                events.push(SimEvent::Respawned);
            }
            return events;
        }

        self.tick_timers(config, dt, &mut events);

        let dir = input.horizontal();
        if input.dash.just_pressed {
            self.try_dash(dir, config, &mut events);
        }
        if self.dash.dashing {
            self.body.vel.x = self.dash.direction * config.dash.speed;
        } else {
            if dir != 0.0 {
                self.body.vel.x = dir * self.move_speed(config);
            } else {
                self.apply_friction(config, dt);
            }
            if let Some(facing) = Facing::from_sign(dir) {
                self.facing = facing;
            }
        }

        if input.jump.just_pressed {
            self.jump(config, &mut events);
        }
        if input.jump.just_released {
            self.release_jump(config);
        }
        if input.attack.just_pressed {
            self.try_attack(config, &mut events);
        }
        if input.ability.just_pressed {
            self.try_ability(config, &mut events);
        }

        self.body.step(
            config.physics.gravity,
            config.physics.terminal_velocity,
            dt,
        );

        events
    }

    fn tick_timers(&mut self, config: &GameConfig, dt: f32, events: &mut ActorEvents) {
        countdown(&mut self.invincible_timer, dt);
        countdown(&mut self.attack_cooldown, dt);
        countdown(&mut self.attack_timer, dt);

        if self.dash.dashing {
            if countdown(&mut self.dash.timer, dt) {
                self.dash.dashing = false;
                self.dash.cooldown = config.dash.cooldown;
            }
        } else {
            countdown(&mut self.dash.cooldown, dt);
        }

        countdown(&mut self.jump.buffer_timer, dt);
        if countdown(&mut self.jump.coyote_timer, dt) && !self.body.grounded {
            // Coyote window lapsed without a jump: the ground jump is gone.
            let max_jumps = config.character(self.character).max_jumps;
            self.jump.jumps_remaining = self.jump.jumps_remaining.min(max_jumps.saturating_sub(1));
        }
        if self.jump.is_jumping && self.body.vel.y >= 0.0 {
            self.jump.is_jumping = false;
        }

        let mut heal = 0;
        if let AbilityEffect::Berserk {
            remaining,
            heal_accumulator,
        } = &mut self.ability.effect
        {
            if *remaining > 0.0 {
                *heal_accumulator += config.ability.berserk_heal_rate * dt.min(*remaining);
                if *heal_accumulator >= 1.0 {
                    let whole = heal_accumulator.floor();
                    *heal_accumulator -= whole;
                    heal = whole as i32;
                }
            }
        }
        if heal > 0 && self.heal(heal) > 0 {
            events.push(SimEvent::Healed {
                health: self.health,
            });
        }

        if self.ability.tick(dt) {
            events.push(SimEvent::AbilityEnded {
                ability: self.character.ability(),
            });
        }
    }

    fn apply_friction(&mut self, config: &GameConfig, dt: f32) {
        let factor = config.movement.friction.clamp(0.0, 1.0).powf(dt * 60.0);
        self.body.vel.x *= factor;
        if self.body.vel.x.abs() < config.movement.friction_stop_threshold {
            self.body.vel.x = 0.0;
        }
    }

    fn launch(&mut self, velocity: f32) {
        self.body.vel.y = velocity;
        self.body.grounded = false;
        self.jump.is_jumping = true;
        self.jump.jump_released = false;
    }

    fn ground_jump(&mut self, config: &GameConfig) {
        let max_jumps = config.character(self.character).max_jumps;
        self.launch(config.movement.jump_velocity);
        self.jump.jumps_remaining = max_jumps.saturating_sub(1);
        self.jump.coyote_timer = 0.0;
        self.jump.buffer_timer = 0.0;
    }

    /// Handle a jump press.
    ///
    /// Grounded (or within coyote time) fires a ground jump. Airborne
    /// double-jumpers with jumps left fire an air jump. Anything else arms
    /// the jump buffer. Returns whether a jump fired now.
    pub fn jump(&mut self, config: &GameConfig, events: &mut ActorEvents) -> bool {
        if self.dead {
            return false;
        }
        let stats = config.character(self.character);
        if self.body.grounded || self.jump.coyote_timer > 0.0 {
            self.ground_jump(config);
            events.push(SimEvent::Jumped);
            true
        } else if stats.can_air_jump() && self.jump.jumps_remaining > 0 {
            self.launch(config.movement.jump_velocity);
            self.jump.jumps_remaining -= 1;
            events.push(SimEvent::AirJumped);
            true
        } else {
            self.jump.buffer_timer = config.movement.jump_buffer;
            self.jump.jump_released = false;
            false
        }
    }

    /// Cut upward velocity when jump is released during the ascent. At most once per jump.
    pub fn release_jump(&mut self, config: &GameConfig) {
        self.jump.jump_released = true;
        if self.jump.is_jumping && self.body.vel.y < 0.0 {
            self.body.vel.y *= config.movement.jump_cut;
            self.jump.is_jumping = false;
        }
    }

    pub fn try_dash(&mut self, dir: f32, config: &GameConfig, events: &mut ActorEvents) -> bool {
        if self.dead || self.dash.dashing || self.dash.cooldown > 0.0 {
            return false;
        }
        let facing = Facing::from_sign(dir).unwrap_or(self.facing);
        self.facing = facing;
        self.dash = DashState {
            dashing: true,
            timer: config.dash.duration,
            cooldown: 0.0,
            direction: facing.sign(),
        };
        events.push(SimEvent::Dashed);
        true
    }

    pub fn try_attack(&mut self, config: &GameConfig, events: &mut ActorEvents) -> bool {
        if self.dead || self.attack_cooldown > 0.0 {
            return false;
        }
        self.attack_cooldown = config.combat.attack_cooldown;
        self.attack_timer = config.combat.attack_duration;
        self.pending_attack = true;
        events.push(SimEvent::Attacked);
        true
    }

    /// Hitbox of an attack: `attack_reach` wide, in front of the actor.
    pub fn attack_hitbox(&self, config: &GameConfig) -> Aabb {
        let reach = config.combat.attack_reach;
        let x = match self.facing {
            Facing::Right => self.body.pos.x + self.body.size.x,
            Facing::Left => self.body.pos.x - reach,
        };
        Aabb::new(
            Vec2::new(x, self.body.pos.y),
            Vec2::new(reach, self.body.size.y),
        )
    }

    /// Consume the attack started this frame, if any, returning its hitbox.
    pub fn take_pending_attack(&mut self, config: &GameConfig) -> Option<Aabb> {
        if !self.pending_attack {
            return None;
        }
        self.pending_attack = false;
        if self.dead {
            return None;
        }
        Some(self.attack_hitbox(config))
    }

    pub fn try_ability(&mut self, config: &GameConfig, events: &mut ActorEvents) -> bool {
        if self.dead || !self.ability.ready() {
            return false;
        }
        let ability = self.character.ability();
        let effect = match ability {
            Ability::KineticWave => AbilityEffect::KineticWave,
            Ability::Hack => AbilityEffect::Hack {
                window: config.ability.hack_duration,
            },
            Ability::Berserk => AbilityEffect::Berserk {
                remaining: config.ability.berserk_duration,
                heal_accumulator: 0.0,
            },
        };
        let cooldown = config.character(self.character).ability_cooldown;
        self.ability
            .activate(cooldown, config.ability.active_duration, effect);
        events.push(SimEvent::AbilityActivated { ability });
        true
    }

    /// Launch point and direction of a kinetic wave.
    pub fn wave_origin(&self) -> (Vec2, Vec2) {
        (self.body.center(), Vec2::new(self.facing.sign(), 0.0))
    }

    pub fn take_damage(&mut self, amount: i32, config: &GameConfig) -> DamageOutcome {
        if self.dead || self.is_invincible() || amount <= 0 {
            return DamageOutcome::Ignored;
        }
        self.health = (self.health - amount).max(0);
        self.invincible_timer = config.combat.invincibility;
        if self.health == 0 {
            self.die(config);
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Restore health up to `max_health`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.dead || amount <= 0 {
            return 0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Kill the actor regardless of invincibility. Returns `false` if already dead.
    pub fn kill(&mut self, config: &GameConfig) -> bool {
        if self.dead {
            return false;
        }
        self.die(config);
        true
    }

    fn die(&mut self, config: &GameConfig) {
        self.health = 0;
        self.dead = true;
        self.body.halt();
        self.dash.dashing = false;
        self.respawn_timer = config.combat.respawn_delay;
    }

    /// Full reset of transient state at the spawn point.
    pub fn respawn(&mut self, config: &GameConfig) {
        let max_jumps = config.character(self.character).max_jumps;
        self.body = KinematicBody::new(self.spawn_point, self.body.size);
        self.health = self.max_health;
        self.invincible_timer = 0.0;
        self.dead = false;
        self.respawn_timer = 0.0;
        self.facing = Facing::default();
        self.jump = JumpState::fresh(max_jumps);
        self.dash = DashState::default();
        self.ability = AbilityState::default();
        self.attack_cooldown = 0.0;
        self.attack_timer = 0.0;
        self.pending_attack = false;
    }

    /// Bounce off an enemy after a stomp.
    pub fn bounce(&mut self, velocity: f32, config: &GameConfig) {
        let max_jumps = config.character(self.character).max_jumps;
        self.body.vel.y = velocity;
        self.body.grounded = false;
        self.jump.is_jumping = false;
        self.jump.coyote_timer = 0.0;
        self.jump.jumps_remaining = max_jumps.saturating_sub(1);
    }

    /// Start a collision pass. Returns the grounded flag from before the pass.
    pub fn begin_ground_pass(&mut self) -> bool {
        let was_grounded = self.body.grounded;
        self.body.grounded = false;
        was_grounded
    }

    /// Apply grounding transitions after the collision pass.
    ///
    /// Landing restores the jump budget and fires a pending buffered jump,
    /// already cut if the button was released before touching down.
    /// Walking off a ledge opens the coyote window.
    pub fn finish_ground_pass(&mut self, was_grounded: bool, config: &GameConfig) -> ActorEvents {
        let mut events = ActorEvents::new();
        if self.dead {
            return events;
        }
        match (was_grounded, self.body.grounded) {
            (false, true) => {
                let max_jumps = config.character(self.character).max_jumps;
                self.jump.jumps_remaining = max_jumps;
                self.jump.is_jumping = false;
                self.jump.coyote_timer = 0.0;
                events.push(SimEvent::Landed);
                if self.jump.buffer_timer > 0.0 {
                    let released = self.jump.jump_released;
                    self.ground_jump(config);
                    // Button already let go: the jump starts cut.
                    if released {
                        self.release_jump(config);
                    }
                    events.push(SimEvent::Jumped);
                }
            }
            (true, false) => {
                self.jump.coyote_timer = config.movement.coyote_time;
            }
            _ => {}
        }
        events
    }
}
