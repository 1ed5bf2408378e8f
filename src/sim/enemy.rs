//! Enemy archetypes: a shared entrance/action state machine with
//! per-variant motion and firing policies

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Bullet, BulletKind, Collectible, CollectibleKind, GameEvent};
use crate::audio::SoundCue;
use crate::consts::*;

/// Two-phase enemy lifecycle: scripted descent, then variant behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    Entrance,
    /// Timestamp of the entrance→action transition; periodic motion is
    /// phased from it
    Action { since: f32 },
}

/// Plain archetype tag, used for score tables and audio routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyClass {
    Parasite,
    FlooderDown,
    FlooderU,
    Gear,
    Beast,
}

/// Per-variant state. `dir` fields hold ±1.
#[derive(Debug, Clone, Copy)]
pub enum EnemyKind {
    Parasite {
        dir: f32,
    },
    FlooderDown,
    FlooderU {
        dir: f32,
        /// Start of the current dwell-then-sweep leg
        leg_started: f32,
    },
    Gear {
        dir: f32,
        /// Two-frame sprite animation state; no rendering here
        frame: u8,
        frame_at: f32,
    },
    Beast {
        /// Anchor for both firing-window marks; re-armed each burst cycle
        window_at: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub lives: i32,
    pub alive: bool,
    score_kill: u32,
    /// Authored anchor: x is the final center, y the final top edge
    anchor: Vec2,
    /// Current gate between shots; Parasite re-rolls it after every shot
    fire_delay: f32,
    fire_at: f32,
    hit_at: f32,
    spawned_at: f32,
}

impl Enemy {
    fn base(
        kind: EnemyKind,
        anchor: Vec2,
        size: Vec2,
        fire_delay: f32,
        lives: i32,
        score_kill: u32,
        now: f32,
    ) -> Self {
        Self {
            rect: Rect::from_midbottom(Vec2::new(anchor.x, 0.0), size),
            kind,
            state: EnemyState::Entrance,
            lives,
            alive: true,
            score_kill,
            anchor,
            fire_delay,
            fire_at: now,
            hit_at: now - ENEMY_HIT_FLASH,
            spawned_at: now,
        }
    }

    pub fn parasite(anchor: Vec2, dir: f32, now: f32, rng: &mut Pcg32) -> Self {
        let mut enemy = Self::base(
            EnemyKind::Parasite { dir },
            anchor,
            PARASITE_SIZE,
            PARASITE_BASE_FIRE_DELAY,
            PARASITE_LIVES,
            PARASITE_SCORE_KILL,
            now,
        );
        enemy.fire_delay = PARASITE_BASE_FIRE_DELAY + rng.random::<f32>() * PARASITE_FIRE_JITTER;
        enemy
    }

    pub fn flooder_down(anchor: Vec2, now: f32) -> Self {
        Self::base(
            EnemyKind::FlooderDown,
            anchor,
            FLOODER_SIZE,
            FLOODER_DOWN_FIRE_DELAY,
            FLOODER_LIVES,
            FLOODER_SCORE_KILL,
            now,
        )
    }

    pub fn flooder_u(start_left: bool, now: f32) -> Self {
        let anchor = if start_left {
            Vec2::new(FLOODER_U_INSET, FLOODER_U_INSET)
        } else {
            Vec2::new(FIELD_WIDTH - FLOODER_U_INSET, FLOODER_U_INSET)
        };
        Self::base(
            EnemyKind::FlooderU {
                dir: if start_left { 1.0 } else { -1.0 },
                leg_started: now,
            },
            anchor,
            FLOODER_SIZE,
            FLOODER_DOWN_FIRE_DELAY,
            FLOODER_LIVES,
            FLOODER_SCORE_KILL,
            now,
        )
    }

    pub fn gear(anchor: Vec2, dir: f32, now: f32) -> Self {
        Self::base(
            EnemyKind::Gear {
                dir,
                frame: 0,
                frame_at: now,
            },
            anchor,
            GEAR_SIZE,
            GEAR_FIRE_DELAY,
            GEAR_LIVES,
            GEAR_SCORE_KILL,
            now,
        )
    }

    pub fn beast(anchor: Vec2, now: f32) -> Self {
        Self::base(
            EnemyKind::Beast { window_at: now },
            anchor,
            BEAST_SIZE,
            BEAST_FIRE_DELAY,
            BEAST_LIVES,
            BEAST_SCORE_KILL,
            now,
        )
    }

    pub fn class(&self) -> EnemyClass {
        match self.kind {
            EnemyKind::Parasite { .. } => EnemyClass::Parasite,
            EnemyKind::FlooderDown => EnemyClass::FlooderDown,
            EnemyKind::FlooderU { .. } => EnemyClass::FlooderU,
            EnemyKind::Gear { .. } => EnemyClass::Gear,
            EnemyKind::Beast { .. } => EnemyClass::Beast,
        }
    }

    /// Hit flash predicate for the renderer
    pub fn hit_flashing(&self, now: f32) -> bool {
        now - self.hit_at < ENEMY_HIT_FLASH
    }

    /// Shared phase handling: descend from above the field to the authored
    /// anchor, then act. Off-field culling only applies once in action,
    /// since an entering enemy legitimately hangs above the top edge.
    fn advance_entrance(&mut self, now: f32, dt: f32) {
        match self.state {
            EnemyState::Entrance => {
                self.rect.center.y += ENEMY_ENTRANCE_SPEED * dt;
                if self.rect.top() >= self.anchor.y {
                    self.rect.set_top(self.anchor.y);
                    self.state = EnemyState::Action { since: now };
                }
            }
            EnemyState::Action { .. } => {
                if self.rect.off_field() {
                    self.alive = false;
                }
            }
        }
    }

    /// Advance one tick: entrance/action motion, then the variant's firing
    /// policy. New bullets are appended to `bullets`.
    pub fn update(
        &mut self,
        now: f32,
        dt: f32,
        player_center: Vec2,
        rng: &mut Pcg32,
        bullets: &mut Vec<Bullet>,
        events: &mut Vec<GameEvent>,
    ) {
        self.advance_entrance(now, dt);
        let action_since = match self.state {
            EnemyState::Action { since } => Some(since),
            EnemyState::Entrance => None,
        };

        match &mut self.kind {
            EnemyKind::Parasite { dir } => {
                if action_since.is_some() {
                    self.rect.center.y += PARASITE_DOWN_SPEED * dt;
                    bounce_horizontal(&mut self.rect, dir, PARASITE_SPEED * dt);
                }
                if now - self.fire_at >= self.fire_delay {
                    bullets.push(Bullet::down(BulletKind::Light, self.rect.midbottom()));
                    self.fire_at = now;
                    self.fire_delay =
                        PARASITE_BASE_FIRE_DELAY + rng.random::<f32>() * PARASITE_FIRE_JITTER;
                    events.push(GameEvent::Sound(SoundCue::EnemyBullet(EnemyClass::Parasite)));
                }
            }

            EnemyKind::FlooderDown => {
                let elapsed = now - self.spawned_at;
                let in_window =
                    elapsed >= FLOODER_DOWN_FIRE_START && elapsed < FLOODER_DOWN_FIRE_STOP;
                // Move takes priority over the firing window once its
                // deadline passes
                if elapsed >= FLOODER_DOWN_MOVE_TIME {
                    self.rect.center.y += FLOODER_SPEED * dt;
                } else if in_window && now - self.fire_at >= self.fire_delay {
                    bullets.push(Bullet::down(BulletKind::Light, self.rect.midbottom()));
                    self.fire_at = now;
                    events.push(GameEvent::Sound(SoundCue::EnemyBullet(
                        EnemyClass::FlooderDown,
                    )));
                }
            }

            EnemyKind::FlooderU { dir, leg_started } => {
                if action_since.is_some() && now - *leg_started >= FLOODER_U_MOVE_TIME {
                    self.rect.center.x += *dir * FLOODER_U_SPEED * dt;
                    let inset = FLOODER_U_INSET;
                    let span = FIELD_WIDTH - 2.0 * inset;
                    // Downward-opening parabola through both anchors; the
                    // sweep traces a U across the field
                    let u = 2.0 * (self.rect.center.x - inset) / span - 1.0;
                    self.rect
                        .set_top(FIELD_HEIGHT - inset - (FIELD_HEIGHT - 2.0 * inset) * u * u);
                    if *dir > 0.0 && self.rect.center.x > FIELD_WIDTH - inset {
                        self.rect.center.x = FIELD_WIDTH - inset;
                        self.rect.set_top(inset);
                        *dir = -1.0;
                        *leg_started = now;
                    } else if *dir < 0.0 && self.rect.center.x < inset {
                        self.rect.center.x = inset;
                        self.rect.set_top(inset);
                        *dir = 1.0;
                        *leg_started = now;
                    }
                }
                // Never fires
            }

            EnemyKind::Gear { dir, frame, frame_at } => {
                if let Some(since) = action_since {
                    let t = now - since;
                    self.rect
                        .set_top(self.anchor.y + GEAR_WAVE_AMP * (GEAR_WAVE_FREQ * t).sin());
                    bounce_horizontal(&mut self.rect, dir, GEAR_SPEED * dt);
                }
                if now - *frame_at >= GEAR_FRAME_DURATION {
                    *frame = (*frame + 1) % 2;
                    *frame_at = now;
                }
                if now - self.fire_at >= self.fire_delay {
                    // Full radial ring, all at once
                    for i in 0..GEAR_RING_BULLETS {
                        let angle = (i as f32 / GEAR_RING_BULLETS as f32) * TAU;
                        bullets.push(Bullet::new(
                            BulletKind::Heavy,
                            self.rect.center,
                            Vec2::new(angle.cos(), angle.sin()),
                        ));
                    }
                    self.fire_at = now;
                    events.push(GameEvent::Sound(SoundCue::EnemyBullet(EnemyClass::Gear)));
                }
            }

            EnemyKind::Beast { window_at } => {
                if let Some(since) = action_since {
                    let phase = BEAST_ORBIT_FREQ * (now - since) * TAU;
                    self.rect.center.x = self.anchor.x + BEAST_ORBIT_AMP * phase.sin();
                    self.rect
                        .set_top(self.anchor.y + BEAST_ORBIT_AMP - BEAST_ORBIT_AMP * phase.cos());
                }
                if now - *window_at >= BEAST_FIRE_START {
                    if now - self.fire_at >= self.fire_delay {
                        // Two aimed bullets, symmetric about the mouth
                        let mouth = self.rect.midbottom();
                        for offset in [-BEAST_BULLET_SEPARATION, BEAST_BULLET_SEPARATION] {
                            let muzzle = mouth + Vec2::new(offset, 0.0);
                            bullets.push(Bullet::new(
                                BulletKind::Heavy,
                                muzzle,
                                player_center - muzzle,
                            ));
                        }
                        self.fire_at = now;
                        events.push(GameEvent::Sound(SoundCue::EnemyBullet(EnemyClass::Beast)));
                    }
                    if now - *window_at >= BEAST_FIRE_STOP {
                        *window_at = now;
                    }
                }
            }
        }
    }

    /// Apply damage. A lethal hit rolls the two-stage drop, emits the death
    /// cue, marks the enemy dead and returns the kill score plus the drop,
    /// all in this one call; a surviving hit only restarts the hit flash.
    pub fn hit(
        &mut self,
        damage: i32,
        now: f32,
        rng: &mut Pcg32,
        events: &mut Vec<GameEvent>,
    ) -> (u32, Option<Collectible>) {
        self.lives -= damage;
        self.hit_at = now;
        if self.lives <= 0 {
            let drop = if rng.random::<f32>() < DROP_PROBABILITY {
                let kind = if rng.random::<f32>() < POWER_UP_PROBABILITY {
                    CollectibleKind::PowerUp
                } else {
                    CollectibleKind::ExtraScore
                };
                Some(Collectible::new(kind, self.rect.center))
            } else {
                None
            };
            events.push(GameEvent::Sound(SoundCue::EnemyDeath));
            self.alive = false;
            (self.score_kill, drop)
        } else {
            (0, None)
        }
    }
}

/// Slide horizontally, reversing `dir` on playfield edge contact
fn bounce_horizontal(rect: &mut Rect, dir: &mut f32, step: f32) {
    if *dir > 0.0 {
        rect.center.x += step;
        if rect.right() > FIELD_WIDTH {
            rect.set_right(FIELD_WIDTH);
            *dir = -1.0;
        }
    } else {
        rect.center.x -= step;
        if rect.left() < 0.0 {
            rect.set_left(0.0);
            *dir = 1.0;
        }
    }
}
