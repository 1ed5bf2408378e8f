//! Player, projectiles, collectibles and the per-tick event stream

use glam::Vec2;

use super::rect::Rect;
use crate::audio::SoundCue;
use crate::consts::*;

/// Input sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer x position, clamped again to the playfield internally
    pub pointer_x: f32,
    /// Primary action held
    pub fire: bool,
}

/// Side effects a tick emits for the surrounding screen layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    LevelCleared,
    PlayerDestroyed,
}

/// Bullet classes; the class fixes speed, damage and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    Light,
    Heavy,
}

impl BulletKind {
    pub fn speed(&self) -> f32 {
        match self {
            BulletKind::Light => BULLET_LIGHT_SPEED,
            BulletKind::Heavy => BULLET_HEAVY_SPEED,
        }
    }

    pub fn damage(&self) -> i32 {
        match self {
            BulletKind::Light => BULLET_LIGHT_DAMAGE,
            BulletKind::Heavy => BULLET_HEAVY_DAMAGE,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            BulletKind::Light => BULLET_LIGHT_SIZE,
            BulletKind::Heavy => BULLET_HEAVY_SIZE,
        }
    }
}

/// A straight-line projectile. Which side owns it is decided by the
/// container it lives in, not by a field.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub rect: Rect,
    pub kind: BulletKind,
    /// Unit travel direction, never zero
    pub dir: Vec2,
    pub alive: bool,
}

impl Bullet {
    pub fn new(kind: BulletKind, center: Vec2, dir: Vec2) -> Self {
        assert!(dir != Vec2::ZERO, "bullet direction cannot be zero");
        Self {
            rect: Rect::new(center, kind.size()),
            kind,
            dir: dir.normalize(),
            alive: true,
        }
    }

    pub fn up(kind: BulletKind, center: Vec2) -> Self {
        Self::new(kind, center, Vec2::new(0.0, -1.0))
    }

    pub fn down(kind: BulletKind, center: Vec2) -> Self {
        Self::new(kind, center, Vec2::new(0.0, 1.0))
    }

    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.center += self.dir * self.kind.speed() * dt;
        if self.rect.off_field() {
            self.alive = false;
        }
    }
}

/// Collectible variants dropped by dying enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    ExtraScore,
    PowerUp,
}

impl CollectibleKind {
    pub fn score_bonus(&self) -> u32 {
        match self {
            CollectibleKind::ExtraScore => EXTRA_SCORE_BONUS,
            CollectibleKind::PowerUp => POWER_UP_BONUS,
        }
    }
}

/// A pickup drifting straight down until collected or off-field
#[derive(Debug, Clone)]
pub struct Collectible {
    pub rect: Rect,
    pub kind: CollectibleKind,
    pub alive: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, center: Vec2) -> Self {
        Self {
            rect: Rect::new(center, COLLECTIBLE_SIZE),
            kind,
            alive: true,
        }
    }

    /// Apply the pickup to the player. Called exactly once, on contact.
    pub fn apply(&self, player: &mut Player, events: &mut Vec<GameEvent>) {
        player.score += self.kind.score_bonus();
        match self.kind {
            CollectibleKind::ExtraScore => {
                events.push(GameEvent::Sound(SoundCue::ExtraScore));
            }
            CollectibleKind::PowerUp => {
                if player.tier == MAX_BULLET_TIER {
                    player.lives += 1;
                } else {
                    player.tier += 1;
                }
                events.push(GameEvent::Sound(SoundCue::PowerUp));
            }
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.center.y += COLLECTIBLE_SPEED * dt;
        if self.rect.off_field() {
            self.alive = false;
        }
    }
}

/// The player ship. One instance for the whole run, owned by the game
/// orchestrator and lent to each level.
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub lives: i32,
    pub score: u32,
    /// Current firepower, 0..=MAX_BULLET_TIER
    pub tier: u8,
    fire_at: f32,
    hit_at: f32,
}

impl Player {
    pub fn new() -> Self {
        let mut player = Self {
            rect: Rect::new(Vec2::ZERO, PLAYER_SIZE),
            lives: PLAYER_LIVES,
            score: 0,
            tier: 0,
            fire_at: 0.0,
            hit_at: 0.0,
        };
        player.prepare_for_level();
        player
    }

    /// Recenter the ship and re-arm the timers for a level-local clock
    /// starting at zero. The fire timer starts armed so the ship cannot
    /// shoot on the very first frame.
    pub fn prepare_for_level(&mut self) {
        self.rect = Rect::from_midbottom(
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_BOTTOM_MARGIN),
            PLAYER_SIZE,
        );
        self.fire_at = 0.0;
        self.hit_at = -PLAYER_HIT_DURATION;
    }

    /// Track the pointer and fire when the cooldown allows. New bullets are
    /// appended to `bullets`.
    pub fn update(
        &mut self,
        input: &TickInput,
        now: f32,
        bullets: &mut Vec<Bullet>,
        events: &mut Vec<GameEvent>,
    ) {
        self.rect.center.x = input.pointer_x;
        if self.rect.right() > FIELD_WIDTH {
            self.rect.set_right(FIELD_WIDTH);
        } else if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }

        if input.fire && now - self.fire_at >= PLAYER_FIRE_DELAY {
            let nose = Vec2::new(self.rect.center.x, self.rect.top());
            match self.tier {
                0 => bullets.push(Bullet::up(BulletKind::Light, nose)),
                1 => bullets.push(Bullet::up(BulletKind::Heavy, nose)),
                _ => {
                    let spread = Vec2::new(BULLET_FAN_SPREAD, 0.0);
                    bullets.push(Bullet::up(BulletKind::Light, nose - spread));
                    bullets.push(Bullet::up(BulletKind::Heavy, nose));
                    bullets.push(Bullet::up(BulletKind::Light, nose + spread));
                }
            }
            events.push(GameEvent::Sound(SoundCue::PlayerBullet(self.tier)));
            self.fire_at = now;
        }
    }

    /// True while the post-hit invulnerability window is open; the renderer
    /// uses the same predicate for the hit flash.
    pub fn invulnerable(&self, now: f32) -> bool {
        now - self.hit_at < PLAYER_HIT_DURATION
    }

    /// Register a hit. No-op while invulnerable; otherwise costs a life,
    /// demotes the bullet tier one step and re-opens the window. Emits
    /// `PlayerDestroyed` exactly once, on the hit that spends the last life.
    pub fn hit(&mut self, now: f32, events: &mut Vec<GameEvent>) {
        if self.invulnerable(now) {
            return;
        }
        self.lives -= 1;
        if self.tier > 0 {
            self.tier -= 1;
        }
        self.hit_at = now;
        if self.lives == 0 {
            events.push(GameEvent::PlayerDestroyed);
        } else if self.lives > 0 {
            events.push(GameEvent::Sound(SoundCue::PlayerHit));
        }
    }

    /// Wipe run progress (on game over or full completion)
    pub fn reset(&mut self) {
        self.lives = PLAYER_LIVES;
        self.tier = 0;
        self.score = 0;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
