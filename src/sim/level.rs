//! Levels: wave scheduling, entity containers and lifecycle

use std::collections::{BTreeMap, VecDeque};

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::{Bullet, Collectible, CollectibleKind, Player};

/// One authored enemy spawn: variant tag, anchor, and the optional
/// initial direction where the variant takes one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnRecord {
    Parasite { x: f32, y: f32, dir: f32 },
    FlooderDown { x: f32, y: f32 },
    FlooderU { start_left: bool },
    Gear { x: f32, y: f32, dir: f32 },
    Beast { x: f32, y: f32 },
}

impl SpawnRecord {
    fn instantiate(&self, now: f32, rng: &mut Pcg32) -> Enemy {
        match *self {
            SpawnRecord::Parasite { x, y, dir } => Enemy::parasite(Vec2::new(x, y), dir, now, rng),
            SpawnRecord::FlooderDown { x, y } => Enemy::flooder_down(Vec2::new(x, y), now),
            SpawnRecord::FlooderU { start_left } => Enemy::flooder_u(start_left, now),
            SpawnRecord::Gear { x, y, dir } => Enemy::gear(Vec2::new(x, y), dir, now),
            SpawnRecord::Beast { x, y } => Enemy::beast(Vec2::new(x, y), now),
        }
    }
}

/// One-shot deferred timer driving the wave scheduler. Always encodes a
/// delta from the previous firing, never an absolute offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveTimer {
    deadline: Option<f32>,
}

impl WaveTimer {
    pub fn arm(&mut self, now: f32, delay: f32) {
        self.deadline = Some(now + delay);
    }

    /// Safe to call when not armed
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn fired(&self, now: f32) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    #[cfg(test)]
    pub(crate) fn deadline(&self) -> Option<f32> {
        self.deadline
    }
}

/// A scripted level: the immutable wave schedule plus all runtime
/// containers, which live and die with the level.
#[derive(Debug)]
pub struct Level {
    pub number: u32,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Keyed by spawn time in whole milliseconds so same-timestamp spawns
    /// aggregate into a single batch
    schedule: BTreeMap<u32, Vec<SpawnRecord>>,
    /// Remaining batches, earliest first; rebuilt from the schedule on start
    stack: VecDeque<(f32, Vec<SpawnRecord>)>,
    pub(crate) wave_timer: WaveTimer,
    /// Level-local clock, seconds since start
    pub time: f32,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub collectibles: Vec<Collectible>,
    power_ups_in_play: u32,
    max_power_ups: u32,
}

impl Level {
    pub fn new(
        number: u32,
        title: &'static str,
        subtitle: &'static str,
        max_power_ups: u32,
    ) -> Self {
        Self {
            number,
            title,
            subtitle,
            schedule: BTreeMap::new(),
            stack: VecDeque::new(),
            wave_timer: WaveTimer::default(),
            time: 0.0,
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            collectibles: Vec::new(),
            power_ups_in_play: 0,
            max_power_ups,
        }
    }

    /// Author one spawn at `time` seconds after level start
    pub fn schedule(&mut self, time: f32, record: SpawnRecord) {
        let key = (time * 1000.0).round() as u32;
        self.schedule.entry(key).or_default().push(record);
    }

    /// Read-only view of the authored schedule, batches in time order
    pub fn schedule_entries(&self) -> impl Iterator<Item = (f32, &[SpawnRecord])> {
        self.schedule
            .iter()
            .map(|(ms, batch)| (*ms as f32 / 1000.0, batch.as_slice()))
    }

    /// Reset runtime state, prime the wave stack and arm the first timer
    pub fn start(&mut self, player: &mut Player) {
        assert!(
            !self.schedule.is_empty(),
            "cannot start a level with an empty wave schedule"
        );
        self.time = 0.0;
        self.power_ups_in_play = 0;
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.collectibles.clear();
        player.prepare_for_level();
        self.stack = self
            .schedule
            .iter()
            .map(|(ms, batch)| (*ms as f32 / 1000.0, batch.clone()))
            .collect();
        let first = self.stack[0].0;
        self.wave_timer.arm(0.0, first);
        log::info!("level {} start: {} waves queued", self.number, self.stack.len());
    }

    /// Spawn the earliest batch and re-arm the timer for the delta to the
    /// next batch, if any remains
    pub(crate) fn next_wave(&mut self, now: f32, rng: &mut Pcg32) {
        let Some((fired_at, batch)) = self.stack.pop_front() else {
            return;
        };
        log::debug!(
            "level {}: wave of {} at t={:.2}",
            self.number,
            batch.len(),
            fired_at
        );
        for record in &batch {
            self.enemies.push(record.instantiate(now, rng));
        }
        if let Some((next_at, _)) = self.stack.front() {
            self.wave_timer.arm(now, next_at - fired_at);
        } else {
            self.wave_timer.cancel();
        }
    }

    /// Admit a drop, enforcing the per-level power-up cap. A rejected
    /// power-up is destroyed without ever being applied.
    pub fn add_collectible(&mut self, collectible: Collectible) {
        if collectible.kind == CollectibleKind::PowerUp {
            if self.power_ups_in_play == self.max_power_ups {
                log::debug!("level {}: power-up rejected, cap reached", self.number);
                return;
            }
            self.power_ups_in_play += 1;
        }
        self.collectibles.push(collectible);
    }

    /// Empty every runtime container and cancel the pending wave timer
    pub fn clear(&mut self) {
        self.wave_timer.cancel();
        self.stack.clear();
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.collectibles.clear();
        self.power_ups_in_play = 0;
    }

    /// Nothing left to spawn, fight or collect
    pub fn cleared(&self) -> bool {
        self.stack.is_empty() && self.enemies.is_empty() && self.collectibles.is_empty()
    }
}
