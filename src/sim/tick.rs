//! Fixed-timestep tick: wave spawning, entity updates and the ordered
//! collision/interaction pass
//!
//! The order below is load-bearing for determinism: a single player bullet
//! kills at most one enemy per tick, and an enemy registers at most one
//! hit source per tick (ramming the player, or one bullet, never both).

use rand_pcg::Pcg32;

use super::level::Level;
use super::state::{Collectible, GameEvent, Player, TickInput};

/// Advance one level by one fixed timestep
pub fn tick(
    level: &mut Level,
    player: &mut Player,
    input: &TickInput,
    dt: f32,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    level.time += dt;
    let now = level.time;

    // Wave timer first, so a due batch joins this tick's update
    if level.wave_timer.fired(now) {
        level.next_wave(now, rng);
    }

    // Player motion and fire
    player.update(input, now, &mut level.player_bullets, events);

    // Player vs enemy bullets: the first overlapping bullet lands
    if let Some(bullet) = level
        .enemy_bullets
        .iter_mut()
        .find(|b| b.alive && b.rect.intersects(&player.rect))
    {
        bullet.alive = false;
        player.hit(now, events);
    }

    // Player vs collectibles: the first overlapping pickup applies
    if let Some(pickup) = level
        .collectibles
        .iter_mut()
        .find(|c| c.alive && c.rect.intersects(&player.rect))
    {
        pickup.alive = false;
        pickup.apply(player, events);
    }

    // Enemy updates and their collisions. Drops are admitted after the
    // loop so the cap sees them in kill order.
    let mut drops: Vec<Collectible> = Vec::new();
    {
        let Level {
            enemies,
            enemy_bullets,
            player_bullets,
            ..
        } = level;

        for enemy in enemies.iter_mut() {
            if !enemy.alive {
                continue;
            }
            enemy.update(now, dt, player.rect.center, rng, enemy_bullets, events);

            // Ramming the player kills the enemy outright and costs the
            // player a hit; no bullet check for this enemy this tick
            if enemy.rect.intersects(&player.rect) {
                let remaining = enemy.lives;
                let (score, drop) = enemy.hit(remaining, now, rng, events);
                player.score += score;
                player.hit(now, events);
                drops.extend(drop);
                continue;
            }

            if let Some(bullet) = player_bullets
                .iter_mut()
                .find(|b| b.alive && b.rect.intersects(&enemy.rect))
            {
                let (score, drop) = enemy.hit(bullet.damage(), now, rng, events);
                player.score += score;
                drops.extend(drop);
                bullet.alive = false;
            }
        }
    }
    for drop in drops {
        level.add_collectible(drop);
    }

    // Projectile and pickup motion, with off-field culling
    for bullet in &mut level.player_bullets {
        bullet.update(dt);
    }
    for bullet in &mut level.enemy_bullets {
        bullet.update(dt);
    }
    for pickup in &mut level.collectibles {
        pickup.update(dt);
    }

    // Deferred removal: nothing is dropped mid-iteration
    level.enemies.retain(|e| e.alive);
    level.player_bullets.retain(|b| b.alive);
    level.enemy_bullets.retain(|b| b.alive);
    level.collectibles.retain(|c| c.alive);

    if level.cleared() {
        events.push(GameEvent::LevelCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::enemy::Enemy;
    use crate::sim::level::SpawnRecord;
    use crate::sim::state::{Bullet, BulletKind, CollectibleKind};
    use glam::Vec2;
    use rand::SeedableRng;

    struct Fixture {
        level: Level,
        player: Player,
        rng: Pcg32,
        events: Vec<GameEvent>,
    }

    impl Fixture {
        fn new(level: Level) -> Self {
            Self {
                level,
                player: Player::new(),
                rng: Pcg32::seed_from_u64(99),
                events: Vec::new(),
            }
        }

        fn run(&mut self, ticks: u32, input: &TickInput) {
            for _ in 0..ticks {
                tick(
                    &mut self.level,
                    &mut self.player,
                    input,
                    SIM_DT,
                    &mut self.rng,
                    &mut self.events,
                );
            }
        }
    }

    fn idle_input() -> TickInput {
        TickInput {
            pointer_x: FIELD_WIDTH / 2.0,
            fire: false,
        }
    }

    fn seconds(s: f32) -> u32 {
        (s / SIM_DT).ceil() as u32
    }

    #[test]
    fn scheduled_waves_spawn_on_time() {
        let mut level = Level::new(1, "t", "t", 0);
        level.schedule(3.0, SpawnRecord::Parasite { x: 100.0, y: 50.0, dir: 1.0 });
        level.schedule(3.0, SpawnRecord::Parasite { x: 200.0, y: 50.0, dir: 1.0 });
        level.schedule(6.0, SpawnRecord::FlooderDown { x: 300.0, y: 50.0 });
        let mut fx = Fixture::new(level);
        fx.level.start(&mut fx.player);

        fx.run(seconds(2.9), &idle_input());
        assert!(fx.level.enemies.is_empty());
        fx.run(seconds(0.2), &idle_input());
        assert_eq!(fx.level.enemies.len(), 2);
        fx.run(seconds(3.0), &idle_input());
        assert_eq!(fx.level.enemies.len(), 3);
    }

    #[test]
    fn lone_parasite_killed_clears_the_level_next_tick() {
        let mut level = Level::new(1, "t", "t", 0);
        level.schedule(0.0, SpawnRecord::Parasite { x: 100.0, y: 50.0, dir: 1.0 });
        let mut fx = Fixture::new(level);
        fx.level.start(&mut fx.player);
        fx.run(1, &idle_input());
        assert_eq!(fx.level.enemies.len(), 1);

        // Two light hits empty its two lives; collision happens through the
        // normal bullet pass
        for _ in 0..PARASITE_LIVES {
            let target = fx.level.enemies[0].rect.center;
            fx.level
                .player_bullets
                .push(Bullet::up(BulletKind::Light, target));
            fx.run(1, &idle_input());
        }
        assert!(fx.level.enemies.is_empty());
        assert_eq!(fx.player.score, PARASITE_SCORE_KILL);

        // Any drop keeps the level open until it despawns or is collected
        fx.run(seconds(10.0), &idle_input());
        assert!(fx.events.contains(&GameEvent::LevelCleared));
    }

    #[test]
    fn one_bullet_damages_at_most_one_enemy() {
        let mut level = Level::new(1, "t", "t", 0);
        level.schedule(0.0, SpawnRecord::Gear { x: 100.0, y: 50.0, dir: 1.0 });
        let mut fx = Fixture::new(level);
        fx.level.start(&mut fx.player);
        fx.run(1, &idle_input());

        // Two gears stacked on the same spot; one bullet between them
        let clone_spot = fx.level.enemies[0].rect.center;
        let mut twin = Enemy::gear(Vec2::new(clone_spot.x, 50.0), 1.0, fx.level.time);
        twin.rect = fx.level.enemies[0].rect;
        fx.level.enemies.push(twin);

        fx.level
            .player_bullets
            .push(Bullet::up(BulletKind::Light, clone_spot));
        fx.run(1, &idle_input());

        let total_damage: i32 = fx
            .level
            .enemies
            .iter()
            .map(|e| GEAR_LIVES - e.lives)
            .sum();
        assert_eq!(total_damage, BULLET_LIGHT_DAMAGE);
    }

    #[test]
    fn ramming_enemy_dies_and_costs_the_player_one_hit() {
        let mut level = Level::new(1, "t", "t", 0);
        level.schedule(0.0, SpawnRecord::Parasite { x: 270.0, y: 50.0, dir: 1.0 });
        let mut fx = Fixture::new(level);
        fx.level.start(&mut fx.player);
        // Let the entrance finish, then park the parasite on the ship
        fx.run(seconds(1.0), &idle_input());
        fx.level.enemies[0].rect.center = fx.player.rect.center;
        // And a player bullet on the same spot: the overlap branch must win
        fx.level
            .player_bullets
            .push(Bullet::up(BulletKind::Light, fx.player.rect.center));
        let lives_before = fx.player.lives;
        fx.run(1, &idle_input());

        assert!(fx.level.enemies.is_empty());
        assert_eq!(fx.player.lives, lives_before - 1);
        assert_eq!(fx.player.score, PARASITE_SCORE_KILL);
        // The planted bullet was not consumed by the dead enemy
        assert_eq!(fx.level.player_bullets.len(), 1);
    }

    #[test]
    fn enemy_bullet_hits_the_player_and_dies() {
        let mut level = Level::new(1, "t", "t", 0);
        level.schedule(0.0, SpawnRecord::Parasite { x: 100.0, y: 50.0, dir: 1.0 });
        let mut fx = Fixture::new(level);
        fx.level.start(&mut fx.player);
        fx.run(1, &idle_input());

        fx.level
            .enemy_bullets
            .push(Bullet::down(BulletKind::Light, fx.player.rect.center));
        fx.level
            .enemy_bullets
            .push(Bullet::down(BulletKind::Light, fx.player.rect.center));
        let lives_before = fx.player.lives;
        fx.run(1, &idle_input());

        // Only the first bullet lands; the second survives the tick
        assert_eq!(fx.player.lives, lives_before - 1);
        assert_eq!(fx.level.enemy_bullets.len(), 1);
    }

    #[test]
    fn pickup_applies_once_and_despawns() {
        let mut level = Level::new(2, "t", "t", 1);
        level.schedule(0.0, SpawnRecord::Parasite { x: 100.0, y: 50.0, dir: 1.0 });
        let mut fx = Fixture::new(level);
        fx.level.start(&mut fx.player);
        fx.level.add_collectible(Collectible::new(
            CollectibleKind::ExtraScore,
            fx.player.rect.center,
        ));
        fx.run(1, &idle_input());
        assert_eq!(fx.player.score, EXTRA_SCORE_BONUS);
        assert!(fx.level.collectibles.is_empty());
    }
}
