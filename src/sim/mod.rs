//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, passed in explicitly
//! - Stable iteration order (container order)
//! - No rendering or platform dependencies

pub mod enemy;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use enemy::{Enemy, EnemyClass, EnemyKind, EnemyState};
pub use level::{Level, SpawnRecord, WaveTimer};
pub use rect::Rect;
pub use state::{
    Bullet, BulletKind, Collectible, CollectibleKind, GameEvent, Player, TickInput,
};
pub use tick::tick;
