//! The authored campaign: static wave tables fed to the scheduler
//!
//! Pure content, no logic. Times are seconds from level start; positions
//! are anchors (center x, final top y) on the 540x480 playfield.

use crate::consts::FIELD_WIDTH;
use crate::sim::{Level, SpawnRecord};

const MID: f32 = FIELD_WIDTH / 2.0;

fn parasite(x: f32, y: f32, dir: f32) -> SpawnRecord {
    SpawnRecord::Parasite { x, y, dir }
}

fn flooder_down(x: f32, y: f32) -> SpawnRecord {
    SpawnRecord::FlooderDown { x, y }
}

fn flooder_u(start_left: bool) -> SpawnRecord {
    SpawnRecord::FlooderU { start_left }
}

fn gear(x: f32, y: f32, dir: f32) -> SpawnRecord {
    SpawnRecord::Gear { x, y, dir }
}

fn beast(x: f32, y: f32) -> SpawnRecord {
    SpawnRecord::Beast { x, y }
}

/// A symmetric row around the field middle: `per_side` parasites each way,
/// 30 px apart starting `first` px out, outer halves converging inward
fn parasite_row(level: &mut Level, time: f32, y: f32, per_side: u32, first: f32) {
    for i in 0..per_side {
        let dx = first + 30.0 * i as f32;
        level.schedule(time, parasite(MID - dx, y, -1.0));
        level.schedule(time, parasite(MID + dx, y, 1.0));
    }
}

/// Build the full campaign in play order
pub fn campaign() -> Vec<Level> {
    vec![level_one(), level_two(), level_three()]
}

fn level_one() -> Level {
    let mut lvl = Level::new(1, "LEVEL 1", "Where it all begins", 0);

    lvl.schedule(3.0, parasite(MID, 50.0, 1.0));
    lvl.schedule(3.0, parasite(MID + 30.0, 50.0, 1.0));
    lvl.schedule(3.0, parasite(MID - 30.0, 50.0, 1.0));

    // Two flanking columns folding in from the edges
    for i in 1..=3 {
        let inset = 30.0 * i as f32;
        lvl.schedule(6.0, parasite(FIELD_WIDTH - inset, 100.0, -1.0));
        lvl.schedule(6.0, parasite(inset, 100.0, 1.0));
    }

    parasite_row(&mut lvl, 10.0, 50.0, 4, 15.0);

    lvl.schedule(18.0, flooder_down(MID + 80.0, 50.0));
    lvl.schedule(18.0, flooder_down(MID - 80.0, 50.0));

    lvl.schedule(22.0, flooder_down(MID + 140.0, 80.0));
    lvl.schedule(22.0, flooder_down(MID - 140.0, 80.0));

    lvl.schedule(24.0, flooder_down(MID + 200.0, 100.0));
    lvl.schedule(24.0, flooder_down(MID, 100.0));
    lvl.schedule(24.0, flooder_down(MID - 200.0, 100.0));

    // The big push: three full rows at once
    parasite_row(&mut lvl, 26.0, 50.0, 5, 15.0);
    parasite_row(&mut lvl, 26.0, 100.0, 5, 15.0);
    parasite_row(&mut lvl, 26.0, 150.0, 5, 15.0);

    parasite_row(&mut lvl, 30.0, 200.0, 4, 15.0);

    lvl.schedule(35.0, flooder_down(MID + 40.0, 50.0));
    lvl.schedule(35.0, flooder_down(MID - 40.0, 50.0));

    lvl
}

fn level_two() -> Level {
    let mut lvl = Level::new(2, "LEVEL 2", "Tensions are rising", 1);

    parasite_row(&mut lvl, 3.0, 100.0, 3, 30.0);
    parasite_row(&mut lvl, 3.0, 150.0, 4, 30.0);
    parasite_row(&mut lvl, 5.0, 200.0, 5, 15.0);

    lvl.schedule(10.0, flooder_down(MID - 80.0, 100.0));
    lvl.schedule(10.0, flooder_down(MID - 240.0, 50.0));
    lvl.schedule(10.0, flooder_down(MID + 80.0, 100.0));
    lvl.schedule(10.0, flooder_down(MID + 240.0, 50.0));

    lvl.schedule(15.0, flooder_down(MID + 160.0, 100.0));
    lvl.schedule(15.0, flooder_down(MID, 100.0));
    lvl.schedule(15.0, flooder_down(MID - 160.0, 100.0));

    parasite_row(&mut lvl, 17.0, 50.0, 4, 30.0);

    parasite_row(&mut lvl, 20.0, 150.0, 4, 30.0);
    parasite_row(&mut lvl, 20.0, 200.0, 5, 15.0);

    lvl.schedule(25.0, flooder_u(false));

    parasite_row(&mut lvl, 33.0, 150.0, 4, 30.0);

    lvl.schedule(35.0, flooder_u(true));
    lvl.schedule(37.0, flooder_u(false));

    lvl.schedule(40.0, gear(50.0, 100.0, 1.0));

    parasite_row(&mut lvl, 44.0, 100.0, 3, 30.0);
    parasite_row(&mut lvl, 44.0, 150.0, 4, 30.0);

    parasite_row(&mut lvl, 46.0, 50.0, 4, 30.0);

    parasite_row(&mut lvl, 48.0, 200.0, 5, 15.0);

    lvl.schedule(49.0, gear(FIELD_WIDTH - 50.0, 100.0, -1.0));

    lvl
}

fn level_three() -> Level {
    let mut lvl = Level::new(3, "LEVEL 3", "The end is near", 3);

    parasite_row(&mut lvl, 3.0, 50.0, 5, 15.0);

    lvl.schedule(4.0, gear(50.0, 100.0, 1.0));
    lvl.schedule(5.0, gear(FIELD_WIDTH - 50.0, 100.0, -1.0));

    parasite_row(&mut lvl, 6.0, 150.0, 4, 30.0);

    lvl.schedule(8.0, flooder_down(MID - 80.0, 200.0));
    lvl.schedule(8.0, flooder_down(MID - 240.0, 200.0));
    lvl.schedule(8.0, flooder_down(MID + 80.0, 200.0));
    lvl.schedule(8.0, flooder_down(MID + 240.0, 200.0));

    parasite_row(&mut lvl, 9.0, 100.0, 5, 15.0);

    for i in 0..5 {
        lvl.schedule(13.0, flooder_down(MID + 240.0 - 120.0 * i as f32, 100.0));
    }

    lvl.schedule(22.0, beast(MID, 80.0));

    parasite_row(&mut lvl, 25.0, 50.0, 5, 15.0);

    lvl.schedule(30.0, flooder_u(false));

    parasite_row(&mut lvl, 40.0, 150.0, 5, 15.0);
    parasite_row(&mut lvl, 40.0, 100.0, 4, 30.0);

    lvl.schedule(50.0, beast(100.0, 50.0));
    lvl.schedule(50.0, beast(FIELD_WIDTH - 100.0, 50.0));

    parasite_row(&mut lvl, 55.0, 50.0, 5, 15.0);

    lvl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIELD_HEIGHT;
    use crate::sim::Player;

    #[test]
    fn campaign_has_three_levels_in_order() {
        let levels = campaign();
        assert_eq!(levels.len(), 3);
        assert_eq!(
            levels.iter().map(|l| l.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn every_level_starts_and_arms_its_first_wave() {
        let mut player = Player::new();
        for mut level in campaign() {
            level.start(&mut player);
            assert!(!level.cleared());
            assert_eq!(level.wave_timer.deadline(), Some(3.0));
        }
    }

    #[test]
    fn anchors_stay_inside_the_playfield() {
        for level in campaign() {
            for (_, records) in level.schedule_entries() {
                for record in records {
                    let x = match *record {
                        SpawnRecord::Parasite { x, .. }
                        | SpawnRecord::FlooderDown { x, .. }
                        | SpawnRecord::Gear { x, .. }
                        | SpawnRecord::Beast { x, .. } => x,
                        SpawnRecord::FlooderU { .. } => MID,
                    };
                    assert!((0.0..=FIELD_WIDTH).contains(&x));
                }
            }
        }
    }

    #[test]
    fn anchors_sit_in_the_upper_half() {
        for level in campaign() {
            for (_, records) in level.schedule_entries() {
                for record in records {
                    if let SpawnRecord::FlooderDown { y, .. }
                    | SpawnRecord::Parasite { y, .. }
                    | SpawnRecord::Gear { y, .. }
                    | SpawnRecord::Beast { y, .. } = *record
                    {
                        assert!(y < FIELD_HEIGHT / 2.0);
                    }
                }
            }
        }
    }
}
