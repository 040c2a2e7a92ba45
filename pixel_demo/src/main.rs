//! Pixel engine demo
//!
//! Builds a small platformer level headlessly and runs it for a few seconds
//! of simulated time: a hero that walks back and forth between walls, a
//! bouncing heart, a coin picked up by a trigger, and a squashy sprite.
//!
//! Usage: `pixel_demo [hero.toml|hero.ron]`. Set `RUST_LOG=debug` for
//! lifecycle logging from the engine.

use std::cell::Cell;
use std::rc::Rc;

use pixel_engine::foundation::logging;
use pixel_engine::prelude::*;

const TILE_SIZE: i32 = 16;

/// Level layout, top row first; `#` is solid
const LEVEL: [&str; 8] = [
    "####################",
    "#..................#",
    "#..................#",
    "#..................#",
    "#.......####.......#",
    "#..................#",
    "#..................#",
    "####################",
];

/// Frame times fed to the fixed timestep, cycled to mimic an uneven display
const FRAME_TIMES: [f32; 4] = [0.016, 0.017, 0.033, 0.008];

fn build_level(world: &mut World) -> Entity {
    let rows = LEVEL.len() as i32;
    let cols = LEVEL[0].len() as i32;
    let solidity = |col: i32, row: i32| {
        // Row 0 of the grid is the bottom of the level
        let line = LEVEL[(rows - 1 - row) as usize].as_bytes();
        line.get(col as usize) == Some(&b'#')
    };
    let collider = Collider::grid_from_solidity(Mask::Solid, TILE_SIZE, cols, rows, solidity);
    let boundary = Boundary::around_grid(collider.grid_shape(), Vec2::zeros());

    let level = world.create_entity();
    world.insert(level, Position::new(0.0, 0.0));
    world.insert(level, collider);
    world.insert(level, boundary);
    log::info!(
        "Level {cols}x{rows} tiles, bounds {:?}",
        world.get::<Boundary>(level).map(|b| b.rect)
    );
    level
}

fn is_grounded(world: &World, entity: Entity) -> bool {
    world
        .attached::<Mover>(entity)
        .is_some_and(|mover| Mover::on_ground(world, mover))
}

fn spawn_hero(world: &mut World, config: &MoverConfig) -> Entity {
    let hero = world.create_entity();
    world.insert(hero, Position::new(40.0, 40.0));
    world.insert(hero, Collider::rect(Mask::Npc, 0.0, 0.0, 12.0, 14.0));
    world.insert(hero, Sprite::new(12.0, 14.0).with_region("hero").with_scale_return(3.0));

    let mut mover = Mover::from_config(config).with_speed(90.0, 0.0);
    mover.set_on_hit_x(|world, hit| {
        if let Some(mover) = world.get_component_mut(hit.mover) {
            mover.invert_x();
        }
        // Squash the sprite against the wall, it eases back by itself
        if let Some(sprite) = world.get_mut::<Sprite>(hit.entity) {
            sprite.scale = Vec2::new(0.6, 1.3);
        }
        log::info!("Hero turned around after hitting {:?}", hit.direction);
    });
    world.insert(hero, mover);

    // Jump every two seconds
    let timer = Timer::started(2.0).with_on_end(move |world, id| {
        if is_grounded(world, hero) {
            if let Some(mover) = world.get_mut::<Mover>(hero) {
                mover.speed.y = 260.0;
            }
        }
        if let Some(timer) = world.get_component_mut(id) {
            timer.start(2.0);
        }
    });
    world.insert(hero, timer);
    hero
}

fn spawn_heart(world: &mut World) -> Entity {
    let heart = world.create_entity();
    world.insert(heart, Position::new(200.0, 60.0));
    world.insert(heart, Collider::circle(Mask::Effect, 0.0, 0.0, 5.0));
    world.insert(heart, Sprite::new(10.0, 10.0).with_region("heart").centered());
    world.insert(heart, MoverFactory::bouncing(70.0, 55.0));
    heart
}

fn spawn_coin(world: &mut World, collected: Rc<Cell<u32>>) -> Entity {
    let coin = world.create_entity();
    world.insert(coin, Position::new(120.0, 18.0));
    world.insert(coin, Collider::rect(Mask::Object, 0.0, 0.0, 8.0, 8.0));
    world.insert(
        coin,
        Sprite::new(8.0, 8.0)
            .with_region("coin")
            .with_tint(Color::rgba(1.0, 0.85, 0.2, 1.0)),
    );
    world.insert(
        coin,
        Trigger::new(Mask::Npc, move |world, hit| {
            collected.set(collected.get() + 1);
            log::info!("Coin collected by {:?}", hit.other);
            world.destroy_entity(hit.entity);
        }),
    );
    coin
}

fn load_hero_config() -> Result<MoverConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading hero preset from {path}");
            MoverConfig::load_from_file(&path)
        }
        None => Ok(MoverConfig {
            gravity: -500.0,
            friction: 0.0,
            ..MoverConfig::default()
        }),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting pixel engine demo");

    let simulation = SimulationConfig::default();
    let hero_config = load_hero_config()?;

    let mut world = World::new();
    build_level(&mut world);
    let hero = spawn_hero(&mut world, &hero_config);
    let heart = spawn_heart(&mut world);
    let collected = Rc::new(Cell::new(0));
    spawn_coin(&mut world, Rc::clone(&collected));

    let mut timestep = FixedTimestep::new(&simulation);
    let mut last_report = 0;

    for frame in 0..600 {
        let frame_time = FRAME_TIMES[frame % FRAME_TIMES.len()];
        for _ in 0..timestep.advance(frame_time) {
            world.update(timestep.step());
        }

        let second = timestep.total_steps() / u64::from(simulation.tick_rate);
        if second != last_report {
            last_report = second;
            let hero_position = world.get::<Position>(hero).map(|p| (p.x(), p.y()));
            let heart_position = world.get::<Position>(heart).map(|p| (p.x(), p.y()));
            log::info!(
                "t={second}s hero={hero_position:?} heart={heart_position:?} drawables={}",
                world.render_items().len()
            );
        }
    }

    log::info!(
        "Finished after {} steps, {} coin(s) collected, {} entities alive",
        timestep.total_steps(),
        collected.get(),
        world.entity_count()
    );
    Ok(())
}
