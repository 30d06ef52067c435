//! ring — coordinator demo for the rust_enc encounter framework.
//!
//! A bound binder boss and its five channelers, run against the in-memory
//! reference host.  The scenario shows the out-of-combat channel cycle, pull
//! propagation from one channeler to the whole ring, the all-dead release,
//! a wipe that restores the ring, and a full clear.

mod scripts;

use std::time::Duration;

use anyhow::Result;

use enc_core::{ActorId, Position};
use enc_host::Targeting;
use enc_script::{HostEvent, ScriptRegistry};
use enc_sim::{EncounterObserver, EncounterRunner, World};

use scripts::{
    Binder, Channeler, AB_BINDING_CHANNEL, AB_COMMUNE, AB_NOVA_SHELL, AB_SHADOW_BOLT, BINDER,
    TPL_BINDER, TPL_CHANNELER, TPL_PLAYER,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:     u64 = 0x51C6;
const CAPACITY: usize = 16;
const FRAME:    Duration = Duration::from_millis(500);

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints every non-tick dispatch with a timestamp; counts everything.
#[derive(Default)]
struct Chronicle {
    now:        Duration,
    dispatches: usize,
}

impl EncounterObserver for Chronicle {
    fn on_frame_start(&mut self, elapsed: Duration) {
        self.now = elapsed;
    }

    fn on_dispatch(&mut self, actor: ActorId, event: &HostEvent) {
        self.dispatches += 1;
        if !matches!(event, HostEvent::Tick(_)) {
            println!("  [{:>6.1}s] {actor} <- {event:?}", self.now.as_secs_f64());
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== ring — rust_enc encounter demo ===");
    println!("Seed: {SEED:#x}  |  Frame: {} ms", FRAME.as_millis());
    println!();

    // 1. Script registry.
    let mut registry = ScriptRegistry::new();
    registry.register(TPL_BINDER, |me| Binder::boxed(me, SEED));
    registry.register(TPL_CHANNELER, |me| Channeler::boxed(me, SEED));

    // 2. World.  The binding channel is effectively endless; commune and the
    // nova shell are long enough to exercise the busy rule.
    let mut world = World::new(CAPACITY, SEED);
    world.set_cast_time(AB_BINDING_CHANNEL, Duration::from_secs(600));
    world.set_cast_time(AB_COMMUNE, Duration::from_secs(5));
    world.set_cast_time(AB_NOVA_SHELL, Duration::from_secs(4));
    world.set_cast_time(AB_SHADOW_BOLT, Duration::from_millis(1500));

    let mut run = EncounterRunner::with_observer(world, registry, Chronicle::default());

    // 3. Population.  The binder summons its ring on reset.
    let binder = run.spawn(TPL_BINDER, Position::default())?;
    assert_eq!(binder, BINDER);
    assert_eq!(ring_members(&run).len(), 5);
    let raid: Vec<ActorId> = (0..3)
        .map(|i| run.spawn(TPL_PLAYER, Position::new(i as f32 * 2.0, -20.0, 0.0, 0.0)))
        .collect::<Result<_, _>>()?;

    // 4. Idle: the commune cycle assigns channel links and self-channels.
    println!("-- idle --");
    run.run_frames(30, FRAME);
    let channels = run
        .world()
        .casts
        .iter()
        .filter(|c| c.ability == AB_BINDING_CHANNEL)
        .count();
    println!("   ({channels} binding channels up)");

    // 5. Pull one channeler; combat must spread to the whole ring while the
    // binder stays bound.
    println!("-- pull --");
    let ring = ring_members(&run);
    run.engage(ring[0], raid[0]);
    assert!(ring_members(&run)
        .iter()
        .all(|&c| run.world().in_combat(c)));
    run.run_frames(30, FRAME);

    // 6. Kill four of five: no release yet.
    println!("-- attrition --");
    let ring = ring_members(&run);
    for &c in &ring[..4] {
        run.kill(c, Some(raid[0]));
    }
    run.run_frames(4, FRAME);

    // 7. The last death releases the binder onto the killer.
    println!("-- release --");
    run.kill(ring[4], Some(raid[1]));
    assert_eq!(run.world().current_target(binder), Some(raid[1]));
    run.run_frames(60, FRAME); // long enough for the two-stage nova

    // 8. Wipe: binder evades, ring comes back, attempt re-arms.
    println!("-- wipe --");
    for &p in &raid {
        run.kill(p, Some(binder));
    }
    run.run_frames(4, FRAME);
    assert_eq!(ring_members(&run).len(), 5);

    // 9. Second attempt goes the distance.
    println!("-- second attempt --");
    let raid: Vec<ActorId> = (0..3)
        .map(|i| run.spawn(TPL_PLAYER, Position::new(i as f32 * 2.0, -20.0, 0.0, 0.0)))
        .collect::<Result<_, _>>()?;
    let ring = ring_members(&run);
    run.engage(ring[0], raid[0]);
    run.run_frames(10, FRAME);
    for &c in ring_members(&run).iter() {
        run.kill(c, Some(raid[0]));
    }
    run.run_frames(20, FRAME);
    run.kill(binder, Some(raid[0]));

    // 10. Summary.
    let elapsed = run.elapsed();
    let dispatches = run.observer().dispatches;
    let world = run.into_world();
    println!();
    println!("Encounter complete at {:.1} s simulated", elapsed.as_secs_f64());
    println!("  dispatches : {dispatches}");
    println!("  casts      : {}", world.casts.len());
    println!("  speech     : {}", world.speech.len());
    println!("  swings     : {}", world.swings.len());

    Ok(())
}

/// Every live channeler currently in the world.
fn ring_members(run: &EncounterRunner<Chronicle>) -> Vec<ActorId> {
    run.world()
        .arena()
        .iter()
        .filter(|(_, r)| r.template == TPL_CHANNELER && r.alive)
        .map(|(id, _)| id)
        .collect()
}
