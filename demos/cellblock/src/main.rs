//! cellblock — lever-gated boss demo for the rust_enc encounter framework.
//!
//! A caged warden, four captive brutes, and the lever that frees them, run
//! against the in-memory reference host.  The scenario drives one wiped
//! attempt (lever pull, intro, fight, wipe, automatic reset) followed by a
//! successful second pull, then prints what the world recorded.

mod scripts;

use std::time::Duration;

use anyhow::Result;

use enc_core::{ActorId, GateState, Position};
use enc_host::{SharedState, Targeting};
use enc_script::{HostEvent, ScriptRegistry};
use enc_sim::{EncounterObserver, EncounterRunner, World};

use scripts::{
    CellLever, Prisoner, Warden, AB_ACID_SPRAY, AB_MIASMA, AB_VENOM_BOLT, GATE_CELLBLOCK, LEVER,
    TPL_LEVER, TPL_PLAYER, TPL_PRISONER, TPL_WARDEN, WARDEN,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:     u64 = 0xCE11;
const CAPACITY: usize = 24;
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
    println!("=== cellblock — rust_enc encounter demo ===");
    println!("Seed: {SEED:#x}  |  Frame: {} ms", FRAME.as_millis());
    println!();

    // 1. Script registry.
    let mut registry = ScriptRegistry::new();
    registry.register(TPL_WARDEN, |me| Warden::boxed(me, SEED));
    registry.register(TPL_PRISONER, |me| Prisoner::boxed(me, SEED));
    registry.register(TPL_LEVER, CellLever::boxed);

    // 2. World: cast times make the busy rule visible in the event stream.
    let mut world = World::new(CAPACITY, SEED);
    world.set_cast_time(AB_ACID_SPRAY, Duration::from_millis(2500));
    world.set_cast_time(AB_VENOM_BOLT, Duration::from_millis(1500));
    world.set_cast_time(AB_MIASMA, Duration::from_secs(2));

    let mut run = EncounterRunner::with_observer(world, registry, Chronicle::default());

    // 3. Population.  The warden summons its own captives on reset.
    let warden = run.spawn(TPL_WARDEN, Position::new(0.0, 20.0, 0.0, 0.0))?;
    assert_eq!(warden, WARDEN);
    let lever = run.spawn(TPL_LEVER, Position::new(0.0, -2.0, 0.0, 0.0))?;
    assert_eq!(lever, LEVER);
    let raid: Vec<ActorId> = (0..3)
        .map(|i| run.spawn(TPL_PLAYER, Position::new(i as f32 * 2.0, -6.0, 0.0, 0.0)))
        .collect::<Result<_, _>>()?;

    // 4. Idle period: captives rattle their cells on randomized timers.
    println!("-- idle --");
    run.run_frames(30, FRAME);

    // 5. First pull: lever, intro chain, then the raid opens on everything.
    println!("-- first pull --");
    run.activate(lever);
    run.run_frames(20, FRAME); // cells open at 2s, charge at 8s
    engage_all(&mut run, &raid);
    run.run_frames(40, FRAME);

    // 6. Wipe: the raid dies; warden and captives reset on their next frame.
    println!("-- wipe --");
    for &p in &raid {
        run.kill(p, Some(warden));
    }
    run.run_frames(4, FRAME);
    assert_eq!(run.world().gate(GATE_CELLBLOCK), GateState::NotStarted);

    // 7. Second pull goes the distance.
    println!("-- second pull --");
    let raid: Vec<ActorId> = (0..3)
        .map(|i| run.spawn(TPL_PLAYER, Position::new(i as f32 * 2.0, -6.0, 0.0, 0.0)))
        .collect::<Result<_, _>>()?;
    run.activate(lever);
    run.run_frames(20, FRAME);
    engage_all(&mut run, &raid);
    run.run_frames(20, FRAME);

    for id in captives(&run) {
        run.kill(id, Some(raid[0]));
    }
    run.kill(warden, Some(raid[0]));
    run.run_frames(2, FRAME);
    assert_eq!(run.world().gate(GATE_CELLBLOCK), GateState::Done);

    // 8. A third pull must refuse to re-arm a finished encounter.
    run.activate(lever);
    assert_eq!(run.world().gate(GATE_CELLBLOCK), GateState::Done);

    // 9. Summary.
    let elapsed = run.elapsed();
    let dispatches = run.observer().dispatches;
    let world = run.into_world();
    println!();
    println!("Encounter complete at {:.1} s simulated", elapsed.as_secs_f64());
    println!("  dispatches : {dispatches}");
    println!("  casts      : {}", world.casts.len());
    println!("  speech     : {}", world.speech.len());
    println!("  swings     : {}", world.swings.len());
    println!("  paths      : {}", world.paths.len());
    println!("  gate       : {}", world.gate(GATE_CELLBLOCK));

    Ok(())
}

/// Every live captive currently in the world.
fn captives(run: &EncounterRunner<Chronicle>) -> Vec<ActorId> {
    run.world()
        .arena()
        .iter()
        .filter(|(_, r)| r.template == TPL_PRISONER && r.alive)
        .map(|(id, _)| id)
        .collect()
}

/// The raid opens on the warden and everything loose in the room.
fn engage_all(run: &mut EncounterRunner<Chronicle>, raid: &[ActorId]) {
    if run.world().is_alive(WARDEN) {
        run.engage(WARDEN, raid[0]);
    }
    for (i, id) in captives(run).into_iter().enumerate() {
        run.engage(id, raid[i % raid.len()]);
    }
}
