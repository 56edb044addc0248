//! Virtual Lab - thin controller layer.
//!
//! Routes input to the reaction controller and publishes vessel state.

use glam::Vec2;
use vlab_engine::input::queue::{InputEvent, InputQueue};
use vlab_engine::{
    AddOutcome, Bench, ChemicalCatalog, ExperimentCatalog, Lab, LabConfig, LabContext, LabEvent,
    Phase, ReactionController, ReactionState, RenderContext, Rng, SlotKind, SpawnSequence,
    VesselFrame,
};

const BENCH_W: f32 = 800.0;
const BENCH_H: f32 = 600.0;

const VESSEL_RADIUS: f32 = 70.0;
const BEAKER_RADIUS: f32 = 42.0;
const BEAKER_ROW_Y: f32 = 520.0;

/// Reaction bubbles: a short burst each time the reaction kicks off.
const BUBBLE_COUNT: u32 = 40;
const BUBBLE_WINDOW_MS: f64 = 4000.0;
const BUBBLE_RATE_PER_SEC: f64 = 20.0;

/// Custom event kinds from React UI.
mod events {
    pub const LOAD_EXPERIMENT: u32 = 1; // a: experiment index
    pub const ADD_CHEMICAL: u32 = 2; // a: reagent index within the experiment
    pub const RESET: u32 = 3;
}

/// Lab event kinds to React.
mod lab_events {
    pub const PHASE_CHANGED: f32 = 1.0; // a: phase code
    pub const CHEMICAL_ADDED: f32 = 2.0; // a: reagent index
    pub const CHEMICAL_REJECTED: f32 = 3.0; // a: reagent index
    pub const WARNING: f32 = 4.0; // a: 1 shown, 0 cleared
    pub const PARTICLES: f32 = 5.0; // a: spawn count, b: x jitter
    pub const EXPERIMENT_LOADED: f32 = 6.0; // a: experiment index
}

/// The virtual lab: one vessel, one experiment at a time.
pub struct VirtualLab {
    chemicals: ChemicalCatalog,
    experiments: ExperimentCatalog,
    controller: ReactionController,
    active_experiment: usize,
    bench: Bench,
    bubbles: SpawnSequence,
    rng: Rng,
    last_state: ReactionState,
    last_phase: Phase,
    warning_shown: bool,
}

impl VirtualLab {
    pub fn new() -> Self {
        let chemicals = ChemicalCatalog::load().expect("Failed to load chemical catalog");
        let experiments = ExperimentCatalog::load().expect("Failed to load experiment catalog");
        let spec = experiments
            .get_index(0)
            .expect("Experiment catalog is empty")
            .reaction
            .clone();

        let mut lab = Self {
            chemicals,
            experiments,
            controller: ReactionController::new(spec),
            active_experiment: 0,
            bench: Bench::new(BENCH_W, BENCH_H),
            bubbles: SpawnSequence::new(BUBBLE_COUNT, BUBBLE_WINDOW_MS, BUBBLE_RATE_PER_SEC),
            rng: Rng::new(0x1ab),
            last_state: ReactionState::default(),
            last_phase: Phase::Idle,
            warning_shown: false,
        };
        lab.rebuild_bench();
        lab
    }

    /// Reagent ids for the active experiment, in bench order.
    fn reagents(&self) -> &[String] {
        self.experiments
            .get_index(self.active_experiment)
            .map(|e| e.reaction.required.as_slice())
            .unwrap_or(&[])
    }

    /// Vessel in the middle, one stock beaker per reagent along the bottom.
    fn rebuild_bench(&mut self) {
        self.bench = Bench::new(BENCH_W, BENCH_H);
        self.bench.add_slot(
            Vec2::new(BENCH_W * 0.5, BENCH_H * 0.45),
            VESSEL_RADIUS,
            SlotKind::Vessel,
        );
        let reagents: Vec<String> = self.reagents().to_vec();
        let n = reagents.len().max(1) as f32;
        for (i, id) in reagents.into_iter().enumerate() {
            let x = BENCH_W * (i as f32 + 1.0) / (n + 1.0);
            self.bench.add_slot(
                Vec2::new(x, BEAKER_ROW_Y),
                BEAKER_RADIUS,
                SlotKind::ReagentBeaker { chemical: id },
            );
        }
    }

    fn load_experiment(&mut self, ctx: &mut LabContext, index: usize) {
        let Some(exp) = self.experiments.get_index(index) else {
            log::warn!("no experiment at index {index}");
            return;
        };
        let exp_id = exp.id.clone();
        self.controller = ReactionController::new(exp.reaction.clone());
        self.active_experiment = index;
        self.bubbles.cancel();
        self.last_state = ReactionState::default();
        self.last_phase = Phase::Idle;
        self.warning_shown = false;
        self.rebuild_bench();
        log::info!("loaded experiment {exp_id}");
        ctx.emit_event(LabEvent {
            kind: lab_events::EXPERIMENT_LOADED,
            a: index as f32,
            b: 0.0,
            c: 0.0,
        });
    }

    fn add_reagent(&mut self, ctx: &mut LabContext, reagent_index: usize) {
        let Some(id) = self.reagents().get(reagent_index).cloned() else {
            log::warn!("no reagent at index {reagent_index}");
            return;
        };
        let now = ctx.clock_ms();
        match self.controller.add_chemical(&self.chemicals, now, &id) {
            AddOutcome::Added => {
                ctx.emit_event(LabEvent {
                    kind: lab_events::CHEMICAL_ADDED,
                    a: reagent_index as f32,
                    b: 0.0,
                    c: 0.0,
                });
            }
            AddOutcome::Rejected(_) => {
                ctx.emit_event(LabEvent {
                    kind: lab_events::CHEMICAL_REJECTED,
                    a: reagent_index as f32,
                    b: 0.0,
                    c: 0.0,
                });
            }
            AddOutcome::AlreadyPresent | AddOutcome::Unknown => {}
        }
    }

    fn handle_pointer_down(&mut self, ctx: &mut LabContext, x: f32, y: f32) {
        let Some(slot) = self.bench.pick(Vec2::new(x, y)) else {
            return;
        };
        // Slot 0 is the vessel; beakers follow in reagent order.
        if slot > 0 {
            self.add_reagent(ctx, slot - 1);
        }
    }

    fn handle_custom_event(&mut self, ctx: &mut LabContext, kind: u32, a: f32) {
        match kind {
            events::LOAD_EXPERIMENT => self.load_experiment(ctx, a as usize),
            events::ADD_CHEMICAL => self.add_reagent(ctx, a as usize),
            events::RESET => {
                self.controller.reset();
                self.bubbles.cancel();
            }
            _ => log::debug!("unhandled custom event kind {kind}"),
        }
    }
}

impl Lab for VirtualLab {
    fn config(&self) -> LabConfig {
        LabConfig {
            bench_width: BENCH_W,
            bench_height: BENCH_H,
            ..LabConfig::default()
        }
    }

    fn init(&mut self, _ctx: &mut LabContext) {
        log::info!(
            "virtual lab ready: {} chemicals, {} experiments",
            self.chemicals.len(),
            self.experiments.len()
        );
    }

    fn update(&mut self, ctx: &mut LabContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.handle_pointer_down(ctx, x, y),
                InputEvent::Custom { kind, a, .. } => self.handle_custom_event(ctx, kind, a),
                _ => {}
            }
        }

        let now = ctx.clock_ms();
        let state = self.controller.tick(&self.chemicals, now);

        if state.phase != self.last_phase {
            ctx.emit_event(LabEvent {
                kind: lab_events::PHASE_CHANGED,
                a: state.phase.code(),
                b: state.coloration_progress,
                c: 0.0,
            });
            if state.phase == Phase::Reacting {
                self.bubbles.start(now);
            }
            if state.phase == Phase::Idle {
                self.bubbles.cancel();
            }
            self.last_phase = state.phase;
        }

        let due = self.bubbles.tick(now);
        if due > 0 {
            ctx.emit_event(LabEvent {
                kind: lab_events::PARTICLES,
                a: due as f32,
                b: self.rng.next_float() * 2.0 - 1.0,
                c: 0.0,
            });
        }

        let warning = self.controller.notice().is_some();
        if warning != self.warning_shown {
            ctx.emit_event(LabEvent {
                kind: lab_events::WARNING,
                a: if warning { 1.0 } else { 0.0 },
                b: 0.0,
                c: 0.0,
            });
            self.warning_shown = warning;
        }

        self.last_state = state;
    }

    fn render(&self, ctx: &mut RenderContext) {
        let s = &self.last_state;
        ctx.frames.push(VesselFrame {
            vessel: 0.0,
            phase: s.phase.code(),
            r: s.color.r,
            g: s.color.g,
            b: s.color.b,
            fill: s.fill_level,
            progress: s.coloration_progress,
            precipitate: if s.has_precipitate { 1.0 } else { 0.0 },
            precipitate_depth: s.precipitate_depth,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the lab like the runner does: queue events, then step.
    struct Harness {
        lab: VirtualLab,
        ctx: LabContext,
        input: InputQueue,
    }

    impl Harness {
        fn new() -> Self {
            let mut lab = VirtualLab::new();
            let mut ctx = LabContext::new();
            lab.init(&mut ctx);
            Self {
                lab,
                ctx,
                input: InputQueue::new(),
            }
        }

        fn step(&mut self) {
            self.ctx.clear_frame_data();
            self.ctx.advance_clock(1.0 / 60.0);
            self.lab.update(&mut self.ctx, &self.input);
            self.input.drain();
        }

        fn step_for_ms(&mut self, ms: f64) {
            let steps = (ms / (1000.0 / 60.0)).ceil() as u32;
            for _ in 0..steps {
                self.step();
            }
        }

        fn custom(&mut self, kind: u32, a: f32) {
            self.input.push(InputEvent::Custom {
                kind,
                a,
                b: 0.0,
                c: 0.0,
            });
        }

        fn events_of_kind(&self, kind: f32) -> Vec<LabEvent> {
            self.ctx
                .events
                .iter()
                .copied()
                .filter(|e| e.kind == kind)
                .collect()
        }

        fn frame(&self) -> VesselFrame {
            let mut frames = Vec::new();
            let mut render_ctx = RenderContext {
                frames: &mut frames,
            };
            self.lab.render(&mut render_ctx);
            frames[0]
        }
    }

    #[test]
    fn boot_builds_bench_for_first_experiment() {
        let h = Harness::new();
        // kmno4-reduction: vessel plus three reagent beakers.
        assert_eq!(h.lab.bench.len(), 4);
        assert_eq!(h.lab.bench.slot(0).unwrap().kind, SlotKind::Vessel);
    }

    #[test]
    fn load_experiment_rebuilds_bench_and_notifies() {
        let mut h = Harness::new();
        h.custom(events::LOAD_EXPERIMENT, 1.0); // agcl-precipitation
        h.step();
        assert_eq!(h.lab.bench.len(), 3);
        let loaded = h.events_of_kind(lab_events::EXPERIMENT_LOADED);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].a, 1.0);
    }

    #[test]
    fn add_events_drive_the_reaction_to_complete() {
        let mut h = Harness::new();
        h.custom(events::ADD_CHEMICAL, 0.0); // kmno4
        h.step();
        assert_eq!(h.events_of_kind(lab_events::CHEMICAL_ADDED).len(), 1);

        h.custom(events::ADD_CHEMICAL, 1.0); // h2so4
        h.step();
        h.custom(events::ADD_CHEMICAL, 2.0); // oxalic-acid
        h.step();
        assert!(h
            .events_of_kind(lab_events::PHASE_CHANGED)
            .iter()
            .any(|e| e.a == Phase::Reacting.code()));

        h.step_for_ms(11_000.0);
        assert_eq!(h.frame().phase, Phase::Complete.code());
        assert_eq!(h.frame().progress, 1.0);
    }

    #[test]
    fn out_of_order_add_is_rejected_and_warns() {
        let mut h = Harness::new();
        h.custom(events::ADD_CHEMICAL, 0.0); // kmno4
        h.step();
        h.custom(events::ADD_CHEMICAL, 2.0); // oxalic-acid before h2so4
        h.step();
        assert_eq!(h.events_of_kind(lab_events::CHEMICAL_REJECTED).len(), 1);
        let warnings = h.events_of_kind(lab_events::WARNING);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].a, 1.0);

        // The warning auto-clears and emits the cleared edge.
        h.step_for_ms(3100.0);
        assert!(!h.lab.warning_shown);
    }

    #[test]
    fn pointer_pick_on_beaker_adds_its_chemical() {
        let mut h = Harness::new();
        let beaker = h.lab.bench.slot(1).unwrap().pos;
        h.input.push(InputEvent::PointerDown {
            x: beaker.x,
            y: beaker.y,
        });
        h.step();
        assert_eq!(h.lab.controller.contents(), &["kmno4".to_string()]);
    }

    #[test]
    fn reset_event_returns_the_vessel_to_idle() {
        let mut h = Harness::new();
        h.custom(events::ADD_CHEMICAL, 0.0);
        h.step();
        h.custom(events::RESET, 0.0);
        h.step();
        assert!(h.lab.controller.contents().is_empty());
        assert_eq!(h.frame().phase, Phase::Idle.code());
        assert_eq!(h.frame().fill, 0.0);
    }

    #[test]
    fn bubbles_spawn_while_reacting() {
        let mut h = Harness::new();
        h.custom(events::ADD_CHEMICAL, 0.0);
        h.step();
        h.custom(events::ADD_CHEMICAL, 1.0);
        h.step();
        h.custom(events::ADD_CHEMICAL, 2.0);
        let mut particle_frames = 0;
        for _ in 0..120 {
            h.step();
            particle_frames += h.events_of_kind(lab_events::PARTICLES).len();
        }
        assert!(particle_frames > 0);
    }

    #[test]
    fn precipitation_frame_reports_the_layer() {
        let mut h = Harness::new();
        h.custom(events::LOAD_EXPERIMENT, 1.0);
        h.step();
        h.custom(events::ADD_CHEMICAL, 0.0); // agno3
        h.step();
        h.custom(events::ADD_CHEMICAL, 1.0); // nacl
        h.step();
        h.step_for_ms(2000.0);
        let frame = h.frame();
        assert_eq!(frame.precipitate, 1.0);
        assert!(frame.precipitate_depth > 0.0);
    }
}
