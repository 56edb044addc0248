use vlab_engine::{
    FixedTimestep, InputEvent, InputQueue, Lab, LabConfig, LabContext, LabEvent, RenderContext,
    VesselFrame,
};

/// Generic lab runner that wires up the simulation loop.
///
/// Each concrete lab (e.g., `virtual-lab`) creates a `thread_local!` LabRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct LabRunner<L: Lab> {
    lab: L,
    ctx: LabContext,
    input: InputQueue,
    /// Per-vessel frames for SharedArrayBuffer reads.
    frames: Vec<VesselFrame>,
    timestep: FixedTimestep,
    config: LabConfig,
    initialized: bool,
}

impl<L: Lab> LabRunner<L> {
    pub fn new(lab: L) -> Self {
        let config = lab.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let frames = Vec::with_capacity(config.max_vessel_frames);

        Self {
            lab,
            ctx: LabContext::new(),
            input: InputQueue::new(),
            frames,
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the lab. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.lab.config();
        self.lab.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: fixed-step updates, then publish vessel frames.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.advance_clock(self.timestep.dt());
            self.lab.update(&mut self.ctx, &self.input);
        }

        // Drain input after update
        self.input.drain();

        // Publish vessel state for the renderer
        self.frames.clear();
        let mut render_ctx = RenderContext {
            frames: &mut self.frames,
        };
        self.lab.render(&mut render_ctx);
        self.frames.truncate(self.config.max_vessel_frames);
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn vessel_frames_ptr(&self) -> *const f32 {
        self.frames.as_ptr() as *const f32
    }

    pub fn vessel_frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn lab_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn lab_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.config.max_events) as u32
    }

    pub fn bench_width(&self) -> f32 {
        self.config.bench_width
    }

    pub fn bench_height(&self) -> f32 {
        self.config.bench_height
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_vessel_frames(&self) -> u32 {
        self.config.max_vessel_frames as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn vessel_frame_floats(&self) -> u32 {
        VesselFrame::FLOATS as u32
    }

    pub fn lab_event_floats(&self) -> u32 {
        LabEvent::FLOATS as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal lab that counts updates and publishes one frame per tick.
    struct CountingLab {
        updates: u32,
        last_clock_ms: f64,
    }

    impl Lab for CountingLab {
        fn init(&mut self, _ctx: &mut LabContext) {}

        fn update(&mut self, ctx: &mut LabContext, _input: &InputQueue) {
            self.updates += 1;
            self.last_clock_ms = ctx.clock_ms();
        }

        fn render(&self, ctx: &mut RenderContext) {
            ctx.frames.push(VesselFrame {
                vessel: 0.0,
                phase: self.updates as f32,
                ..Default::default()
            });
        }
    }

    fn runner() -> LabRunner<CountingLab> {
        let mut r = LabRunner::new(CountingLab {
            updates: 0,
            last_clock_ms: 0.0,
        });
        r.init();
        r
    }

    #[test]
    fn fixed_steps_accumulate_across_frames() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.lab.updates, 1);
        // A 34ms frame at 60Hz runs two fixed steps.
        r.tick(0.034);
        assert_eq!(r.lab.updates, 3);
    }

    #[test]
    fn clock_tracks_fixed_steps() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert!((r.lab.last_clock_ms - 1000.0 / 60.0).abs() < 0.01);
    }

    #[test]
    fn frames_publish_even_on_zero_step_ticks() {
        let mut r = runner();
        // Tiny frame: no fixed step elapses, but render still runs.
        r.tick(0.001);
        assert_eq!(r.vessel_frame_count(), 1);
    }

    #[test]
    fn uninitialized_runner_ignores_ticks() {
        let mut r = LabRunner::new(CountingLab {
            updates: 0,
            last_clock_ms: 0.0,
        });
        r.tick(1.0);
        assert_eq!(r.lab.updates, 0);
        assert_eq!(r.vessel_frame_count(), 0);
    }

    #[test]
    fn input_drains_after_the_frame() {
        let mut r = runner();
        r.push_input(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        r.tick(1.0 / 60.0);
        assert!(r.input.is_empty());
    }
}
