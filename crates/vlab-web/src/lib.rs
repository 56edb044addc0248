pub mod runner;

pub use runner::LabRunner;

/// Generate all `#[wasm_bindgen]` exports for a lab.
///
/// This macro eliminates the per-lab boilerplate by generating:
/// - `thread_local!` storage for the LabRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lab_init, lab_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use vlab_engine::*;
/// use vlab_web::LabRunner;
///
/// mod game;
/// use game::MyLab;
///
/// vlab_web::export_lab!(MyLab, "my-lab");
/// ```
///
/// # Arguments
///
/// - `$lab_type`: The lab struct type that implements `vlab_engine::Lab`
/// - `$lab_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_lab {
    ($lab_type:ty, $lab_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::LabRunner<$lab_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::LabRunner<$lab_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Lab not initialized. Call lab_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn lab_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let lab = <$lab_type>::new();
            let runner = $crate::LabRunner::new(lab);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $lab_name);
        }

        #[wasm_bindgen]
        pub fn lab_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn lab_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn lab_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn lab_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn lab_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_vessel_frames_ptr() -> *const f32 {
            with_runner(|r| r.vessel_frames_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vessel_frame_count() -> u32 {
            with_runner(|r| r.vessel_frame_count())
        }

        #[wasm_bindgen]
        pub fn get_lab_events_ptr() -> *const f32 {
            with_runner(|r| r.lab_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_lab_events_len() -> u32 {
            with_runner(|r| r.lab_events_len())
        }

        #[wasm_bindgen]
        pub fn get_bench_width() -> f32 {
            with_runner(|r| r.bench_width())
        }

        #[wasm_bindgen]
        pub fn get_bench_height() -> f32 {
            with_runner(|r| r.bench_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_vessel_frames() -> u32 {
            with_runner(|r| r.max_vessel_frames())
        }

        #[wasm_bindgen]
        pub fn get_max_lab_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_vessel_frame_floats() -> u32 {
            with_runner(|r| r.vessel_frame_floats())
        }

        #[wasm_bindgen]
        pub fn get_lab_event_floats() -> u32 {
            with_runner(|r| r.lab_event_floats())
        }
    };
}
