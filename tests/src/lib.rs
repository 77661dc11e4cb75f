#[macro_use]
mod macros;

mod engine_log;
pub use engine_log::EngineLog;

pub use recording_engine::{EngineOp, RecordingDriver, RecordingEngine, RecordingHandle};

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
