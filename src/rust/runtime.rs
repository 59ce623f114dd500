use std::env;
use std::sync::Once;

use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::Result as OrtResult;

static INIT: Once = Once::new();

/// Graph optimization level applied when a scoring model is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationLevel {
    Disable,
    Basic,
    Extended,
    #[default]
    All,
}

impl From<OptimizationLevel> for GraphOptimizationLevel {
    fn from(level: OptimizationLevel) -> Self {
        match level {
            OptimizationLevel::Disable => GraphOptimizationLevel::Disable,
            OptimizationLevel::Basic => GraphOptimizationLevel::Level1,
            OptimizationLevel::Extended => GraphOptimizationLevel::Level2,
            OptimizationLevel::All => GraphOptimizationLevel::Level3,
        }
    }
}

/// ONNX Runtime settings shared by the scoring sessions of both levels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeConfig {
    /// 0 lets ONNX Runtime decide
    pub inter_threads: usize,
    /// 0 lets ONNX Runtime decide
    pub intra_threads: usize,
    pub optimization_level: OptimizationLevel,
}

impl RuntimeConfig {
    /// Defaults, with thread counts overridable via `LEXCLASS_INTER_THREADS` and
    /// `LEXCLASS_INTRA_THREADS`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let threads = |name: &str| -> usize {
            match env::var(name) {
                Ok(value) => value.trim().parse().unwrap_or_else(|_| {
                    log::warn!("Ignoring invalid {}={:?}", name, value);
                    0
                }),
                Err(_) => 0,
            }
        };

        Self {
            inter_threads: threads("LEXCLASS_INTER_THREADS"),
            intra_threads: threads("LEXCLASS_INTRA_THREADS"),
            optimization_level: OptimizationLevel::default(),
        }
    }
}

fn init_onnx_environment() -> OrtResult<()> {
    ort::init().with_name("lexclass").commit()?;
    Ok(())
}

pub fn ensure_initialized() {
    INIT.call_once(|| {
        if let Err(e) = init_onnx_environment() {
            log::warn!("Failed to configure ONNX Runtime environment, using defaults: {}", e);
        }
    });
}

pub fn create_session_builder(config: &RuntimeConfig) -> OrtResult<SessionBuilder> {
    ensure_initialized();
    let mut builder = Session::builder()?;

    if config.inter_threads > 0 {
        builder = builder.with_inter_threads(config.inter_threads)?;
    }
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads)?;
    }

    builder = builder.with_optimization_level(config.optimization_level.into())?;

    Ok(builder)
}
