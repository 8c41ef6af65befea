//! Process-wide Tokio runtime.
//!
//! egui owns the main thread, so network tasks run on this multi-threaded
//! runtime. `main` enters it once at startup; after that `tokio::spawn` works
//! from UI callbacks.
//!
//! ```rust,ignore
//! let rt = papertrade::utils::runtime::runtime()?;
//! let _guard = rt.enter();
//! ```

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Runtime};

static TOKIO_RT: Lazy<Result<Runtime, String>> = Lazy::new(|| {
    Builder::new_multi_thread()
        .enable_all()
        .thread_name("papertrade-io")
        .build()
        .map_err(|e| format!("Failed to create Tokio runtime: {}", e))
});

/// The shared runtime, built on first use.
pub fn runtime() -> Result<&'static Runtime, String> {
    TOKIO_RT.as_ref().map_err(Clone::clone)
}
