//! Post-run analysis of recorded traces.

mod summary;

pub use summary::{detect_spikes, validate_trace, TraceSummary, SPIKE_THRESHOLD_MV};
