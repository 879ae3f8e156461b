pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_options, init_tracing, load_weights, run_find};

// Re-export the relocation API from relocator-core
pub use relocator_core::{RelocateOptions, Relocation, TieBreak, Weights, relocate};
