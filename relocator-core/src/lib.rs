pub mod fingerprint;
pub mod path;
pub mod relocate;
pub mod report;
pub mod scorer;
pub mod weights;

pub use fingerprint::{ExtractionMode, Field, Fingerprint};
pub use path::{PathNode, build_path, seed_label};
pub use relocate::{DEFAULT_TARGET_ID, RelocateOptions, Relocation, relocate};
pub use scorer::{ScoredCandidate, Selection, TieBreak, score, select_best};
pub use weights::Weights;
