pub mod fs;
pub mod memory;
pub mod normalizer;

pub use fs::DirectorySource;
pub use memory::MemorySource;
pub use normalizer::{classify, normalize, normalize_str, NormalizedFile, Reject, Shape, ShapeKind};
