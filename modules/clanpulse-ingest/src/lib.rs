pub mod ingestor;
pub mod normalize;
pub mod source;

pub use ingestor::{IngestStats, Ingestor};
pub use normalize::normalize_profile;
pub use source::{CocSource, PlayerSource};
