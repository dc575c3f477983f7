/// Lineage resolution services
mod lineage_resolver;
mod profile_resolver;

pub use lineage_resolver::{Lineage, LineageResolver, MatchPolicy};
pub use profile_resolver::{ProfileHandle, ProfileResolver, TailoredProfileHandle};
