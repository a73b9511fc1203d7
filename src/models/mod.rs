pub mod geo;
pub mod outcome;
pub mod rescue;
pub mod session;

pub use geo::Coordinates;
pub use outcome::{RenderStatus, SkipReason, WidgetOutcome};
pub use rescue::{MarkerDescriptor, NearbyMapOptions};
pub use session::{Session, UserProfile};
