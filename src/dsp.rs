pub mod bands;
pub mod smoother;
pub mod transform;
pub mod window;

pub use bands::{BandGroup, BandPlan, BandRange, GroupGains};
pub use smoother::BandState;
pub use transform::SpectralTransform;
pub use window::HannWindow;
