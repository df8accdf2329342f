pub mod scene;
pub mod tooltip;
pub mod viewport;

pub use scene::TreeScene;
pub use tooltip::{TooltipPhase, TooltipScheduler};
pub use viewport::ViewportController;
