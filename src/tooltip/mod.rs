//! Tooltip core: visibility state machine, placement, and the shared slot
//! that keeps at most one panel open per page.

pub mod controller;
pub mod placement;
pub mod registry;
pub mod timer;

pub use controller::{
    InteractionMode, TapPhase, TooltipAction, TooltipController, TooltipSettings, TooltipState,
};
pub use placement::{compute_placement, PanelSize, Placement, Side};
pub use registry::{TooltipId, TooltipRegistry};
