//! Gothic window geometry: arches, walls with arch windows, tracery and
//! rosettes.
//!
//! Everything is drawn in the XY plane and extruded along +Z, see
//! [`crate::frame`].

pub mod arch;
pub mod rosette;
pub mod tracery;
pub mod wall;

pub use arch::{Arch, ArchParameters, EQUILATERAL_EXCESS, ROUND_EXCESS};
pub use rosette::{FoilOrientation, RosetteLayout, RosetteParams, rosette};
pub use tracery::{
    ArchWindowTraceryParams, EmptyArchTraceryParams, TraceryFrame, TraceryLayout,
    arch_window_tracery, empty_arch_window_tracery,
};
pub use wall::{
    ArchWindowWallParams, WindowLayout, arch_window_wall, arch_window_walls,
    equilateral_arch_window_wall, rounded_arch_window_wall,
};
