//! Pure pointer domain logic: no sensors, no sockets, no clocks of its own.

pub mod debounce;
pub mod pointer;
pub mod rate;
pub mod target;

pub use debounce::ScanDebouncer;
pub use pointer::{PointerBounds, PointerModel, PointerPosition};
pub use rate::SampleRate;
pub use target::{ConnectionTarget, TargetError};
