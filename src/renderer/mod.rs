//! Read-only draw pass
//!
//! Everything here reads the session and writes to a `Canvas`; nothing
//! mutates simulation state. The pixel backend is supplied by the host.

pub mod canvas;
pub mod palette;
pub mod scene;

pub use canvas::{Canvas, TallyCanvas};
pub use scene::draw;
