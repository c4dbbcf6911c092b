//! Walkthrough collision: keeps a first-person camera inside the hall and out
//! of obstacles, with doorway exceptions.

mod doors;
mod resolve;

pub use doors::{DoorZone, Wall};
pub use resolve::{resolve_walkthrough, Walkthrough, WalkthroughConfig};
