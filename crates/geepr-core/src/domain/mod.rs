//! Domain types for the game catalog.
//!
//! These types represent catalog records independent of any storage or
//! transport concern.

mod game;
mod paging;
mod platform;
mod release;

pub use game::{Game, GameFilter, GameSort, NewGame};
pub use paging::{DEFAULT_PAGE_SIZE, Page, PageRequest};
pub use platform::{NewPlatform, Platform, PlatformFilter, PlatformSort};
pub use release::{
    GameRelease, GameReleasePlatform, NewGameRelease, ReleaseFilter, ReleaseSchedule,
    ReleaseSort,
};
