#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    DEFAULT_PAGE_SIZE, Game, GameFilter, GameRelease, GameReleasePlatform, GameSort, NewGame,
    NewGameRelease, NewPlatform, Page, PageRequest, Platform, PlatformFilter, PlatformSort,
    ReleaseFilter, ReleaseSchedule, ReleaseSort,
};
pub use ports::{
    CatalogRecord, ReleasePlatformRepository, Repos, Repository, RepositoryError,
};

// serde_json is only exercised by serialization tests
#[cfg(test)]
use serde_json as _;
