//! Handler state: the catalog repositories behind one shared pointer.

use crate::bootstrap::AxumContext;
use std::sync::Arc;

/// Games, platforms, releases and release links, cloned into every
/// handler by `State`.
pub type AppState = Arc<AxumContext>;
