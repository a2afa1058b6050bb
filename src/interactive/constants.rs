//! Constants for the interactive TUI module
//!
//! This module centralizes magic numbers and configuration values
//! to improve maintainability and make the codebase more self-documenting.

// Timing constants
/// Quiet period before a typed query is committed, in milliseconds
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Message auto-clear delay in milliseconds
pub const MESSAGE_CLEAR_DELAY_MS: u64 = 3000;

/// Event polling interval in milliseconds
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Double Ctrl+C timeout in seconds
pub const DOUBLE_CTRL_C_TIMEOUT_SECS: u64 = 1;

// UI Layout constants
/// Height of the search bar component
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the share-link line under the grid
pub const LINK_LINE_HEIGHT: u16 = 1;

/// Columns in the result grid
pub const GRID_COLUMNS: usize = 4;

/// Rows of terminal cells per grid cell
pub const GRID_CELL_HEIGHT: u16 = 4;

/// Skeleton cells rendered while a search is in flight
pub const SKELETON_CELLS: usize = 8;

// Modal dimensions
/// Maximum width for the model modal
pub const MODAL_MAX_WIDTH: u16 = 80;

/// Minimum margin around the model modal
pub const MODAL_MARGIN: u16 = 4;

// Help dialog dimensions
/// Maximum width for help dialog
pub const HELP_DIALOG_MAX_WIDTH: u16 = 85;

/// Minimum margin around help dialog
pub const HELP_DIALOG_MARGIN: u16 = 4;

// Cache capacities
/// Remembered search queries
pub const SEARCH_CACHE_SIZE: usize = 64;

/// Remembered task lookups
pub const TASK_CACHE_SIZE: usize = 64;
