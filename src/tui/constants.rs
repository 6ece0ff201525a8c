//! Constants used throughout the TUI module

/// Status message timeout in seconds
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 4;

/// Minimum terminal size for the inline layout
pub const MIN_TERMINAL_WIDTH: u16 = 60;
pub const MIN_TERMINAL_HEIGHT: u16 = 16;

pub const HEADER_HEIGHT: u16 = 5;
pub const FOOTER_HEIGHT: u16 = 3;

/// Width of the hovered-node side panel in the inline layout
pub const SIDE_PANEL_WIDTH: u16 = 34;
/// Below this width the side panel is hidden
pub const SIDE_PANEL_MIN_TERMINAL_WIDTH: u16 = 100;

/// Node box size in terminal cells, independent of zoom
pub const NODE_WIDTH: u16 = 26;
pub const NODE_HEIGHT: u16 = 4;

/// Terminal cells are about twice as tall as wide
pub const CELL_ASPECT: f64 = 0.5;

/// Graph-space units per terminal column
pub const DEFAULT_ZOOM: f64 = 0.1;
pub const MIN_ZOOM: f64 = 0.02;
pub const MAX_ZOOM: f64 = 0.5;
pub const ZOOM_STEP: f64 = 1.25;

/// Cells kept free around a fitted graph
pub const FIT_PADDING_COLS: f64 = 2.0;
pub const FIT_PADDING_ROWS: f64 = 1.0;

/// Cells moved per pan key press
pub const PAN_STEP_COLS: f64 = 6.0;
pub const PAN_STEP_ROWS: f64 = 3.0;

/// Length of one dash of an animated edge, in canvas cells
pub const EDGE_DASH: f64 = 1.5;
