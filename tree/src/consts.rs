//! Shared numeric constants for the tree crate.

// ── Layout ──────────────────────────────────────────────────────

/// Horizontal slot width for a single person. Couples take 1.5 slots.
pub const NODE_SPACING: f64 = 140.0;

/// Vertical distance between generation bands.
pub const GEN_SPACING: f64 = 180.0;

/// Y coordinate of the first generation band.
pub const TOP_MARGIN: f64 = 60.0;

/// Node circle radius; edge anchors sit this far above/below a node centre.
pub const NODE_RADIUS: f64 = 20.0;

/// Left-member offset within a couple group, in slots.
pub const COUPLE_LEFT_OFFSET: f64 = 0.375;

/// Right-member offset within a couple group, in slots.
pub const COUPLE_RIGHT_OFFSET: f64 = 1.125;

/// Width of a couple group, in slots.
pub const COUPLE_WIDTH: f64 = 1.5;

// ── Timeline ────────────────────────────────────────────────────

/// Earliest year on the timeline slider.
pub const DEFAULT_MIN_YEAR: i32 = 1757;

/// Latest year on the timeline slider. At this year filtering is off.
pub const DEFAULT_MAX_YEAR: i32 = 2023;

/// Assumed lifespan when no death year is known.
pub const ASSUMED_LIFESPAN_YEARS: i32 = 70;

/// Node radius while the person is not yet born at the cursor year.
pub const NOT_YET_BORN_RADIUS: f64 = 14.0;

/// Node radius once the person has died at the cursor year.
pub const DECEASED_RADIUS: f64 = 16.0;

/// Minimum width, in percent, of a timeline period bar.
pub const MIN_PERIOD_BAR_WIDTH_PCT: f64 = 0.5;

// ── Map ─────────────────────────────────────────────────────────

/// Marker with no known year: shown dimmed and slightly shrunk.
pub const MARKER_FADED_OPACITY: f64 = 0.4;
pub const MARKER_FADED_SCALE: f64 = 0.8;

/// Marker whose event lies after the cursor year.
pub const MARKER_HIDDEN_SCALE: f64 = 0.3;

/// Migration line opacity once the cursor passes its latest year.
pub const MIGRATION_FULL_OPACITY: f64 = 0.3;

/// Migration line opacity while the cursor is inside its year span.
pub const MIGRATION_PARTIAL_OPACITY: f64 = 0.15;

/// Migration line opacity when none of its events is dated.
pub const MIGRATION_UNDATED_OPACITY: f64 = 0.1;

// ── Camera ──────────────────────────────────────────────────────

/// Zoom extent of the tree view.
pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 3.0;

/// Initial view: scale and offsets applied before the user interacts.
pub const INITIAL_SCALE: f64 = 0.85;
pub const INITIAL_OFFSET_X: f64 = 300.0;
pub const INITIAL_OFFSET_Y: f64 = 40.0;

/// Scale used when focusing a single node (search selection, panel navigation).
pub const FOCUS_SCALE: f64 = 1.4;

// ── Labels / search ─────────────────────────────────────────────

/// Names up to this many characters render on one line.
pub const NAME_LINE_MAX_CHARS: usize = 14;

/// Maximum number of search hits returned.
pub const SEARCH_LIMIT: usize = 6;
