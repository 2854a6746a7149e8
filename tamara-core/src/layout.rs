//! Screen layout
//!
//! Fixed geometry of the 480x320 landscape UI. The renderer draws at
//! these positions and the touch mapper hit-tests against them, so both
//! sides read the same constants.

use crate::traits::TouchPoint;

/// Display width in pixels (landscape)
pub const SCREEN_WIDTH: i32 = 480;

/// Display height in pixels (landscape)
pub const SCREEN_HEIGHT: i32 = 320;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Horizontal center
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical center
    pub const fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }
}

/// Touch hit-region
///
/// Bounds are exclusive on every side: a point on the edge is a miss.
/// Open sides use bounds outside the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HitRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl HitRegion {
    /// Create a region from its exclusive bounds
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Check if a point lies strictly inside the region
    pub fn contains(&self, point: TouchPoint) -> bool {
        point.x > self.left && point.x < self.right && point.y > self.top && point.y < self.bottom
    }

    /// Check if two regions share any interior point
    pub fn overlaps(&self, other: &HitRegion) -> bool {
        // Integer points: interiors intersect only if some integer lies in both open ranges
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        let top = self.top.max(other.top);
        let bottom = self.bottom.min(other.bottom);
        right - left > 1 && bottom - top > 1
    }
}

// Persistent chrome

/// Band cleared on every screen entry (everything below the title)
pub const CENTER_CLEAR: Rect = Rect::new(0, 57, SCREEN_WIDTH, SCREEN_HEIGHT - 57);

/// Title baseline (top-left datum)
pub const TITLE_Y: i32 = 20;

/// Dark center panel shared by Home and DurationConfig
pub const CENTER_PANEL: Rect = Rect::new(50, 58, SCREEN_WIDTH - 100, 167);

/// Vertical position of the bottom button row
pub const BUTTON_ROW_Y: i32 = 238;

/// Height of the bottom button row
pub const BUTTON_ROW_HEIGHT: i32 = 55;

// Home

/// CONFIGURE button
pub const CONFIGURE_BUTTON: Rect =
    Rect::new(65, BUTTON_ROW_Y, SCREEN_WIDTH - 130, BUTTON_ROW_HEIGHT);

/// Status tile edge length
pub const STATUS_TILE_SIZE: i32 = 50;

/// Gap between status tiles
pub const STATUS_TILE_GAP: i32 = 20;

/// Status tiles per row
pub const STATUS_TILES_PER_ROW: usize = 5;

/// Number of status tiles
pub const STATUS_TILE_COUNT: usize = 10;

/// Position of a status tile on the Home screen
pub fn status_tile(index: usize) -> Rect {
    let col = (index % STATUS_TILES_PER_ROW) as i32;
    let row = (index / STATUS_TILES_PER_ROW) as i32;
    let pitch = STATUS_TILE_SIZE + STATUS_TILE_GAP;
    Rect::new(
        53 + STATUS_TILE_GAP + col * pitch,
        60 + STATUS_TILE_GAP + row * pitch,
        STATUS_TILE_SIZE,
        STATUS_TILE_SIZE,
    )
}

// DurationConfig

/// Width of the -/+ buttons
const STEP_BUTTON_WIDTH: i32 = 160;

/// Gap between the -/+ buttons and the screen center
const STEP_BUTTON_MARGIN: i32 = 12;

/// Decrement button
pub const MINUS_BUTTON: Rect = Rect::new(
    SCREEN_WIDTH / 2 - STEP_BUTTON_WIDTH - STEP_BUTTON_MARGIN,
    BUTTON_ROW_Y,
    STEP_BUTTON_WIDTH,
    BUTTON_ROW_HEIGHT,
);

/// Increment button
pub const PLUS_BUTTON: Rect = Rect::new(
    SCREEN_WIDTH / 2 + STEP_BUTTON_MARGIN,
    BUTTON_ROW_Y,
    STEP_BUTTON_WIDTH,
    BUTTON_ROW_HEIGHT,
);

/// OUT1 selector chip
pub const OUTPUT1_CHIP: Rect = Rect::new(58, 66, 80, 35);

/// OUT2 selector chip
pub const OUTPUT2_CHIP: Rect = Rect::new(148, 66, 80, 35);

/// FIRE button
pub const FIRE_BUTTON: Rect = Rect::new(SCREEN_WIDTH - 120, 140, 100, 40);

/// Sub-region repainted when only the duration value changes
pub const DURATION_VALUE_AREA: Rect = Rect::new(145, 100, 200, 110);

/// Top of the duration value text (top-center datum)
pub const DURATION_VALUE_Y: i32 = 115;

// Firing

/// Outer frame of the firing screen
pub const FIRING_FRAME: Rect = Rect::new(20, 60, SCREEN_WIDTH - 40, SCREEN_HEIGHT - 120);

/// Progress bar track
pub const PROGRESS_TRACK: Rect = Rect::new(40, 140, SCREEN_WIDTH - 80, 96);

/// Progress bar fill at 100 %
pub const PROGRESS_FILL: Rect = Rect::new(44, 144, SCREEN_WIDTH - 88, 88);

/// Top of the "FIRING OUTPUT n" heading
pub const FIRING_TITLE_Y: i32 = 90;

/// Top of the remaining-time text, drawn over the progress bar
pub const REMAINING_Y: i32 = 200;

// Hit-regions

/// Home: open the duration configuration
pub const HIT_CONFIGURE: HitRegion = HitRegion::new(
    CONFIGURE_BUTTON.x,
    CONFIGURE_BUTTON.y,
    CONFIGURE_BUTTON.x + CONFIGURE_BUTTON.width,
    CONFIGURE_BUTTON.y + CONFIGURE_BUTTON.height,
);

/// DurationConfig: select output 1
pub const HIT_OUTPUT1: HitRegion = HitRegion::new(
    OUTPUT1_CHIP.x,
    OUTPUT1_CHIP.y,
    OUTPUT1_CHIP.x + OUTPUT1_CHIP.width,
    OUTPUT1_CHIP.y + OUTPUT1_CHIP.height,
);

/// DurationConfig: select output 2
pub const HIT_OUTPUT2: HitRegion = HitRegion::new(
    OUTPUT2_CHIP.x,
    OUTPUT2_CHIP.y,
    OUTPUT2_CHIP.x + OUTPUT2_CHIP.width,
    OUTPUT2_CHIP.y + OUTPUT2_CHIP.height,
);

/// Lower third of the screen, split at the vertical center line
const LOWER_THIRD_TOP: i32 = 2 * SCREEN_HEIGHT / 3;

/// DurationConfig: decrement (left half of the lower third)
pub const HIT_DECREMENT: HitRegion =
    HitRegion::new(-1, LOWER_THIRD_TOP, SCREEN_WIDTH / 2, SCREEN_HEIGHT);

/// DurationConfig: increment (right half of the lower third)
pub const HIT_INCREMENT: HitRegion =
    HitRegion::new(SCREEN_WIDTH / 2, LOWER_THIRD_TOP, SCREEN_WIDTH, SCREEN_HEIGHT);

/// DurationConfig: start firing
pub const HIT_FIRE: HitRegion = HitRegion::new(
    FIRE_BUTTON.x,
    FIRE_BUTTON.y,
    SCREEN_WIDTH,
    FIRE_BUTTON.y + FIRE_BUTTON.height,
);
