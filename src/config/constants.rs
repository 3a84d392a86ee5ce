// Grid Cell Values
pub const VOID_CELL: i32 = -1;               // structural void, never usable
pub const EMPTY_CELL: i32 = 0;

// Balance Tolerance
pub const TOLERANCE_DIVISOR: i32 = 10;       // |left - right| <= total / 10

// Move Selection
pub const NEAR_BALANCE_THRESHOLD: i32 = 1;   // early exit when within 1 unit of the ideal half weight

// Reference Hold Layout
pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 12;

// Run Control
pub const DEFAULT_MAX_ROUNDS: usize = 64;

// Demo Grid Generation
pub const DEMO_MIN_WEIGHT: i32 = 50;
pub const DEMO_MAX_WEIGHT: i32 = 500;
pub const DEMO_MAX_STACK_RATIO: f64 = 0.5;   // tallest random stack relative to grid height
