/// Character code of the lowest base-85 digit (`!`); digit `d` maps to `0x21 + d`.
pub const DIGIT_BASE: u8 = 0x21;

/// Character code of the highest base-85 digit (`u`).
pub const DIGIT_MAX: u8 = 0x75;

/// Shorthand character for an all-zero 4-byte group (`z`).
pub const ZERO_SHORTHAND: u8 = 0x7a;

/// Character opening the end-of-data marker (`~`).
pub const EOD_MARKER: u8 = 0x7e;

/// Opening bookend delimiter.
pub const START_DELIMITER: &str = "<~";

/// Closing bookend delimiter.
pub const END_DELIMITER: &str = "~>";

/// Positional weights of the five base-85 digits, most significant first.
pub const POW85: [u32; 5] = [52_200_625, 614_125, 7_225, 85, 1];
