use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Upper bound for a progress percentage
pub const MAX_PROGRESS_PERCENT: u32 = 100;

/// Largest goal, seed or donation amount accepted from input
pub const MAX_AMOUNT: Decimal = dec!(999999999999999.99);

/// Largest accepted upload (receipts and campaign images), in bytes
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// Receipt formats donors may upload
pub const RECEIPT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Campaign image formats
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Storage folder for donation receipts
pub const RECEIPTS_FOLDER: &str = "receipts";

/// Storage folder for campaign images
pub const CAMPAIGN_IMAGES_FOLDER: &str = "campaigns";

/// Default page size for donation listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a listing may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Longest accepted donor name / phone
pub const MAX_DONOR_NAME_LEN: usize = 255;
pub const MAX_DONOR_PHONE_LEN: usize = 30;
