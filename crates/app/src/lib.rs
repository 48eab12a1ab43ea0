pub mod app_loop;
pub mod launch;
pub mod save_slot;
pub mod ui_text;

/// Directory name used for the platform data dir.
pub const APP_NAME: &str = "DevsDungeon";

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}
