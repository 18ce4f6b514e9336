// Browser-side settings for the WASM front-end.

pub const LOG_LEVEL: log::Level = log::Level::Info;

// Canvas used by `mount_aroma_by_id` when no id is given
pub const DEFAULT_CANVAS_ID: &str = "aroma-canvas";
