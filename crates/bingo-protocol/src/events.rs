// Real-time event names — must match the bingo web client.

// server -> client
pub const SESSION_STATUS: &str = "session_status";
pub const NUMBER_DRAWN: &str = "number_drawn";
pub const BINGO_WIN: &str = "bingo_win";
pub const ERROR: &str = "error";

// client -> server
pub const MASTER_DRAW: &str = "master_draw";
pub const PLAYER_WIN: &str = "player_win";

// session_status messages
pub const STATUS_UPDATE_MESSAGE: &str = "Session status update.";
pub const SESSION_ACTIVE_MESSAGE: &str = "Session is now active!";
