// Request and response shapes of the FilterLogEvents operation
pub mod logs;
