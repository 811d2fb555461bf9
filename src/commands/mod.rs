pub mod classify;
pub mod watch;
