pub mod config_cmd;
pub mod done;
pub mod later;
pub mod now;
pub mod path;
pub mod start;
pub mod thought;
