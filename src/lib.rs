pub mod config;
pub mod data;
pub mod details;
pub mod hierarchy;
pub mod layout;
pub mod nav;
pub mod net;
