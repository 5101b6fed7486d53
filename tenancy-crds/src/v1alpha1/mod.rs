pub mod config;
pub mod space;
pub mod spacebinding;
pub mod spacebindingrequest;
pub mod userrecord;
