// src/config/mod.rs
pub mod consts;
pub mod load;
pub mod options;
