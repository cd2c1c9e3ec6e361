#![no_std]

pub mod cmdline;
pub mod log;
pub mod paths;
