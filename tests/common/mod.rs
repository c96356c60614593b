#![allow(dead_code)]

pub mod listeners;
pub mod strategies;

#[allow(unused_imports)]
pub use listeners::*;
#[allow(unused_imports)]
pub use strategies::*;
