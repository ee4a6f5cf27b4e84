mod delta;
mod descriptor;
mod error;
mod field;
mod map;
mod resolve;

#[allow(unused_imports)]
pub use {delta::*, descriptor::*, error::*, field::*, map::*, resolve::*};
