mod configuration;
mod headers;
mod hooks;

#[allow(unused_imports)]
pub use {configuration::*, headers::*, hooks::*};
