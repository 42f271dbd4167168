#![forbid(unsafe_code)]
extern crate chrono;

pub mod duration;
pub mod time;

pub mod prelude {
    pub use crate::duration::*;
    pub use crate::time::*;
}
