#![forbid(unsafe_code)]

mod support;

pub use support::{heightmap_to_png, init_tracing};
