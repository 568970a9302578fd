pub mod aggregate;
pub mod cli;
pub mod collect;
pub mod error;
pub mod logging;
pub mod model;
pub mod rank;
pub mod report;
pub mod series;
pub mod util;

pub use error::{ProfileError, Result};
