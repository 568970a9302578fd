pub mod chart;
pub mod exec;
pub mod render;

pub use chart::render_chart;
pub use exec::{exec, ReportArgs};
pub use render::{render, ReportContext};
