pub mod chart;
pub mod styles;


pub use chart::{
    render_report, render_report_async, render_retention, render_top_contributors,
    render_total_contributions, render_total_contributors, RETENTION_FILE,
    TOP_CONTRIBUTORS_FILE, TOTAL_CONTRIBUTIONS_FILE, TOTAL_CONTRIBUTORS_FILE,
};
pub use styles::{ChartStyle, ChartTheme};
