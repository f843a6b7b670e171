//! Page Components

mod admin;
mod dashboard;
mod report_detail;
mod reports;
mod settings;
mod stream_editor;
mod streams;

pub use admin::Admin;
pub use dashboard::Dashboard;
pub use report_detail::ReportDetail;
pub use reports::Reports;
pub use settings::Settings;
pub use stream_editor::StreamEditor;
pub use streams::Streams;
