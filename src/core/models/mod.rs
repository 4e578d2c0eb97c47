pub mod environment;
pub mod report;
