//! Dataset input and report output.
//!
//! [`reader::DatasetReader`] turns a text table into a validated dataset;
//! [`report::ReportWriter`] prints the lattice tree or the closure table of a
//! computed skycube.

pub mod reader;
pub mod report;

pub use reader::DatasetReader;
pub use report::{ReportWriter, SkylineDisplay, result_path};
