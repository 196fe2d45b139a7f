/// Analyser family: the [`Analyser`] trait and the built-in analysers.
pub mod age;
pub mod analyser;
pub mod file_count;
pub mod file_info;
pub mod file_types;
pub mod top_files;

pub use age::StaleFilesAnalyser;
pub use analyser::{Analyser, SharedForest, SharedPaths};
pub use file_count::FileCountAnalyser;
pub use file_info::FileInfoAnalyser;
pub use file_types::{categorise, FileCategory, FileTypeCountAnalyser};
pub use top_files::LargestFilesAnalyser;
