pub mod file_saver;

pub use file_saver::DownloadDirFileSaver;
