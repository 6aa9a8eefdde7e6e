use super::dataset_source::DatasetSource;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

pub type FileSource = DatasetSource<FsBackend>;

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DatasetSource::with_backend(FsBackend::new(root))
    }
}
