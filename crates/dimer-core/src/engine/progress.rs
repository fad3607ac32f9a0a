use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Input directories have been listed.
    ScanFinished { monomers: usize, clusters: usize },

    BatchStart { total_jobs: u64 },
    /// One dimer has been written.
    DimerSaved { path: PathBuf },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
