/// Events emitted while a run walks through its frames.
#[derive(Debug, Clone)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    FrameDone { frame: usize },
    TaskFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback; a reporter without a callback
/// discards them.
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

    /// Opens a phase holding a task of `total` frames. Callers follow with one
    /// [`Progress::FrameDone`] per frame and [`finish_frames`](Self::finish_frames).
    pub fn start_frames(&self, phase: &'static str, total: usize) {
        self.report(Progress::PhaseStart { name: phase });
        self.report(Progress::TaskStart {
            total_steps: total as u64,
        });
    }

    pub fn finish_frames(&self) {
        self.report(Progress::TaskFinish);
        self.report(Progress::PhaseFinish);
    }
}
