use std::path::Path;

/// Per-run progress handle; advanced exactly once per processed record.
pub trait ProgressHandle: Send {
    fn tick(&mut self);
}

/// Leveled message sink consumed by the pipeline.
///
/// Purely observational: nothing reported here feeds back into control
/// flow. Frontends implement this to surface status to users.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
    fn log(&self, message: &str);
    fn progress(&self, total: usize) -> Box<dyn ProgressHandle>;
    fn print_path(&self, path: &Path);
}

/// Reporter over the global `log` facade.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }

    fn success(&self, message: &str) {
        log::info!("done: {message}");
    }

    fn log(&self, message: &str) {
        log::debug!("{message}");
    }

    fn progress(&self, total: usize) -> Box<dyn ProgressHandle> {
        Box::new(LogProgress { done: 0, total })
    }

    fn print_path(&self, path: &Path) {
        log::info!("saved {}", path.display());
    }
}

struct LogProgress {
    done: usize,
    total: usize,
}

impl ProgressHandle for LogProgress {
    fn tick(&mut self) {
        self.done += 1;
        log::info!("processed {}/{}", self.done, self.total);
    }
}

/// A no-op reporter sink.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn log(&self, _message: &str) {}

    fn progress(&self, _total: usize) -> Box<dyn ProgressHandle> {
        Box::new(NullProgress)
    }

    fn print_path(&self, _path: &Path) {}
}

struct NullProgress;

impl ProgressHandle for NullProgress {
    fn tick(&mut self) {}
}
