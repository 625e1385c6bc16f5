use std::io;
use std::thread::{self, JoinHandle};

/// A named background task whose result may be collected once.
///
/// Dropping the task detaches it; the thread keeps running to completion.
#[derive(Debug)]
pub struct DetachedTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> DetachedTask<T> {
    pub fn spawn<F>(name: &str, f: F) -> io::Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.to_string()).spawn(f)?;

        Ok(Self { handle })
    }
}

impl<T> DetachedTask<T> {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task. `None` if it panicked.
    pub fn join(self) -> Option<T> {
        self.handle.join().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_join_returns_the_result() {
        let task = DetachedTask::spawn("adder", || 2 + 2).unwrap();

        assert_eq!(task.join(), Some(4));
    }

    #[test]
    fn test_panicking_task_joins_as_none() {
        let task = DetachedTask::spawn("panicker", || -> u32 { panic!("boom") }).unwrap();

        assert_eq!(task.join(), None);
    }

    #[test]
    fn test_dropped_task_keeps_running() {
        let (tx, rx) = mpsc::channel();

        let task = DetachedTask::spawn("detached", move || {
            thread::sleep(Duration::from_millis(20));
            tx.send(thread::current().name().map(str::to_string)).unwrap();
        })
        .unwrap();
        drop(task);

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("detached"));
    }
}
