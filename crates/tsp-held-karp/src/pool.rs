use crossbeam_channel::{unbounded, Sender};
use log::{error, trace, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed set of worker threads fed from one job channel.
///
/// Threads are started once and reused for every layer of every solve.
/// Dropping the pool closes the channel and joins the threads.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        let (sender, receiver) = unbounded::<Job>();
        let mut workers = Vec::with_capacity(size.max(1));

        for id in 0..size.max(1) {
            let jobs = receiver.clone();
            let spawned = thread::Builder::new()
                .name(format!("held-karp-{id}"))
                .spawn(move || {
                    for job in jobs.iter() {
                        if catch_unwind(AssertUnwindSafe(job)).is_err() {
                            error!("worker {id}: job panicked");
                        }
                    }
                    trace!("worker {id}: channel closed");
                });
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => warn!("could not start worker {id}: {e}"),
            }
        }

        WorkerPool { sender: Some(sender), workers }
    }

    /// Threads actually running; 0 means jobs run on the caller's thread.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let job: Job = Box::new(job);
        let job = match (&self.sender, self.workers.is_empty()) {
            (Some(sender), false) => match sender.send(job) {
                Ok(()) => return,
                Err(rejected) => rejected.into_inner(),
            },
            _ => job,
        };
        if catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("inline job panicked");
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        drop(self.sender.take());
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("worker thread exited abnormally");
            }
        }
    }
}
