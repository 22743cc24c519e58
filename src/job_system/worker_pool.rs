//! Fixed pool of worker threads with a fan-out/fan-in execution model.
//!
//! Jobs are queued up front, then `execute` dispatches the whole batch over
//! a crossbeam channel and blocks until every job has run. Workers live for
//! the lifetime of the pool; dropping the pool closes the channel and joins
//! them.

use std::thread::JoinHandle;

use crossbeam::channel::{unbounded, Receiver, Sender};
use crossbeam::sync::WaitGroup;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

struct Packet {
    job: Job,
    wg: WaitGroup,
}

fn worker_loop(rx: Receiver<Packet>) {
    while let Ok(packet) = rx.recv() {
        (packet.job)();
        drop(packet.wg);
    }
}

pub struct WorkerPool {
    tx: Sender<Packet>,
    handles: Vec<JoinHandle<()>>,
    queued: Vec<Job>,
}

impl WorkerPool {
    /// Spawns `num_workers` threads; 0 means one per hardware thread.
    pub fn new(num_workers: usize) -> Self {
        let num_workers = if num_workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            num_workers
        };

        let (tx, rx) = unbounded::<Packet>();
        let handles = (0..num_workers)
            .map(|i| {
                let rx = rx.clone();
                std::thread::Builder::new()
                    .name(format!("worker-{i}"))
                    .spawn(move || worker_loop(rx))
                    .unwrap()
            })
            .collect();

        log::info!("worker pool started with {} threads", num_workers);

        Self {
            tx,
            handles,
            queued: Vec::new(),
        }
    }

    pub fn num_workers(&self) -> usize {
        self.handles.len()
    }

    pub fn queue_length(&self) -> usize {
        self.queued.len()
    }

    /// Adds a job to the pending batch. Nothing runs until `execute`.
    pub fn queue(&mut self, job: Job) {
        self.queued.push(job);
    }

    /// Dispatches every queued job and blocks until all of them have run.
    pub fn execute(&mut self) {
        let wg = WaitGroup::new();
        for job in self.queued.drain(..) {
            let packet = Packet {
                job,
                wg: wg.clone(),
            };
            // workers outlive every send while the pool is alive
            self.tx.send(packet).unwrap();
        }
        wg.wait();
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // closing the channel ends each worker_loop
        let (closed, _) = unbounded();
        self.tx = closed;
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}
