//! # Task Management System
//!
//! A bounded pool of worker threads for chunk generation and meshing.
//!
//! ## Architecture Overview
//! - `TaskManager`: owns the workers and distributes tasks round-robin
//! - `Task`: a unit of work executed on a worker
//! - `TaskResult`: the outcome of a task, applied on the owner thread
//! - `TaskChannel`: the pair of channels linking the owner to one worker
//!
//! ## Backpressure
//! Each worker accepts at most `tasks_per_worker` tasks at a time. A task only stops
//! counting against that bound once the owner has drained its result in
//! `process_completed_tasks()`. There is no queue: publishing while every worker is
//! full hands the task back to the caller, who re-requests the work on a later tick.
//!
//! ## Task Lifecycle
//! 1. The owner publishes a task via `TaskManager::publish_task()`
//! 2. A worker processes it and sends the result back
//! 3. The owner calls `process_completed_tasks()` once per tick, which applies each
//!    result to the world and frees its slot
//!
//! A worker that panics takes its unfinished tasks with it. The next
//! `process_completed_tasks()` notices the dead channel, logs the lost tasks and
//! stops counting the worker toward `capacity()`.

pub mod task;

use log::{error, info};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use task::{Task, TaskResult};

use super::voxels::world::World;

/// A communication channel between the owner thread and one worker thread.
///
/// Dropping the sender ends the worker's receive loop; the manager joins the thread
/// on drop.
pub struct TaskChannel {
    task_sender: Option<Sender<Box<dyn Task + Send>>>,
    result_receiver: Receiver<Box<dyn TaskResult + Send>>,
    num_tasks_in_flight: usize,
    worker: Option<JoinHandle<()>>,
}

/// Manages a pool of worker threads and coordinates task execution.
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    current_channel: usize,
    tasks_per_worker: usize,
}

impl TaskManager {
    /// Creates a new `TaskManager` and spawns its workers.
    ///
    /// # Arguments
    /// * `num_workers` - Number of worker threads to spawn
    /// * `tasks_per_worker` - Tasks a single worker may have in flight at once
    ///
    /// Workers that fail to spawn are logged and skipped; a manager without workers
    /// reports itself as saturated.
    pub fn new(num_workers: usize, tasks_per_worker: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let (result_tx, result_rx) = channel::<Box<dyn TaskResult + Send>>();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = task.process();
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
            };

            let worker = match thread::Builder::new()
                .name(format!("chunk-worker-{}", index))
                .spawn(task_closure)
            {
                Ok(worker) => worker,
                Err(err) => {
                    error!("Failed to spawn worker {}: {}", index, err);
                    continue;
                }
            };

            channels.push(TaskChannel {
                task_sender: Some(task_tx),
                result_receiver: result_rx,
                num_tasks_in_flight: 0,
                worker: Some(worker),
            });
        }

        info!(
            "Task manager started {} workers ({} tasks each, available parallelism: {:?})",
            channels.len(),
            tasks_per_worker,
            thread::available_parallelism()
        );

        TaskManager {
            channels,
            current_channel: 0,
            tasks_per_worker,
        }
    }

    /// Maximum number of tasks in flight across all live workers.
    pub fn capacity(&self) -> usize {
        self.channels
            .iter()
            .filter(|channel| channel.task_sender.is_some())
            .count()
            * self.tasks_per_worker
    }

    /// Number of published tasks whose results have not been drained yet.
    pub fn in_flight(&self) -> usize {
        self.channels
            .iter()
            .map(|channel| channel.num_tasks_in_flight)
            .sum()
    }

    /// Whether a task published now would be accepted.
    pub fn has_capacity(&self) -> bool {
        self.find_available_channel().is_some()
    }

    /// Finds a worker below its in-flight bound, round-robin from the last used one.
    fn find_available_channel(&self) -> Option<usize> {
        let count = self.channels.len();
        (0..count)
            .map(|offset| (self.current_channel + offset) % count)
            .find(|&index| {
                let channel = &self.channels[index];
                channel.task_sender.is_some() && channel.num_tasks_in_flight < self.tasks_per_worker
            })
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `Ok(())` if a worker accepted the task
    /// - `Err(task)` if every worker is at its bound or disconnected
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> Result<(), Box<dyn Task + Send>> {
        let Some(channel_idx) = self.find_available_channel() else {
            return Err(task);
        };

        let channel = &mut self.channels[channel_idx];
        let Some(sender) = &channel.task_sender else {
            return Err(task);
        };

        match sender.send(task) {
            Ok(()) => {
                channel.num_tasks_in_flight += 1;
                self.current_channel = (channel_idx + 1) % self.channels.len();
                Ok(())
            }
            Err(returned) => {
                error!("Worker {} disconnected", channel_idx);
                channel.task_sender = None;
                Err(returned.0)
            }
        }
    }

    /// Applies every completed task result to the world and frees its slot.
    ///
    /// Must be called on the owner thread, typically once per tick. A worker found dead
    /// here has its unfinished tasks written off and is retired.
    ///
    /// # Returns
    /// The number of results handled.
    pub fn process_completed_tasks(&mut self, world: &mut World) -> usize {
        let mut handled = 0;
        for (index, channel) in self.channels.iter_mut().enumerate() {
            loop {
                match channel.result_receiver.try_recv() {
                    Ok(result) => {
                        channel.num_tasks_in_flight = channel.num_tasks_in_flight.saturating_sub(1);
                        result.handle_result(world);
                        handled += 1;
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        if channel.task_sender.take().is_some() || channel.num_tasks_in_flight > 0 {
                            error!(
                                "Worker {} died with {} tasks in flight; its {} slots are retired",
                                index, channel.num_tasks_in_flight, self.tasks_per_worker
                            );
                        }
                        channel.num_tasks_in_flight = 0;
                        break;
                    }
                }
            }
        }
        handled
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for channel in &mut self.channels {
            channel.task_sender = None;
        }
        for channel in &mut self.channels {
            if let Some(worker) = channel.worker.take() {
                if worker.join().is_err() {
                    error!("A worker thread panicked");
                }
            }
        }
    }
}
