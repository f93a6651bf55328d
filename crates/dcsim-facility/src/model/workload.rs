//! Workload layer: jobs, queues and the scheduler.
//!
//! The simulation reads job counters from the scheduler but doesn't move jobs between states.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Queued,
    Running,
    Completed,
    Failed,
    Preempted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Training,
    Inference,
    FineTuning,
    Evaluation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    Standard,
    Preemptible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingAlgorithm {
    Fifo,
    FairShare,
    Priority,
    Backfill,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub job_type: JobType,
    pub priority: Priority,
    pub user_id: String,
    pub gpu_count: u32,
    pub gpu_type: String,
    pub memory_gb: f64,
    pub estimated_duration_hours: f64,
    pub state: JobState,
    pub submit_time: NaiveDateTime,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub progress_pct: f64,
    pub assigned_nodes: Vec<String>,
    pub assigned_gpus: Vec<String>,
    pub checkpoint_interval_hours: f64,
    pub last_checkpoint: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobQueue {
    pub id: String,
    pub name: String,
    pub jobs: Vec<Job>,
    pub max_queue_depth: u32,
    pub default_priority: Priority,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    pub queues: Vec<JobQueue>,
    pub scheduling_algorithm: SchedulingAlgorithm,
}

impl Scheduler {
    /// Iterates over jobs of all queues.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.queues.iter().flat_map(|queue| queue.jobs.iter())
    }
}
