//! Workload layer: job counters and queue statistics.

use chrono::{Duration, NaiveDateTime};

use crate::model::workload::{JobState, Scheduler};

const MILLIS_PER_HOUR: f64 = 3_600_000.;

fn hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

pub fn count_jobs(scheduler: &Scheduler, state: JobState) -> usize {
    scheduler.jobs().filter(|job| job.state == state).count()
}

/// Returns average time in hours spent in queue by completed jobs, 0 if there are none.
pub fn average_queue_time_hours(scheduler: &Scheduler) -> f64 {
    let queue_times = scheduler
        .jobs()
        .filter(|job| job.state == JobState::Completed)
        .filter_map(|job| job.start_time.map(|start| hours(start - job.submit_time)))
        .collect::<Vec<_>>();
    if queue_times.is_empty() {
        0.
    } else {
        queue_times.iter().sum::<f64>() / queue_times.len() as f64
    }
}

/// Returns GPU-hours consumed by completed jobs and by running jobs up to `now`.
pub fn total_gpu_hours(scheduler: &Scheduler, now: NaiveDateTime) -> f64 {
    scheduler
        .jobs()
        .map(|job| match (job.state, job.start_time, job.end_time) {
            (JobState::Running, Some(start), _) => job.gpu_count as f64 * hours(now - start),
            (JobState::Completed, Some(start), Some(end)) => job.gpu_count as f64 * hours(end - start),
            _ => 0.,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::model::workload::{Job, JobQueue, JobType, Priority, SchedulingAlgorithm};

    fn time(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn job(id: &str, state: JobState, submit: NaiveDateTime, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Job {
        Job {
            id: id.to_string(),
            job_type: JobType::Training,
            priority: Priority::Standard,
            user_id: "user".to_string(),
            gpu_count: 8,
            gpu_type: "H100_SXM".to_string(),
            memory_gb: 640.,
            estimated_duration_hours: 2.,
            state,
            submit_time: submit,
            start_time: start,
            end_time: end,
            progress_pct: 0.,
            assigned_nodes: Vec::new(),
            assigned_gpus: Vec::new(),
            checkpoint_interval_hours: 1.,
            last_checkpoint: None,
        }
    }

    fn scheduler(jobs: Vec<Job>) -> Scheduler {
        Scheduler {
            queues: vec![JobQueue {
                id: "queue-default".to_string(),
                name: "Default Queue".to_string(),
                jobs,
                max_queue_depth: 1000,
                default_priority: Priority::Standard,
            }],
            scheduling_algorithm: SchedulingAlgorithm::Fifo,
        }
    }

    #[test]
    fn test_empty_scheduler() {
        let scheduler = scheduler(Vec::new());
        assert_eq!(count_jobs(&scheduler, JobState::Queued), 0);
        assert_eq!(average_queue_time_hours(&scheduler), 0.);
        assert_eq!(total_gpu_hours(&scheduler, time(12, 0)), 0.);
    }

    #[test]
    fn test_job_statistics() {
        let scheduler = scheduler(vec![
            job("a", JobState::Completed, time(0, 0), Some(time(1, 0)), Some(time(3, 0))),
            job("b", JobState::Completed, time(0, 0), Some(time(0, 30)), Some(time(1, 30))),
            job("c", JobState::Running, time(2, 0), Some(time(4, 0)), None),
            job("d", JobState::Queued, time(5, 0), None, None),
            job("e", JobState::Queued, time(5, 0), None, None),
        ]);
        assert_eq!(count_jobs(&scheduler, JobState::Queued), 2);
        assert_eq!(count_jobs(&scheduler, JobState::Running), 1);
        assert_eq!(count_jobs(&scheduler, JobState::Completed), 2);
        assert_abs_diff_eq!(average_queue_time_hours(&scheduler), 0.75, epsilon = 1e-12);
        // 8 * 2h + 8 * 1h + 8 * 2h of the running job
        assert_abs_diff_eq!(total_gpu_hours(&scheduler, time(6, 0)), 40., epsilon = 1e-12);
    }
}
