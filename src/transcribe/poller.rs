use std::time::Duration;

use crate::config::PollingConfig;
use crate::error::{Error, Result};
use crate::transcribe::client::TranscriptionClient;
use crate::transcribe::job::{JobSnapshot, JobStatus};

/// Anything that can report the current state of a submitted job.
pub trait StatusSource {
    fn check_status(&self, job_id: &str) -> Result<JobSnapshot>;
}

impl StatusSource for TranscriptionClient {
    fn check_status(&self, job_id: &str) -> Result<JobSnapshot> {
        TranscriptionClient::check_status(self, job_id)
    }
}

/// Drives a submitted job to a terminal state with bounded, fixed-cadence
/// polling. Job completion is seconds-to-low-minutes and a GET every few
/// seconds is cheap, so there is no backoff: a plain loop with a constant
/// interval is the whole strategy.
pub struct JobPoller {
    max_attempts: u32,
    interval: Duration,
}

impl JobPoller {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_secs(config.interval_secs))
    }

    /// Poll until the job reaches a terminal state.
    ///
    /// Returns the completed snapshot, or `TranscriptionFailed` as soon as the
    /// service reports an error (the job itself is never retried), or
    /// `TranscriptionTimedOut` once `max_attempts` checks have all come back
    /// non-terminal.
    pub fn wait_for_completion(
        &self,
        source: &impl StatusSource,
        job_id: &str,
    ) -> Result<JobSnapshot> {
        self.poll_with(source, job_id, &mut std::thread::sleep)
    }

    /// Poll loop with the wait primitive injected, so tests can observe the
    /// schedule without wall-clock delay.
    fn poll_with(
        &self,
        source: &impl StatusSource,
        job_id: &str,
        sleep: &mut dyn FnMut(Duration),
    ) -> Result<JobSnapshot> {
        for attempt in 1..=self.max_attempts {
            tracing::debug!("Checking status (attempt {}/{})", attempt, self.max_attempts);
            let snapshot = source.check_status(job_id)?;

            match snapshot.status {
                JobStatus::Completed => {
                    tracing::info!("Transcription completed after {} check(s)", attempt);
                    return Ok(snapshot);
                }
                JobStatus::Error => {
                    let message = snapshot
                        .error
                        .unwrap_or_else(|| "transcription failed".to_string());
                    return Err(Error::TranscriptionFailed(message));
                }
                JobStatus::Queued | JobStatus::Processing => {
                    sleep(self.interval);
                }
            }
        }

        Err(Error::TranscriptionTimedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Serves a scripted sequence of statuses and counts the checks made.
    struct ScriptedSource {
        statuses: RefCell<Vec<JobStatus>>,
        checks: RefCell<u32>,
        error_message: Option<String>,
    }

    impl ScriptedSource {
        fn new(statuses: Vec<JobStatus>) -> Self {
            Self {
                statuses: RefCell::new(statuses),
                checks: RefCell::new(0),
                error_message: None,
            }
        }

        fn checks(&self) -> u32 {
            *self.checks.borrow()
        }
    }

    impl StatusSource for ScriptedSource {
        fn check_status(&self, job_id: &str) -> Result<JobSnapshot> {
            *self.checks.borrow_mut() += 1;
            let mut statuses = self.statuses.borrow_mut();
            assert!(!statuses.is_empty(), "more checks than scripted statuses");
            let status = statuses.remove(0);
            Ok(JobSnapshot {
                id: job_id.to_string(),
                status,
                text: (status == JobStatus::Completed).then(|| "done".to_string()),
                utterances: None,
                error: if status == JobStatus::Error {
                    self.error_message.clone()
                } else {
                    None
                },
            })
        }
    }

    fn poll_recording_sleeps(
        poller: &JobPoller,
        source: &ScriptedSource,
    ) -> (Result<JobSnapshot>, Vec<Duration>) {
        let sleeps = RefCell::new(Vec::new());
        let result = poller.poll_with(source, "job-1", &mut |d| sleeps.borrow_mut().push(d));
        (result, sleeps.into_inner())
    }

    #[test]
    fn test_completes_after_two_processing_checks() {
        let source = ScriptedSource::new(vec![
            JobStatus::Processing,
            JobStatus::Processing,
            JobStatus::Completed,
        ]);
        let poller = JobPoller::new(40, Duration::from_secs(3));

        let (result, sleeps) = poll_recording_sleeps(&poller, &source);
        let snapshot = result.unwrap();

        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(source.checks(), 3);
        // Two waits of 3s before the completed snapshot came back
        assert_eq!(sleeps, vec![Duration::from_secs(3); 2]);
        assert!(sleeps.iter().sum::<Duration>() >= Duration::from_secs(6));
    }

    #[test]
    fn test_queued_counts_as_non_terminal() {
        let source = ScriptedSource::new(vec![JobStatus::Queued, JobStatus::Completed]);
        let poller = JobPoller::new(40, Duration::from_secs(3));

        let (result, sleeps) = poll_recording_sleeps(&poller, &source);
        assert!(result.is_ok());
        assert_eq!(source.checks(), 2);
        assert_eq!(sleeps.len(), 1);
    }

    #[test]
    fn test_times_out_after_exactly_max_attempts() {
        let source = ScriptedSource::new(vec![JobStatus::Processing; 40]);
        let poller = JobPoller::new(40, Duration::from_secs(3));

        let (result, _sleeps) = poll_recording_sleeps(&poller, &source);
        assert!(matches!(result, Err(Error::TranscriptionTimedOut)));
        // 40 checks, never a 41st
        assert_eq!(source.checks(), 40);
    }

    #[test]
    fn test_error_status_fails_immediately() {
        let mut source = ScriptedSource::new(vec![JobStatus::Error]);
        source.error_message = Some("audio too short".to_string());
        let poller = JobPoller::new(40, Duration::from_secs(3));

        let (result, sleeps) = poll_recording_sleeps(&poller, &source);
        match result {
            Err(Error::TranscriptionFailed(message)) => {
                assert_eq!(message, "audio too short");
            }
            other => panic!("expected TranscriptionFailed, got {:?}", other),
        }
        assert_eq!(source.checks(), 1);
        assert!(sleeps.is_empty(), "error must not wait before surfacing");
    }

    #[test]
    fn test_error_without_message_gets_default() {
        let source = ScriptedSource::new(vec![JobStatus::Error]);
        let poller = JobPoller::new(40, Duration::from_secs(3));

        let (result, _) = poll_recording_sleeps(&poller, &source);
        match result {
            Err(Error::TranscriptionFailed(message)) => {
                assert_eq!(message, "transcription failed");
            }
            other => panic!("expected TranscriptionFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_status_check_failure_propagates() {
        struct FailingSource;
        impl StatusSource for FailingSource {
            fn check_status(&self, _job_id: &str) -> Result<JobSnapshot> {
                Err(Error::StatusCheckFailed(500))
            }
        }

        let poller = JobPoller::new(40, Duration::from_secs(3));
        let result = poller.poll_with(&FailingSource, "job-1", &mut |_| {});
        assert!(matches!(result, Err(Error::StatusCheckFailed(500))));
    }
}
