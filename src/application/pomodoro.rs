//! Pomodoro timer use cases

use crate::domain::{PomodoroSession, PomodoroTimer};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use std::thread;
use std::time::Duration;

pub struct PomodoroService {
    repository: FileSystemRepository,
}

impl PomodoroService {
    pub fn new(repository: FileSystemRepository) -> Self {
        PomodoroService { repository }
    }

    /// Run `timer` to completion, sleeping `tick` between seconds and
    /// calling `on_tick` after each one. A finished work session is
    /// recorded and returned.
    pub fn run<F>(
        &self,
        mut timer: PomodoroTimer,
        tick: Duration,
        mut on_tick: F,
    ) -> Result<Option<PomodoroSession>>
    where
        F: FnMut(&PomodoroTimer),
    {
        timer.start();
        tracing::debug!(mode = %timer.mode(), seconds = timer.remaining(), "timer started");

        while !timer.is_finished() {
            thread::sleep(tick);
            let finished = timer.tick();
            on_tick(&timer);
            if let Some(session) = finished {
                self.record(&session)?;
                return Ok(Some(session));
            }
        }
        Ok(None)
    }

    /// History is kept newest first.
    pub fn record(&self, session: &PomodoroSession) -> Result<()> {
        self.repository.update(|items: &mut Vec<PomodoroSession>| {
            items.insert(0, session.clone());
            Ok(())
        })
    }

    pub fn history(&self) -> Result<Vec<PomodoroSession>> {
        self.repository.load::<PomodoroSession>()
    }

    /// Remove every session; returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let count = self.history()?.len();
        self.repository.save::<PomodoroSession>(&[])?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::workspace;
    use crate::domain::pomodoro::{UNTITLED_TASK, WORK_MINUTES};
    use crate::domain::{SessionStatus, TimerMode};

    #[test]
    fn test_work_session_recorded_newest_first() {
        let (_temp, repo) = workspace();
        let service = PomodoroService::new(repo);

        let timer = PomodoroTimer::new(TimerMode::Work, "Write driver").with_seconds(3);
        let mut ticks = Vec::new();
        let first = service
            .run(timer, Duration::ZERO, |t| ticks.push(t.remaining()))
            .unwrap()
            .unwrap();
        assert_eq!(ticks, vec![2, 1, 0]);
        assert_eq!(first.status, SessionStatus::Completed);
        assert_eq!(first.duration, WORK_MINUTES);

        let timer = PomodoroTimer::new(TimerMode::Work, "").with_seconds(1);
        let second = service.run(timer, Duration::ZERO, |_| {}).unwrap().unwrap();
        assert_eq!(second.task_name, UNTITLED_TASK);

        let history = service.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
    }

    #[test]
    fn test_break_produces_no_session() {
        let (_temp, repo) = workspace();
        let service = PomodoroService::new(repo);

        let timer = PomodoroTimer::new(TimerMode::Break, "").with_seconds(2);
        assert!(service.run(timer, Duration::ZERO, |_| {}).unwrap().is_none());
        assert!(service.history().unwrap().is_empty());
    }

    #[test]
    fn test_clear_history() {
        let (_temp, repo) = workspace();
        let service = PomodoroService::new(repo);
        let timer = PomodoroTimer::new(TimerMode::Work, "x").with_seconds(1);
        service.run(timer, Duration::ZERO, |_| {}).unwrap();

        assert_eq!(service.clear().unwrap(), 1);
        assert!(service.history().unwrap().is_empty());
    }
}
