//! Pomodoro focus timer

use crate::domain::ids::{generate_id, now_millis};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WORK_MINUTES: u32 = 25;
pub const BREAK_MINUTES: u32 = 5;
pub const UNTITLED_TASK: &str = "Untitled task";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Work,
    Break,
}

impl TimerMode {
    pub fn full_seconds(&self) -> u32 {
        match self {
            TimerMode::Work => WORK_MINUTES * 60,
            TimerMode::Break => BREAK_MINUTES * 60,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerMode::Work => f.write_str("work"),
            TimerMode::Break => f.write_str("break"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Completed,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: String,
    pub task_name: String,
    pub start_time: i64,
    /// Minutes
    pub duration: u32,
    pub status: SessionStatus,
}

/// Countdown state; advanced one second at a time by `tick`.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    mode: TimerMode,
    remaining: u32,
    running: bool,
    task_name: String,
    started_at: Option<i64>,
}

impl PomodoroTimer {
    pub fn new(mode: TimerMode, task_name: &str) -> Self {
        PomodoroTimer {
            mode,
            remaining: mode.full_seconds(),
            running: false,
            task_name: task_name.to_string(),
            started_at: None,
        }
    }

    /// Override the countdown length; used for shortened sessions.
    pub fn with_seconds(mut self, seconds: u32) -> Self {
        self.remaining = seconds;
        self
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or resume; the start time is recorded on the first start only.
    pub fn start(&mut self) {
        if !self.running {
            if self.started_at.is_none() {
                self.started_at = Some(now_millis());
            }
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.mode.full_seconds();
    }

    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.reset();
    }

    /// Advance one second. Returns the finished session when a work
    /// countdown reaches zero; break countdowns finish without one.
    pub fn tick(&mut self) -> Option<PomodoroSession> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }

        self.running = false;
        if self.mode != TimerMode::Work {
            return None;
        }
        let task_name = if self.task_name.trim().is_empty() {
            UNTITLED_TASK.to_string()
        } else {
            self.task_name.clone()
        };
        Some(PomodoroSession {
            id: generate_id(""),
            task_name,
            start_time: self.started_at.unwrap_or_else(now_millis),
            duration: WORK_MINUTES,
            status: SessionStatus::Completed,
        })
    }

    /// True once the countdown has reached zero
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

/// `MM:SS`
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn test_new_timer_full_length() {
        let t = PomodoroTimer::new(TimerMode::Work, "x");
        assert_eq!(t.remaining(), 1500);
        assert!(!t.is_running());
        let b = PomodoroTimer::new(TimerMode::Break, "x");
        assert_eq!(b.remaining(), 300);
    }

    #[test]
    fn test_tick_ignored_when_paused() {
        let mut t = PomodoroTimer::new(TimerMode::Work, "x");
        assert!(t.tick().is_none());
        assert_eq!(t.remaining(), 1500);
        t.start();
        t.tick();
        t.pause();
        t.tick();
        assert_eq!(t.remaining(), 1499);
    }

    #[test]
    fn test_work_completion_yields_session() {
        let mut t = PomodoroTimer::new(TimerMode::Work, "").with_seconds(2);
        t.start();
        assert!(t.tick().is_none());
        let session = t.tick().expect("session at zero");
        assert_eq!(session.task_name, UNTITLED_TASK);
        assert_eq!(session.duration, WORK_MINUTES);
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(!t.is_running());
        assert!(t.is_finished());
    }

    #[test]
    fn test_break_completion_has_no_session() {
        let mut t = PomodoroTimer::new(TimerMode::Break, "rest").with_seconds(1);
        t.start();
        assert!(t.tick().is_none());
        assert!(t.is_finished());
    }

    #[test]
    fn test_switch_mode_resets_and_stops() {
        let mut t = PomodoroTimer::new(TimerMode::Work, "x");
        t.start();
        t.tick();
        t.switch_mode(TimerMode::Break);
        assert_eq!(t.mode(), TimerMode::Break);
        assert_eq!(t.remaining(), 300);
        assert!(!t.is_running());
    }
}
