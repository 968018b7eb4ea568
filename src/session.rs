// src/session.rs

//! Client-held state of one in-progress assessment session.
//!
//! The session is modeled as a pure state machine: UI events are applied to
//! an owned state value and yield the next state plus an effect the caller
//! must run. The timer and the answer ledger live in the same value because
//! their interplay is the correctness-critical part: whether the countdown
//! expires or the user submits manually, the submit effect is emitted at
//! most once, and an abandoned session emits it never.
//!
//! The countdown is driven by the caller delivering one `Tick` per second;
//! the server does not independently re-verify elapsed time.

use std::collections::HashMap;

use crate::models::question::SanitizedQuestion;

/// Countdown state for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    Running { remaining_secs: u64 },
    Expired,
    Cancelled,
}

/// Lifecycle of the session as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    /// A submission has been triggered; all further input is ignored.
    Submitting,
    /// Abandoned; no attempt will ever be recorded for this session.
    Terminated,
}

/// UI events applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second of wall-clock time has elapsed.
    Tick,
    /// Select an option for the currently displayed question.
    SelectOption(usize),
    /// Move to the next question. Requires the current one to be answered.
    Advance,
    /// Move to the previous question. Never gated; answers may be revised.
    Retreat,
    /// Explicit user submission from the last question.
    Submit,
    /// Navigate away; discard the session without submitting.
    Abandon,
}

/// What the caller must do after applying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    None,
    /// Submit the recorded answers for scoring. Emitted at most once per
    /// session, whether triggered by expiry or by explicit user action.
    SubmitAnswers(HashMap<i64, i64>),
}

#[derive(Debug, Clone)]
pub struct TestSession {
    course_id: i64,
    questions: Vec<SanitizedQuestion>,
    timer: Timer,
    phase: Phase,
    current_index: usize,
    answers: HashMap<i64, i64>,
    /// Guard flag: suppresses any second submit trigger, e.g. the timer
    /// expiring on the same tick a manual submit is in flight.
    submitted: bool,
}

impl TestSession {
    pub fn new(course_id: i64, questions: Vec<SanitizedQuestion>, duration_secs: u64) -> Self {
        Self {
            course_id,
            questions,
            timer: Timer::Running {
                remaining_secs: duration_secs,
            },
            phase: Phase::InProgress,
            current_index: 0,
            answers: HashMap::new(),
            submitted: false,
        }
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    pub fn timer(&self) -> Timer {
        self.timer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&SanitizedQuestion> {
        self.questions.get(self.current_index)
    }

    pub fn answers(&self) -> &HashMap<i64, i64> {
        &self.answers
    }

    fn current_answered(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.answers.contains_key(&q.id))
    }

    fn on_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }

    /// Forward navigation is enabled only once the displayed question has a
    /// recorded answer; no skipping is permitted.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::InProgress && !self.on_last_question() && self.current_answered()
    }

    /// Manual submission is enabled on the last question once it is
    /// answered. Sequential gating guarantees every question is answered by
    /// then. A zero-question session may submit immediately.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::InProgress
            && (self.questions.is_empty() || (self.on_last_question() && self.current_answered()))
    }

    /// Applies one event, returning the next state and the effect to run.
    pub fn apply(mut self, event: SessionEvent) -> (Self, SessionEffect) {
        if self.phase != Phase::InProgress {
            return (self, SessionEffect::None);
        }

        match event {
            SessionEvent::Tick => match self.timer {
                Timer::Running { remaining_secs } if remaining_secs > 1 => {
                    self.timer = Timer::Running {
                        remaining_secs: remaining_secs - 1,
                    };
                    (self, SessionEffect::None)
                }
                Timer::Running { .. } => {
                    self.timer = Timer::Expired;
                    self.trigger_submit()
                }
                _ => (self, SessionEffect::None),
            },
            SessionEvent::SelectOption(option_index) => {
                if let Some(question) = self.questions.get(self.current_index) {
                    // Idempotent upsert; out-of-range indices are ignored.
                    if option_index < question.options.len() {
                        self.answers.insert(question.id, option_index as i64);
                    }
                }
                (self, SessionEffect::None)
            }
            SessionEvent::Advance => {
                if self.can_advance() {
                    self.current_index += 1;
                }
                (self, SessionEffect::None)
            }
            SessionEvent::Retreat => {
                self.current_index = self.current_index.saturating_sub(1);
                (self, SessionEffect::None)
            }
            SessionEvent::Submit => {
                if self.can_submit() {
                    self.timer = Timer::Cancelled;
                    self.trigger_submit()
                } else {
                    (self, SessionEffect::None)
                }
            }
            SessionEvent::Abandon => {
                self.timer = Timer::Cancelled;
                self.phase = Phase::Terminated;
                (self, SessionEffect::None)
            }
        }
    }

    fn trigger_submit(mut self) -> (Self, SessionEffect) {
        if self.submitted {
            return (self, SessionEffect::None);
        }
        self.submitted = true;
        self.phase = Phase::Submitting;
        let answers = self.answers.clone();
        (self, SessionEffect::SubmitAnswers(answers))
    }
}
