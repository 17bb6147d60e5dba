//! The poll loop.
//!
//! `HomeworkBot` owns the clients, the transport and the `PollState`. Each
//! cycle fetches statuses for the current cursor, hands the answer to
//! `PollState::process`, logs what happened and delivers the resulting
//! notification, if any. Cycles never fail; the loop never ends.

use std::thread;
use std::time::Duration;

use chrono::Utc;
use homework_core::poller::failure_message;
use homework_core::{ApiError, CycleEvent, CycleReport, PollState, PracticumClient};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::notifier::Notifier;
use crate::transport::Transport;

pub struct HomeworkBot<T> {
    practicum: PracticumClient,
    notifier: Notifier,
    transport: T,
    state: PollState,
}

impl<T: Transport> HomeworkBot<T> {
    /// `cursor` is the `from_date` of the first poll, normally "now".
    pub fn new(practicum: PracticumClient, notifier: Notifier, transport: T, cursor: i64) -> Self {
        Self {
            practicum,
            notifier,
            transport,
            state: PollState::new(cursor),
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one cycle. `now` is the local clock used when the server does not
    /// report `current_date`.
    pub fn run_cycle(&mut self, now: i64) -> CycleReport {
        let answer = self.fetch();
        let report = self.state.process(answer, now);

        match &report.event {
            CycleEvent::NoUpdates => debug!("no new statuses"),
            CycleEvent::Unchanged => debug!("status unchanged since last message"),
            CycleEvent::StatusChanged => info!("homework status changed"),
            CycleEvent::Failed(err) => {
                error!("{}", failure_message(err));
                if report.notification.is_none() {
                    debug!("error already reported to chat");
                }
            }
        }
        if let Some(text) = &report.notification {
            self.notifier.send(&self.transport, text);
        }
        debug!(cursor = report.cursor, "cycle finished");
        report
    }

    /// Poll forever, sleeping `period` between cycles.
    pub fn run(&mut self, period: Duration) -> ! {
        loop {
            self.run_cycle(Utc::now().timestamp());
            thread::sleep(period);
        }
    }

    fn fetch(&self) -> Result<Value, ApiError> {
        let request = self.practicum.build_homework_statuses(self.state.cursor());
        let response = self
            .transport
            .execute(request)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = self.practicum.parse_homework_statuses(response)?;
        debug!("API request succeeded");
        Ok(body)
    }
}
