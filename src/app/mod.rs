//! Client-side orchestration: state, reducer and the async runtime that talks
//! to the services.

pub mod output;
pub mod state;
pub mod store;

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::Services;
use crate::domain::Language;
use crate::infra::app_config::AppConfig;
use state::AppState;
use store::{Action, AsyncAction};

pub struct App {
    pub state: AppState,
    services: Services,
    autosave_delay: Duration,
    action_tx: mpsc::Sender<Action>,
    action_rx: mpsc::Receiver<Action>,
    /// Spawned tasks whose completion action has not been applied yet.
    in_flight: usize,
}

impl App {
    pub fn new(services: Services, language: Language, autosave_delay: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::channel(32);
        Self {
            state: AppState::new(language),
            services,
            autosave_delay,
            action_tx,
            action_rx,
            in_flight: 0,
        }
    }

    pub fn from_config(services: Services, config: &AppConfig) -> Self {
        Self::new(
            services,
            config.default_language.clone(),
            config.autosave_delay(),
        )
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn autosave_delay(&self) -> Duration {
        self.autosave_delay
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Run `task` in the background; its output comes back through the channel.
    pub(crate) fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = AsyncAction> + Send + 'static,
    {
        self.in_flight += 1;
        let action_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = task.await;
            let _ = action_tx.send(Action::Async(action)).await;
        });
    }

    /// Apply every completion that is already available.
    pub fn poll_action_messages(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.action_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(action);
            any = true;
        }
        any
    }

    /// Wait for the next completion and apply it. Returns `false` when nothing
    /// is in flight.
    pub async fn pump(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.action_rx.recv().await {
            Some(action) => {
                self.in_flight -= 1;
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Apply completions until no background work is left.
    pub async fn settle(&mut self) {
        while self.pump().await {}
    }
}
