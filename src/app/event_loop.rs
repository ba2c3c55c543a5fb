use tokio::sync::mpsc::UnboundedReceiver;

use crate::command::CommandOutcome;
use crate::document::DocumentModel;
use crate::error::{AppError, AppResult};
use crate::event::DomainEvent;
use crate::input::ScriptStep;
use crate::pacer::PacerDriver;

use super::core::App;
use super::event_bus::EventBusRuntime;

impl App {
    /// Serially applies every event on the bus until a quit is requested or
    /// the bus closes. Pacer ticks arrive on the same queue as input.
    pub async fn run(
        &mut self,
        doc: &mut dyn DocumentModel,
        script: Vec<ScriptStep>,
    ) -> AppResult<()> {
        if doc.page_count() == 0 {
            return Err(AppError::invalid_argument("document has no pages"));
        }

        let (tx, mut rx, mut bus) = EventBusRuntime::spawn(script);
        let pacer = PacerDriver::spawn(tx, self.controller.pacer());

        let result = self.drain_events(doc, &mut rx, &pacer).await;

        pacer.shutdown();
        bus.shutdown();
        result
    }

    async fn drain_events(
        &mut self,
        doc: &mut dyn DocumentModel,
        rx: &mut UnboundedReceiver<DomainEvent>,
        pacer: &PacerDriver,
    ) -> AppResult<()> {
        while let Some(event) = rx.recv().await {
            log::trace!("event {event:?}");
            let outcome = self.handle_domain_event(doc, event)?;
            pacer.sync(self.controller.pacer());
            if outcome == CommandOutcome::QuitRequested {
                log::debug!("event loop stopping: {}", self.status.message);
                break;
            }
        }
        Ok(())
    }
}
