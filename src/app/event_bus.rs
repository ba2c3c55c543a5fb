use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;

use crate::event::DomainEvent;
use crate::input::ScriptStep;

pub(crate) struct EventBusRuntime {
    tasks: Vec<JoinHandle<()>>,
}

impl EventBusRuntime {
    pub(crate) fn spawn(
        script: Vec<ScriptStep>,
    ) -> (
        UnboundedSender<DomainEvent>,
        UnboundedReceiver<DomainEvent>,
        Self,
    ) {
        let (tx, rx) = unbounded_channel();
        let tasks = vec![spawn_script_task(tx.clone(), script)];
        (tx, rx, Self { tasks })
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

/// Replays `script` onto the bus and ends with a shutdown request.
fn spawn_script_task(tx: UnboundedSender<DomainEvent>, script: Vec<ScriptStep>) -> JoinHandle<()> {
    tokio::spawn(async move {
        for step in script {
            match step {
                ScriptStep::Event(event) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                ScriptStep::Wait(duration) => tokio::time::sleep(duration).await,
            }
        }
        let _ = tx.send(DomainEvent::Shutdown);
    })
}
