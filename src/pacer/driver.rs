use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::event::DomainEvent;

use super::state::PacerTimer;

/// The part of [`PacerTimer`] the background task needs to know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacerSchedule {
    pub generation: u64,
    pub armed: bool,
    pub wait_time: Duration,
    pub interval: Duration,
}

impl PacerSchedule {
    pub fn from_timer(timer: &PacerTimer) -> Self {
        Self {
            generation: timer.generation(),
            armed: timer.is_armed(),
            wait_time: timer.wait_time(),
            interval: timer.interval(),
        }
    }
}

/// Owns the tick task. Ticks are posted onto the event bus as
/// [`DomainEvent::PacerTick`] and applied by the event loop, never here.
pub struct PacerDriver {
    control: watch::Sender<PacerSchedule>,
    task: JoinHandle<()>,
}

impl PacerDriver {
    pub fn spawn(tx: UnboundedSender<DomainEvent>, timer: &PacerTimer) -> Self {
        let (control, rx) = watch::channel(PacerSchedule::from_timer(timer));
        let task = tokio::spawn(drive(tx, rx));
        Self { control, task }
    }

    /// Pushes the timer state to the task. Returns whether anything changed.
    pub fn sync(&self, timer: &PacerTimer) -> bool {
        let next = PacerSchedule::from_timer(timer);
        self.control.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    pub fn shutdown(self) {
        self.task.abort();
    }
}

async fn drive(tx: UnboundedSender<DomainEvent>, mut control: watch::Receiver<PacerSchedule>) {
    loop {
        let schedule = *control.borrow_and_update();
        if !schedule.armed {
            if control.changed().await.is_err() {
                return;
            }
            continue;
        }
        if !run_armed(&tx, &mut control, schedule).await {
            return;
        }
    }
}

/// Ticks until the schedule is disarmed or re-armed. Returns `false` once
/// either channel is closed.
async fn run_armed(
    tx: &UnboundedSender<DomainEvent>,
    control: &mut watch::Receiver<PacerSchedule>,
    schedule: PacerSchedule,
) -> bool {
    let mut interval = schedule.interval;
    let mut last_tick: Option<Instant> = None;
    let mut deadline = Instant::now() + schedule.wait_time;

    loop {
        tokio::select! {
            _ = time::sleep_until(deadline) => {
                let event = DomainEvent::PacerTick {
                    generation: schedule.generation,
                };
                if tx.send(event).is_err() {
                    return false;
                }
                let now = Instant::now();
                last_tick = Some(now);
                deadline = now + interval;
            }
            changed = control.changed() => {
                if changed.is_err() {
                    return false;
                }
                let next = *control.borrow();
                if !next.armed || next.generation != schedule.generation {
                    return true;
                }
                if next.interval != interval {
                    log::debug!("pacer interval {:?} -> {:?}", interval, next.interval);
                    interval = next.interval;
                    if let Some(last) = last_tick {
                        deadline = last + interval;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::timeout;

    use super::{PacerDriver, PacerSchedule};
    use crate::config::PacerConfig;
    use crate::event::DomainEvent;
    use crate::pacer::PacerTimer;

    fn fast_timer() -> PacerTimer {
        PacerTimer::new(&PacerConfig {
            speed: 200.0,
            min_speed: 0.5,
            step: 1.0,
            wait_time_ms: 10,
        })
    }

    #[test]
    fn schedule_mirrors_timer() {
        let mut timer = fast_timer();
        timer.toggle();
        let schedule = PacerSchedule::from_timer(&timer);
        assert!(schedule.armed);
        assert_eq!(schedule.generation, timer.generation());
        assert_eq!(schedule.wait_time, Duration::from_millis(10));
        assert_eq!(schedule.interval, Duration::from_millis(5));
    }

    #[tokio::test]
    async fn armed_driver_posts_ticks_for_the_current_generation() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = fast_timer();
        let driver = PacerDriver::spawn(tx, &timer);

        timer.toggle();
        assert!(driver.sync(&timer));
        assert!(!driver.sync(&timer));

        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick should arrive")
            .expect("bus should stay open");
        match event {
            DomainEvent::PacerTick { generation } => assert_eq!(generation, timer.generation()),
            other => panic!("unexpected event: {other:?}"),
        }

        timer.disarm();
        driver.sync(&timer);
        tokio::time::sleep(Duration::from_millis(30)).await;
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());

        driver.shutdown();
    }
}
