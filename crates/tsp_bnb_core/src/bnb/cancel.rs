use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Stop signal checked at the top of every search call.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    /// A limit past the clock's range means no deadline.
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: time_limit.and_then(|limit| Instant::now().checked_add(limit)),
        }
    }

    /// Shares the process-wide Ctrl-C flag, installing the handler on first use.
    pub fn interruptible(time_limit: Option<Duration>) -> Self {
        Self {
            flag: interrupt_flag(),
            ..Self::new(time_limit)
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.cancel();
            return true;
        }
        false
    }
}

fn interrupt_flag() -> Arc<AtomicBool> {
    INTERRUPT_FLAG
        .get_or_init(|| {
            let flag = Arc::new(AtomicBool::new(false));
            let handler_flag = Arc::clone(&flag);
            if let Err(err) = ctrlc::set_handler(move || {
                handler_flag.store(true, Ordering::Relaxed);
            }) {
                log::warn!("cancel: failed to install interrupt handler err={err}");
            }
            flag
        })
        .clone()
}
