// Central output broker - every component prints through here
use crate::verbosity;
use std::collections::VecDeque;
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

/// Output levels for filtering. Errors and summaries always print;
/// info needs verbosity >= 1, debug and trace need >= 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputLevel {
    Error,
    Summary,
    Info,
    Debug,
    Trace,
}

enum OutputRequest {
    Line {
        level: OutputLevel,
        message: String,
    },
    FlushSummaries {
        done: Option<oneshot::Sender<()>>,
    },
}

/// Serializes all output through one worker task: filters by verbosity,
/// prints info/debug lines immediately and batches summary lines into a
/// block that flushes periodically or on demand at the end of a cycle.
#[derive(Clone)]
pub struct OutputBroker {
    sender: mpsc::UnboundedSender<OutputRequest>,
}

struct BrokerState {
    pending_summaries: VecDeque<String>,
    last_summary_flush: Instant,
    summary_interval: Duration,
}

impl OutputBroker {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(Self::broker_worker(receiver));
        OutputBroker { sender }
    }

    pub fn output(&self, level: OutputLevel, message: String) {
        // Ignore a closed channel - output must never take the agent down
        let _ = self.sender.send(OutputRequest::Line { level, message });
    }

    /// Flush batched summary lines and wait until they hit the terminal.
    pub async fn flush_summaries(&self) {
        let (done, wait) = oneshot::channel();
        if self
            .sender
            .send(OutputRequest::FlushSummaries { done: Some(done) })
            .is_ok()
        {
            let _ = wait.await;
        }
    }

    async fn broker_worker(mut receiver: mpsc::UnboundedReceiver<OutputRequest>) {
        let mut state = BrokerState {
            pending_summaries: VecDeque::new(),
            last_summary_flush: Instant::now(),
            summary_interval: Duration::from_secs(30),
        };

        while let Some(request) = receiver.recv().await {
            match request {
                OutputRequest::Line { level, message } => {
                    if !level_enabled(level) {
                        continue;
                    }
                    if level == OutputLevel::Summary {
                        state.pending_summaries.push_back(message);
                        if state.pending_summaries.len() > 100 {
                            state.pending_summaries.pop_front();
                        }
                    } else {
                        println!("{}", message);
                    }
                }
                OutputRequest::FlushSummaries { done } => {
                    Self::flush_pending(&mut state);
                    if let Some(done) = done {
                        let _ = done.send(());
                    }
                }
            }

            if state.last_summary_flush.elapsed() > state.summary_interval {
                Self::flush_pending(&mut state);
            }
        }

        Self::flush_pending(&mut state);
    }

    fn flush_pending(state: &mut BrokerState) {
        if state.pending_summaries.is_empty() {
            state.last_summary_flush = Instant::now();
            return;
        }

        println!("\n🏭 === CYCLE SUMMARY ===");
        while let Some(summary) = state.pending_summaries.pop_front() {
            println!("{}", summary);
        }
        println!("🏭 === END SUMMARY ===\n");
        state.last_summary_flush = Instant::now();
    }
}

fn level_enabled(level: OutputLevel) -> bool {
    match level {
        OutputLevel::Error | OutputLevel::Summary => true,
        OutputLevel::Info => verbosity::get_verbosity_level() >= 1,
        OutputLevel::Debug | OutputLevel::Trace => verbosity::get_verbosity_level() >= 2,
    }
}

static GLOBAL_BROKER: OnceLock<OutputBroker> = OnceLock::new();

pub fn init_output_broker() {
    GLOBAL_BROKER.get_or_init(OutputBroker::new);
}

pub fn get_output_broker() -> &'static OutputBroker {
    GLOBAL_BROKER.get_or_init(OutputBroker::new)
}

/// Route a message through the broker when a runtime is up, or straight to
/// stdout otherwise (tests and early startup run without a runtime).
pub fn emit(level: OutputLevel, message: String) {
    if tokio::runtime::Handle::try_current().is_ok() {
        get_output_broker().output(level, message);
    } else if level_enabled(level) {
        println!("{}", message);
    }
}

// Global output macros that work anywhere
#[macro_export]
macro_rules! o_error {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Error, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_summary {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Summary, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_info {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Info, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_debug {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Debug, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! o_trace {
    ($($arg:tt)*) => {
        $crate::output_broker::emit($crate::output_broker::OutputLevel::Trace, format!($($arg)*))
    };
}
