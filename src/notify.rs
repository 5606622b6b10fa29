/// User-visible failure signal.
pub trait Notifier {
    fn alert(&self, message: &str);
}

/// Reports alerts on stderr and in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        log::error!("{}", message);
        eprintln!("\n!! {}\n", message);
    }
}

/// Message shown when an upload attempt fails anywhere in the sequence.
pub fn failure_message(err: &anyhow::Error) -> String {
    format!("Detection failed: {:#}. Please check console and backend.", err)
}
