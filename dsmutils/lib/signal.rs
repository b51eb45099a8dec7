//! `dsmutils::signal` watches for operator interrupts while the main thread is blocked on input.

use std::thread;

use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};

use crate::DsmutilsResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Installs handlers for `SIGINT` and `SIGTERM` and runs `on_interrupt` on a watcher thread
/// the first time either arrives.
///
/// The callback receives the signal number. It is expected to end the process; the watcher
/// stops listening after the first signal.
pub fn watch_interrupts<F>(on_interrupt: F) -> DsmutilsResult<()>
where
    F: FnOnce(i32) + Send + 'static,
{
    let mut signals = Signals::new([SIGINT, SIGTERM])?;

    thread::Builder::new()
        .name("dsm-signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::info!("received signal {signal}");
                on_interrupt(signal);
            }
        })?;

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use signal_hook::low_level::raise;

    use super::*;

    #[test]
    fn test_interrupt_reaches_the_callback() -> anyhow::Result<()> {
        let (tx, rx) = mpsc::channel();
        watch_interrupts(move |signal| {
            let _ = tx.send(signal);
        })?;

        raise(SIGTERM)?;

        let received = rx.recv_timeout(Duration::from_secs(5))?;
        assert_eq!(received, SIGTERM);
        Ok(())
    }
}
