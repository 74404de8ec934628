//! Events emitted with the `tracing` feature, captured through a fmt
//! subscriber.
#![cfg(feature = "tracing")]

use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use tidemark::prelude::*;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(run: impl FnOnce()) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    captured.text()
}

#[test]
fn every_step_is_traced() {
    let logs = capture(|| {
        let chain = Builder::<i32>::new().is_gt(13).or().is_zero();
        assert!(chain.that(0).is_ok());
    });

    assert_eq!(logs.matches("evaluated step").count(), 2);
    assert!(logs.contains("operator=OR"));
    assert!(logs.contains("evaluated chain"));
}

#[test]
fn degraded_message_is_warned() {
    let logs = capture(|| {
        let chain = Builder::<i32>::new()
            .is_zero()
            .with_message("%s needs an argument", vec![]);
        let message = chain.that(1).failure_in(&tidemark::locale::Locale::root());
        assert_eq!(message.unwrap().message, "%s needs an argument");
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("message left unformatted"));
}
