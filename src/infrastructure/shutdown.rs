use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

#[derive(Clone)]
pub struct Shutdown {
    sender: watch::Sender<Option<ShutdownReason>>,
}

pub struct ShutdownListener {
    receiver: watch::Receiver<Option<ShutdownReason>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn trigger(&self, reason: ShutdownReason) {
        self.sender.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }

    pub fn listen_for_signals(&self) {
        let ctrlc = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                ctrlc.trigger(ShutdownReason::Interrupt);
            }
        });

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let term = self.clone();
            tokio::spawn(async move {
                match signal(SignalKind::terminate()) {
                    Ok(mut sig) => {
                        sig.recv().await;
                        term.trigger(ShutdownReason::Terminate);
                    }
                    Err(err) => {
                        tracing::warn!(target: "lifecycle", error = %err, "SIGTERM handler unavailable");
                    }
                }
            });
        }
    }
}

impl ShutdownListener {
    /// Resolves with the reason once shutdown is requested, or `None` when
    /// every [`Shutdown`] handle is dropped without a request.
    pub async fn recv(&mut self) -> Option<ShutdownReason> {
        self.receiver
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|reason| *reason)
    }
}
