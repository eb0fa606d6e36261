use std::{future::IntoFuture, path::Path, sync::Arc};

use anyhow::{Context, Result};
use tokio::{net::TcpListener, time::timeout};

use crate::{
    ai::{Classifier, ClassifierAdapter, ClassifierError, NaiveBayesModel},
    analysis::PhishingAnalyzer,
    config::AppConfig,
    http::{self, AppState},
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
};

pub struct PhishGuardApp {
    _paths: ResolvedPaths,
    analyzer: Arc<PhishingAnalyzer>,
    shutdown: Shutdown,
    config: Arc<AppConfig>,
}

impl PhishGuardApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Self {
        let classifier = config.model.path.as_deref().and_then(load_classifier);
        let analyzer = Arc::new(PhishingAnalyzer::new(classifier));

        tracing::info!(
            target: "model",
            model_loaded = analyzer.model_loaded(),
            "analyzer ready"
        );

        Self {
            _paths: paths,
            analyzer,
            shutdown,
            config: Arc::new(config),
        }
    }

    pub async fn run(self) -> Result<()> {
        let PhishGuardApp {
            _paths: _,
            analyzer,
            shutdown,
            config,
        } = self;

        let addr = config.server.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let app = http::router(AppState::new(analyzer), &config.cors);

        tracing::info!(target: "lifecycle", %addr, "phishing detection API listening");

        let mut shutdown_listener = shutdown.subscribe();
        let mut drain_listener = shutdown.subscribe();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            shutdown_listener.recv().await;
        });
        let mut server = Box::pin(server.into_future());

        tokio::select! {
            res = &mut server => {
                res.context("HTTP server terminated unexpectedly")?;
                tracing::info!(target: "lifecycle", "server stopped");
                return Ok(());
            }
            reason = drain_listener.recv() => {
                tracing::info!(
                    target: "lifecycle",
                    reason = ?reason,
                    "shutdown requested; draining connections"
                );
            }
        }

        let shutdown_timeout = config.server.shutdown_timeout;
        match timeout(shutdown_timeout, server).await {
            Ok(Ok(())) => tracing::info!(target: "lifecycle", "server stopped"),
            Ok(Err(err)) => {
                tracing::error!(target: "lifecycle", error = %err, "server error during shutdown")
            }
            Err(_) => tracing::warn!(
                target: "lifecycle",
                "connections did not drain within {:?}; forcing exit",
                shutdown_timeout
            ),
        }
        Ok(())
    }
}

/// Any load failure leaves the service in keyword fallback mode until restart.
fn load_classifier(path: &Path) -> Option<ClassifierAdapter> {
    match NaiveBayesModel::load(path) {
        Ok(model) => {
            tracing::info!(
                target: "model",
                path = %path.display(),
                model = %model.name(),
                "classifier loaded"
            );
            Some(ClassifierAdapter::new(Arc::new(model)))
        }
        Err(ClassifierError::NotFound(missing)) => {
            tracing::warn!(
                target: "model",
                path = %missing,
                "classifier artifact not found; using keyword fallback"
            );
            None
        }
        Err(err) => {
            tracing::warn!(
                target: "model",
                path = %path.display(),
                error = %err,
                "failed to load classifier; using keyword fallback"
            );
            None
        }
    }
}
