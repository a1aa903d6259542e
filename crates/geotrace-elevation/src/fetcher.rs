use std::sync::mpsc::{self, Receiver, Sender};

use geotrace_geo::LatLng;

use crate::{ElevationError, OpenElevation};

/// Outcome of one lookup, tagged with the ticket it was requested with
#[derive(Debug)]
pub struct ElevationMessage<T> {
    pub ticket: T,
    pub point: LatLng,
    pub outcome: Result<f64, ElevationError>,
}

/// Runs elevation lookups concurrently and hands the results back to the UI thread.
///
/// Results arrive in completion order, which need not match request order.
pub struct ElevationFetcher<T> {
    tx: Sender<ElevationMessage<T>>,
    rx: Receiver<ElevationMessage<T>>,
    in_flight: usize,
    #[cfg(not(target_arch = "wasm32"))]
    provider: std::sync::Arc<dyn crate::ElevationProvider>,
    #[cfg(target_arch = "wasm32")]
    provider: OpenElevation,
}

impl<T> ElevationFetcher<T> {
    /// Drain every result that has arrived since the last poll, never blocks
    pub fn poll(&mut self) -> Vec<ElevationMessage<T>> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            messages.push(msg);
        }
        messages
    }

    /// Number of requests that have not delivered a result yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + 'static> ElevationFetcher<T> {
    pub fn new(provider: OpenElevation) -> Self {
        Self::with_provider(provider)
    }

    pub fn with_provider(provider: impl crate::ElevationProvider) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            in_flight: 0,
            provider: std::sync::Arc::new(provider),
        }
    }

    /// Use `provider` for subsequent requests, requests already running finish with the old one
    pub fn set_provider(&mut self, provider: OpenElevation) {
        self.provider = std::sync::Arc::new(provider);
    }

    /// Start a lookup for `point` on its own thread
    pub fn request(&mut self, ticket: T, point: LatLng) {
        let tx = self.tx.clone();
        let provider = std::sync::Arc::clone(&self.provider);
        // The ticket moves into the thread, so a failed spawn can't be reported with it
        let spawned = std::thread::Builder::new()
            .name("elevation-lookup".into())
            .spawn(move || {
                let outcome = provider.elevation(point);
                let _ = tx.send(ElevationMessage {
                    ticket,
                    point,
                    outcome,
                });
            });
        match spawned {
            Ok(_) => {
                self.in_flight += 1;
                log::debug!("Requested elevation for {point}");
            }
            Err(e) => log::error!("{}", ElevationError::Spawn(e.to_string())),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl<T: 'static> ElevationFetcher<T> {
    pub fn new(provider: OpenElevation) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            in_flight: 0,
            provider,
        }
    }

    pub fn set_provider(&mut self, provider: OpenElevation) {
        self.provider = provider;
    }

    /// Start a lookup for `point` as a browser future
    pub fn request(&mut self, ticket: T, point: LatLng) {
        let tx = self.tx.clone();
        let provider = self.provider.clone();
        self.in_flight += 1;
        log::debug!("Requested elevation for {point}");
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = provider.fetch(point).await;
            let _ = tx.send(ElevationMessage {
                ticket,
                point,
                outcome,
            });
        });
    }
}
