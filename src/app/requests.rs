//! Background API calls. Each call runs on the app's tokio runtime and posts
//! an [`Outcome`] back over the channel; the UI drains it every frame.

use super::controller::{BatchTicket, BeginError, ConvertTicket, Outcome, UnitsTicket};
use super::App;
use crate::api::ConverterApi;
use crate::types::HealthStatus;
use eframe::egui;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Await `call` unless `token` is cancelled first.
async fn cancellable<T>(token: &CancellationToken, call: impl Future<Output = T>) -> Option<T> {
    tokio::select! {
        _ = token.cancelled() => None,
        result = call => Some(result),
    }
}

pub(crate) async fn run_units(
    api: Arc<dyn ConverterApi>,
    ticket: UnitsTicket,
    token: CancellationToken,
) -> Option<Outcome> {
    let result = cancellable(&token, api.fetch_units(ticket.category)).await?;
    Some(Outcome::Units {
        generation: ticket.generation,
        result,
    })
}

pub(crate) async fn run_convert(
    api: Arc<dyn ConverterApi>,
    ticket: ConvertTicket,
    token: CancellationToken,
) -> Option<Outcome> {
    let result = cancellable(&token, api.convert(&ticket.request)).await?;
    Some(Outcome::Converted {
        generation: ticket.generation,
        units: ticket.units,
        result,
    })
}

pub(crate) async fn run_batch(
    api: Arc<dyn ConverterApi>,
    ticket: BatchTicket,
    token: CancellationToken,
) -> Option<Outcome> {
    let result = cancellable(&token, api.convert_batch(&ticket.request)).await?;
    Some(Outcome::BatchConverted {
        generation: ticket.generation,
        units: ticket.units,
        result,
    })
}

pub(crate) async fn run_health(api: Arc<dyn ConverterApi>) -> Outcome {
    match api.health().await {
        Ok(()) => Outcome::Health(HealthStatus::Online),
        Err(e) => {
            warn!(error = %e, "Backend health check failed");
            Outcome::Health(HealthStatus::Offline)
        }
    }
}

fn post(tx: &UnboundedSender<Outcome>, ctx: &egui::Context, outcome: Option<Outcome>) {
    match outcome {
        Some(outcome) => {
            if tx.send(outcome).is_err() {
                debug!("Outcome receiver dropped");
            }
            ctx.request_repaint();
        }
        None => debug!("Request cancelled"),
    }
}

/// Replace the token in `slot`, cancelling the request it guarded.
fn supersede(slot: &mut Option<CancellationToken>) -> CancellationToken {
    if let Some(old) = slot.take() {
        old.cancel();
    }
    let token = CancellationToken::new();
    *slot = Some(token.clone());
    token
}

impl App {
    /// Select a category and fetch its units.
    pub fn change_category(&mut self, category: crate::types::Category, ctx: &egui::Context) {
        let ticket = self.controller.select_category(category);
        // Conversions issued against the old unit list are void now.
        if let Some(token) = self.conversion_cancel.take() {
            token.cancel();
        }
        let token = supersede(&mut self.units_cancel);
        let api = self.api.clone();
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = run_units(api, ticket, token).await;
            post(&tx, &ctx, outcome);
        });
    }

    pub fn convert(&mut self, ctx: &egui::Context) {
        let ticket = match self.controller.begin_convert() {
            Ok(ticket) => ticket,
            Err(BeginError::Busy) => {
                debug!("Units still loading, ignoring convert");
                return;
            }
            Err(BeginError::Invalid(_)) => return,
        };
        info!(
            value = ticket.request.value,
            from = %ticket.request.from_unit,
            to = %ticket.request.to_unit,
            category = ticket.request.category.as_str(),
            "Starting conversion"
        );
        let token = supersede(&mut self.conversion_cancel);
        let api = self.api.clone();
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = run_convert(api, ticket, token).await;
            post(&tx, &ctx, outcome);
        });
    }

    pub fn convert_batch(&mut self, ctx: &egui::Context) {
        let ticket = match self.controller.begin_batch() {
            Ok(ticket) => ticket,
            Err(BeginError::Busy) => {
                debug!("Units still loading, ignoring batch convert");
                return;
            }
            Err(BeginError::Invalid(_)) => return,
        };
        info!(
            value = ticket.request.value,
            from = %ticket.request.from_unit,
            category = ticket.request.category.as_str(),
            "Starting batch conversion"
        );
        let token = supersede(&mut self.conversion_cancel);
        let api = self.api.clone();
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = run_batch(api, ticket, token).await;
            post(&tx, &ctx, outcome);
        });
    }

    pub fn check_health(&mut self, ctx: &egui::Context) {
        let api = self.api.clone();
        let tx = self.outcome_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = run_health(api).await;
            post(&tx, &ctx, Some(outcome));
        });
    }

    /// Apply every outcome that arrived since the last frame.
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.controller.apply(outcome);
        }
    }
}
