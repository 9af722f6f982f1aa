use std::sync::Arc;

use tracing::warn;

use crate::bank::{Industry, QuestionBank, QuestionBankRegistry};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup, never mutated.
    pub banks: Arc<QuestionBankRegistry>,
}

/// A bank chosen for a request, with a record of whether the fallback was used.
pub struct ResolvedBank<'a> {
    pub requested: String,
    pub industry: Industry,
    pub bank: &'a QuestionBank,
    pub fell_back: bool,
}

impl AppState {
    /// Unknown industry keys are served from the configured fallback bank.
    /// Startup guarantees the fallback bank exists.
    pub fn resolve_bank(&self, industry_key: &str) -> Option<ResolvedBank<'_>> {
        let requested = industry_key.to_string();
        let direct = industry_key
            .parse::<Industry>()
            .ok()
            .and_then(|industry| self.banks.bank(industry).map(|bank| (industry, bank)));
        if let Some((industry, bank)) = direct {
            return Some(ResolvedBank {
                requested,
                industry,
                bank,
                fell_back: false,
            });
        }

        let fallback = self.config.fallback_industry;
        warn!(
            requested = %industry_key,
            fallback = %fallback,
            "Unknown industry, using fallback bank"
        );
        self.banks.bank(fallback).map(|bank| ResolvedBank {
            requested,
            industry: fallback,
            bank,
            fell_back: true,
        })
    }
}
