//! Report generation pipeline
//!
//! The public entry point of the core: ticker in, classified result out.
//! Per request the flow is fetch -> normalize -> build context -> assemble
//! prompt -> generate, handled end-to-end by one task with no shared mutable
//! state between concurrent requests. A data-provider failure downgrades the
//! request to degraded-data mode; only a generation failure is terminal.

use crate::api::MarketDataProvider;
use crate::config::ReportConfig;
use crate::context::ContextBlock;
use crate::engine::result::{FailureKind, ReportRequest, ReportResult};
use crate::metrics::{RawMetrics, normalize};
use crate::prompts;
use crate::symbol::TickerSymbol;
use analyst_llm::{GenerationRequest, TextGenerator};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Orchestrates one report generation per call
///
/// Holds only immutable, process-wide collaborators (the two provider
/// handles and configuration); every `run` allocates its own request-scoped
/// data, so concurrent calls are independent.
pub struct ReportPipeline {
    data_provider: Arc<dyn MarketDataProvider>,
    generator: Arc<dyn TextGenerator>,
    config: ReportConfig,
}

impl ReportPipeline {
    /// Create a pipeline from its collaborators
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider>,
        generator: Arc<dyn TextGenerator>,
        config: ReportConfig,
    ) -> Self {
        Self {
            data_provider,
            generator,
            config,
        }
    }

    /// Generate one report
    ///
    /// Never returns an unclassified error: every exit is a [`ReportResult`]
    /// carrying either non-empty report text or one of the defined failure
    /// kinds.
    #[instrument(skip(self, request), fields(ticker = %request.ticker, model = %request.model, language = %request.language))]
    pub async fn run(&self, request: &ReportRequest) -> ReportResult {
        let language = request.language;

        let ticker = match TickerSymbol::new(&request.ticker) {
            Ok(ticker) => ticker,
            Err(e) => {
                debug!("rejected before any network call");
                return ReportResult::failure(
                    request.ticker.trim().to_uppercase(),
                    language,
                    FailureKind::InvalidInput,
                    e.to_string(),
                );
            },
        };

        debug!("fetching market data");
        let (raw, fetch_warning) = match self.data_provider.lookup(&ticker).await {
            Ok(raw) => (raw, None),
            Err(e) => {
                // Degraded-data mode: the report is still generated, with the
                // failure recorded in the context so the generation service
                // knows the figures are unavailable.
                warn!(error = %e, "market data fetch failed; continuing with empty metrics");
                (RawMetrics::empty(), Some(e.to_string()))
            },
        };

        let metrics = normalize(&raw);
        let context = ContextBlock::build(&ticker, &metrics, fetch_warning.as_deref());
        let prompt = prompts::assemble(&ticker, &context, language);

        debug!(prompt_len = prompt.len(), "invoking generation service");
        let mut builder = GenerationRequest::builder(&request.model).prompt(prompt);
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(max_output_tokens) = self.config.max_output_tokens {
            builder = builder.max_output_tokens(max_output_tokens);
        }

        match self.generator.generate(builder.build()).await {
            Ok(response) => {
                info!(
                    output_tokens = response.usage.output_tokens,
                    "report generated"
                );
                ReportResult::success(ticker.to_string(), language, response.text)
            },
            Err(e) => ReportResult::failure(
                ticker.to_string(),
                language,
                FailureKind::Generation,
                e.to_string(),
            ),
        }
    }
}
