//! Prompt assembly
//!
//! Combines a ticker, a rendered context block, and the output language into
//! the single instruction document sent to the generation service. The
//! analytical framework and formatting instructions are constants - changing
//! analysis depth means editing the constant, not adding branches.

use crate::context::ContextBlock;
use crate::language::ReportLanguage;
use crate::symbol::TickerSymbol;
use chrono::{NaiveDate, Utc};

/// Role declaration heading the prompt
const ROLE: &str = "You are a world-class equity research analyst.";

/// The fixed six-part analytical framework
const ANALYSIS_FRAMEWORK: &str = "\
1. **Fundamental Business**: Deconstruct business model, moat, and financial health.
2. **Valuation & Ratios**: Analyze P/E, PEG, ROE relative to historicals and peers using the provided data.
3. **Technical Analysis**: Describe current trend structure (Support/Resistance).
4. **Industry & Competition**: Macro trends, TAM, and competitive landscape.
5. **Qualitative**: Management, Risks, and Catalysts.
6. **Conclusion**: Buy/Hold/Sell rating, Target Price logic, and Risk Mitigation.";

/// Output formatting instructions
const FORMAT_INSTRUCTIONS: &str =
    "Format the response with Markdown headers, bullet points for readability.";

/// Assemble the full instruction document, stamped with today's date
pub fn assemble(ticker: &TickerSymbol, context: &ContextBlock, language: ReportLanguage) -> String {
    assemble_at(ticker, context, language, Utc::now().date_naive())
}

/// Assemble the full instruction document for a specific date
///
/// Split out from [`assemble`] so tests can pin the date stamp.
pub fn assemble_at(
    ticker: &TickerSymbol,
    context: &ContextBlock,
    language: ReportLanguage,
    date: NaiveDate,
) -> String {
    format!(
        "Role: {ROLE}\n\
         Task: Conduct a comprehensive, in-depth analysis of the company: {ticker}.\n\
         \n\
         **CRITICAL INSTRUCTION**: {directive}\n\
         \n\
         Context Data (Real-time):\n\
         {context}\n\
         \n\
         Analysis Framework:\n\
         {ANALYSIS_FRAMEWORK}\n\
         \n\
         {FORMAT_INSTRUCTIONS}\n\
         Current Date: {date}",
        directive = language.directive(),
        date = date.format("%Y-%m-%d"),
    )
}
