use chrono::TimeZone;
use log::debug;

use crate::error::Result;
use crate::fetch::{fetch_all, BarSource, BarsRequest};
use crate::market::{MarketClass, MarketClassifier};
use crate::range::{estimate, Granularity, RequestWindow, TimeRange};

/// One historical-bars query: which instrument, on which venue, at which
/// granularity, over which calendar window.
#[derive(Clone, Debug)]
pub struct HistoryRequest<Tz: TimeZone> {
    pub code: String,
    pub market: String,
    pub granularity: Granularity,
    pub range: TimeRange<Tz>,
}

/// Facade that turns a calendar-range query into offset/count fetches against
/// the right upstream handle. Futures venues and cash markets live on
/// separate connections upstream, so one source of each kind is held here and
/// picked per query by market class.
pub struct HistoryQuery<R> {
    extended: Box<dyn BarSource<Record = R>>,
    standard: Box<dyn BarSource<Record = R>>,
    classifier: MarketClassifier,
}

impl<R> HistoryQuery<R> {
    pub fn new(
        extended: Box<dyn BarSource<Record = R>>,
        standard: Box<dyn BarSource<Record = R>>,
    ) -> Self {
        Self::with_classifier(extended, standard, MarketClassifier::with_defaults())
    }

    pub fn with_classifier(
        extended: Box<dyn BarSource<Record = R>>,
        standard: Box<dyn BarSource<Record = R>>,
        classifier: MarketClassifier,
    ) -> Self {
        Self {
            extended,
            standard,
            classifier,
        }
    }

    /// Request window this query would issue, without touching the source.
    pub fn window_for<Tz: TimeZone>(
        &self,
        market: &str,
        granularity: Granularity,
        range: &TimeRange<Tz>,
    ) -> Result<RequestWindow> {
        let class = self.classifier.classify(market)?;
        Ok(estimate(range, granularity, class.session_profile()))
    }

    /// Fetch all bars covering the request's range, oldest-first. Start and
    /// end positioning is approximate; the source only addresses records by
    /// offset from its newest one.
    pub fn query_bars<Tz: TimeZone>(&mut self, request: &HistoryRequest<Tz>) -> Result<Vec<R>> {
        let class = self.classifier.classify(&request.market)?;
        let window = estimate(&request.range, request.granularity, class.session_profile());

        debug!(
            "querying {} on {}: offset {} count {}",
            request.code, request.market, window.offset, window.count
        );

        let source = match class {
            MarketClass::FutureLike => self.extended.as_mut(),
            MarketClass::CashLike => self.standard.as_mut(),
        };

        fetch_all(window.count, window.offset, |offset, count| {
            source.fetch_bars(&BarsRequest {
                granularity: request.granularity,
                market: &request.market,
                code: &request.code,
                offset,
                count,
            })
        })
    }
}
