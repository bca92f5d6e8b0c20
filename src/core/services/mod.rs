pub mod forecast_service;
pub mod summary_service;

pub use forecast_service::{
    ForecastResult, ForecastService, Trend, MIN_FORECAST_RECORDS, SUGGESTED_CAP_RATIO,
};
pub use summary_service::{ChartSeries, MonthlyCategorySummary, SummaryService};
