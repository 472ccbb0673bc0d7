//! Jobscope: job-posting acquisition, salary normalization, and corpus analysis.

pub mod acquisition;
pub mod analysis;
pub mod store;
pub mod types;
pub mod wordcloud;

pub use acquisition::{
    Acquisition, AcquisitionError, AcquisitionPipeline, FetchedPage, Origin, PageFetcher,
    PipelineConfig,
};
pub use analysis::{parse_salary, AnalysisReport, Analyzer, Report, StatsReport, TermStream};
pub use store::{JobStore, MemoryStore, DEFAULT_QUERY_LIMIT};
pub use types::*;
pub use wordcloud::{discover_font, CloudOptions, WordCloudSink, FONT_CANDIDATES};
