pub mod batch;
pub mod client;
pub mod embed;
pub mod error;
pub mod pipeline;
pub mod projection;
pub mod sink;
pub mod tokenize;
pub mod travel;
pub mod types;

pub use batch::BatchLimits;
pub use client::{ClientConfig, DetailPage, PortalClient, RawDetailDocument};
pub use embed::extract_property_data;
pub use error::ScraperError;
pub use pipeline::{collect_listings, scrape_properties};
pub use projection::fields::{detail_mapping, summary_mapping, DETAIL_FIELDS, SUMMARY_FIELDS};
pub use projection::{FieldMapping, PathError, ProjectedRecord};
pub use sink::{JsonLinesSink, RecordSink, SinkError};
pub use tokenize::tokenize_query;
pub use travel::{destinations, Destination, TravelTime, TravelTimeSource};
pub use types::{ListingSummary, LocationId, SearchPage};
