//! bpstat_rs
//!
//! A small Rust library for charting series from the Banco de Portugal BPstat
//! API. Pairs with the `bpstat` CLI.
//!
//! ### Features
//! - Resolve the statistics domain and dataset holding a set of series
//! - Download observations as JSON-stat and flatten them into a table
//! - Find columns by stable dimension id, whatever the response language
//! - Parse banknote face values, convert to millions of euros, sum per date
//! - Render SVG/PNG line charts (dotted lines, marker dots, dotted y grid)
//!
//! ### Example
//! ```no_run
//! use bpstat_rs::{Client, Config, pipeline::{self, ChartKind}};
//!
//! let config = Config::default();
//! let client = Client::new(&config)?;
//! let ids = ChartKind::FaceValueTotal.default_series_ids();
//! let today = chrono::Utc::now().date_naive();
//! let (_table, chart) = pipeline::run(ChartKind::FaceValueTotal, &client, &config, &ids, today)?;
//! bpstat_rs::viz::render_chart(&chart, "notes_total.svg", 1000, 500, config.language.locale_tag())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod labels;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod storage;
pub mod table;
pub mod transform;
pub mod viz;

pub use api::Client;
pub use config::{Config, DimensionIds, Language};
pub use error::PipelineError;
pub use models::{DatasetLocation, JsonStatDataset, SeriesMetadata};
pub use table::Table;
