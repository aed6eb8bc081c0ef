//! Session resolution and stream retrieval for GTC conference recordings.
//!
//! The crate walks a short chain of remote lookups:
//!
//! 1. [`rainfocus`] turns a session id into a [`model::Session`], either through the
//!    authenticated conference API or the public on-demand API.
//! 2. For conference sessions, [`rainfocus::ConferenceClient::fetch_webinar`] exchanges the
//!    session time id for CDN credentials.
//! 3. [`kaltura::CatalogClient`] lists the encoded flavors of the entry.
//! 4. [`selector::select_best`] picks a flavor, and [`media`] probes and downloads it
//!    through ffprobe/ffmpeg.
//! 5. [`metadata`] optionally writes a JSON sidecar.

pub mod client;
pub mod config;
pub mod error;
pub mod filename;
pub mod kaltura;
pub mod media;
pub mod metadata;
pub mod model;
pub mod rainfocus;
pub mod selector;

pub use client::default_client;
pub use config::{Endpoints, ToolPaths};
pub use error::{Result, SessionError};
pub use reqwest::Client;
