mod conference;
mod landing;
mod models;
mod ondemand;

pub use conference::ConferenceClient;
pub use landing::LandingPage;
pub use ondemand::{OnDemandClient, entry_id_from_asset_url};
