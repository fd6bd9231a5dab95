//! SQLite storage implementation for campaigns.

mod model;
mod repository;

pub(crate) use model::parse_decimal;
pub use model::{CampaignChangesetDB, CampaignDB};
pub(crate) use repository::find_campaign;
pub use repository::CampaignRepository;
