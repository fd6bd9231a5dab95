//! Database model for the site profile settings.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One site profile field, stored as a key/value row.
#[derive(Queryable, Insertable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::app_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}
