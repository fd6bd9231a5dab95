use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::model::{parse_status, DonationDB};
use crate::campaigns::{find_campaign, parse_decimal};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{campaigns, donations};
use crate::search::{contains_pattern, fold_case, LIKE_ESCAPE};
use tracer_core::donations::{
    plan_transition, Donation, DonationFilter, DonationListItem, DonationRepositoryTrait,
    DonationSearchResponse, DonationSearchResponseMeta, DonationStatus, DonationStatusTotals,
    NewDonation, StatusTransition,
};
use tracer_core::errors::{Error, Result};

pub struct DonationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DonationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DonationRepository { pool, writer }
    }
}

fn find_donation(conn: &mut SqliteConnection, donation_id: &str) -> Result<DonationDB> {
    donations::table
        .find(donation_id)
        .select(DonationDB::as_select())
        .first(conn)
        .optional()
        .map_err(StorageError::from)?
        .ok_or_else(|| Error::not_found("Donation", donation_id))
}

#[async_trait]
impl DonationRepositoryTrait for DonationRepository {
    async fn create(&self, new_donation: NewDonation) -> Result<Donation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Donation> {
                find_campaign(conn, &new_donation.campaign_id)?;

                let id = new_donation
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = DonationDB::from_new(new_donation, id, Utc::now().naive_utc());
                let inserted = diesel::insert_into(donations::table)
                    .values(&row)
                    .returning(DonationDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Donation::try_from(inserted)
            })
            .await
    }

    async fn transition_status(
        &self,
        donation_id: &str,
        target: DonationStatus,
    ) -> Result<StatusTransition> {
        let donation_id = donation_id.to_string();
        // Read, decide and write in one IMMEDIATE transaction so concurrent
        // reviewers cannot both apply an adjustment for the same donation.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<StatusTransition> {
                let current = Donation::try_from(find_donation(conn, &donation_id)?)?;
                let adjustment = plan_transition(current.status, target, current.amount)?;

                let campaign = find_campaign(conn, &current.campaign_id)?;
                let running_total = parse_decimal(&campaign.current_amount, "current_amount")?;
                let new_total = adjustment.apply(running_total)?;
                let now = Utc::now().naive_utc();

                if !adjustment.is_none() {
                    diesel::update(campaigns::table.find(&campaign.id))
                        .set((
                            campaigns::current_amount.eq(new_total.to_string()),
                            campaigns::updated_at.eq(now),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                let donation = if current.status == target {
                    current.clone()
                } else {
                    let updated = diesel::update(donations::table.find(&donation_id))
                        .set((
                            donations::status.eq(target.as_str()),
                            donations::updated_at.eq(now),
                        ))
                        .returning(DonationDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Donation::try_from(updated)?
                };
                debug!(
                    "Donation {} {} -> {}, campaign {} total {} -> {}",
                    donation_id, current.status, target, campaign.id, running_total, new_total
                );

                Ok(StatusTransition {
                    donation,
                    previous_status: current.status,
                    adjustment,
                    campaign_current_amount: new_total,
                })
            })
            .await
    }

    fn get_by_id(&self, donation_id: &str) -> Result<Donation> {
        let mut conn = get_connection(&self.pool)?;
        Donation::try_from(find_donation(&mut conn, donation_id)?)
    }

    fn search(&self, filter: &DonationFilter) -> Result<DonationSearchResponse> {
        let mut conn = get_connection(&self.pool)?;
        let (page, page_size) = filter.normalized_page();
        let (offset, limit) = filter.offset_limit();
        let pattern = filter.keyword().map(contains_pattern);
        let status = filter.status.map(|s| s.as_str());

        let create_base_query = || {
            let mut query = donations::table
                .inner_join(campaigns::table)
                .into_boxed();
            if let Some(status) = status {
                query = query.filter(donations::status.eq(status));
            }
            if let Some(ref pattern) = pattern {
                query = query.filter(
                    fold_case(donations::donor_name)
                        .like(pattern.clone())
                        .escape(LIKE_ESCAPE)
                        .or(fold_case(donations::donor_phone)
                            .like(pattern.clone())
                            .escape(LIKE_ESCAPE))
                        .or(fold_case(campaigns::title)
                            .like(pattern.clone())
                            .escape(LIKE_ESCAPE)),
                );
            }
            query
        };

        let total_row_count = create_base_query()
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;

        let rows = create_base_query()
            .select((DonationDB::as_select(), campaigns::title))
            .order((donations::created_at.desc(), donations::id.desc()))
            .limit(limit)
            .offset(offset)
            .load::<(DonationDB, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let data = rows
            .into_iter()
            .map(|(donation, campaign_title)| {
                Ok(DonationListItem {
                    donation: Donation::try_from(donation)?,
                    campaign_title,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DonationSearchResponse {
            data,
            meta: DonationSearchResponseMeta {
                total_row_count,
                page,
                page_size,
            },
        })
    }

    fn count_for_campaign(&self, campaign_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(donations::table
            .filter(donations::campaign_id.eq(campaign_id))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    fn status_totals(&self, campaign_id: &str) -> Result<DonationStatusTotals> {
        let mut conn = get_connection(&self.pool)?;
        let rows = donations::table
            .filter(donations::campaign_id.eq(campaign_id))
            .select((donations::status, donations::amount))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut totals = DonationStatusTotals::default();
        for (status, amount) in rows {
            totals.add(parse_status(&status)?, parse_decimal(&amount, "amount")?)?;
        }
        Ok(totals)
    }
}
