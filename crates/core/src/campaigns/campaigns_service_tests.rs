//! Tests for the campaign service.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::campaigns::{CampaignFilter, CampaignService, CampaignServiceTrait, CampaignUpdate};
    use crate::donations::{DonationService, DonationServiceTrait};
    use crate::errors::{Error, ValidationError};
    use crate::files::UploadedFile;
    use crate::testing::{datetime, new_campaign, submission, InMemoryLedger, MemoryFileStore};

    struct Fixture {
        ledger: Arc<InMemoryLedger>,
        files: Arc<MemoryFileStore>,
        campaigns: CampaignService,
        donations: DonationService,
    }

    fn fixture() -> Fixture {
        let ledger = Arc::new(InMemoryLedger::default());
        let files = Arc::new(MemoryFileStore::default());
        Fixture {
            campaigns: CampaignService::new(ledger.clone(), ledger.clone(), files.clone()),
            donations: DonationService::new(ledger.clone(), ledger.clone(), files.clone()),
            ledger,
            files,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_seed_as_initial_amount() {
        let fx = fixture();
        let mut input = new_campaign("Alumni Gathering", dec!(2000));
        input.current_amount = dec!(250);

        let campaign = fx.campaigns.create_campaign(input).await.unwrap();
        assert_eq!(campaign.current_amount, dec!(250));
        assert_eq!(campaign.initial_amount, dec!(250));
        assert!(fx.campaigns.reconcile_campaign(&campaign.id).unwrap().is_consistent);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let fx = fixture();
        let result = fx.campaigns.create_campaign(new_campaign("", dec!(100))).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::Fields(_)))
        ));
        assert!(fx
            .campaigns
            .list_campaigns(&CampaignFilter::default())
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_does_not_touch_running_total() {
        let fx = fixture();
        let mut input = new_campaign("Alumni Gathering", dec!(2000));
        input.current_amount = dec!(300);
        let campaign = fx.campaigns.create_campaign(input).await.unwrap();

        let updated = fx
            .campaigns
            .update_campaign(CampaignUpdate {
                id: Some(campaign.id.clone()),
                title: "Alumni Gathering 2025".to_string(),
                description: campaign.description.clone(),
                goal_amount: dec!(3000),
                bank_name: None,
                bank_account_number: None,
                bank_account_name: None,
                starts_at: campaign.starts_at,
                ends_at: None,
                is_active: true,
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "Alumni Gathering 2025");
        assert_eq!(updated.goal_amount, dec!(3000));
        assert_eq!(updated.current_amount, dec!(300));
        assert_eq!(
            fx.campaigns.get_campaign_progress(&campaign.id).unwrap().percentage,
            dec!(10)
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_campaign_is_not_found() {
        let fx = fixture();
        let err = fx.campaigns.delete_campaign("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_refused_while_donations_exist() {
        let fx = fixture();
        let campaign = fx
            .campaigns
            .create_campaign(new_campaign("Lab Equipment", dec!(1000)))
            .await
            .unwrap();
        fx.donations
            .submit_donation(submission(&campaign.id, Some(dec!(50))))
            .await
            .unwrap();

        let err = fx.campaigns.delete_campaign(&campaign.id).await.unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert!(fx.campaigns.get_campaign(&campaign.id).is_ok());
    }

    #[tokio::test]
    async fn test_delete_removes_campaign_and_image() {
        let fx = fixture();
        let campaign = fx
            .campaigns
            .create_campaign(new_campaign("Lab Equipment", dec!(1000)))
            .await
            .unwrap();
        let with_image = fx
            .campaigns
            .set_campaign_image(&campaign.id, UploadedFile::new("cover.png", vec![1, 2, 3]))
            .await
            .unwrap();
        let image_path = with_image.image_path.unwrap();
        assert!(fx.files.contains(&image_path));

        fx.campaigns.delete_campaign(&campaign.id).await.unwrap();
        assert!(fx.campaigns.get_campaign(&campaign.id).unwrap_err().is_not_found());
        assert!(!fx.files.contains(&image_path));
    }

    #[tokio::test]
    async fn test_replacing_image_discards_previous_file() {
        let fx = fixture();
        let campaign = fx
            .campaigns
            .create_campaign(new_campaign("Lab Equipment", dec!(1000)))
            .await
            .unwrap();
        let first = fx
            .campaigns
            .set_campaign_image(&campaign.id, UploadedFile::new("a.jpg", vec![1]))
            .await
            .unwrap()
            .image_path
            .unwrap();
        let second = fx
            .campaigns
            .set_campaign_image(&campaign.id, UploadedFile::new("b.webp", vec![2]))
            .await
            .unwrap()
            .image_path
            .unwrap();

        assert!(first.starts_with("campaigns/"));
        assert!(second.ends_with(".webp"));
        assert!(!fx.files.contains(&first));
        assert!(fx.files.contains(&second));
        assert_eq!(fx.files.len(), 1);
    }

    #[tokio::test]
    async fn test_image_with_wrong_type_is_rejected() {
        let fx = fixture();
        let campaign = fx
            .campaigns
            .create_campaign(new_campaign("Lab Equipment", dec!(1000)))
            .await
            .unwrap();
        let err = fx
            .campaigns
            .set_campaign_image(&campaign.id, UploadedFile::new("cover.gif", vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(fx.files.len(), 0);
    }

    #[tokio::test]
    async fn test_list_open_campaigns_filters_window() {
        let fx = fixture();
        let open = fx
            .campaigns
            .create_campaign(new_campaign("Open", dec!(100)))
            .await
            .unwrap();
        let mut inactive = new_campaign("Inactive", dec!(100));
        inactive.is_active = false;
        fx.campaigns.create_campaign(inactive).await.unwrap();
        let mut ended = new_campaign("Ended", dec!(100));
        ended.ends_at = Some(datetime(2025, 2, 1));
        fx.campaigns.create_campaign(ended).await.unwrap();

        let listed = fx.campaigns.list_open_campaigns(datetime(2025, 3, 1)).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].campaign.id, open.id);
    }

    #[tokio::test]
    async fn test_list_campaigns_search() {
        let fx = fixture();
        fx.campaigns
            .create_campaign(new_campaign("Mosque Renovation", dec!(100)))
            .await
            .unwrap();
        fx.campaigns
            .create_campaign(new_campaign("Scholarship", dec!(100)))
            .await
            .unwrap();

        let found = fx
            .campaigns
            .list_campaigns(&CampaignFilter::search("renov"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Mosque Renovation");
    }

    #[tokio::test]
    async fn test_summary_counts_by_status() {
        let fx = fixture();
        let campaign = fx
            .campaigns
            .create_campaign(new_campaign("Computer Lab", dec!(1000)))
            .await
            .unwrap();
        let mut ids = Vec::new();
        for amount in [dec!(100), dec!(200), dec!(300)] {
            let donation = fx
                .donations
                .submit_donation(submission(&campaign.id, Some(amount)))
                .await
                .unwrap();
            ids.push(donation.id);
        }
        fx.donations.set_donation_status(&ids[0], "verified").await.unwrap();
        fx.donations.set_donation_status(&ids[1], "rejected").await.unwrap();

        let summary = fx.campaigns.get_campaign_summary(&campaign.id).unwrap();
        assert_eq!(summary.campaign.percentage, dec!(10));
        assert_eq!(summary.donations.verified_count, 1);
        assert_eq!(summary.donations.verified_amount, dec!(100));
        assert_eq!(summary.donations.rejected_count, 1);
        assert_eq!(summary.donations.pending_amount, dec!(300));
        assert_eq!(summary.donations.total_count(), 3);
    }

    #[tokio::test]
    async fn test_reconcile_detects_out_of_band_change() {
        let fx = fixture();
        let campaign = fx
            .campaigns
            .create_campaign(new_campaign("Computer Lab", dec!(1000)))
            .await
            .unwrap();
        let donation = fx
            .donations
            .submit_donation(submission(&campaign.id, Some(dec!(400))))
            .await
            .unwrap();
        fx.donations
            .set_donation_status(&donation.id, "verified")
            .await
            .unwrap();
        assert!(fx.campaigns.reconcile_campaign(&campaign.id).unwrap().is_consistent);

        fx.ledger.force_current_amount(&campaign.id, dec!(999));
        let report = fx.campaigns.reconcile_campaign(&campaign.id).unwrap();
        assert!(!report.is_consistent);
        assert_eq!(report.expected_total, dec!(400));
        assert_eq!(report.difference, dec!(599));
    }
}
