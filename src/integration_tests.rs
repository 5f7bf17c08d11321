#[cfg(test)]
mod tests {
    use crate::commands::advances::{add_advance_internal, AddAdvanceInput};
    use crate::commands::auth::{change_password_internal, login_internal};
    use crate::commands::billing::{generate_bill_internal, get_individual_bill_internal};
    use crate::commands::rates::{
        add_rate_internal, calculate_rate_internal, delete_rate_internal, get_rates_internal,
        AddRateInput,
    };
    use crate::commands::records::{
        fetch_records_internal, get_summary_internal, save_record_internal, SaveRecordInput,
    };
    use crate::commands::reports::get_reports_summary_internal;
    use crate::commands::sales::{add_sale_internal, AddSaleInput};
    use crate::commands::shift::{get_current_shift_internal, start_new_shift_internal};
    use crate::db::{self, DbPool};
    use crate::error::DairyError;
    use sqlx::sqlite::SqliteConnectOptions;
    use std::str::FromStr;

    async fn setup_test_db() -> DbPool {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = db::init_pool_with_options(opts)
            .await
            .expect("Failed to create pool");
        db::init_database(&pool).await.expect("Failed to migrate");
        pool
    }

    fn record(date: &str, code: &str, shift: &str, litres: f64, rate: f64) -> SaveRecordInput {
        SaveRecordInput {
            rec_date: date.to_string(),
            farmer_code: code.to_string(),
            shift: shift.to_string(),
            litres,
            fat: 6.0,
            snf: 8.0,
            rate,
            amount: litres * rate,
        }
    }

    #[tokio::test]
    async fn test_save_record_and_fetch_by_exact_date() {
        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-01", "F001", "Morning", 10.0, 30.0))
            .await
            .unwrap();

        let records = fetch_records_internal(&pool, Some("2024-03-01".to_string()), None)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.rec_date, "2024-03-01");
        assert_eq!(r.farmer_name.as_deref(), Some("Suresh Patil"));
        assert_eq!(r.category.as_deref(), Some("A"));
        assert_eq!(r.litres, 10.0);
        // rate and amount are stored verbatim, never recomputed
        assert_eq!(r.rate, 30.0);
        assert_eq!(r.amount, 300.0);
    }

    #[tokio::test]
    async fn test_out_of_range_fat_rejected_and_nothing_written() {
        let pool = setup_test_db().await;

        let mut input = record("2024-03-01", "F001", "Morning", 5.0, 30.0);
        input.fat = 9.0;
        let err = save_record_internal(&pool, input).await.unwrap_err();
        assert!(matches!(err, DairyError::Validation(_)));
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("FAT"));

        let mut input = record("2024-03-01", "F001", "Morning", 5.0, 30.0);
        input.snf = 6.5;
        let err = save_record_internal(&pool, input).await.unwrap_err();
        assert!(err.to_string().contains("SNF"));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM milk_records")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_boundary_fat_snf_values_accepted() {
        let pool = setup_test_db().await;

        for (fat, snf) in [(2.0, 7.0), (8.0, 9.5), (2.0, 9.5), (8.0, 7.0)] {
            let mut input = record("2024-03-01", "F001", "Morning", 1.0, 30.0);
            input.fat = fat;
            input.snf = snf;
            save_record_internal(&pool, input).await.unwrap();
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM milk_records")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 4);
    }

    #[tokio::test]
    async fn test_unknown_farmer_code_inserts_as_unknown() {
        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-01", "ZZ99", "Evening", 4.0, 28.0))
            .await
            .unwrap();

        let (name, category): (String, String) =
            sqlx::query_as("SELECT farmer_name, category FROM milk_records WHERE farmer_code = 'ZZ99'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(name, "Unknown");
        assert_eq!(category, "Unknown");
    }

    #[tokio::test]
    async fn test_summary_counts_only_matching_records() {
        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-01", "F001", "Morning", 10.0, 30.0))
            .await
            .unwrap();
        save_record_internal(&pool, record("2024-03-01", "F002", "Evening", 8.0, 25.0))
            .await
            .unwrap();
        save_record_internal(&pool, record("2024-03-02", "F001", "Morning", 6.0, 30.0))
            .await
            .unwrap();

        let summary =
            get_summary_internal(&pool, "2024-03-01".to_string(), Some("Morning".to_string()))
                .await
                .unwrap();
        assert_eq!(summary.farmers_count, 3); // seeded farmers
        assert_eq!(summary.total_litres, 10.0);
        assert_eq!(summary.total_amount, 300.0);
        assert_eq!(summary.total_records, 1);

        // no shift filter: both entries for the date
        let summary = get_summary_internal(&pool, "2024-03-01".to_string(), None)
            .await
            .unwrap();
        assert_eq!(summary.total_litres, 18.0);
        assert_eq!(summary.total_records, 2);
    }

    #[tokio::test]
    async fn test_empty_range_sums_are_zero() {
        let pool = setup_test_db().await;

        let summary = get_summary_internal(&pool, "1999-01-01".to_string(), None)
            .await
            .unwrap();
        assert_eq!(summary.total_litres, 0.0);
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.total_records, 0);

        let reports =
            get_reports_summary_internal(&pool, "1999-01-01".to_string(), "1999-01-31".to_string())
                .await
                .unwrap();
        assert!(reports.success);
        assert_eq!(reports.milk_litres, 0.0);
        assert_eq!(reports.milk_amount, 0.0);
        assert_eq!(reports.sale_litres, 0.0);
        assert_eq!(reports.sale_amount, 0.0);
        assert_eq!(reports.total_advances, 0.0);
        assert_eq!(reports.net_income, 0.0);
    }

    #[tokio::test]
    async fn test_fetch_records_newest_first_and_idempotent() {
        let pool = setup_test_db().await;

        for date in ["2024-03-01", "2024-03-03", "2024-03-02", "2024-03-03"] {
            save_record_internal(&pool, record(date, "F001", "Morning", 1.0, 30.0))
                .await
                .unwrap();
        }

        let first = fetch_records_internal(&pool, None, None).await.unwrap();
        assert_eq!(first.len(), 4);
        for pair in first.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.rec_date >= b.rec_date);
            if a.rec_date == b.rec_date {
                assert!(a.id > b.id);
            }
        }

        let second = fetch_records_internal(&pool, None, None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_records_caps_at_500_newest_first() {
        let pool = setup_test_db().await;

        // litres tag the insertion order so the cut-off is visible
        for i in 1..=505 {
            save_record_internal(&pool, record("2024-03-01", "F001", "Morning", i as f64, 30.0))
                .await
                .unwrap();
        }

        let records = fetch_records_internal(&pool, None, None).await.unwrap();
        assert_eq!(records.len(), 500);
        // same date throughout, so ordering is by id descending
        assert_eq!(records[0].litres, 505.0);
        assert_eq!(records[499].litres, 6.0);
        for pair in records.windows(2) {
            assert!(pair[0].id > pair[1].id);
        }
    }

    #[tokio::test]
    async fn test_individual_bill_nets_advances() {
        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-02", "F002", "Morning", 10.0, 30.0))
            .await
            .unwrap();
        save_record_internal(&pool, record("2024-03-05", "F002", "Evening", 5.0, 40.0))
            .await
            .unwrap();

        add_advance_internal(
            &pool,
            AddAdvanceInput {
                farmer_code: "F002".to_string(),
                date: "2024-03-03".to_string(),
                amount: 150.0,
                remarks: Some("seed money".to_string()),
            },
        )
        .await
        .unwrap();
        // outside the billing window, must not count
        add_advance_internal(
            &pool,
            AddAdvanceInput {
                farmer_code: "F002".to_string(),
                date: "2024-04-01".to_string(),
                amount: 999.0,
                remarks: None,
            },
        )
        .await
        .unwrap();

        let bill = get_individual_bill_internal(
            &pool,
            "F002".to_string(),
            "2024-03-01".to_string(),
            "2024-03-31".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(bill.records.len(), 2);
        assert_eq!(bill.total_litres, 15.0);
        assert_eq!(bill.total_amount, 500.0);
        assert_eq!(bill.total_advance, 150.0);
        assert_eq!(bill.net, 350.0);
        // supporting records are chronological
        assert!(bill.records[0].rec_date <= bill.records[1].rec_date);
    }

    #[tokio::test]
    async fn test_bulk_bill_includes_zero_activity_farmers() {
        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-02", "F001", "Morning", 10.0, 30.0))
            .await
            .unwrap();
        add_advance_internal(
            &pool,
            AddAdvanceInput {
                farmer_code: "F001".to_string(),
                date: "2024-03-04".to_string(),
                amount: 100.0,
                remarks: None,
            },
        )
        .await
        .unwrap();

        let bills =
            generate_bill_internal(&pool, "2024-03-01".to_string(), "2024-03-31".to_string())
                .await
                .unwrap();

        assert_eq!(bills.len(), 3);
        assert_eq!(bills[0].code, "F001");
        assert_eq!(bills[0].amount, 300.0);
        assert_eq!(bills[0].advance, 100.0);
        assert_eq!(bills[0].net, 200.0);

        for line in &bills[1..] {
            assert_eq!(line.litres, 0.0);
            assert_eq!(line.amount, 0.0);
            assert_eq!(line.advance, 0.0);
            assert_eq!(line.net, 0.0);
        }
    }

    #[tokio::test]
    async fn test_reports_summary_net_income_law() {
        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-02", "F001", "Morning", 10.0, 30.0))
            .await
            .unwrap();
        add_sale_internal(
            &pool,
            AddSaleInput {
                sale_date: "2024-03-03".to_string(),
                customer: "Hotel Annapurna".to_string(),
                litres: 5.0,
                rate: 40.0,
                amount: 200.0,
            },
        )
        .await
        .unwrap();
        add_advance_internal(
            &pool,
            AddAdvanceInput {
                farmer_code: "F001".to_string(),
                date: "2024-03-04".to_string(),
                amount: 100.0,
                remarks: None,
            },
        )
        .await
        .unwrap();

        let summary =
            get_reports_summary_internal(&pool, "2024-03-01".to_string(), "2024-03-31".to_string())
                .await
                .unwrap();

        assert_eq!(summary.milk_amount, 300.0);
        assert_eq!(summary.sale_amount, 200.0);
        assert_eq!(summary.total_advances, 100.0);
        assert_eq!(
            summary.net_income,
            summary.milk_amount + summary.sale_amount - summary.total_advances
        );
        assert_eq!(summary.net_income, 400.0);
    }

    #[tokio::test]
    async fn test_shift_toggle_persists() {
        let pool = setup_test_db().await;

        let (shift, _) = get_current_shift_internal(&pool).await.unwrap();
        assert_eq!(shift, "Morning");

        assert_eq!(start_new_shift_internal(&pool).await.unwrap(), "Evening");
        let (shift, _) = get_current_shift_internal(&pool).await.unwrap();
        assert_eq!(shift, "Evening");

        assert_eq!(start_new_shift_internal(&pool).await.unwrap(), "Morning");
    }

    #[tokio::test]
    async fn test_rate_lookup_and_compute() {
        let pool = setup_test_db().await;

        let rates = get_rates_internal(&pool).await.unwrap();
        // seeded categories, ordered by name
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].category, "Buffalo");
        assert_eq!(rates[1].category, "Cow");

        let rate = calculate_rate_internal(&pool, "Cow", 4.5, 8.5).await.unwrap();
        assert_eq!(rate, 25.0);

        let err = calculate_rate_internal(&pool, "Goat", 4.5, 8.5)
            .await
            .unwrap_err();
        assert!(matches!(err, DairyError::NotFound(_)));
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_add_rate_replaces_existing_category() {
        let pool = setup_test_db().await;

        add_rate_internal(
            &pool,
            AddRateInput {
                category: "Goat".to_string(),
                base: 18.0,
                fat_rate: 4.0,
                snf_rate: 2.0,
            },
        )
        .await
        .unwrap();

        // re-adding the same category overwrites instead of duplicating
        add_rate_internal(
            &pool,
            AddRateInput {
                category: "Goat".to_string(),
                base: 22.0,
                fat_rate: 4.0,
                snf_rate: 2.0,
            },
        )
        .await
        .unwrap();

        let goats: Vec<_> = get_rates_internal(&pool)
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.category == "Goat")
            .collect();
        assert_eq!(goats.len(), 1);
        assert_eq!(goats[0].base, 22.0);
    }

    #[tokio::test]
    async fn test_delete_rate_by_category() {
        let pool = setup_test_db().await;

        delete_rate_internal(&pool, "Cow").await.unwrap();
        let rates = get_rates_internal(&pool).await.unwrap();
        assert!(rates.iter().all(|r| r.category != "Cow"));

        let err = delete_rate_internal(&pool, "Cow").await.unwrap_err();
        assert!(matches!(err, DairyError::NotFound(_)));
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_login_and_change_password() {
        let pool = setup_test_db().await;

        assert!(login_internal(&pool, "admin", "12345").await.unwrap().is_some());
        assert!(login_internal(&pool, "admin", "wrong").await.unwrap().is_none());
        assert!(login_internal(&pool, "nobody", "12345").await.unwrap().is_none());

        assert!(change_password_internal(&pool, "admin", "12345", "s3cret")
            .await
            .unwrap());
        assert!(login_internal(&pool, "admin", "12345").await.unwrap().is_none());
        assert!(login_internal(&pool, "admin", "s3cret").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_report_shift_filter_all_sentinel() {
        use crate::commands::reports::generate_report_internal;

        let pool = setup_test_db().await;

        save_record_internal(&pool, record("2024-03-01", "F001", "Morning", 10.0, 30.0))
            .await
            .unwrap();
        save_record_internal(&pool, record("2024-03-02", "F001", "Evening", 8.0, 30.0))
            .await
            .unwrap();

        let all = generate_report_internal(
            &pool,
            "2024-03-01".to_string(),
            "2024-03-31".to_string(),
            Some("All".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 2);
        // chronological, oldest first
        assert!(all[0].rec_date <= all[1].rec_date);

        let evenings = generate_report_internal(
            &pool,
            "2024-03-01".to_string(),
            "2024-03-31".to_string(),
            Some("evening".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(evenings.len(), 1);
        assert_eq!(evenings[0].shift.as_deref(), Some("Evening"));
    }

    #[tokio::test]
    async fn test_save_file_decodes_data_uri() {
        use crate::commands::files::{save_file_internal, SaveFileInput};

        let dir = std::env::temp_dir().join("dairydesk-test-exports");
        std::env::set_var("EXPORT_DIR", &dir);

        // "a,b\n1,2" base64-encoded
        let path = save_file_internal(SaveFileInput {
            content: "data:text/csv;base64,YSxiCjEsMg==".to_string(),
            filename: "report".to_string(),
            filetype: "csv".to_string(),
        })
        .unwrap();

        assert_eq!(path.extension().unwrap(), "csv");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,2");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
