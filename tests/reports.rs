#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use smart_nippo::db::db::Db;
    use smart_nippo::db::reports::Reports;
    use smart_nippo::db::templates::Templates;
    use smart_nippo::libs::error::NippoError;
    use smart_nippo::libs::field::{FieldKind, TemplateField};
    use smart_nippo::libs::query::ReportQuery;
    use smart_nippo::libs::report::ReportData;
    use smart_nippo::libs::template::{NewTemplate, Template, TemplateChange};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ReportTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for ReportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("data.db");
            ReportTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl ReportTestContext {
        fn templates(&self) -> Templates {
            Templates::from_db(Db::open(&self.db_path).unwrap())
        }

        fn reports(&self) -> Reports {
            Reports::from_db(Db::open(&self.db_path).unwrap())
        }

        fn default_template(&self) -> Template {
            self.templates().get_default().unwrap()
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn data(pairs: &[(&str, &str)]) -> ReportData {
        pairs.iter().copied().collect()
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_create_with_default_template_applies_defaults(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();

        let report = reports
            .create_on(template.id, &data(&[("date", "2024-01-15"), ("project", "プロジェクトA"), ("content", "設計レビュー")]), day(15))
            .unwrap();

        assert_eq!(report.date, day(15));
        assert_eq!(report.get("date"), Some("2024-01-15"));
        assert_eq!(report.get("project"), Some("プロジェクトA"));
        assert_eq!(report.get("start_time"), Some("09:00"));
        assert_eq!(report.get("end_time"), Some("18:00"));
        assert_eq!(report.get("progress"), Some("進行中"));
        assert_eq!(report.get("issues"), None);
        assert_eq!(report.work_minutes, 540);

        let keys: Vec<&str> = report.data.keys().collect();
        assert_eq!(keys, vec!["date", "project", "start_time", "end_time", "content", "progress"]);

        assert_eq!(reports.get(report.id).unwrap(), report);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_missing_required_field_writes_nothing(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();

        let result = reports.create_on(template.id, &data(&[("date", "2024-01-15"), ("project", "A"), ("content", "   ")]), day(15));
        match result {
            Err(NippoError::RequiredFieldMissing { field }) => assert_eq!(field, "content"),
            other => panic!("expected RequiredFieldMissing, got {:?}", other),
        }
        assert!(reports.search(&ReportQuery::new()).unwrap().is_empty());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_required_date_is_not_defaulted_by_the_store(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();

        match reports.create_on(template.id, &data(&[("project", "A"), ("content", "work")]), day(15)) {
            Err(NippoError::RequiredFieldMissing { field }) => assert_eq!(field, "date"),
            other => panic!("expected RequiredFieldMissing, got {:?}", other),
        }
        assert!(reports.search(&ReportQuery::new()).unwrap().is_empty());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_invalid_values_are_rejected(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();
        let base = [("date", "2024-01-15"), ("project", "A"), ("content", "work")];

        let mut bad_selection = data(&base);
        bad_selection.insert("progress", "保留");
        assert!(matches!(
            reports.create_on(template.id, &bad_selection, day(15)),
            Err(NippoError::InvalidSelection { .. })
        ));

        let mut bad_time = data(&base);
        bad_time.insert("start_time", "25:00");
        assert!(matches!(
            reports.create_on(template.id, &bad_time, day(15)),
            Err(NippoError::InvalidFieldValue { .. })
        ));

        let mut unknown = data(&base);
        unknown.insert("mood", "good");
        assert!(matches!(
            reports.create_on(template.id, &unknown, day(15)),
            Err(NippoError::UnknownField { .. })
        ));

        let mut long_project = data(&base);
        long_project.insert("project", "x".repeat(101));
        assert!(matches!(
            reports.create_on(template.id, &long_project, day(15)),
            Err(NippoError::FieldTooLong { max: 100, .. })
        ));

        assert!(matches!(
            reports.create_on(9999, &data(&base), day(15)),
            Err(NippoError::TemplateNotFound(_))
        ));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_work_hours_are_capped_per_day(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();
        let day_shift = data(&[("date", "2024-01-15"), ("project", "A"), ("content", "work")]);

        reports.create_on(template.id, &day_shift, day(15)).unwrap();
        reports.create_on(template.id, &day_shift, day(15)).unwrap();
        match reports.create_on(template.id, &day_shift, day(15)) {
            Err(NippoError::WorkHoursExceeded { date, minutes }) => {
                assert_eq!(date, day(15));
                assert_eq!(minutes, 1620);
            }
            other => panic!("expected WorkHoursExceeded, got {:?}", other),
        }

        // Another day is unaffected.
        let next_day = data(&[("date", "2024-01-16"), ("project", "A"), ("content", "work")]);
        reports.create_on(template.id, &next_day, day(15)).unwrap();
        assert_eq!(reports.on_date(day(15)).unwrap().len(), 2);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_end_before_start_spans_midnight(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();

        let night = data(&[("date", "2024-01-15"), ("project", "A"), ("content", "release"), ("start_time", "22:00"), ("end_time", "2:30")]);
        let report = reports.create_on(template.id, &night, day(15)).unwrap();

        assert_eq!(report.get("end_time"), Some("02:30"));
        assert_eq!(report.work_minutes, 270);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_update_merges_and_revalidates(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();
        let report = reports
            .create_on(template.id, &data(&[("date", "2024-01-15"), ("project", "A"), ("content", "work"), ("end_time", "17:00")]), day(15))
            .unwrap();
        assert_eq!(report.work_minutes, 480);

        let update = reports
            .update_on(report.id, &data(&[("progress", "完了"), ("end_time", ""), ("date", "2024-01-16")]), day(20))
            .unwrap();

        assert!(update.dropped_keys.is_empty());
        assert_eq!(update.report.get("progress"), Some("完了"));
        assert_eq!(update.report.get("content"), Some("work"));
        assert_eq!(update.report.get("end_time"), Some("18:00"));
        assert_eq!(update.report.work_minutes, 540);
        assert_eq!(update.report.date, day(16));
        assert_eq!(update.report.created_at, report.created_at);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_failed_update_keeps_stored_report(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();
        let report = reports
            .create_on(template.id, &data(&[("date", "2024-01-15"), ("project", "A"), ("content", "work")]), day(15))
            .unwrap();

        let result = reports.update_on(report.id, &data(&[("content", ""), ("progress", "完了")]), day(15));
        assert!(matches!(result, Err(NippoError::RequiredFieldMissing { .. })));
        assert_eq!(reports.get(report.id).unwrap(), report);

        assert!(matches!(
            reports.update_on(4242, &data(&[]), day(15)),
            Err(NippoError::ReportNotFound(4242))
        ));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_update_drops_fields_removed_from_template(ctx: &mut ReportTestContext) {
        let mut templates = ctx.templates();
        let template = templates
            .create(&NewTemplate::new(
                "retro",
                None,
                vec![
                    TemplateField::new("date", "Date", FieldKind::Date, 1).required(),
                    TemplateField::new("went_well", "Went well", FieldKind::Memo, 2),
                    TemplateField::new("to_improve", "To improve", FieldKind::Memo, 3),
                ],
            ))
            .unwrap();

        let mut reports = ctx.reports();
        let report = reports
            .create_on(
                template.id,
                &data(&[("date", "2024-01-12"), ("went_well", "pairing"), ("to_improve", "estimates")]),
                day(15),
            )
            .unwrap();

        templates
            .update(template.id, &[TemplateChange::RemoveField("to_improve".to_string())])
            .unwrap();

        // Stored data is untouched until the report itself is updated.
        assert_eq!(reports.get(report.id).unwrap().get("to_improve"), Some("estimates"));

        let update = reports.update_on(report.id, &data(&[("went_well", "pairing, reviews")]), day(15)).unwrap();
        assert_eq!(update.dropped_keys, vec!["to_improve".to_string()]);
        assert_eq!(update.report.get("to_improve"), None);
        assert_eq!(update.report.get("went_well"), Some("pairing, reviews"));
        assert_eq!(update.report.date, day(12));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_template_without_date_uses_today(ctx: &mut ReportTestContext) {
        let template = ctx
            .templates()
            .create(&NewTemplate::new(
                "memo-only",
                None,
                vec![TemplateField::new("body", "Body", FieldKind::Memo, 1).required()],
            ))
            .unwrap();
        let mut reports = ctx.reports();

        let report = reports.create_on(template.id, &data(&[("body", "note")]), day(3)).unwrap();
        assert_eq!(report.date, day(3));
        assert_eq!(report.work_minutes, 0);

        let update = reports.update_on(report.id, &data(&[("body", "edited")]), day(9)).unwrap();
        assert_eq!(update.report.date, day(3));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_delete(ctx: &mut ReportTestContext) {
        let template = ctx.default_template();
        let mut reports = ctx.reports();
        let report = reports
            .create_on(template.id, &data(&[("date", "2024-01-15"), ("project", "A"), ("content", "work")]), day(15))
            .unwrap();

        reports.delete(report.id).unwrap();

        assert!(matches!(reports.get(report.id), Err(NippoError::ReportNotFound(_))));
        assert!(matches!(reports.delete(report.id), Err(NippoError::ReportNotFound(_))));
    }
}
