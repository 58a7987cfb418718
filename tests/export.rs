#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use smart_nippo::db::db::Db;
    use smart_nippo::db::reports::Reports;
    use smart_nippo::db::templates::Templates;
    use smart_nippo::libs::error::NippoError;
    use smart_nippo::libs::export::{columns, ExportFormat, Exporter};
    use smart_nippo::libs::field::{FieldKind, TemplateField};
    use smart_nippo::libs::report::{Report, ReportData};
    use smart_nippo::libs::summary::TemplateIndex;
    use smart_nippo::libs::template::NewTemplate;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const CONTENT_WITH_SEPARATORS: &str = "review, \"round 2\"\nfollow-up | notes";

    struct ExportTestContext {
        temp_dir: TempDir,
        reports: Vec<Report>,
        templates: TemplateIndex,
        store: Reports,
        memo_template_id: i64,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("data.db");

            let mut templates = Templates::from_db(Db::open(&db_path).unwrap());
            let default_id = templates.get_default().unwrap().id;
            let memo_template_id = templates
                .create(&NewTemplate::new(
                    "memo-only",
                    None,
                    vec![
                        TemplateField::new("date", "Date", FieldKind::Date, 1).required(),
                        TemplateField::new("body", "Body", FieldKind::Memo, 2),
                    ],
                ))
                .unwrap()
                .id;

            let mut store = Reports::from_db(Db::open(&db_path).unwrap());
            let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
            let first: ReportData = [("date", "2024-01-10"), ("project", "Alpha"), ("content", CONTENT_WITH_SEPARATORS)]
                .into_iter()
                .collect();
            let second: ReportData = [("date", "2024-01-11"), ("project", "Beta"), ("content", "plain"), ("issues", "none")]
                .into_iter()
                .collect();
            let reports = vec![
                store.create_on(default_id, &first, today).unwrap(),
                store.create_on(default_id, &second, today).unwrap(),
            ];
            let templates = store.templates_for(&reports).unwrap();

            ExportTestContext {
                temp_dir,
                reports,
                templates,
                store,
                memo_template_id,
            }
        }
    }

    fn read_delimited(content: &str, delimiter: u8) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(content.as_bytes());
        let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (headers, rows)
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_parses_back_to_the_stored_values(ctx: &mut ExportTestContext) {
        let content = Exporter::new(ExportFormat::Csv).render(&ctx.reports, &ctx.templates).unwrap();
        let (headers, rows) = read_delimited(&content, b',');

        assert_eq!(headers.len(), 9);
        assert_eq!(headers[0], "日付");
        assert_eq!(headers[4], "作業内容");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "2024-01-10");
        assert_eq!(rows[0][4], CONTENT_WITH_SEPARATORS);
        assert_eq!(rows[0][6], "");
        assert_eq!(rows[1][6], "none");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_tsv_uses_tabs(ctx: &mut ExportTestContext) {
        let content = Exporter::new(ExportFormat::Tsv).render(&ctx.reports, &ctx.templates).unwrap();
        let first_line = content.lines().next().unwrap();
        assert_eq!(first_line.split('\t').count(), 9);

        let (_, rows) = read_delimited(&content, b'\t');
        assert_eq!(rows[0][4], CONTENT_WITH_SEPARATORS);
        assert_eq!(rows[1][1], "Beta");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_markdown_table(ctx: &mut ExportTestContext) {
        let content = Exporter::new(ExportFormat::Markdown).render(&ctx.reports, &ctx.templates).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("| 日付 | プロジェクト名 |"));
        assert!(lines[1].starts_with("| --- |"));
        assert!(lines[2].contains("review, \"round 2\"<br>follow-up \\| notes"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_text_blocks(ctx: &mut ExportTestContext) {
        let content = Exporter::new(ExportFormat::Text).render(&ctx.reports, &ctx.templates).unwrap();

        assert!(content.starts_with("=== 2024-01-10 ===\n"));
        assert!(content.contains("\n=== 2024-01-11 ===\n"));
        assert!(content.contains("作業内容: review, \"round 2\"\n  follow-up | notes\n"));
        assert!(content.contains("プロジェクト名: Beta\n"));
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_empty_input_renders_nothing(ctx: &mut ExportTestContext) {
        for format in [ExportFormat::Csv, ExportFormat::Tsv, ExportFormat::Markdown, ExportFormat::Text] {
            assert_eq!(Exporter::new(format).render(&[], &ctx.templates).unwrap(), "");
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_columns_across_templates(ctx: &mut ExportTestContext) {
        let data: ReportData = [("date", "2024-01-12"), ("body", "reading")].into_iter().collect();
        let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let memo = ctx.store.create_on(ctx.memo_template_id, &data, today).unwrap();

        let mut reports = ctx.reports.clone();
        reports.push(memo.clone());
        let templates = ctx.store.templates_for(&reports).unwrap();
        let names: Vec<String> = columns(&reports, &templates).into_iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 10);
        assert_eq!(names.last().unwrap(), "body");

        let memo_first = vec![memo, ctx.reports[0].clone()];
        let names: Vec<String> = columns(&memo_first, &templates).into_iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec![
                "date",
                "body",
                "content",
                "end_time",
                "issues",
                "notes",
                "progress",
                "project",
                "start_time",
                "tomorrow_plan"
            ]
        );
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_to_file(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("out.csv");
        Exporter::new(ExportFormat::Csv)
            .export_to(&ctx.reports, &ctx.templates, &path)
            .unwrap();

        let (_, rows) = read_delimited(&fs::read_to_string(&path).unwrap(), b',');
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_format_names() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!("xlsx".parse::<ExportFormat>(), Err(NippoError::UnsupportedFormat(_))));

        let path = Exporter::new(ExportFormat::Tsv).default_path();
        assert_eq!(path.extension().unwrap(), "tsv");
    }
}
