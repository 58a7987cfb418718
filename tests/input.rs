#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use smart_nippo::libs::error::{NippoError, Result};
    use smart_nippo::libs::field::TemplateField;
    use smart_nippo::libs::input::{collect_report_data, fill_required_defaults, io_error, prompt_error, FieldPrompter};
    use smart_nippo::libs::report::{reject_unknown_fields, validate_report, ReportData, ValidationMode};
    use smart_nippo::libs::template::{default_template, Template};
    use std::collections::HashMap;
    use std::io;

    /// Answers from a script; fields without a scripted answer accept the
    /// offered value. Records what was offered for each field.
    struct ScriptedPrompter {
        answers: HashMap<&'static str, Option<&'static str>>,
        offered: Vec<(String, Option<String>)>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[(&'static str, Option<&'static str>)]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                offered: Vec::new(),
            }
        }

        fn offered(&self, name: &str) -> Option<&str> {
            self.offered
                .iter()
                .find(|(field, _)| field == name)
                .and_then(|(_, value)| value.as_deref())
        }
    }

    impl FieldPrompter for ScriptedPrompter {
        fn prompt(&mut self, field: &TemplateField, current: Option<&str>) -> Result<Option<String>> {
            self.offered.push((field.name.clone(), current.map(str::to_string)));
            Ok(match self.answers.get(field.name.as_str()) {
                Some(answer) => answer.map(str::to_string),
                None => Some(current.unwrap_or("").to_string()),
            })
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn template() -> Template {
        let seed = default_template();
        let now = today().and_hms_opt(9, 0, 0).unwrap();
        Template {
            id: 1,
            name: seed.name,
            description: seed.description,
            fields: seed.fields,
            is_default: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_defaults_are_offered_and_collected_data_validates() {
        let template = template();
        let mut prompter = ScriptedPrompter::new(&[("project", Some("A")), ("content", Some("設計"))]);

        let data = collect_report_data(&template, &mut prompter, None, today()).unwrap();

        assert_eq!(prompter.offered("date"), Some("2024-01-15"));
        assert_eq!(prompter.offered("start_time"), Some("09:00"));
        assert_eq!(prompter.offered("progress"), Some("進行中"));
        assert_eq!(prompter.offered("project"), None);
        assert_eq!(prompter.offered.len(), template.fields.len());

        let validated = validate_report(&template, &data, ValidationMode::Create, today()).unwrap();
        assert_eq!(validated.data.get("project"), Some("A"));
        assert_eq!(validated.work_minutes, 540);
    }

    #[test]
    fn test_existing_values_are_offered_when_editing() {
        let template = template();
        let existing: ReportData = [("date", "2024-01-10"), ("project", "B"), ("end_time", "20:00")]
            .into_iter()
            .collect();
        let mut prompter = ScriptedPrompter::new(&[]);

        let data = collect_report_data(&template, &mut prompter, Some(&existing), today()).unwrap();

        assert_eq!(prompter.offered("date"), Some("2024-01-10"));
        assert_eq!(prompter.offered("project"), Some("B"));
        assert_eq!(prompter.offered("end_time"), Some("20:00"));
        assert_eq!(prompter.offered("start_time"), Some("09:00"));
        assert_eq!(data.get("end_time"), Some("20:00"));
    }

    #[test]
    fn test_cancelling_any_prompt_cancels_collection() {
        let template = template();
        let mut prompter = ScriptedPrompter::new(&[("project", Some("A")), ("content", None)]);

        let result = collect_report_data(&template, &mut prompter, None, today());

        assert!(matches!(result, Err(NippoError::Cancelled)));
        // Nothing after the cancelled field was asked.
        assert_eq!(prompter.offered.last().map(|(name, _)| name.as_str()), Some("content"));
    }

    #[test]
    fn test_no_input_fills_required_defaults() {
        let template = template();
        let preset: ReportData = [("project", "A"), ("content", "設計")].into_iter().collect();

        let data = fill_required_defaults(&template, &preset, today()).unwrap();
        assert_eq!(data.get("date"), Some("2024-01-15"));
        assert_eq!(data.get("progress"), None);

        let validated = validate_report(&template, &data, ValidationMode::Create, today()).unwrap();
        assert_eq!(validated.date, Some(today()));
        assert_eq!(validated.data.get("progress"), Some("進行中"));
        assert_eq!(validated.work_minutes, 540);
    }

    #[test]
    fn test_no_input_keeps_given_values_and_missing_required_still_fails() {
        let template = template();
        let preset: ReportData = [("date", "2024-01-10"), ("project", "A")].into_iter().collect();

        let data = fill_required_defaults(&template, &preset, today()).unwrap();
        assert_eq!(data.get("date"), Some("2024-01-10"));

        match validate_report(&template, &data, ValidationMode::Create, today()) {
            Err(NippoError::RequiredFieldMissing { field }) => assert_eq!(field, "content"),
            other => panic!("expected RequiredFieldMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_preset_keys_are_rejected() {
        let template = template();
        let known: ReportData = [("project", "A")].into_iter().collect();
        assert!(reject_unknown_fields(&template, &known).is_ok());

        let unknown: ReportData = [("project", "A"), ("mood", "good")].into_iter().collect();
        match reject_unknown_fields(&template, &unknown) {
            Err(NippoError::UnknownField { field, template }) => {
                assert_eq!(field, "mood");
                assert_eq!(template, "default");
            }
            other => panic!("expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupted_prompt_is_a_cancel() {
        let interrupted = dialoguer::Error::IO(io::Error::new(io::ErrorKind::Interrupted, "ctrl-c"));
        assert!(matches!(prompt_error(interrupted), NippoError::Cancelled));

        let broken = dialoguer::Error::IO(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(matches!(prompt_error(broken), NippoError::Io(_)));

        assert!(matches!(io_error(io::Error::new(io::ErrorKind::Interrupted, "ctrl-c")), NippoError::Cancelled));
    }
}
