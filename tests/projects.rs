#[cfg(test)]
mod tests {
    use smart_nippo::db::db::Db;
    use smart_nippo::db::projects::Projects;
    use smart_nippo::db::templates::Templates;
    use smart_nippo::libs::error::NippoError;
    use smart_nippo::libs::field::{FieldKind, TemplateField};
    use smart_nippo::libs::project::NewProject;
    use smart_nippo::libs::template::NewTemplate;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ProjectTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for ProjectTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("data.db");
            ProjectTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl ProjectTestContext {
        fn projects(&self) -> Projects {
            Projects::from_db(Db::open(&self.db_path).unwrap())
        }

        fn templates(&self) -> Templates {
            Templates::from_db(Db::open(&self.db_path).unwrap())
        }
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_create_and_list(ctx: &mut ProjectTestContext) {
        let mut projects = ctx.projects();
        let default_id = ctx.templates().get_default().unwrap().id;

        let alpha = projects
            .create(&NewProject::new(" Alpha ").with_description("first").with_template(default_id))
            .unwrap();
        projects.create(&NewProject::new("Beta")).unwrap();

        assert_eq!(alpha.name, "Alpha");
        assert_eq!(alpha.description.as_deref(), Some("first"));
        assert_eq!(alpha.template_id, Some(default_id));
        assert!(alpha.is_active);

        let names: Vec<String> = projects.list(false).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alpha".to_string(), "Beta".to_string()]);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_create_validation(ctx: &mut ProjectTestContext) {
        let mut projects = ctx.projects();
        projects.create(&NewProject::new("Alpha")).unwrap();

        assert!(matches!(
            projects.create(&NewProject::new("Alpha")),
            Err(NippoError::ProjectNameTaken(_))
        ));
        assert!(matches!(
            projects.create(&NewProject::new("  ")),
            Err(NippoError::InvalidFieldValue { .. })
        ));
        assert!(matches!(
            projects.create(&NewProject::new("Gamma").with_template(999)),
            Err(NippoError::TemplateNotFound(_))
        ));
        assert_eq!(projects.list(true).unwrap().len(), 1);
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_deactivate_hides_from_active_list(ctx: &mut ProjectTestContext) {
        let mut projects = ctx.projects();
        projects.create(&NewProject::new("Alpha")).unwrap();
        projects.create(&NewProject::new("Beta")).unwrap();

        let beta = projects.deactivate("Beta").unwrap();
        assert!(!beta.is_active);

        let active: Vec<(String, bool)> = projects.list(false).unwrap().into_iter().map(|p| (p.name, p.is_active)).collect();
        assert_eq!(active, vec![("Alpha".to_string(), true)]);
        let all: Vec<(String, bool)> = projects.list(true).unwrap().into_iter().map(|p| (p.name, p.is_active)).collect();
        assert_eq!(all, vec![("Alpha".to_string(), true), ("Beta".to_string(), false)]);
        assert!(matches!(projects.deactivate("Nope"), Err(NippoError::ProjectNotFound(_))));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_delete(ctx: &mut ProjectTestContext) {
        let mut projects = ctx.projects();
        projects.create(&NewProject::new("Alpha")).unwrap();

        projects.delete("Alpha").unwrap();

        assert!(matches!(projects.get_by_name("Alpha"), Err(NippoError::ProjectNotFound(_))));
        assert!(matches!(projects.delete("Alpha"), Err(NippoError::ProjectNotFound(_))));
    }

    #[test_context(ProjectTestContext)]
    #[test]
    fn test_deleting_template_unlinks_project(ctx: &mut ProjectTestContext) {
        let mut templates = ctx.templates();
        let template = templates
            .create(&NewTemplate::new(
                "short",
                None,
                vec![TemplateField::new("date", "Date", FieldKind::Date, 1)],
            ))
            .unwrap();
        let mut projects = ctx.projects();
        projects.create(&NewProject::new("Alpha").with_template(template.id)).unwrap();

        templates.delete(template.id, false).unwrap();

        assert_eq!(projects.get_by_name("Alpha").unwrap().template_id, None);
    }
}
