use crate::libs::field::DateDefault;

#[derive(Debug, Clone)]
pub enum Message {
    // === REPORT MESSAGES ===
    ReportCreated(i64, String), // id, date
    ReportUpdated(i64),
    ReportDeleted(i64),
    ReportsHeader(usize),
    NoReportsFound,
    SelectReportToEdit,
    ConfirmDeleteReport(i64, String), // id, date
    StaleFieldsDropped(String),
    UsingTemplate(String),

    // === INPUT MESSAGES ===
    DateChoiceCurrent(String),
    DateChoice(DateDefault, String),
    ChoiceCustom,
    EditorOpening(String, String), // field label, editor command

    // === TEMPLATE MESSAGES ===
    TemplateCreated(String),
    TemplateDeleted(String, usize), // name, reports removed
    TemplateSetDefault(String),
    TemplateFieldAdded(String, String),   // field, template
    TemplateFieldRemoved(String, String), // field, template
    TemplateListHeader,
    TemplateHeader(String, String), // name, description
    TemplateReportCount(usize),
    NoTemplatesFound,
    NoDefaultTemplate,
    DefaultTemplateIs(String),
    StaleFieldsKept(String),
    ConfirmDeleteTemplate(String),
    ConfirmDeleteTemplateCascade(String, usize),

    // === PROJECT MESSAGES ===
    ProjectCreated(String),
    ProjectDeactivated(String),
    ProjectDeleted(String),
    ProjectListHeader,
    NoProjectsFound,

    // === SUMMARY MESSAGES ===
    MonthlyHeader(i32, u32, usize), // year, month, days
    NoReportsForMonth(i32, u32),
    StatisticsHeader(String),
    PeriodAll,

    // === EXPORT MESSAGES ===
    ExportCompleted(usize, String), // reports, path

    // === CLIPBOARD MESSAGES ===
    ClipboardCopied(usize), // characters
    ClipboardContents(usize),
    ClipboardEmpty,

    // === CONFIG MESSAGES ===
    ConfigWizardHeader,
    ConfigSaved,
    ConfigCreated(String),
    ConfigExists(String),
    ConfigFileAt(String),
    ConfigValueSet(String, String),

    // === DATABASE MESSAGES ===
    DatabaseReady(String, u32), // path, schema version
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),

    // === GENERAL ===
    OperationCancelled,
}
