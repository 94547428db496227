//! `sheetflow`: corre el pipeline sobre colaboradores locales.
//!
//! Uso:
//! - `sheetflow run --sheet <ARCHIVO> [--folder <DIR>] [--notify] [--email <ADDR>] [--daily-report]`
//! - `sheetflow run --inputs <FORM.json>`
//! - `sheetflow reset`
//!
//! Códigos de salida: 0 ok, 2 uso, 3 entradas ilegibles, 4 alguna cadena
//! terminó en Failed, 5 error de engine o backend.
use std::path::PathBuf;
use std::process::exit;

use clap::{Args, Parser, Subcommand};
use sheet_adapters::{AutomationWorkflow, InputFields, Services};
use sheet_core::{LogReporter, ScratchDir, WorkflowState};
use sheet_domain::DocumentStore;
use sheet_infra::{JsonSheetSource, LocalFolderStore, OutboxMailer};
use sheet_persistence::{build_pool_from_env, DbConfig, InMemoryDocumentStore, PgDocumentStore, PoolProvider};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sheetflow", version, about = "Spreadsheet rows to generated artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    dirs: Dirs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Corre la cadena principal y luego la opcional.
    Run(RunArgs),
    /// Vacía el directorio scratch.
    Reset,
}

#[derive(Args, Debug)]
struct Dirs {
    /// Artifacts generados; `reset` lo vacía.
    #[arg(long, env = "SHEETFLOW_SCRATCH_DIR", default_value = "./scratch", global = true)]
    scratch_dir: PathBuf,
    /// Raíz de las carpetas de destino.
    #[arg(long, env = "SHEETFLOW_DRIVE_ROOT", default_value = "./drive", global = true)]
    drive_root: PathBuf,
    #[arg(long, env = "SHEETFLOW_OUTBOX", default_value = "./outbox", global = true)]
    outbox: PathBuf,
    /// Base para resolver `--sheet`.
    #[arg(long, env = "SHEETFLOW_SHEETS_ROOT", default_value = ".", global = true)]
    sheets_root: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long, required_unless_present = "inputs")]
    sheet: Option<String>,
    #[arg(long, default_value = "")]
    folder: String,
    #[arg(long)]
    notify: bool,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long)]
    daily_report: bool,
    /// Formulario JSON con los campos de entrada; ignora los flags anteriores.
    #[arg(long, conflicts_with = "sheet")]
    inputs: Option<PathBuf>,
}

impl RunArgs {
    fn fields(&self) -> Result<InputFields, String> {
        if let Some(path) = &self.inputs {
            let raw = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| format!("{}: {e}", path.display()))?;
            return Ok(InputFields::from_value(&value));
        }
        Ok(InputFields { google_sheets_url: self.sheet.clone().unwrap_or_default().trim().to_string(),
                         google_drive_folder_url: self.folder.trim().to_string(),
                         send_email_notifications: self.notify,
                         email_address: self.email.trim().to_string(),
                         generate_daily_report: self.daily_report })
    }
}

fn main() {
    // .env antes de parsear para que las variables sirvan de fallback
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    let code = match &cli.command {
        Command::Run(args) => run(&cli.dirs, args),
        Command::Reset => reset(&cli.dirs),
    };
    exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn services(dirs: &Dirs, documents: impl DocumentStore + 'static) -> Services {
    Services::new(JsonSheetSource::new(dirs.sheets_root.clone()),
                  LocalFolderStore::new(dirs.drive_root.clone()),
                  OutboxMailer::new(dirs.outbox.clone()),
                  documents,
                  ScratchDir::new(dirs.scratch_dir.clone()))
}

fn run(dirs: &Dirs, args: &RunArgs) -> i32 {
    let fields = match args.fields() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("[sheetflow run] entradas ilegibles: {e}");
            return 3;
        }
    };
    if DbConfig::is_configured() {
        match build_pool_from_env() {
            Ok(pool) => execute(dirs, &fields, PgDocumentStore::new(PoolProvider { pool })),
            Err(e) => {
                eprintln!("[sheetflow run] pool error: {e}");
                5
            }
        }
    } else {
        warn!("DATABASE_URL no definido; los documentos quedan sólo en memoria");
        execute(dirs, &fields, InMemoryDocumentStore::new())
    }
}

fn execute(dirs: &Dirs, fields: &InputFields, documents: impl DocumentStore + 'static) -> i32 {
    let mut workflow = AutomationWorkflow::new(services(dirs, documents));
    workflow.configure_fields(fields, Some(Box::new(LogReporter)));

    let main = match workflow.run_main() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("[sheetflow run] error: {e}");
            return 5;
        }
    };
    println!("main chain: {main}");
    if main == WorkflowState::Failed {
        eprintln!("  {}", workflow.error_message());
    }

    let rows = workflow.rows();
    let generated = rows.iter().filter(|r| r.is_generated()).count();
    let uploaded = rows.iter().filter(|r| r.is_uploaded()).count();
    info!("rows={} generated={generated} uploaded={uploaded}", rows.len());
    println!("rows: {} generated: {generated} uploaded: {uploaded}", rows.len());

    let optional = match workflow.run_optional() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("[sheetflow run] error: {e}");
            return 5;
        }
    };
    println!("optional chain: {optional}");
    if optional == WorkflowState::Failed {
        eprintln!("  {}", workflow.error_message());
    }

    if main == WorkflowState::Success && optional == WorkflowState::Success {
        0
    } else {
        4
    }
}

fn reset(dirs: &Dirs) -> i32 {
    let mut workflow = AutomationWorkflow::new(services(dirs, InMemoryDocumentStore::new()));
    match workflow.reset() {
        Ok(()) => {
            println!("scratch vaciado: {}", dirs.scratch_dir.display());
            0
        }
        Err(e) => {
            error!("reset: {e}");
            eprintln!("[sheetflow reset] error: {e}");
            5
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_become_input_fields() {
        let cli = Cli::try_parse_from(["sheetflow", "run", "--sheet", " june.json ", "--notify", "--email", "ops@example.com"]).unwrap();
        let Command::Run(args) = cli.command else { panic!("expected run") };
        let fields = args.fields().unwrap();
        assert_eq!(fields.google_sheets_url, "june.json");
        assert!(fields.send_email_notifications);
        assert!(!fields.generate_daily_report);
        assert_eq!(fields.email_address, "ops@example.com");
        assert_eq!(fields.google_drive_folder_url, "");
    }

    #[test]
    fn run_requires_a_sheet_or_an_inputs_file() {
        assert!(Cli::try_parse_from(["sheetflow", "run"]).is_err());
        assert!(Cli::try_parse_from(["sheetflow", "run", "--inputs", "form.json"]).is_ok());
    }

    #[test]
    fn inputs_file_is_read_leniently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"google_sheets_url":"a.json","generate_daily_report":"yes","extra":1}"#).unwrap();
        let args = RunArgs { sheet: None,
                             folder: String::new(),
                             notify: false,
                             email: String::new(),
                             daily_report: false,
                             inputs: Some(path) };
        let fields = args.fields().unwrap();
        assert_eq!(fields.google_sheets_url, "a.json");
        assert!(fields.generate_daily_report);
    }
}
