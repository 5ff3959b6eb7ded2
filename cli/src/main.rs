use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use smartcareer::api::jobs::JobFilters;
use smartcareer::api::resume::ResumeFile;
use smartcareer::api::{ApiClient, ApiError};
use smartcareer::auth::{AuthError, AuthFlow, LoginOutcome, fill_demo_credentials};
use smartcareer::config::{BASE_URL_ENV, ClientConfig, ConfigError, STATE_DIR_ENV};
use smartcareer::forms::{CONFIRM_PASSWORD, EMAIL, FormKind, FormState, NAME, PASSWORD, PROFILE_FIELDS};
use smartcareer::jobs::{JobStatus, StatusFilter, filter_jobs, jobs_from_body, status_counts};
use smartcareer::navigation::{Navigation, RecordingNavigator};
use smartcareer::routes::RouteGuard;
use smartcareer::session::{Session, SessionStore};
use smartcareer::storage::{FileStorage, StorageError};
use smartcareer::validation::{format_date, is_pdf_upload, sanitize_input, truncate_text};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("not signed in; run `smartcareer login` first")]
    NotSignedIn,
    #[error("only PDF resumes are accepted: {0}")]
    NotPdf(String),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CliError {
    /// A 401 already signed the user out; `report_navigation` says so.
    fn is_forced_sign_out(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized { .. }) | Self::Auth(AuthError::SessionExpired { .. }))
    }
}

#[derive(Parser, Debug)]
#[command(name = "smartcareer", about = "Smart Career client shell")]
struct Cli {
    #[arg(long, env = BASE_URL_ENV)]
    base_url: Option<String>,

    #[arg(long, env = STATE_DIR_ENV)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    /// Show the stored user; `--refresh` reloads it from `/auth/me`.
    Whoami {
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// Print whether a session token is stored.
    Status,
    /// Resolve a client route through the guard.
    Open { path: String },
    Profile(ProfileArgs),
    Resume(ResumeCommand),
    Jobs(JobsCommand),
    Skills(SkillsCommand),
    Dashboard(DashboardCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, required_unless_present = "demo")]
    email: Option<String>,

    #[arg(long, env = "SMARTCAREER_PASSWORD", required_unless_present = "demo")]
    password: Option<String>,

    /// Sign in with the built-in demo account.
    #[arg(long, default_value_t = false)]
    demo: bool,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "SMARTCAREER_PASSWORD")]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

/// Validate profile fields locally; nothing is sent.
#[derive(Args, Debug)]
struct ProfileArgs {
    /// `field=value` pairs, e.g. `name=Ada` `location=London`.
    #[arg(value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

#[derive(Args, Debug)]
struct ResumeCommand {
    #[command(subcommand)]
    command: ResumeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ResumeSubcommand {
    Upload { file: PathBuf },
    Analyze { resume_id: String },
    List,
    Show { resume_id: String },
    Delete { resume_id: String },
}

#[derive(Args, Debug)]
struct JobsCommand {
    #[command(subcommand)]
    command: JobsSubcommand,
}

#[derive(Subcommand, Debug)]
enum JobsSubcommand {
    List {
        /// Status tab: `all`, `applied`, `in-review`, `interview`, `offer`, `rejected`.
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Print per-status counts instead of the list.
        #[arg(long, default_value_t = false)]
        counts: bool,
    },
    Show {
        job_id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        job_id: String,
        #[arg(long)]
        data: String,
    },
    Status {
        job_id: String,
        status: JobStatus,
    },
    Delete {
        job_id: String,
    },
}

#[derive(Args, Debug)]
struct SkillsCommand {
    #[command(subcommand)]
    command: SkillsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SkillsSubcommand {
    List,
    Mine,
    Add {
        #[arg(long)]
        data: String,
    },
    Delete {
        skill_id: String,
    },
}

#[derive(Args, Debug)]
struct DashboardCommand {
    #[command(subcommand)]
    command: DashboardSubcommand,
}

#[derive(Subcommand, Debug)]
enum DashboardSubcommand {
    Stats,
    Progress,
    Activity,
}

struct CliContext {
    client: ApiClient,
    guard: RouteGuard,
    nav: Arc<RecordingNavigator>,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match build_context(&cli) {
        Ok(ctx) => {
            let result = run(&ctx, cli.command).await;
            report_navigation(&ctx.nav);
            result
        }
        Err(e) => Err(e),
    };
    if let Err(e) = outcome {
        if !e.is_forced_sign_out() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

fn build_context(cli: &Cli) -> Result<CliContext, CliError> {
    let config = ClientConfig::new(cli.base_url.as_deref(), cli.state_dir.clone())?;
    let session = SessionStore::new(FileStorage::open_or_reset(config.session_file())?);
    let nav = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(&config, session.clone(), nav.clone())?;
    let guard = RouteGuard::new(session, nav.clone());
    tracing::debug!(base_url = %config.base_url, state = %config.session_file().display(), "client ready");
    Ok(CliContext { client, guard, nav })
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login(args) => run_login(ctx, args).await,
        Command::Register(args) => run_register(ctx, args).await,
        Command::Logout => {
            AuthFlow::new(&ctx.client).logout().await?;
            println!("signed out");
            Ok(())
        }
        Command::Whoami { refresh } => run_whoami(ctx, refresh).await,
        Command::Status => {
            match ctx.client.session().snapshot() {
                Session { token: Some(token), user: Some(user) } if !token.is_empty() => {
                    println!("signed in as {} <{}>", user.name, user.email);
                }
                Session { token: Some(token), .. } if !token.is_empty() => println!("signed in"),
                _ => println!("signed out"),
            }
            Ok(())
        }
        Command::Open { path } => {
            let route = ctx.guard.open(&path);
            println!("{}", route.path());
            Ok(())
        }
        Command::Profile(args) => run_profile(ctx, args),
        Command::Resume(resume) => {
            require_session(ctx)?;
            run_resume(ctx, resume).await
        }
        Command::Jobs(jobs) => {
            require_session(ctx)?;
            run_jobs(ctx, jobs).await
        }
        Command::Skills(skills) => {
            require_session(ctx)?;
            run_skills(ctx, skills).await
        }
        Command::Dashboard(dashboard) => {
            require_session(ctx)?;
            run_dashboard(ctx, dashboard).await
        }
    }
}

/// Protected commands render only behind the route guard.
fn require_session(ctx: &CliContext) -> Result<(), CliError> {
    ctx.guard.render(|| ()).ok_or(CliError::NotSignedIn)
}

async fn run_login(ctx: &CliContext, args: LoginArgs) -> Result<(), CliError> {
    let mut form = FormState::new(FormKind::Login);
    if args.demo {
        fill_demo_credentials(&mut form);
    } else {
        form.set(EMAIL, args.email.unwrap_or_default());
        form.set(PASSWORD, args.password.unwrap_or_default());
    }
    match AuthFlow::new(&ctx.client).login(&mut form).await {
        Ok(LoginOutcome::Demo(user)) => println!("signed in as {} (demo)", user.name),
        Ok(LoginOutcome::Backend { user: Some(user) }) => println!("signed in as {}", user.name),
        Ok(LoginOutcome::Backend { user: None }) => println!("signed in"),
        Err(AuthError::InvalidForm) => return Err(form_errors(&form)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn run_register(ctx: &CliContext, args: RegisterArgs) -> Result<(), CliError> {
    let mut form = FormState::new(FormKind::Register);
    form.set(NAME, args.name);
    form.set(EMAIL, args.email);
    form.set(PASSWORD, args.password);
    form.set(CONFIRM_PASSWORD, args.confirm_password);
    match AuthFlow::new(&ctx.client).register(&mut form).await {
        Ok(_) => Ok(()),
        Err(AuthError::InvalidForm) => Err(form_errors(&form)),
        Err(e) => Err(e.into()),
    }
}

async fn run_whoami(ctx: &CliContext, refresh: bool) -> Result<(), CliError> {
    let user = if refresh {
        require_session(ctx)?;
        AuthFlow::new(&ctx.client).refresh_user().await?
    } else {
        ctx.client.session().get_user()
    };
    match user {
        Some(user) => println!("{} <{}> ({})", user.name, user.email, user.id),
        None => println!("no user stored"),
    }
    Ok(())
}

fn run_profile(ctx: &CliContext, args: ProfileArgs) -> Result<(), CliError> {
    require_session(ctx)?;
    let mut form = FormState::new(FormKind::Profile);
    if let Some(user) = ctx.client.session().get_user() {
        form.set(NAME, user.name);
        form.set(EMAIL, user.email);
    }
    for (field, value) in args.fields {
        form.set(&field, value);
    }
    if !form.validate() {
        return Err(form_errors(&form));
    }
    for field in PROFILE_FIELDS {
        let value = form.value(field);
        if !value.is_empty() {
            println!("{field}: {}", sanitize_input(value));
        }
    }
    Ok(())
}

async fn run_resume(ctx: &CliContext, resume: ResumeCommand) -> Result<(), CliError> {
    let api = ctx.client.resume();
    let json = match resume.command {
        ResumeSubcommand::Upload { file } => api.upload(read_resume(&file)?).await?,
        ResumeSubcommand::Analyze { resume_id } => api.analyze(&resume_id).await?,
        ResumeSubcommand::List => api.list().await?,
        ResumeSubcommand::Show { resume_id } => api.get(&resume_id).await?,
        ResumeSubcommand::Delete { resume_id } => api.delete(&resume_id).await?,
    };
    print_json(&json)
}

fn read_resume(path: &Path) -> Result<ResumeFile, CliError> {
    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    if !is_pdf_upload(&file_name, None) {
        return Err(CliError::NotPdf(file_name));
    }
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadFile { path: path.to_owned(), source })?;
    Ok(ResumeFile::pdf(file_name, bytes))
}

async fn run_jobs(ctx: &CliContext, jobs: JobsCommand) -> Result<(), CliError> {
    let api = ctx.client.jobs();
    let json = match jobs.command {
        JobsSubcommand::List { status, company, search, counts } => {
            let server_status = match status {
                StatusFilter::All => None,
                StatusFilter::Only(s) => Some(s),
            };
            let body = api.list(&JobFilters { status: server_status, company, search }).await?;
            let all = jobs_from_body(&body);
            if counts {
                print_counts(&all);
            } else {
                for job in filter_jobs(&all, status) {
                    let applied = job.applied_date.as_deref().map(format_date).unwrap_or_default();
                    println!(
                        "{}  {:<11}  {}  {}  {}",
                        job.id,
                        job.status.label(),
                        truncate_text(&job.company, 24),
                        truncate_text(&job.position, 32),
                        applied
                    );
                }
            }
            return Ok(());
        }
        JobsSubcommand::Show { job_id } => api.get(&job_id).await?,
        JobsSubcommand::Create { data } => api.create(&serde_json::from_str::<Value>(&data)?).await?,
        JobsSubcommand::Update { job_id, data } => api.update(&job_id, &serde_json::from_str::<Value>(&data)?).await?,
        JobsSubcommand::Status { job_id, status } => api.update_status(&job_id, status).await?,
        JobsSubcommand::Delete { job_id } => api.delete(&job_id).await?,
    };
    print_json(&json)
}

fn print_counts(jobs: &[smartcareer::jobs::JobApplication]) {
    let counts = status_counts(jobs);
    println!("All: {}", counts.get(StatusFilter::All));
    for status in JobStatus::ALL {
        println!("{}: {}", status.label(), counts.get(StatusFilter::Only(status)));
    }
}

async fn run_skills(ctx: &CliContext, skills: SkillsCommand) -> Result<(), CliError> {
    let api = ctx.client.skills();
    let json = match skills.command {
        SkillsSubcommand::List => api.list().await?,
        SkillsSubcommand::Mine => api.user_skills().await?,
        SkillsSubcommand::Add { data } => api.add(&serde_json::from_str::<Value>(&data)?).await?,
        SkillsSubcommand::Delete { skill_id } => api.delete(&skill_id).await?,
    };
    print_json(&json)
}

async fn run_dashboard(ctx: &CliContext, dashboard: DashboardCommand) -> Result<(), CliError> {
    let api = ctx.client.dashboard();
    let json = match dashboard.command {
        DashboardSubcommand::Stats => api.stats().await?,
        DashboardSubcommand::Progress => api.progress().await?,
        DashboardSubcommand::Activity => api.activity().await?,
    };
    print_json(&json)
}

/// Print field errors in form order and turn them into one failure.
fn form_errors(form: &FormState) -> CliError {
    for field in form.kind().fields() {
        if let Some(error) = form.error(field) {
            eprintln!("  {field}: {error}");
        }
    }
    CliError::Auth(AuthError::InvalidForm)
}

/// The shell has no router; tell the user where the app would have gone.
fn report_navigation(nav: &RecordingNavigator) {
    for transition in nav.take() {
        match transition {
            Navigation::Routed { path, options } => {
                if let Some(flash) = options.flash {
                    println!("{flash}");
                }
                tracing::debug!(%path, replace = options.replace, "routed");
            }
            Navigation::FullReload { path } => {
                eprintln!("signed out by the server; sign in again (reopen at {path})");
            }
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))
}
