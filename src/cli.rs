//! Subcommand implementations.

use anyhow::{Context as _, Result, bail};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use codesense::app::App;
use codesense::app::store::{Action, AnalysisAction, ChatAction, EditorAction, ProjectAction};
use codesense::application::{PersistenceGateway, Services};
use codesense::domain::{Language, ProjectId, TranscriptEntry, clean_reply};
use codesense::infra::app_config::{AppConfig, StorageBackend, save_config_to};
use codesense::infra::clipboard::SystemClipboard;
use codesense::infra::db::{Database, LocalStore};
use codesense::infra::http::HttpClient;
use codesense::infra::watch::FileWatcher;

pub struct Context {
    config: AppConfig,
    services: Services,
    local: Option<LocalStore>,
}

impl Context {
    #[cfg(test)]
    fn with_local_store(config: AppConfig, store: LocalStore) -> Result<Self> {
        let http = Arc::new(HttpClient::from_config(&config)?);
        Ok(Self {
            services: Services {
                analysis: http.clone(),
                assistant: http,
                store: Arc::new(store.clone()),
                clipboard: Arc::new(SystemClipboard),
            },
            config,
            local: Some(store),
        })
    }

    pub fn new(config: AppConfig) -> Result<Self> {
        let http = Arc::new(HttpClient::from_config(&config)?);
        let local = match config.storage {
            StorageBackend::Local => Some(match &config.local_db_path {
                Some(path) => LocalStore::new(Database::open_at(path.clone())?),
                None => LocalStore::open_default()?,
            }),
            StorageBackend::Remote => None,
        };
        let store: Arc<dyn PersistenceGateway> = match &local {
            Some(local) => Arc::new(local.clone()),
            None => http.clone(),
        };
        log::debug!(
            "server {} ({:?} storage)",
            http.base_url(),
            config.storage
        );

        Ok(Self {
            services: Services {
                analysis: http.clone(),
                assistant: http,
                store,
                clipboard: Arc::new(SystemClipboard),
            },
            config,
            local,
        })
    }

    fn app(&self) -> App {
        App::from_config(self.services.clone(), &self.config)
    }

    fn language_for(&self, file: &Path, explicit: Option<&str>) -> Language {
        explicit
            .map(Language::parse)
            .or_else(|| {
                file.extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(Language::from_extension)
            })
            .unwrap_or_else(|| self.config.default_language.clone())
    }

    async fn open(&self, app: &mut App, file: &Path, language: Option<&str>) -> Result<()> {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;
        let language = self.language_for(file, language);
        app.dispatch(Action::Editor(EditorAction::Open { text, language }));
        Ok(())
    }
}

/// Print the notice left by the last action; error notices fail the command.
fn report_notice(app: &App) -> Result<()> {
    if let Some(notice) = &app.state.notice {
        if notice.is_error {
            bail!("{}", notice.text);
        }
        println!("{}", notice.text);
    }
    Ok(())
}

pub async fn analyze(
    ctx: &Context,
    file: &Path,
    language: Option<&str>,
    fix: bool,
    copy: bool,
) -> Result<()> {
    let mut app = ctx.app();
    ctx.open(&mut app, file, language).await?;

    app.dispatch(Action::Analysis(AnalysisAction::Submit));
    app.settle().await;
    println!("{}", app.state.output.render_plain_text());

    if fix {
        app.dispatch(Action::Analysis(AnalysisAction::RequestFullFix));
        app.settle().await;
        println!("\n{}", app.state.output.render_plain_text());
    }

    if copy {
        app.dispatch(Action::Analysis(AnalysisAction::CopyOutput));
        app.settle().await;
        report_notice(&app)?;
    }
    Ok(())
}

pub async fn save(ctx: &Context, file: &Path, language: Option<&str>) -> Result<()> {
    let mut app = ctx.app();
    ctx.open(&mut app, file, language).await?;
    app.dispatch(Action::Editor(EditorAction::Save));
    app.settle().await;
    report_notice(&app)
}

pub async fn restore(ctx: &Context, output: Option<&Path>) -> Result<()> {
    let Some(snapshot) = ctx.services.store.load_last_snapshot().await? else {
        println!("No saved code.");
        return Ok(());
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, &snapshot.code)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Restored {} code to {}",
                snapshot.language.display_name(),
                path.display()
            );
        }
        None => {
            println!("// {}", snapshot.language.display_name());
            println!("{}", snapshot.code);
        }
    }
    Ok(())
}

pub async fn chat(ctx: &Context, message: &str) -> Result<()> {
    let mut app = ctx.app();
    app.dispatch(Action::Chat(ChatAction::Send(message.to_string())));
    app.settle().await;

    let reply = app
        .state
        .transcript
        .entries()
        .iter()
        .rev()
        .find_map(|entry| match entry {
            TranscriptEntry::Assistant(text) => Some(text.as_str()),
            _ => None,
        });
    match reply {
        Some(text) => println!("{text}"),
        None => bail!("Message is empty"),
    }
    Ok(())
}

pub async fn history(ctx: &Context) -> Result<()> {
    let turns = ctx.services.store.load_chat().await?;
    if turns.is_empty() {
        println!("No conversation yet.");
    }
    for turn in turns {
        println!("> {}", turn.user_message);
        println!("{}\n", clean_reply(&turn.assistant_reply));
    }
    Ok(())
}

pub async fn fixes(ctx: &Context, limit: usize) -> Result<()> {
    let Some(local) = &ctx.local else {
        bail!("Fix history is only kept by the local store; rerun with --local");
    };
    let fixes = local.recent_fixes(limit).await?;
    if fixes.is_empty() {
        println!("No full fixes recorded.");
    }
    for (index, fix) in fixes.iter().enumerate() {
        println!("#{} [{}]", index + 1, fix.language.display_name());
        println!("--- original\n{}", fix.original_code);
        println!("+++ fixed\n{}\n", fix.fixed_code);
    }
    Ok(())
}

async fn refreshed(ctx: &Context) -> Result<App> {
    let mut app = ctx.app();
    app.dispatch(Action::Project(ProjectAction::Refresh));
    app.settle().await;
    if let Some(err) = &app.state.projects.error {
        bail!("{err}");
    }
    Ok(app)
}

fn print_projects(app: &App) {
    let projects = &app.state.projects.projects;
    if projects.is_empty() {
        println!("No projects yet.");
        return;
    }
    for project in projects {
        println!(
            "{:>5}  {}  {} [{}]  {}",
            project.id,
            if project.is_favorite { "★" } else { "☆" },
            project.name,
            project.language.display_name(),
            project.created_at.as_deref().unwrap_or("")
        );
    }
}

pub async fn list_projects(ctx: &Context) -> Result<()> {
    let app = refreshed(ctx).await?;
    print_projects(&app);
    Ok(())
}

pub async fn create_project(
    ctx: &Context,
    name: &str,
    file: &Path,
    language: Option<&str>,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Project name is required");
    }
    let mut app = ctx.app();
    ctx.open(&mut app, file, language).await?;
    app.dispatch(Action::Project(ProjectAction::Create {
        name: name.to_string(),
    }));
    app.settle().await;
    report_notice(&app)?;
    print_projects(&app);
    Ok(())
}

pub async fn set_favorite(ctx: &Context, id: ProjectId, favorite: bool) -> Result<()> {
    let mut app = ctx.app();
    app.dispatch(Action::Project(ProjectAction::SetFavorite { id, favorite }));
    app.settle().await;
    report_notice(&app)?;

    match app.state.projects.find(id) {
        Some(project) if project.is_favorite => println!("★ {}", project.name),
        Some(project) => println!("☆ {}", project.name),
        None => bail!("No project with id {id}"),
    }
    Ok(())
}

pub async fn delete_project(ctx: &Context, id: ProjectId) -> Result<()> {
    let mut app = refreshed(ctx).await?;
    if app.state.projects.find(id).is_none() {
        bail!("No project with id {id}");
    }
    app.dispatch(Action::Project(ProjectAction::Delete { id }));
    app.settle().await;
    report_notice(&app)?;
    println!("Deleted project {id}.");
    Ok(())
}

pub async fn show_project(ctx: &Context, id: ProjectId) -> Result<()> {
    let mut app = refreshed(ctx).await?;
    let Some(project) = app.state.projects.find(id) else {
        bail!("No project with id {id}");
    };
    println!("{} [{}]", project.name, project.language.display_name());

    app.dispatch(Action::Project(ProjectAction::LoadIntoEditor { id }));
    println!("{}", app.state.editor.numbered());
    Ok(())
}

pub async fn watch(ctx: &Context, file: &Path, language: Option<&str>) -> Result<()> {
    let mut app = ctx.app();
    ctx.open(&mut app, file, language).await?;
    let (watcher, mut changes) = FileWatcher::start(file)?;
    println!(
        "Watching {} as {} (autosave after {} ms). Press Ctrl-C to stop.",
        watcher.path().display(),
        app.state.editor.language().display_name(),
        app.autosave_delay().as_millis()
    );

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            Some(()) = changes.recv() => {
                match tokio::fs::read_to_string(watcher.path()).await {
                    Ok(text) if text != app.state.editor.text() => {
                        app.dispatch(Action::Editor(EditorAction::Edit(text)));
                    }
                    Ok(_) => {}
                    Err(err) => log::warn!("failed to read {}: {err}", watcher.path().display()),
                }
            }
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
        }
        app.poll_action_messages();
    }

    app.settle().await;
    Ok(())
}

pub fn show_config(ctx: &Context, write_to: Option<&Path>) -> Result<()> {
    if let Some(path) = write_to {
        save_config_to(path, &ctx.config)?;
        println!("# written to {}", path.display());
    }
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}
