mod ui;

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex_team::action::Action;
use pokedex_team::api::ApiClient;
use pokedex_team::config::{AppConfig, ConfigArgs};
use pokedex_team::effect::Effect;
use pokedex_team::pagination::Pagination;
use pokedex_team::reducer::reducer;
use pokedex_team::state::{AppState, FocusArea};
use pokedex_team::storage::{FileStore, TeamStorage};

const SPINNER_TICK_MS: u64 = 90;
const SEARCH_DEBOUNCE_MS: u64 = 250;

#[derive(Parser, Debug)]
#[command(name = "pokedex-team")]
#[command(about = "Browse the Pokedex and build a team")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DexComponentId {
    DexList,
    Evolution,
    Team,
    Search,
    Prompt,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    DexList,
    Evolution,
    Team,
    Search,
    Prompt,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if let Some(modal) = self.modal() {
            return Some(modal);
        }
        match self.focus {
            FocusArea::DexList => Some(DexComponentId::DexList),
            FocusArea::Evolution => Some(DexComponentId::Evolution),
            FocusArea::Team => Some(DexComponentId::Team),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.prompt.active {
            Some(DexComponentId::Prompt)
        } else if self.search.active {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::DexList => DexContext::DexList,
            DexComponentId::Evolution => DexContext::Evolution,
            DexComponentId::Team => DexContext::Team,
            DexComponentId::Search => DexContext::Search,
            DexComponentId::Prompt => DexContext::Prompt,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::DexList
    }
}

/// Collaborators the effect handler needs for the whole session.
struct Services {
    api: ApiClient,
    storage: Mutex<TeamStorage<FileStore>>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = AppConfig::from_args(args.config);
    init_tracing(&config)?;
    tracing::info!(
        api = %config.api.base_url,
        page_size = config.api.page_size,
        data_dir = %config.data_dir.display(),
        "starting"
    );

    let storage = TeamStorage::new(FileStore::new(config.data_dir.clone()));
    let team = storage.restore();
    let api = ApiClient::new(config.api.clone()).map_err(io::Error::other)?;
    let services = Arc::new(Services {
        api,
        storage: Mutex::new(storage),
    });

    let debug = DebugSession::new(args.debug);
    let initial = AppState::new(Pagination::new(config.max_page), config.preload, team);
    let state = debug
        .load_state_or_else_async(move || async move { Ok::<AppState, io::Error>(initial) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, services).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("bye");
    Ok(())
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_tracing(config: &AppConfig) -> io::Result<()> {
    if let Some(parent) = config.log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let writer = Mutex::new(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .init();
    }
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    services: Arc<Services>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ui::DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::DexList, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_evo = Rc::clone(&ui);
    bus.register(DexComponentId::Evolution, move |event, state| {
        ui_evo
            .borrow_mut()
            .handle_relation_event(&event.kind, state)
    });

    let ui_team = Rc::clone(&ui);
    bus.register(DexComponentId::Team, move |event, state| {
        ui_team.borrow_mut().handle_team_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_prompt = Rc::clone(&ui);
    bus.register(DexComponentId::Prompt, move |event, state| {
        ui_prompt
            .borrow_mut()
            .handle_prompt_event(&event.kind, state)
    });

    bus.register_global(|event, state| {
        let typing = state.search.active || state.prompt.active;
        match event.kind {
            EventKind::Resize(width, height) => {
                HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
            }
            EventKind::Key(key) if !typing => match ui::global_key_action(key.code) {
                Some(action) => HandlerResponse::action(action),
                None => HandlerResponse::ignored(),
            },
            _ => HandlerResponse::ignored(),
        }
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect: Effect, ctx: &mut EffectContext<Action>| {
                handle_effect(effect, ctx, &services)
            },
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: &Services) {
    match effect {
        Effect::LoadPage { page, generation } => {
            let api = services.api.clone();
            ctx.tasks().spawn(TaskKey::new("page"), async move {
                match api.fetch_page(page).await {
                    Ok(records) => Action::PageDidLoad {
                        page,
                        generation,
                        records,
                    },
                    Err(err) => Action::PageDidError {
                        page,
                        generation,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::PreloadCatalog { ids } => {
            let api = services.api.clone();
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api.fetch_range(&ids).await {
                    Ok(records) => Action::CatalogDidLoad(records),
                    Err(err) => Action::CatalogDidError(err.to_string()),
                }
            });
        }
        Effect::SearchById { id, generation } => {
            let api = services.api.clone();
            ctx.tasks().debounce(
                "id_search",
                Duration::from_millis(SEARCH_DEBOUNCE_MS),
                async move {
                    match api.fetch_one(id).await {
                        Ok(record) => Action::IdSearchDidLoad { generation, record },
                        Err(err) => Action::IdSearchDidError {
                            generation,
                            id,
                            not_found: err.is_not_found(),
                            error: err.to_string(),
                        },
                    }
                },
            );
        }
        Effect::LoadRecord { id } => {
            let api = services.api.clone();
            ctx.tasks()
                .spawn(TaskKey::new(format!("record_{id}")), async move {
                    match api.fetch_one(id).await {
                        Ok(record) => Action::RecordDidLoad(record),
                        Err(err) => Action::RecordDidError {
                            id,
                            error: err.to_string(),
                        },
                    }
                });
        }
        Effect::PersistTeam { members } => match services.storage.lock() {
            Ok(mut storage) => {
                if let Err(err) = storage.save_current(&members) {
                    tracing::error!(error = %err, "failed to persist team");
                }
            }
            Err(err) => tracing::error!(error = %err, "team storage unavailable"),
        },
        Effect::PersistSnapshots { snapshots } => match services.storage.lock() {
            Ok(mut storage) => {
                if let Err(err) = storage.save_snapshots(&snapshots) {
                    tracing::error!(error = %err, "failed to persist saved teams");
                }
            }
            Err(err) => tracing::error!(error = %err, "team storage unavailable"),
        },
    }
}
