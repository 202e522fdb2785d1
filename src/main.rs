//! Weather panel - terminal weather lookup with a clickable map

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_panel::action::Action;
use weather_panel::api::{GeocodingClient, WeatherClient};
use weather_panel::components::{
    AlertModal, AlertModalProps, Component, WeatherPanel, WeatherPanelProps,
};
use weather_panel::config::{Config, default_log_file};
use weather_panel::effect::Effect;
use weather_panel::logging;
use weather_panel::map::{MAX_ZOOM, MIN_ZOOM, TileSource};
use weather_panel::reducer::reducer;
use weather_panel::state::AppState;

/// Weather panel - search a city or click the map for current conditions
#[derive(Parser, Debug)]
#[command(name = "weather-panel")]
#[command(about = "Current weather for a city, with a map to pick places from")]
struct Args {
    /// OpenWeather API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: String,

    /// City searched on startup
    #[arg(long, short, default_value = "London")]
    city: String,

    /// Initial map zoom level
    #[arg(
        long,
        short,
        default_value_t = weather_panel::map::DEFAULT_ZOOM,
        value_parser = clap::value_parser!(u8).range(MIN_ZOOM as i64..=MAX_ZOOM as i64)
    )]
    zoom: u8,

    /// OpenWeather base URL
    #[arg(long, env = "WEATHER_PANEL_WEATHER_URL", default_value = weather_panel::api::OPENWEATHER_URL)]
    weather_url: String,

    /// Nominatim base URL
    #[arg(long, env = "WEATHER_PANEL_GEOCODE_URL", default_value = weather_panel::api::NOMINATIM_URL)]
    geocode_url: String,

    /// Tile URL template with {s}, {z}, {x} and {y} placeholders
    #[arg(long, env = "WEATHER_PANEL_TILE_URL", default_value = weather_panel::map::DEFAULT_TILE_TEMPLATE)]
    tile_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, env = "WEATHER_PANEL_LOG")]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

impl Args {
    fn split(self) -> (Config, DebugCliArgs) {
        let mut config = Config::new(self.api_key);
        config.initial_city = self.city;
        config.zoom = self.zoom;
        config.weather_url = self.weather_url;
        config.geocode_url = self.geocode_url;
        config.tiles = TileSource::new(self.tile_url);
        config.request_timeout = Duration::from_secs(self.timeout_secs);
        config.log_file = self.log_file.unwrap_or_else(default_log_file);
        (config, self.debug)
    }
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PanelComponentId {
    Panel,
    Alert,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PanelContext {
    Main,
    Alert,
}

impl EventRoutingState<PanelComponentId, PanelContext> for AppState {
    fn focused(&self) -> Option<PanelComponentId> {
        if self.alert.is_some() {
            Some(PanelComponentId::Alert)
        } else {
            Some(PanelComponentId::Panel)
        }
    }

    fn modal(&self) -> Option<PanelComponentId> {
        self.alert.as_ref().map(|_| PanelComponentId::Alert)
    }

    fn binding_context(&self, id: PanelComponentId) -> PanelContext {
        match id {
            PanelComponentId::Panel => PanelContext::Main,
            PanelComponentId::Alert => PanelContext::Alert,
        }
    }

    fn default_context(&self) -> PanelContext {
        PanelContext::Main
    }
}

/// Clients shared by every spawned request
struct Services {
    weather: WeatherClient,
    geocoding: GeocodingClient,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let (config, debug_args) = Args::parse().split();

    logging::init(&config.log_file)?;
    tracing::info!(
        city = %config.initial_city,
        zoom = config.zoom,
        weather_url = %config.weather_url,
        geocode_url = %config.geocode_url,
        "starting"
    );

    let services = Arc::new(Services {
        weather: WeatherClient::new(
            config.weather_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
        .map_err(io::Error::other)?,
        geocoding: GeocodingClient::new(config.geocode_url.clone(), config.request_timeout)
            .map_err(io::Error::other)?,
    });

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let initial_city = config.initial_city.clone();
    let zoom = config.zoom;
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(initial_city, zoom))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        &config,
        services,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
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
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

struct PanelUi {
    panel: WeatherPanel,
    alert: AlertModal,
    tiles: TileSource,
}

impl PanelUi {
    fn new(tiles: TileSource) -> Self {
        Self {
            panel: WeatherPanel::new(),
            alert: AlertModal::new(),
            tiles,
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PanelComponentId>,
    ) {
        event_ctx.set_component_area(PanelComponentId::Panel, area);

        let props = WeatherPanelProps {
            state,
            tiles: &self.tiles,
            is_focused: render_ctx.is_focused() && state.alert.is_none(),
        };
        self.panel.render(frame, area, props);

        match state.alert.as_deref() {
            Some(message) => {
                event_ctx.set_component_area(PanelComponentId::Alert, area);
                let props = AlertModalProps {
                    message,
                    is_focused: render_ctx.is_focused(),
                    on_dismiss: || Action::AlertDismiss,
                };
                self.alert.render(frame, area, props);
            }
            None => {
                event_ctx.component_areas.remove(&PanelComponentId::Alert);
            }
        }
    }

    fn handle_panel_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = WeatherPanelProps {
            state,
            tiles: &self.tiles,
            is_focused: true,
        };
        let actions: Vec<_> = self.panel.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_alert_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let Some(message) = state.alert.as_deref() else {
            return HandlerResponse::ignored();
        };
        let props = AlertModalProps {
            message,
            is_focused: true,
            on_dismiss: || Action::AlertDismiss,
        };
        let actions: Vec<_> = self.alert.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    config: &Config,
    services: Arc<Services>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PanelUi::new(config.tiles.clone())));
    let mut bus: EventBus<AppState, Action, PanelComponentId, PanelContext> = EventBus::new();
    let keybindings: Keybindings<PanelContext> = Keybindings::new();

    let ui_panel = Rc::clone(&ui);
    bus.register(PanelComponentId::Panel, move |event, state| {
        ui_panel.borrow_mut().handle_panel_event(&event.kind, state)
    });

    let ui_alert = Rc::clone(&ui);
    bus.register(PanelComponentId::Alert, move |event, state| {
        ui_alert.borrow_mut().handle_alert_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::WeatherSearch(config.initial_city.clone())),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&services)),
        )
        .await
}

/// Handle effects by spawning tasks
///
/// Spawning under a fixed key replaces the in-flight task of the same kind;
/// the request token carried back lets the reducer drop anything that still
/// slips through.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, services: Arc<Services>) {
    match effect {
        Effect::FetchWeather { request, city } => {
            tracing::info!(request, %city, "fetching weather");
            ctx.tasks().spawn("weather", async move {
                let result = services.weather.fetch_weather(&city).await;
                Action::from_weather_result(request, result)
            });
        }
        Effect::ReverseGeocode {
            request,
            coordinate,
        } => {
            tracing::info!(request, lat = coordinate.lat, lon = coordinate.lon, "reverse geocoding");
            ctx.tasks().spawn("geocode", async move {
                let result = services.geocoding.resolve_place_name(coordinate).await;
                Action::from_geocode_result(request, result)
            });
        }
    }
}
