use crate::config::{load_settings, project_paths, save_settings_atomic, Paths, Settings};
use crate::input::{collect_input_nonblocking, map_event_to_action, UiAction};
use crate::model::Difficulty;
use crate::render::{draw_center_box, draw_plant, ui_overlay, Terminal};
use crate::session::Session;
use crate::sim::Intent;
use crate::storage::PlantSlot;
use std::cmp::{max, min};
use std::time::{Duration, Instant};

const NAME_MAX: usize = 18;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scene {
    Main,
    Settings,
    Help,
    Rename,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SettingsRow {
    Name,
    Difficulty,
    PlantType,
    Reset,
}

impl SettingsRow {
    pub(crate) const ALL: [SettingsRow; 4] = [
        SettingsRow::Name,
        SettingsRow::Difficulty,
        SettingsRow::PlantType,
        SettingsRow::Reset,
    ];
}

/// Presentation-only state; nothing here is persisted with the plant.
#[derive(Clone, Debug)]
pub(crate) struct UiState {
    pub(crate) scene: Scene,
    pub(crate) settings_cursor: usize,
    pub(crate) name_edit: String,
    pub(crate) difficulty: Difficulty,
    pub(crate) decay_every: Option<Duration>,
}

impl UiState {
    fn new(session: &Session) -> Self {
        Self {
            scene: Scene::Main,
            settings_cursor: 0,
            name_edit: String::new(),
            difficulty: session.difficulty(),
            decay_every: session.decay_period(),
        }
    }
}

pub(crate) struct App {
    settings: Settings,
    paths: Paths,
    session: Session,
    ui: UiState,
    term: Terminal,
    should_quit: bool,
}

impl App {
    fn init(paths: Paths) -> anyhow::Result<Self> {
        let settings = load_settings(&paths.settings_path);
        let slot = PlantSlot::new(paths.plant_path.clone());
        let session = Session::start(
            settings.rules.clone(),
            settings.difficulty,
            slot,
            Instant::now(),
        );
        let ui = UiState::new(&session);

        let term = Terminal::begin()?;

        Ok(Self {
            settings,
            paths,
            session,
            ui,
            term,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let result = self.run_loop();

        self.session.shutdown();
        let ended = self.term.end();
        if let Err(e) = save_settings_atomic(&self.paths.settings_path, &self.settings) {
            log::warn!("could not save settings: {e:#}");
        }
        log::info!("bye");
        result.and(ended)
    }

    fn run_loop(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(5, 120);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        while !self.should_quit {
            self.term.resize_if_needed()?;

            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(self.ui.scene, &ev) {
                    self.handle(action);
                }
                if self.should_quit {
                    break;
                }
            }

            self.session.advance(Instant::now());
            self.render_frame()?;
        }
        Ok(())
    }

    fn handle(&mut self, action: UiAction) {
        let now = Instant::now();
        match action {
            UiAction::Care(key) => {
                let amount = self.session.rules().care_amount as i32;
                self.session.dispatch(Intent::IncrementStat(key, amount), now);
            }
            UiAction::HelpToggle => {
                self.ui.scene = match self.ui.scene {
                    Scene::Help => Scene::Main,
                    _ => Scene::Help,
                };
            }
            UiAction::SettingsOpen => {
                self.ui.scene = Scene::Settings;
                self.ui.settings_cursor = 0;
            }
            UiAction::SettingsMove(delta) => {
                let len = SettingsRow::ALL.len() as i32;
                let next = (self.ui.settings_cursor as i32 + delta).rem_euclid(len);
                self.ui.settings_cursor = next as usize;
            }
            UiAction::SettingsActivate => self.activate_setting(now),
            UiAction::RenameChar(ch) => {
                if self.ui.name_edit.chars().count() < NAME_MAX {
                    self.ui.name_edit.push(ch);
                }
            }
            UiAction::RenameBackspace => {
                self.ui.name_edit.pop();
            }
            UiAction::RenameCommit => {
                let trimmed = self.ui.name_edit.trim();
                if !trimmed.is_empty() {
                    self.session.dispatch(Intent::SetName(trimmed.to_string()), now);
                }
                self.ui.scene = Scene::Settings;
            }
            UiAction::RenameCancel => self.ui.scene = Scene::Settings,
            UiAction::Back => self.ui.scene = Scene::Main,
            UiAction::Quit => self.should_quit = true,
        }
    }

    fn activate_setting(&mut self, now: Instant) {
        let Some(row) = SettingsRow::ALL.get(self.ui.settings_cursor) else {
            return;
        };
        match row {
            SettingsRow::Name => {
                self.ui.name_edit = self.session.plant().name().to_string();
                self.ui.scene = Scene::Rename;
            }
            SettingsRow::Difficulty => {
                let next = self.session.difficulty().next();
                self.session.dispatch(Intent::SetDifficulty(next), now);
                self.ui.difficulty = next;
                self.ui.decay_every = self.session.decay_period();
                self.settings.difficulty = next;
                if let Err(e) = save_settings_atomic(&self.paths.settings_path, &self.settings) {
                    log::warn!("could not save settings: {e:#}");
                }
            }
            SettingsRow::PlantType => {
                let next = self.session.plant().plant_type().next();
                self.session.dispatch(Intent::SetPlantType(next), now);
            }
            SettingsRow::Reset => {
                self.session.dispatch(Intent::Reset, now);
            }
        }
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let color = self.settings.enable_color;
        self.term.cur.clear(crossterm::style::Color::Black);

        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;

        // Left panel for text; plant centred in the rest.
        let panel_w = min(max(34, cols / 3), cols - 12).max(0);
        let cx = panel_w + (cols - panel_w) / 2;
        let cy = rows / 2;
        draw_plant(&mut self.term.cur, self.session.plant(), cx, cy, color);

        ui_overlay(&mut self.term.cur, self.session.plant(), &self.ui, color);

        match self.ui.scene {
            Scene::Help => {
                let rules = self.session.rules();
                let body = format!(
                    "Keep your plant's three stats up.\n\n\
                     W Water: +{care} hydration\n\
                     S Sun: +{care} sunlight\n\
                     F Fertilize: +{care} nutrients\n\n\
                     Every stat drops by {step} each decay tick.\n\
                     Below {t} hydration it gets thirsty, then it\n\
                     checks sunlight and nutrients the same way.\n\
                     Average {bloom}+ blooms, {sprout}+ is a sprout.\n\n\
                     Tab opens settings. Esc or H closes help.",
                    care = rules.care_amount,
                    step = rules.decay_step,
                    t = rules.thirsty_below,
                    bloom = rules.bloom_at,
                    sprout = rules.sprout_at,
                );
                draw_center_box(&mut self.term.cur, "How to care for your plant", &body);
            }
            Scene::Rename => {
                let mut preview = self.ui.name_edit.clone();
                if preview.chars().count() < NAME_MAX {
                    preview.push('_');
                }
                draw_center_box(
                    &mut self.term.cur,
                    "Rename plant",
                    &format!(
                        "Type a name (max {NAME_MAX} chars).\n\nName: {preview}\n\nEnter save | Esc cancel | Backspace delete"
                    ),
                );
            }
            Scene::Main | Scene::Settings => {}
        }

        self.term.present()
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let paths = project_paths()?;
    if let Err(e) = crate::logging::init(&paths.log_path) {
        eprintln!("logging disabled: {e:#}");
    }
    log::info!("starting, data in {}", paths.plant_path.display());

    let mut app = App::init(paths)?;
    app.run()
}
