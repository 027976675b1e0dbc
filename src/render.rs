use crate::app::{Scene, SettingsRow, UiState};
use crate::model::{GrowthStage, Mood, PlantState, PlantType, StatKey};
use crossterm::{
    cursor,
    execute, queue,
    style::{Color, Print, ResetColor, SetAttribute, Attribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
            bold: false,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }
}

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Write only the cells that changed since the last present.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        let mut last_bold = false;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                if c.bold != last_bold {
                    let attr = if c.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(self.out, SetAttribute(attr))?;
                    last_bold = c.bold;
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/* -----------------------------
   Plant art: one sprite per (type, stage)
------------------------------ */

pub(crate) fn plant_art(plant_type: PlantType, stage: GrowthStage) -> &'static [&'static str] {
    match (plant_type, stage) {
        (PlantType::Fern, GrowthStage::Seedling) => &[
            "           ",
            "           ",
            "     ,     ",
            "    \\|     ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Fern, GrowthStage::Sprout) => &[
            "           ",
            "    \\ /    ",
            "   --|--   ",
            "    \\|/    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Fern, GrowthStage::Bloom) => &[
            " \\\\  |  // ",
            "  \\\\ | //  ",
            " --\\\\|//-- ",
            "    \\|/    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Cactus, GrowthStage::Seedling) => &[
            "           ",
            "           ",
            "     _     ",
            "    (_)    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Cactus, GrowthStage::Sprout) => &[
            "           ",
            "     _     ",
            "  _ | |    ",
            " |_|| |    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Cactus, GrowthStage::Bloom) => &[
            "     *     ",
            "  _ | | _  ",
            " | || || | ",
            " |_|| ||_| ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Sunflower, GrowthStage::Seedling) => &[
            "           ",
            "           ",
            "           ",
            "    _|_    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Sunflower, GrowthStage::Sprout) => &[
            "           ",
            "     o     ",
            "    \\|     ",
            "     |/    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
        (PlantType::Sunflower, GrowthStage::Bloom) => &[
            "   \\ | /   ",
            "  -( @ )-  ",
            "   / | \\   ",
            "    \\|/    ",
            "  [_____]  ",
            "   \\___/   ",
        ],
    }
}

fn stage_color(stage: GrowthStage, plant_type: PlantType) -> Color {
    match (stage, plant_type) {
        (GrowthStage::Bloom, PlantType::Sunflower) => Color::Yellow,
        (GrowthStage::Bloom, _) => Color::Magenta,
        (GrowthStage::Sprout, _) => Color::Green,
        (GrowthStage::Seedling, _) => Color::DarkGreen,
    }
}

fn stat_color(key: StatKey, enable_color: bool) -> Color {
    if !enable_color {
        return Color::White;
    }
    match key {
        StatKey::Hydration => Color::Rgb { r: 0x6E, g: 0xE7, b: 0xB7 },
        StatKey::Sunlight => Color::Rgb { r: 0xFC, g: 0xD3, b: 0x4D },
        StatKey::Nutrients => Color::Rgb { r: 0xA7, g: 0x8B, b: 0xFA },
    }
}

pub(crate) fn draw_plant(buf: &mut CellBuffer, plant: &PlantState, cx: i32, cy: i32, enable_color: bool) {
    let bg = Color::Black;
    let art = plant_art(plant.plant_type(), plant.growth_stage());
    let fg = if enable_color {
        stage_color(plant.growth_stage(), plant.plant_type())
    } else {
        Color::White
    };

    let w = art.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
    let x0 = cx - w / 2;
    let y0 = cy - art.len() as i32 / 2;

    for (yy, line) in art.iter().enumerate() {
        let y = y0 + yy as i32;
        if y < 0 || y >= buf.h as i32 {
            continue;
        }
        for (xx, ch) in line.chars().enumerate() {
            let x = x0 + xx as i32;
            if ch == ' ' || x < 0 || x >= buf.w as i32 {
                continue;
            }
            // pot rows stay brown-ish
            let fg = if yy + 2 >= art.len() && enable_color {
                Color::DarkYellow
            } else {
                fg
            };
            buf.set(x as u16, y as u16, Cell { ch, fg, bg, bold: false });
        }
    }

    let caption = plant.mood().caption();
    let cap_fg = match (plant.mood(), enable_color) {
        (_, false) => Color::White,
        (Mood::Happy, true) => Color::Green,
        (Mood::Thirsty, true) => Color::Cyan,
        (Mood::NeedsSun, true) => Color::Yellow,
        (Mood::Hungry, true) => Color::Magenta,
    };
    let cap_y = y0 - 2;
    if cap_y >= 0 {
        let cap_x = (cx - caption.chars().count() as i32 / 2).max(0);
        draw_text(buf, cap_x as u16, cap_y as u16, caption, cap_fg, bg);
    }

    if plant.growth_stage() == GrowthStage::Bloom {
        let banner = "* Blooming! *";
        let by = y0 + art.len() as i32 + 1;
        if by >= 0 {
            let bx = (cx - banner.len() as i32 / 2).max(0);
            let fg = if enable_color { Color::Magenta } else { Color::White };
            draw_text(buf, bx as u16, by as u16, banner, fg, bg);
        }
    }
}

/* -----------------------------
   UI overlay (text + meters)
------------------------------ */

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    draw_styled(buf, x, y, s, fg, bg, false);
}

fn draw_styled(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color, bold: bool) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg, bold });
    }
}

fn bar(value: u8, width: usize) -> String {
    let fill = (value as usize * width + 50) / 100;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { ' ' });
    }
    s.push(']');
    s
}

pub(crate) fn ui_overlay(buf: &mut CellBuffer, plant: &PlantState, ui: &UiState, enable_color: bool) {
    let bg = Color::Black;
    let fg = Color::White;

    let title = format!(
        "PlantPal  |  Hello, {}!  |  {} {}",
        plant.name(),
        plant.plant_type().label(),
        plant.growth_stage().label()
    );
    draw_styled(buf, 1, 0, &title, fg, bg, true);

    for (i, key) in StatKey::ALL.iter().enumerate() {
        let val = plant.stat(*key);
        let line = format!("{:<9} {} {:>3}%", key.label(), bar(val, 14), val);
        draw_text(buf, 1, 2 + i as u16, &line, stat_color(*key, enable_color), bg);
    }

    let diff = match ui.decay_every {
        Some(every) => format!("Decay: {} (every {}s)", ui.difficulty.label(), every.as_secs()),
        None => format!("Decay: {} (paused)", ui.difficulty.label()),
    };
    draw_text(buf, 1, 6, &diff, fg, bg);

    let help = match ui.scene {
        Scene::Main => "Keys: w water | s sun | f fertilize | tab settings | h help | q quit",
        Scene::Settings => "Settings: ↑↓ select | enter apply | esc back | h help",
        Scene::Help => "Help: esc back | h close | q quit",
        Scene::Rename => "Rename: type name | enter save | esc cancel",
    };
    draw_text(buf, 1, buf.h.saturating_sub(1), help, fg, bg);

    if ui.scene == Scene::Settings {
        draw_settings(buf, plant, ui);
    }
}

fn draw_settings(buf: &mut CellBuffer, plant: &PlantState, ui: &UiState) {
    let bg = Color::Black;
    let fg = Color::White;
    let hi = Color::Yellow;

    let start_x = 1;
    let start_y = 9;

    draw_text(buf, start_x, start_y, "Settings", fg, bg);

    for (i, row) in SettingsRow::ALL.iter().enumerate() {
        let selected = ui.settings_cursor == i;
        let value = match row {
            SettingsRow::Name => {
                let mut name: String = plant.name().chars().take(15).collect();
                if plant.name().chars().count() > 15 {
                    name.push_str("...");
                }
                format!("Name: {name}")
            }
            SettingsRow::Difficulty => format!("Difficulty: {}", ui.difficulty.label()),
            SettingsRow::PlantType => format!("Plant: {}", plant.plant_type().label()),
            SettingsRow::Reset => "Reset plant".to_string(),
        };
        let line = format!("{} {}", if selected { ">" } else { " " }, value);
        draw_styled(
            buf,
            start_x,
            start_y + 2 + i as u16,
            &line,
            if selected { hi } else { fg },
            bg,
            selected,
        );
    }
}

pub(crate) fn draw_center_box(buf: &mut CellBuffer, title: &str, body: &str) {
    let (w, h) = (buf.w, buf.h);
    let bw = 60u16.min(w.saturating_sub(4));
    let bh = 16u16.min(h.saturating_sub(4));
    if bw < 4 || bh < 4 {
        return;
    }
    let x0 = (w - bw) / 2;
    let y0 = (h - bh) / 2;

    let border = |ch| Cell { ch, ..Cell::default() };
    for y in y0..y0 + bh {
        for x in x0..x0 + bw {
            buf.set(x, y, Cell::default());
        }
    }
    for x in x0..x0 + bw {
        buf.set(x, y0, border('─'));
        buf.set(x, y0 + bh - 1, border('─'));
    }
    for y in y0..y0 + bh {
        buf.set(x0, y, border('│'));
        buf.set(x0 + bw - 1, y, border('│'));
    }
    buf.set(x0, y0, border('┌'));
    buf.set(x0 + bw - 1, y0, border('┐'));
    buf.set(x0, y0 + bh - 1, border('└'));
    buf.set(x0 + bw - 1, y0 + bh - 1, border('┘'));

    draw_text(buf, x0 + 2, y0 + 1, title, Color::White, Color::Black);
    for (i, line) in body.lines().enumerate() {
        let yy = y0 + 3 + i as u16;
        if yy >= y0 + bh - 1 {
            break;
        }
        draw_text(buf, x0 + 2, yy, line, Color::White, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Rules, Stats};

    #[test]
    fn every_sprite_has_a_pot_and_equal_height() {
        for t in [PlantType::Fern, PlantType::Cactus, PlantType::Sunflower] {
            for s in [GrowthStage::Seedling, GrowthStage::Sprout, GrowthStage::Bloom] {
                let art = plant_art(t, s);
                assert_eq!(art.len(), 6);
                assert!(art[4].contains("[_____]"));
            }
        }
    }

    #[test]
    fn bar_fill_tracks_value() {
        assert_eq!(bar(0, 10), format!("[{}]", " ".repeat(10)));
        assert_eq!(bar(100, 10), format!("[{}]", "█".repeat(10)));
        assert_eq!(bar(50, 10), format!("[{}{}]", "█".repeat(5), " ".repeat(5)));
    }

    #[test]
    fn blooming_banner_only_at_bloom() {
        let rules = Rules::default();
        let base = PlantState::new_default(&rules);
        let has_banner = |p: &PlantState| {
            let mut buf = CellBuffer::new(40, 20);
            draw_plant(&mut buf, p, 20, 10, true);
            let text: String = buf.cells.iter().map(|c| c.ch).collect();
            text.contains("Blooming!")
        };
        assert!(!has_banner(&base));
        assert!(has_banner(&base.with_stats(Stats::new(90, 90, 90), &rules)));
    }

    fn row_text(buf: &CellBuffer, y: u16) -> String {
        (0..buf.w).map(|x| buf.cells[buf.idx(x, y)].ch).collect()
    }

    fn ui(scene: Scene) -> UiState {
        UiState {
            scene,
            settings_cursor: 1,
            name_edit: String::new(),
            difficulty: Difficulty::Normal,
            decay_every: Some(std::time::Duration::from_secs(30)),
        }
    }

    #[test]
    fn title_names_type_and_stage_in_bold() {
        let rules = Rules::default();
        let plant = PlantState::new_default(&rules).with_stats(Stats::new(20, 20, 20), &rules);
        let mut buf = CellBuffer::new(80, 24);
        ui_overlay(&mut buf, &plant, &ui(Scene::Main), true);

        let title = row_text(&buf, 0);
        assert!(title.contains("Hello, Leafy!"));
        assert!(title.contains("Fern Seedling"));
        assert!(buf.cells[buf.idx(1, 0)].bold);
        assert!(row_text(&buf, 6).contains("Decay: Normal (every 30s)"));
    }

    #[test]
    fn selected_settings_row_is_highlighted() {
        let plant = PlantState::new_default(&Rules::default());
        let mut buf = CellBuffer::new(80, 24);
        ui_overlay(&mut buf, &plant, &ui(Scene::Settings), true);

        // rows start at y = 11; cursor 1 is Difficulty
        assert!(row_text(&buf, 12).starts_with(" > Difficulty: Normal"));
        assert!(buf.cells[buf.idx(1, 12)].bold);
        assert!(!buf.cells[buf.idx(1, 11)].bold);
    }

    #[test]
    fn drawing_off_screen_does_not_panic() {
        let plant = PlantState::new_default(&Rules::default());
        let mut buf = CellBuffer::new(5, 3);
        draw_plant(&mut buf, &plant, -10, 40, false);
        draw_center_box(&mut buf, "title", "body");
        draw_text(&mut buf, 100, 100, "x", Color::White, Color::Black);
    }
}
