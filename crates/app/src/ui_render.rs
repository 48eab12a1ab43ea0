//! Glyph rendering for the map, HUD, message feed and overlays.

use app::app_loop::AppState;
use app::ui_text::{controls_hint, hotbar_line, inventory_lines, meta_line, overlay_text, status_line, tone_rgb};
use dungeon::content::{find_npc_archetype, item_archetype};
use dungeon::{Combatant, Game, GameEvent, Pos, SaveStore, Tile};
use macroquad::prelude::*;

const HUD_HEIGHT: f32 = 64.0;
const FEED_HEIGHT: f32 = 190.0;
const PAD: f32 = 12.0;
const HUD_FONT: f32 = 20.0;
const FEED_LINE: f32 = 18.0;
const PANEL_BG: Color = Color { r: 0.05, g: 0.05, b: 0.08, a: 0.92 };

struct Grid {
    origin_x: f32,
    origin_y: f32,
    cell: f32,
}

impl Grid {
    fn fit(game: &Game) -> Self {
        let map = game.map();
        let width = screen_width() - 2.0 * PAD;
        let height = screen_height() - HUD_HEIGHT - FEED_HEIGHT - 2.0 * PAD;
        let cell = (width / map.width() as f32).min(height / map.height() as f32).max(4.0);
        Self { origin_x: PAD, origin_y: HUD_HEIGHT + PAD, cell }
    }

    /// Baseline position for a glyph in the given tile.
    fn glyph_at(&self, pos: Pos) -> (f32, f32) {
        (self.origin_x + pos.x as f32 * self.cell, self.origin_y + (pos.y + 1) as f32 * self.cell - self.cell * 0.15)
    }
}

pub fn draw_frame<S: SaveStore>(app: &AppState<S>) {
    let game = app.game();
    let grid = Grid::fit(game);
    draw_hud(game);
    draw_map(game, &grid);
    draw_feed(game);
    if game.inventory_open() {
        draw_inventory(game);
    }
    if player_was_hit(&app.recent_events) {
        draw_rectangle_lines(2.0, 2.0, screen_width() - 4.0, screen_height() - 4.0, 4.0, RED);
    }
    if let Some(text) = overlay_text(game.status()) {
        draw_overlay(text);
    }
}

fn rgb(hex: u32) -> Color {
    Color::from_rgba((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
}

fn player_was_hit(events: &[GameEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, GameEvent::AttackResolved { target: Combatant::Player, damage, .. } if *damage > 0))
}

fn draw_hud(game: &Game) {
    draw_text(&status_line(game), PAD, PAD + HUD_FONT, HUD_FONT, WHITE);
    draw_text(&hotbar_line(game.player()), PAD, PAD + 2.0 * HUD_FONT + 4.0, HUD_FONT, YELLOW);
}

fn draw_map(game: &Game, grid: &Grid) {
    let map = game.map();
    let font = grid.cell * 1.1;
    for pos in map.positions() {
        if !map.is_explored(pos) {
            continue;
        }
        let tile = map.tile_at(pos);
        let color = match (tile, game.is_visible(pos)) {
            (Tile::Stairs, _) => GOLD,
            (Tile::Wall, true) => LIGHTGRAY,
            (Tile::Floor, true) => GRAY,
            (_, false) => DARKGRAY,
        };
        let (x, y) = grid.glyph_at(pos);
        draw_text(&tile.glyph().to_string(), x, y, font, color);
    }

    for (_, item) in game.items() {
        if game.is_visible(item.pos) {
            let (x, y) = grid.glyph_at(item.pos);
            let color = rgb(item_archetype(item.stack.kind).color);
            draw_text(&item.stack.glyph.to_string(), x, y, font, color);
        }
    }
    for (_, npc) in game.npcs() {
        if game.is_visible(npc.pos) {
            let (x, y) = grid.glyph_at(npc.pos);
            let color = find_npc_archetype(&npc.name).map_or(SKYBLUE, |archetype| rgb(archetype.color));
            draw_text(&npc.glyph.to_string(), x, y, font, color);
        }
    }
    for (_, enemy) in game.enemies() {
        if !enemy.is_alive() || !enemy.footprint().any(|pos| game.is_visible(pos)) {
            continue;
        }
        // Big footprints draw one glyph scaled to cover every tile.
        let size = enemy.size() as f32;
        let (x, _) = grid.glyph_at(enemy.pos);
        let (_, y) = grid.glyph_at(enemy.pos.offset(0, enemy.size() - 1));
        draw_text(&enemy.glyph.to_string(), x, y, font * size, rgb(enemy.color));
    }

    let (x, y) = grid.glyph_at(game.player().pos);
    draw_text("@", x, y, font, GREEN);
}

fn draw_feed(game: &Game) {
    let top = screen_height() - FEED_HEIGHT;
    draw_rectangle(0.0, top, screen_width(), FEED_HEIGHT, PANEL_BG);
    for (index, message) in game.messages().iter().enumerate() {
        let y = top + PAD + (index as f32 + 1.0) * FEED_LINE;
        draw_text(&message.text, PAD, y, FEED_LINE, rgb(tone_rgb(message.tone)));
    }
    draw_text(controls_hint(), PAD, screen_height() - 6.0, 16.0, DARKGRAY);
    draw_text(&meta_line(game), screen_width() * 0.55, top + PAD + FEED_LINE, FEED_LINE, LIGHTGRAY);
}

fn draw_inventory(game: &Game) {
    let lines = inventory_lines(game.player(), game.rules().inventory.bag_capacity);
    let width = 360.0;
    let height = PAD * 2.0 + lines.len() as f32 * FEED_LINE;
    let x = screen_width() - width - PAD;
    let y = HUD_HEIGHT + PAD;
    draw_rectangle(x, y, width, height, PANEL_BG);
    draw_rectangle_lines(x, y, width, height, 1.0, GRAY);
    for (index, line) in lines.iter().enumerate() {
        draw_text(line, x + PAD, y + PAD + (index as f32 + 1.0) * FEED_LINE - 4.0, FEED_LINE, WHITE);
    }
}

fn draw_overlay(text: &str) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color { r: 0.0, g: 0.0, b: 0.0, a: 0.6 });
    let size = 36.0;
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (screen_width() - dims.width) / 2.0, screen_height() / 2.0, size, YELLOW);
}
