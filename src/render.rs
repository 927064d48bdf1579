//! Drawing sink
//!
//! The game describes each frame as a handful of fill/outline/text calls on a
//! [`DrawSurface`]. Any backend that can paint rectangles, circles and text
//! can show the game; [`AsciiSurface`] paints into a character grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{Ball, Block, GameState, Paddle, Surface};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 200, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PINK: Color = Color::rgb(255, 175, 175);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in [0, 1]
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

/// Anything that can paint primitive shapes
///
/// Coordinates are playfield units with y growing downward.
pub trait DrawSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn set_color(&mut self, color: Color);
    fn fill_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64);
    fn draw_text(&mut self, x: f64, y: f64, text: &str);

    /// Paint the whole surface in one color
    fn clear(&mut self, color: Color) {
        self.set_color(color);
        let (w, h) = (self.width(), self.height());
        self.fill_rectangle(0.0, 0.0, w, h);
    }
}

/// Something that knows how to draw itself
pub trait Drawable {
    fn draw_on(&self, surface: &mut dyn DrawSurface);
}

impl Drawable for Block {
    fn draw_on(&self, surface: &mut dyn DrawSurface) {
        let r = &self.rect;
        surface.set_color(self.color);
        surface.fill_rectangle(r.min_x(), r.min_y(), r.width, r.height);
        surface.set_color(Color::BLACK);
        surface.draw_rectangle(r.min_x(), r.min_y(), r.width, r.height);
    }
}

impl Drawable for Paddle {
    fn draw_on(&self, surface: &mut dyn DrawSurface) {
        let r = &self.rect;
        surface.set_color(self.color);
        surface.fill_rectangle(r.min_x(), r.min_y(), r.width, r.height);
        surface.set_color(Color::BLACK);
        surface.draw_rectangle(r.min_x(), r.min_y(), r.width, r.height);
    }
}

impl Drawable for Ball {
    fn draw_on(&self, surface: &mut dyn DrawSurface) {
        surface.set_color(self.color);
        surface.fill_circle(self.center.x, self.center.y, self.radius);
        surface.set_color(Color::BLACK);
        surface.draw_circle(self.center.x, self.center.y, self.radius);
    }
}

impl Drawable for Surface {
    fn draw_on(&self, surface: &mut dyn DrawSurface) {
        match self {
            Surface::Block(block) => block.draw_on(surface),
            Surface::Paddle(paddle) => paddle.draw_on(surface),
        }
    }
}

/// HUD text baseline
const HUD_Y: f64 = 15.0;

impl Drawable for GameState {
    /// Background, surfaces in registration order, balls, then the HUD
    fn draw_on(&self, surface: &mut dyn DrawSurface) {
        surface.clear(self.background);

        for (_, s) in self.environment.iter() {
            s.draw_on(surface);
        }
        for ball in &self.balls {
            ball.draw_on(surface);
        }

        surface.set_color(Color::BLACK);
        surface.draw_text(350.0, HUD_Y, &format!("Score: {}", self.score));
        surface.draw_text(500.0, HUD_Y, &format!("Level Name: {}", self.level_name));
    }
}

/// Glyph ramp from dark to bright
const RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];
const BALL_GLYPH: char = 'o';

/// Character-grid surface for terminals
///
/// Fills are rasterised by cell center; outlines are skipped since a cell is
/// too coarse to show them. Clearing blanks the grid whatever the color.
pub struct AsciiSurface {
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    cells: Vec<char>,
    glyph: char,
}

impl AsciiSurface {
    /// Grid of `cols` x `rows` cells covering `width` x `height`; at least one cell each way
    pub fn new(width: f64, height: f64, cols: usize, rows: usize) -> Self {
        let (cols, rows) = (cols.max(1), rows.max(1));
        Self {
            width,
            height,
            cols,
            rows,
            cells: vec![' '; cols * rows],
            glyph: RAMP[RAMP.len() - 1],
        }
    }

    fn cell_size(&self) -> (f64, f64) {
        (self.width / self.cols as f64, self.height / self.rows as f64)
    }

    fn cell_center(&self, col: usize, row: usize) -> (f64, f64) {
        let (cw, ch) = self.cell_size();
        ((col as f64 + 0.5) * cw, (row as f64 + 0.5) * ch)
    }

    /// Grid cell holding a playfield point, if it is on the surface
    fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (cw, ch) = self.cell_size();
        let (col, row) = ((x / cw).floor(), (y / ch).floor());
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((col as usize, row as usize))
    }

    fn put(&mut self, col: usize, row: usize, c: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = c;
        }
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl DrawSurface for AsciiSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_color(&mut self, color: Color) {
        let index = (color.luminance() * (RAMP.len() - 1) as f64).round() as usize;
        self.glyph = RAMP[index.min(RAMP.len() - 1)];
    }

    fn fill_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (cx, cy) = self.cell_center(col, row);
                if cx >= x && cx < x + width && cy >= y && cy < y + height {
                    self.put(col, row, self.glyph);
                }
            }
        }
    }

    fn draw_rectangle(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {}

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        let mut painted = false;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (cx, cy) = self.cell_center(col, row);
                if (cx - x).hypot(cy - y) <= radius {
                    self.put(col, row, BALL_GLYPH);
                    painted = true;
                }
            }
        }
        // Smaller than a cell: mark the cell under the center
        if !painted && let Some((col, row)) = self.cell_at(x, y) {
            self.put(col, row, BALL_GLYPH);
        }
    }

    fn draw_circle(&mut self, _x: f64, _y: f64, _radius: f64) {}

    fn draw_text(&mut self, x: f64, y: f64, text: &str) {
        let Some((col, row)) = self.cell_at(x, y) else {
            return;
        };
        for (i, c) in text.chars().enumerate() {
            self.put(col + i, row, c);
        }
    }

    fn clear(&mut self, _color: Color) {
        self.cells.fill(' ');
    }
}

impl fmt::Display for AsciiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
