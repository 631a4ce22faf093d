use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Color};

/// Row-major ownership grid. All cell access is bounds-checked; coordinates
/// outside the arena read as unclaimed and ignore writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridWorld {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl GridWorld {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, cx: i64, cy: i64) -> bool {
        cx >= 0 && cy >= 0 && (cx as usize) < self.cols && (cy as usize) < self.rows
    }

    fn index(&self, cx: i64, cy: i64) -> Option<usize> {
        if self.in_bounds(cx, cy) {
            Some(cy as usize * self.cols + cx as usize)
        } else {
            None
        }
    }

    pub fn get(&self, cx: i64, cy: i64) -> Cell {
        self.index(cx, cy).and_then(|i| self.cells[i])
    }

    /// Owner of the cell containing continuous position `(x, y)`.
    pub fn owner_at(&self, x: f64, y: f64) -> Cell {
        self.get(x.floor() as i64, y.floor() as i64)
    }

    /// Returns false when the cell is off-grid.
    pub fn paint_cell(&mut self, cx: i64, cy: i64, owner: Color) -> bool {
        match self.index(cx, cy) {
            Some(i) => {
                self.cells[i] = Some(owner);
                true
            }
            None => false,
        }
    }

    /// Overwrites the cell under continuous position `(x, y)`, owned or not.
    pub fn paint(&mut self, x: f64, y: f64, owner: Color) -> bool {
        self.paint_cell(x.floor() as i64, y.floor() as i64, owner)
    }

    /// Paints the (2r+1)² square centred on a cell, clipped to the arena.
    pub fn paint_square(&mut self, cx: i64, cy: i64, radius: i64, owner: Color) {
        for y in cy - radius..=cy + radius {
            for x in cx - radius..=cx + radius {
                self.paint_cell(x, y, owner);
            }
        }
    }

    /// Paints every cell with `dx² + dy² <= radius²` around `(cx, cy)`.
    /// Returns how many in-bounds cells were painted.
    pub fn paint_disc(&mut self, cx: i64, cy: i64, radius: i64, owner: Color) -> u32 {
        let r2 = radius * radius;
        let mut painted = 0;
        for y in cy - radius..=cy + radius {
            for x in cx - radius..=cx + radius {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r2 && self.paint_cell(x, y, owner) {
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Relabels every `a` cell as `b` and every `b` cell as `a` in one pass.
    /// Returns the number of cells changed.
    pub fn swap_colors(&mut self, a: Color, b: Color) -> u32 {
        if a == b {
            return 0;
        }
        let mut changed = 0;
        for cell in self.cells.iter_mut() {
            match *cell {
                Some(c) if c == a => {
                    *cell = Some(b);
                    changed += 1;
                }
                Some(c) if c == b => {
                    *cell = Some(a);
                    changed += 1;
                }
                _ => {}
            }
        }
        changed
    }

    /// Converts to `owner` every 4-connected region of non-`owner` cells that
    /// does not reach the arena border. Returns the number of cells converted.
    ///
    /// `owner` cells act as walls. A region touching the border can escape the
    /// arena and is left alone; anything else is sealed off, regardless of who
    /// owned its cells before.
    pub fn capture_enclosed(&mut self, owner: Color) -> u32 {
        let (cols, rows) = (self.cols, self.rows);
        let mut visited = vec![false; self.cells.len()];
        let mut stack: Vec<usize> = Vec::new();
        let mut region: Vec<usize> = Vec::new();
        let mut converted = 0;

        for start in 0..self.cells.len() {
            if visited[start] || self.cells[start] == Some(owner) {
                continue;
            }

            region.clear();
            stack.clear();
            stack.push(start);
            visited[start] = true;
            let mut touches_border = false;

            while let Some(i) = stack.pop() {
                region.push(i);
                let (x, y) = (i % cols, i / cols);
                if x == 0 || y == 0 || x == cols - 1 || y == rows - 1 {
                    touches_border = true;
                }

                let mut visit = |n: usize, stack: &mut Vec<usize>| {
                    if !visited[n] && self.cells[n] != Some(owner) {
                        visited[n] = true;
                        stack.push(n);
                    }
                };
                if x + 1 < cols {
                    visit(i + 1, &mut stack);
                }
                if x > 0 {
                    visit(i - 1, &mut stack);
                }
                if y + 1 < rows {
                    visit(i + cols, &mut stack);
                }
                if y > 0 {
                    visit(i - cols, &mut stack);
                }
            }

            if !touches_border {
                for &i in &region {
                    self.cells[i] = Some(owner);
                }
                converted += region.len() as u32;
            }
        }

        converted
    }

    /// Cell count per owner colour. Unclaimed cells are not listed.
    pub fn flatten_score(&self) -> BTreeMap<Color, u32> {
        let mut scores = BTreeMap::new();
        for cell in self.cells.iter().flatten() {
            *scores.entry(*cell).or_insert(0) += 1;
        }
        scores
    }

    pub fn count(&self, owner: Color) -> u32 {
        self.cells.iter().filter(|c| **c == Some(owner)).count() as u32
    }

    pub fn unclaimed(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_none()).count() as u32
    }
}
