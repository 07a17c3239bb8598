use bevy::{prelude::*, tasks::TaskPool};

use crate::{
    patterns::{Pattern, Rotation},
    rules,
};

const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A `width` x `height` buffer of cell ages, row-major with row 0 at the top.
///
/// An age of 0 is a dead cell; anything above is alive.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// # Panics
    /// if the cell lies outside the grid.
    #[inline]
    pub fn age(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of bounds");
        self.cells[row * self.width + col]
    }

    /// # Panics
    /// if the cell lies outside the grid.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, age: u8) {
        assert!(row < self.height && col < self.width, "cell ({row}, {col}) out of bounds");
        self.cells[row * self.width + col] = age;
    }

    /// index of a possibly out-of-bounds cell
    #[inline]
    fn index(&self, row: isize, col: isize) -> Option<usize> {
        let in_bounds =
            row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width;
        in_bounds.then(|| row as usize * self.width + col as usize)
    }

    /// Counts the live cells in the Moore neighbourhood. Cells past the edge count as dead.
    #[inline]
    pub fn live_neighbours(&self, row: usize, col: usize) -> u8 {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| {
                self.index(row as isize + dr, col as isize + dc)
                    .is_some_and(|idx| self.cells[idx] > 0)
            })
            .count() as u8
    }

    fn fill(&mut self, age: u8) {
        self.cells.fill(age);
    }
}

/// Which buffers a pointer mutation is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampTarget {
    /// only the displayed buffer; the next generation is computed from it
    Current,
    /// both buffers, so the mutation also survives into the scratch buffer
    Both,
}

impl StampTarget {
    pub fn for_running(running: bool) -> Self {
        if running {
            StampTarget::Current
        } else {
            StampTarget::Both
        }
    }
}

/// The double-buffered board. One buffer is current (displayed, read by the rule), the
/// other is the scratch target of the next generation; roles swap after each step.
#[derive(Resource, Debug, Clone, Default)]
pub struct LifeBoard {
    buffers: [Grid; 2],
    current: usize,
    generation: u64,
}

impl LifeBoard {
    pub fn new(width: usize, height: usize) -> Self {
        let mut board = Self::default();
        board.initialize(width, height);
        board
    }

    /// Reallocates both buffers as all dead, dropping any previous state.
    pub fn initialize(&mut self, width: usize, height: usize) {
        self.buffers = [Grid::new(width, height), Grid::new(width, height)];
        self.current = 0;
        self.generation = 0;
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.current().width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.current().height()
    }

    /// the authoritative, displayed generation
    #[inline]
    pub fn current(&self) -> &Grid {
        &self.buffers[self.current]
    }

    #[inline]
    pub fn scratch(&self) -> &Grid {
        &self.buffers[1 - self.current]
    }

    /// generations computed since the last (re)initialization
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// # Panics
    /// if the cell lies outside the board; callers bounds-check first.
    #[inline]
    pub fn get_cell(&self, row: usize, col: usize) -> u8 {
        self.current().age(row, col)
    }

    /// Writes one cell. Coordinates outside the board are ignored.
    pub fn set_cell(&mut self, row: i32, col: i32, age: u8, target: StampTarget) {
        let Some(idx) = self.current().index(row as isize, col as isize) else {
            return;
        };
        self.buffers[self.current].cells[idx] = age;
        if target == StampTarget::Both {
            self.buffers[1 - self.current].cells[idx] = age;
        }
    }

    /// Brings one cell to life at age 1.
    #[inline]
    pub fn draw_cell(&mut self, row: i32, col: i32, target: StampTarget) {
        self.set_cell(row, col, 1, target);
    }

    /// Stamps `pattern` so that its origin lands on (`row`, `col`). Every stamped cell
    /// is born at age 1, cells that fall off the board are dropped.
    pub fn stamp_pattern(
        &mut self,
        pattern: &Pattern,
        row: i32,
        col: i32,
        rotation: Rotation,
        target: StampTarget,
    ) {
        for (dr, dc) in pattern.rotated_cells(rotation) {
            self.draw_cell(row + dr, col + dc, target);
        }
    }

    /// Kills every cell in both buffers.
    pub fn clear(&mut self) {
        for grid in self.buffers.iter_mut() {
            grid.fill(0);
        }
    }

    /// Replaces the board with a random soup of newborn cells, identical in both buffers.
    pub fn randomize(&mut self, density: f32, rng: &mut fastrand::Rng) {
        let front = &mut self.buffers[self.current];
        for age in front.cells.iter_mut() {
            *age = u8::from(rng.f32() < density);
        }
        self.buffers[1 - self.current] = self.buffers[self.current].clone();
    }

    /// Advances one generation on the current thread.
    pub fn step(&mut self) {
        let (front, back) = self.split();
        rules::step_into(front, back);
        self.swap();
    }

    /// Advances one generation, spreading the work over `pool`.
    pub fn step_par(&mut self, pool: &TaskPool) {
        let (front, back) = self.split();
        rules::step_into_par(front, back, pool);
        self.swap();
    }

    /// (current, scratch)
    fn split(&mut self) -> (&Grid, &mut Grid) {
        let [a, b] = &mut self.buffers;
        if self.current == 0 {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn swap(&mut self) {
        self.current = 1 - self.current;
        self.generation += 1;
    }
}

#[cfg(test)]
mod test {
    use bevy::tasks::TaskPoolBuilder;

    use super::*;
    use crate::patterns::{BLINKER, BLOCK, GLIDER};

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                if grid.age(row, col) > 0 {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    #[test]
    fn grid_works() {
        let mut grid = Grid::new(4, 3);
        assert_eq!((4, 3), grid.size());
        assert_eq!(12, grid.cells().len());
        grid.set(2, 3, 9);
        assert_eq!(9, grid.age(2, 3));
        assert_eq!(9, grid.cells()[11]);
        assert_eq!(Some(5), grid.index(1, 1));
        assert_eq!(None, grid.index(-1, 0));
        assert_eq!(None, grid.index(0, 4));
        assert_eq!(None, grid.index(3, 0));

        assert_eq!(1, grid.live_neighbours(1, 2));
        assert_eq!(0, grid.live_neighbours(2, 3));
        assert_eq!(0, grid.live_neighbours(0, 0));
    }

    #[test]
    #[should_panic]
    fn reading_out_of_bounds_panics() {
        let board = LifeBoard::new(4, 4);
        board.get_cell(4, 0);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut board = LifeBoard::new(4, 4);
        let before = board.clone();
        for (r, c) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MAX, 2), (-100, -100)] {
            board.set_cell(r, c, 1, StampTarget::Both);
        }
        assert_eq!(before.current(), board.current());
        assert_eq!(before.scratch(), board.scratch());
    }

    #[test]
    fn block_stamp_sets_exactly_four_cells() {
        let mut board = LifeBoard::new(12, 12);
        board.set_cell(0, 0, 40, StampTarget::Both);
        board.stamp_pattern(&BLOCK, 5, 5, Rotation::R0, StampTarget::Both);
        assert_eq!(
            vec![(0, 0), (5, 5), (5, 6), (6, 5), (6, 6)],
            live_cells(board.current())
        );
        assert_eq!(40, board.get_cell(0, 0));
        for (r, c) in [(5, 5), (5, 6), (6, 5), (6, 6)] {
            assert_eq!(1, board.get_cell(r, c));
        }
    }

    #[test]
    fn stamp_overrides_existing_age() {
        let mut board = LifeBoard::new(8, 8);
        board.set_cell(5, 5, 200, StampTarget::Both);
        board.stamp_pattern(&BLOCK, 5, 5, Rotation::R90, StampTarget::Both);
        assert_eq!(1, board.get_cell(5, 5));
        assert_eq!(vec![(4, 5), (4, 6), (5, 5), (5, 6)], live_cells(board.current()));
    }

    #[test]
    fn glider_stamp_under_each_rotation() {
        let expected = [
            (Rotation::R0, vec![(9, 10), (10, 11), (11, 9), (11, 10), (11, 11)]),
            (Rotation::R90, vec![(9, 10), (9, 11), (10, 9), (10, 11), (11, 11)]),
            (Rotation::R180, vec![(9, 9), (9, 10), (9, 11), (10, 9), (11, 10)]),
            (Rotation::R270, vec![(9, 9), (10, 9), (10, 11), (11, 9), (11, 10)]),
        ];
        for (rotation, cells) in expected {
            let mut board = LifeBoard::new(20, 20);
            board.stamp_pattern(&GLIDER, 10, 10, rotation, StampTarget::Both);
            assert_eq!(cells, live_cells(board.current()), "{rotation:?}");
        }
    }

    #[test]
    fn stamp_clips_at_edges() {
        let mut board = LifeBoard::new(5, 5);
        board.stamp_pattern(&GLIDER, 0, 0, Rotation::R0, StampTarget::Both);
        assert_eq!(vec![(0, 1), (1, 0), (1, 1)], live_cells(board.current()));
    }

    #[test]
    fn paused_stamp_writes_both_buffers() {
        let mut board = LifeBoard::new(10, 10);
        board.stamp_pattern(&BLINKER, 4, 4, Rotation::R0, StampTarget::for_running(false));
        assert_eq!(board.current(), board.scratch());
        assert_eq!(3, live_cells(board.scratch()).len());
    }

    #[test]
    fn running_stamp_writes_current_only() {
        let mut board = LifeBoard::new(10, 10);
        board.stamp_pattern(&BLINKER, 4, 4, Rotation::R0, StampTarget::for_running(true));
        assert_eq!(vec![(4, 4), (4, 5), (4, 6)], live_cells(board.current()));
        assert!(live_cells(board.scratch()).is_empty());

        // the next generation evolves from the stamped buffer
        board.step();
        assert_eq!(vec![(3, 5), (4, 5), (5, 5)], live_cells(board.current()));
        assert_eq!(2, board.get_cell(4, 5));
    }

    #[test]
    fn step_swaps_buffers_and_counts_generations() {
        let mut board = LifeBoard::new(10, 10);
        board.stamp_pattern(&BLINKER, 4, 4, Rotation::R0, StampTarget::Both);
        let first = board.current().clone();
        board.step();
        assert_eq!(1, board.generation());
        assert_eq!(&first, board.scratch());
        board.step();
        assert_eq!(2, board.generation());
        // period two, middle cell keeps aging
        assert_eq!(live_cells(&first), live_cells(board.current()));
        assert_eq!(3, board.get_cell(4, 5));
        assert_eq!(1, board.get_cell(4, 4));
    }

    #[test]
    fn glider_travels() {
        let pool = TaskPoolBuilder::new().num_threads(2).build();
        let mut board = LifeBoard::new(16, 16);
        board.stamp_pattern(&GLIDER, 1, 1, Rotation::R0, StampTarget::Both);
        let start = live_cells(board.current());
        for _ in 0..4 {
            board.step_par(&pool);
        }
        let moved: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(moved, live_cells(board.current()));
    }

    #[test]
    fn resize_clears_everything() {
        let mut board = LifeBoard::new(8, 8);
        let mut rng = fastrand::Rng::with_seed(3);
        board.randomize(0.5, &mut rng);
        board.step();
        assert!(!live_cells(board.current()).is_empty() || !live_cells(board.scratch()).is_empty());

        board.initialize(6, 9);
        assert_eq!((6, 9), board.current().size());
        assert_eq!((6, 9), board.scratch().size());
        assert_eq!(0, board.generation());
        assert!(board.current().cells().iter().all(|&a| a == 0));
        assert!(board.scratch().cells().iter().all(|&a| a == 0));

        board.initialize(8, 8);
        assert!(board.current().cells().iter().all(|&a| a == 0));
    }

    #[test]
    fn randomize_and_clear() {
        let mut board = LifeBoard::new(32, 32);
        let mut rng = fastrand::Rng::with_seed(11);
        board.randomize(0.3, &mut rng);
        assert_eq!(board.current(), board.scratch());
        let alive = live_cells(board.current()).len();
        assert!(alive > 0 && alive < 32 * 32);
        assert!(board.current().cells().iter().all(|&a| a <= 1));

        board.clear();
        assert!(live_cells(board.current()).is_empty());
        assert!(live_cells(board.scratch()).is_empty());
    }
}
