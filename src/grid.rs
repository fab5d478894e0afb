use rayon::prelude::*;

/// Row-major flat grid. No per-cell objects, f32 friendly.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        let len = w.checked_mul(h).expect("grid capacity overflow");
        Self {
            data: vec![T::default(); len],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn add(&mut self, x: usize, y: usize, v: T)
    where
        T: std::ops::AddAssign,
    {
        let i = self.idx(x, y);
        self.data[i] += v;
    }
}

impl Grid<f32> {
    /// (min, max) over all cells. An empty grid yields (+inf, -inf).
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .par_iter()
            .fold(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            )
            .reduce(
                || (f32::INFINITY, f32::NEG_INFINITY),
                |a, b| (a.0.min(b.0), a.1.max(b.1)),
            )
    }
}

/// Finished square height field. Read-only once handed out by the synthesizer.
///
/// Cells are addressed by `(row, col)`, where row is the y axis and col the x axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid {
    size: usize,
    data: Vec<f32>,
}

impl ElevationGrid {
    pub(crate) fn from_grid(grid: Grid<f32>) -> Self {
        debug_assert_eq!(grid.w, grid.h);
        Self {
            size: grid.w,
            data: grid.data,
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {0}x{0} grid",
            self.size
        );
        self.data[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Row-major view of every cell.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}
