use crate::config::TerrainParameters;
use crate::grid::Grid;
use crate::rng::Rng;

/// One randomly placed parabolic hill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HillStamp {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl HillStamp {
    /// Draws radius, then x, then y. Centers may fall up to one radius outside
    /// the grid so border cells get partial hills like interior ones.
    pub fn draw(rng: &mut Rng, params: &TerrainParameters) -> Self {
        let radius = rng.range_f32(params.min_radius, params.max_radius);
        let far = params.size as f32 + radius;
        let x = rng.range_f32(-radius, far);
        let y = rng.range_f32(-radius, far);
        Self { x, y, radius }
    }

    /// Inclusive cell range touched along one axis, clipped to the grid.
    /// None when the footprint misses the grid entirely.
    fn span(center: f32, radius: f32, size: usize) -> Option<(usize, usize)> {
        let lo = (center - radius - 1.0).round() as i64;
        let hi = (center + radius + 1.0).round() as i64;
        let lo = lo.max(0);
        let hi = hi.min(size as i64 - 1);
        if lo > hi {
            return None;
        }
        Some((lo as usize, hi as usize))
    }

    /// Adds `radius² - dist²` to every cell strictly inside the hill.
    pub fn stamp(&self, grid: &mut Grid<f32>) {
        debug_assert_eq!(grid.w, grid.h);
        let size = grid.w;
        let Some((x0, x1)) = Self::span(self.x, self.radius, size) else {
            return;
        };
        let Some((y0, y1)) = Self::span(self.y, self.radius, size) else {
            return;
        };

        let radius_sq = self.radius * self.radius;
        for y in y0..=y1 {
            let dy = self.y - y as f32;
            for x in x0..=x1 {
                let dx = self.x - x as f32;
                let height = radius_sq - (dx * dx + dy * dy);
                if height > 0.0 {
                    grid.add(x, y, height);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let params = TerrainParameters {
            size: 16,
            min_radius: 2.0,
            max_radius: 5.0,
            ..Default::default()
        };
        let mut rng = Rng::new(3);
        for _ in 0..1000 {
            let hill = HillStamp::draw(&mut rng, &params);
            assert!(hill.radius >= 2.0 && hill.radius <= 5.0);
            assert!(hill.x >= -hill.radius && hill.x <= 16.0 + hill.radius);
            assert!(hill.y >= -hill.radius && hill.y <= 16.0 + hill.radius);
        }
    }

    #[test]
    fn first_draw_for_seed_42() {
        let params = TerrainParameters {
            size: 4,
            min_radius: 1.0,
            max_radius: 1.0001,
            ..Default::default()
        };
        let hill = HillStamp::draw(&mut Rng::new(42), &params);
        assert!((hill.radius - 1.0000187).abs() < 1e-6);
        assert!((hill.x - 1.3686892).abs() < 1e-5);
        assert!((hill.y - 4.0654879).abs() < 1e-5);
    }

    #[test]
    fn centered_hill_is_parabolic() {
        let mut grid = Grid::<f32>::new(9, 9);
        HillStamp { x: 4.0, y: 4.0, radius: 3.0 }.stamp(&mut grid);

        assert_eq!(grid.get(4, 4), 9.0);
        assert_eq!(grid.get(5, 4), 8.0);
        assert_eq!(grid.get(5, 5), 7.0);
        assert_eq!(grid.get(6, 6), 1.0);
        // On the rim: radius² - dist² == 0, no contribution.
        assert_eq!(grid.get(7, 4), 0.0);
        assert_eq!(grid.get(0, 0), 0.0);
    }

    #[test]
    fn stamping_accumulates() {
        let mut grid = Grid::<f32>::new(5, 5);
        let hill = HillStamp { x: 2.0, y: 2.0, radius: 2.0 };
        hill.stamp(&mut grid);
        hill.stamp(&mut grid);
        assert_eq!(grid.get(2, 2), 8.0);
    }

    #[test]
    fn hill_over_the_edge_touches_border_only() {
        let mut grid = Grid::<f32>::new(6, 6);
        HillStamp { x: -1.0, y: 3.0, radius: 2.5 }.stamp(&mut grid);
        assert!(grid.get(0, 3) > 0.0);
        assert!(grid.get(1, 3) > 0.0);
        assert_eq!(grid.get(2, 3), 0.0);
    }

    #[test]
    fn hill_outside_grid_is_a_no_op() {
        let mut grid = Grid::<f32>::new(4, 4);
        HillStamp { x: -9.0, y: 20.0, radius: 1.5 }.stamp(&mut grid);
        assert!(grid.data.iter().all(|&v| v == 0.0));
    }
}
