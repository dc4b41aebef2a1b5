//! Uniform spatial binning for fixed-radius neighbor queries.
//!
//! The [`Grid`] assigns its items to cubic cells and threads the items of each cell into an
//! intrusive linked list, giving **O(1)** average-case range queries when the search radius
//! is comparable to the cell size. Only occupied cells are stored, so memory follows the
//! number of items rather than the volume they span.

use super::types::Point;
use nalgebra::Vector3;
use std::collections::HashMap;

/// Marks the end of a cell's linked list.
const SENTINEL: u32 = u32::MAX;

type Cell = Vector3<i64>;

/// A uniform spatial grid that bins items into cubic cells.
///
/// # Performance
///
/// - Construction: **O(N)** where N is the number of items.
/// - [`Grid::within`]: **O(1)** average-case per query for uniform densities; a query whose
///   box spans more cells than are occupied scans the occupied cells instead.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cell_size: f64,
    /// First item of each occupied cell.
    head: HashMap<Cell, u32>,
    /// Next item in the same cell, per item.
    next: Vec<u32>,
    items: Vec<(Point, T)>,
}

impl<T> Grid<T> {
    /// Bins the provided `(position, item)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn new(items: impl IntoIterator<Item = (Point, T)>, cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");

        let items: Vec<(Point, T)> = items.into_iter().collect();
        let mut grid = Self {
            cell_size,
            head: HashMap::new(),
            next: vec![SENTINEL; items.len()],
            items,
        };

        for i in 0..grid.items.len() {
            let cell = grid.cell_of(&grid.items[i].0);
            let first = grid.head.entry(cell).or_insert(SENTINEL);
            grid.next[i] = *first;
            *first = i as u32;
        }

        grid
    }

    /// Iterates over every item whose position lies within `radius` (inclusive) of `center`.
    pub fn within(&self, center: Point, radius: f64) -> impl Iterator<Item = &T> + '_ {
        let radius_sq = radius * radius;

        self.cells_overlapping(center, radius)
            .flat_map(move |first| self.cell_items(first))
            .filter_map(move |i| {
                let (pos, item) = &self.items[i];
                (nalgebra::distance_squared(pos, &center) <= radius_sq).then_some(item)
            })
    }

    fn cell_of(&self, pos: &Point) -> Cell {
        pos.coords.map(|c| (c / self.cell_size).floor() as i64)
    }

    /// List heads of all occupied cells intersecting the axis-aligned box around the query
    /// sphere.
    fn cells_overlapping(
        &self,
        center: Point,
        radius: f64,
    ) -> Box<dyn Iterator<Item = u32> + '_> {
        let reach = Vector3::new(radius, radius, radius);
        let lo = self.cell_of(&(center - reach));
        let hi = self.cell_of(&(center + reach));
        let box_cells = (0..3)
            .map(|axis| u128::from(hi[axis].abs_diff(lo[axis])) + 1)
            .fold(1u128, u128::saturating_mul);

        if box_cells > self.head.len() as u128 {
            return Box::new(
                self.head
                    .iter()
                    .filter(move |(cell, _)| {
                        (0..3).all(|axis| lo[axis] <= cell[axis] && cell[axis] <= hi[axis])
                    })
                    .map(|(_, &first)| first),
            );
        }

        Box::new((lo.z..=hi.z).flat_map(move |z| {
            (lo.y..=hi.y).flat_map(move |y| {
                (lo.x..=hi.x)
                    .filter_map(move |x| self.head.get(&Vector3::new(x, y, z)).copied())
            })
        }))
    }

    fn cell_items(&self, first: u32) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors((first != SENTINEL).then_some(first), move |&i| {
            let following = self.next[i as usize];
            (following != SENTINEL).then_some(following)
        })
        .map(|i| i as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_bins_points_into_expected_dimensions() {
        let points = vec![
            (Point::new(0.5, 0.5, 0.5), 1),
            (Point::new(1.5, 0.5, 0.5), 2),
            (Point::new(0.5, 1.5, 0.5), 3),
        ];

        let grid = Grid::new(points, 1.0);

        assert_eq!(grid.head.len(), 3);
        assert_eq!(grid.items.len(), 3);
    }

    #[test]
    fn within_filters_by_exact_distance() {
        let points = vec![
            (Point::new(0.0, 0.0, 0.0), "center"),
            (Point::new(0.9, 0.0, 0.0), "inside"),
            (Point::new(1.1, 0.0, 0.0), "outside"),
        ];
        let grid = Grid::new(points, 2.0);

        let found: Vec<_> = grid.within(Point::origin(), 1.0).collect();

        assert_eq!(found.len(), 2);
        assert!(found.contains(&&"center"));
        assert!(found.contains(&&"inside"));
        assert!(!found.contains(&&"outside"));
    }

    #[test]
    fn within_is_inclusive_at_the_boundary() {
        let grid = Grid::new(vec![(Point::new(1.0, 0.0, 0.0), 7)], 2.0);

        assert_eq!(grid.within(Point::origin(), 1.0).count(), 1);
        assert_eq!(grid.within(Point::origin(), 0.99).count(), 0);
    }

    #[test]
    fn within_finds_items_across_cell_boundaries() {
        let points = vec![
            (Point::new(0.0, 0.0, 0.0), 1),
            (Point::new(2.9, 0.0, 0.0), 2),
            (Point::new(10.0, 10.0, 10.0), 3),
        ];
        let grid = Grid::new(points, 1.0);

        let mut found: Vec<_> = grid
            .within(Point::new(1.5, 0.0, 0.0), 1.5)
            .copied()
            .collect();
        found.sort();

        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn within_handles_queries_outside_the_bounding_box() {
        let grid = Grid::new(vec![(Point::new(0.0, 0.0, 0.0), 1)], 1.0);

        assert_eq!(grid.within(Point::new(-0.5, 0.0, 0.0), 0.6).count(), 1);
        assert_eq!(grid.within(Point::new(50.0, 0.0, 0.0), 1.0).count(), 0);
    }

    #[test]
    fn grid_handles_empty_input() {
        let grid: Grid<i32> = Grid::new(Vec::new(), 1.0);

        assert!(grid.head.is_empty());
        assert_eq!(grid.within(Point::origin(), 5.0).count(), 0);
    }

    #[test]
    fn grid_handles_dense_packing() {
        let points = (0..100).map(|i| (Point::new(0.1, 0.1, 0.1), i));
        let grid = Grid::new(points, 1.0);

        assert_eq!(grid.within(Point::new(0.1, 0.1, 0.1), 0.5).count(), 100);
    }

    #[test]
    fn far_apart_items_only_occupy_their_own_cells() {
        let points = vec![
            (Point::new(-999.0, -999.0, -999.0), 0),
            (Point::new(9999.0, 9999.0, 9999.0), 1),
        ];
        let grid = Grid::new(points, 1.0);

        assert_eq!(grid.head.len(), 2);
        let near: Vec<_> = grid
            .within(Point::new(-999.0, -999.0, -999.0), 5.0)
            .copied()
            .collect();
        assert_eq!(near, vec![0]);
    }

    #[test]
    fn huge_radius_scans_occupied_cells() {
        let points = vec![
            (Point::new(0.0, 0.0, 0.0), 1),
            (Point::new(3.0, 0.0, 0.0), 2),
            (Point::new(5000.0, 0.0, 0.0), 3),
        ];
        let grid = Grid::new(points, 1.0);

        let mut found: Vec<_> = grid.within(Point::origin(), 1.0e6).copied().collect();
        found.sort();

        assert_eq!(found, vec![1, 2, 3]);
    }
}
