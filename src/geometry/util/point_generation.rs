//! Random and structured point generation.
//!
//! These helpers produce reproducible planar point sets for tests and
//! benchmarks.

use rand::Rng;
use rand::distr::uniform::SampleUniform;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

pub use super::RandomPointGenerationError;

fn validate_range<T: CoordinateScalar>(range: (T, T)) -> Result<(), RandomPointGenerationError> {
    if range.0 >= range.1 {
        return Err(RandomPointGenerationError::InvalidRange {
            min: format!("{:?}", range.0),
            max: format!("{:?}", range.1),
        });
    }
    Ok(())
}

/// Generate random points with both coordinates uniform in `range`.
///
/// Uses the thread-local RNG; see [`generate_random_points_seeded`] for
/// reproducible output.
///
/// # Errors
///
/// Returns [`RandomPointGenerationError::InvalidRange`] if `range.0 >= range.1`.
///
/// # Examples
///
/// ```
/// use delaunay2d::geometry::util::generate_random_points;
///
/// let points = generate_random_points::<f64>(100, (-10.0, 10.0)).unwrap();
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|p| (-10.0..10.0).contains(&p.x())));
///
/// assert!(generate_random_points::<f64>(10, (1.0, -1.0)).is_err());
/// ```
pub fn generate_random_points<T: CoordinateScalar + SampleUniform>(
    n_points: usize,
    range: (T, T),
) -> Result<Vec<Point<T>>, RandomPointGenerationError> {
    validate_range(range)?;

    let mut rng = rand::rng();
    Ok(sample_points(&mut rng, n_points, range))
}

/// Generate random points with a fixed seed.
///
/// The same `(n_points, range, seed)` always produces the same points.
///
/// # Errors
///
/// Returns [`RandomPointGenerationError::InvalidRange`] if `range.0 >= range.1`.
///
/// # Examples
///
/// ```
/// use delaunay2d::geometry::util::generate_random_points_seeded;
///
/// let a = generate_random_points_seeded::<f64>(20, (-1.0, 1.0), 42).unwrap();
/// let b = generate_random_points_seeded::<f64>(20, (-1.0, 1.0), 42).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_random_points_seeded<T: CoordinateScalar + SampleUniform>(
    n_points: usize,
    range: (T, T),
    seed: u64,
) -> Result<Vec<Point<T>>, RandomPointGenerationError> {
    use rand::SeedableRng;

    validate_range(range)?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    Ok(sample_points(&mut rng, n_points, range))
}

fn sample_points<T, R>(rng: &mut R, n_points: usize, range: (T, T)) -> Vec<Point<T>>
where
    T: CoordinateScalar + SampleUniform,
    R: Rng,
{
    (0..n_points)
        .map(|_| {
            Point::new(
                rng.random_range(range.0..range.1),
                rng.random_range(range.0..range.1),
            )
        })
        .collect()
}

/// Generate a `columns × rows` grid of points with the given spacing,
/// starting at `origin`.
///
/// Grids are heavily cocircular, which makes them a useful stress input for
/// tie handling in the in-circle test.
///
/// # Errors
///
/// Returns [`RandomPointGenerationError::InvalidGrid`] if either dimension is
/// zero or the spacing is not a positive finite number.
///
/// # Examples
///
/// ```
/// use delaunay2d::geometry::util::generate_grid_points;
///
/// let grid = generate_grid_points::<f64>(3, 2, 1.0, (0.0, 0.0)).unwrap();
/// assert_eq!(grid.len(), 6);
/// assert_eq!(grid[5].xy(), [2.0, 1.0]);
/// ```
pub fn generate_grid_points<T: CoordinateScalar>(
    columns: usize,
    rows: usize,
    spacing: T,
    origin: (T, T),
) -> Result<Vec<Point<T>>, RandomPointGenerationError> {
    if columns == 0 || rows == 0 {
        return Err(RandomPointGenerationError::InvalidGrid {
            details: format!("grid must be non-empty, got {columns}x{rows}"),
        });
    }
    if !(spacing.is_finite() && spacing > T::zero()) {
        return Err(RandomPointGenerationError::InvalidGrid {
            details: format!("spacing must be positive and finite, got {spacing:?}"),
        });
    }

    let mut points = Vec::with_capacity(columns * rows);
    let mut y = origin.1;
    for _ in 0..rows {
        let mut x = origin.0;
        for _ in 0..columns {
            points.push(Point::new(x, y));
            x = x + spacing;
        }
        y = y + spacing;
    }
    Ok(points)
}
