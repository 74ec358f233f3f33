//! # delaunay2d
//!
//! This is a library for computing the Delaunay triangulation of a set of planar points
//! with the incremental [Bowyer-Watson](https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm)
//! algorithm.
//!
//! # Features
//!
//! - 2D Delaunay triangulations via a super-triangle bootstrap and per-point cavity retriangulation
//! - Generic floating-point coordinate types (supports `f32`, `f64`, and other types implementing `CoordinateScalar`)
//! - Pluggable mesh storage through the [`MeshStorage`](core::mesh::MeshStorage) trait, with a
//!   slotmap-backed [`Mesh`](core::mesh::Mesh) provided
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use delaunay2d::prelude::*;
//!
//! let points = vec![
//!     point!(0.0, 0.0),
//!     point!(4.0, 0.0),
//!     point!(4.0, 3.0),
//!     point!(0.0, 3.0),
//!     point!(2.0, 1.0),
//! ];
//!
//! let dt = DelaunayTriangulation::new(&points).unwrap();
//!
//! assert_eq!(dt.number_of_vertices(), 5);
//! assert_eq!(dt.number_of_faces(), 4);
//! assert!(dt.validate_delaunay().is_ok());
//! ```
//!
//! # Custom storage
//!
//! The algorithm only talks to storage through [`MeshStorage`](core::mesh::MeshStorage):
//! `add_point`, `add_face`, deferred `delete_vertex` and `compact`.
//!
//! ```rust
//! use delaunay2d::prelude::*;
//!
//! let mut mesh: Mesh<f32> = Mesh::new();
//! let points = [point!(0.0f32, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
//!
//! let stats = triangulate_into(&points, &mut mesh, &TriangulationConfig::default()).unwrap();
//! assert_eq!(stats.finalization.faces_remaining(), mesh.number_of_faces());
//! ```
//!
//! # Degenerate input
//!
//! Predicates use plain floating-point arithmetic. Cocircular ties count as
//! "not inside", duplicate points are kept as vertices without faces and
//! purely collinear input produces no faces. None of these is an error.

#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the mesh storage, the triangle and edge value
/// types, and the Bowyer-Watson construction.
pub mod core {
    /// Triangulation algorithms
    pub mod algorithms {
        /// Incremental Bowyer-Watson construction
        pub mod bowyer_watson;
    }
    pub mod builder;
    /// High-performance collection types optimized for computational geometry
    pub mod collections;
    pub mod delaunay_triangulation;
    pub mod edge;
    pub mod mesh;
    pub mod triangle;
    pub mod util;
    // Re-export the `core` modules.
    pub use builder::*;
    pub use delaunay_triangulation::*;
    pub use edge::*;
    pub use mesh::*;
    pub use triangle::*;
    pub use util::*;
    // Note: collections module not re-exported here to avoid namespace pollution
}

/// Contains geometric types including the `Point` struct and geometry predicates.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    /// Point-set generation for tests and benchmarks
    pub mod util;
    /// Traits module containing the coordinate scalar abstraction.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use point::*;
    pub use predicates::*;
    pub use traits::*;
    pub use util::*;
}

/// A prelude module that re-exports commonly used types and macros.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        algorithms::bowyer_watson::{
            BowyerWatson, FinalizationSummary, InsertionInfo, InsertionStatistics,
        },
        builder::*,
        delaunay_triangulation::*,
        edge::*,
        mesh::*,
        triangle::*,
        util::*,
    };

    pub use crate::core::collections::{
        FastHashMap, FastHashSet, SmallBuffer, fast_hash_map_with_capacity,
        fast_hash_set_with_capacity,
    };

    // Re-export from geometry
    pub use crate::geometry::{point::*, predicates::*, traits::coordinate::*, util::*};

    // Convenience macros
    pub use crate::point;
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            algorithms::bowyer_watson::BowyerWatson, delaunay_triangulation::DelaunayTriangulation,
            edge::Edge, mesh::Mesh, triangle::Triangle,
        },
        geometry::Point,
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point<f64>>());
        assert!(is_normal::<Point<f32>>());
        assert!(is_normal::<Edge>());
        assert!(is_normal::<Triangle>());
        assert!(is_normal::<Mesh<f64>>());
        assert!(is_normal::<BowyerWatson<f64>>());
        assert!(is_normal::<DelaunayTriangulation<f32>>());
    }

    #[test]
    fn test_prelude_collections_exports() {
        use crate::prelude::*;

        let mut map: FastHashMap<u64, usize> = FastHashMap::default();
        map.insert(123, 456);
        assert_eq!(map.get(&123), Some(&456));

        let mut set: FastHashSet<u64> = FastHashSet::default();
        set.insert(789);
        assert!(set.contains(&789));

        let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
        buffer.push(42);
        assert_eq!(buffer.len(), 1);

        let map_with_cap = fast_hash_map_with_capacity::<u64, usize>(100);
        assert!(map_with_cap.capacity() >= 100);

        let set_with_cap = fast_hash_set_with_capacity::<u64>(50);
        assert!(set_with_cap.capacity() >= 50);
    }

    #[test]
    fn test_prelude_construction_exports() {
        use crate::prelude::*;

        let points = vec![point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
        let dt = DelaunayTriangulationBuilder::new(&points).build().unwrap();
        assert_eq!(dt.number_of_faces(), 1);
        assert!(find_delaunay_violations(dt.mesh(), None).unwrap().is_empty());
    }
}
