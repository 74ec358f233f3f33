use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

#[cfg(not(feature = "dense-slotmap"))]
use slotmap::SlotMap;

#[cfg(feature = "dense-slotmap")]
use slotmap::DenseSlotMap;

use crate::core::edge::Edge;
use crate::core::mesh::VertexKey;

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Storage backend for mesh vertices and faces.
///
/// `DenseSlotMap` by default (the `dense-slotmap` feature), `SlotMap` with
/// `--no-default-features`. Keys stay valid across removals of other entries
/// either way.
#[cfg(not(feature = "dense-slotmap"))]
pub type StorageMap<K, V> = SlotMap<K, V>;

#[cfg(feature = "dense-slotmap")]
pub type StorageMap<K, V> = DenseSlotMap<K, V>;

// =============================================================================
// CORE OPTIMIZED TYPES
// =============================================================================

/// `HashMap` with the `FxHasher`.
///
/// ⚠️ **Not DoS-resistant**: use only with internal keys such as slotmap keys.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::collections::FastHashMap;
///
/// let mut map: FastHashMap<u64, usize> = FastHashMap::default();
/// map.insert(123, 456);
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Build hasher for [`FastHashMap`] and [`FastHashSet`].
pub type FastBuildHasher = FxBuildHasher;

/// `HashSet` with the `FxHasher`.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::collections::FastHashSet;
///
/// let mut set: FastHashSet<u64> = FastHashSet::default();
/// set.insert(7);
/// assert!(set.contains(&7));
/// ```
pub type FastHashSet<T> = FxHashSet<T>;

/// Small-optimized Vec that stays on the stack for up to `N` elements.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<i32, 4> = SmallBuffer::new();
/// buffer.push(1);
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

// =============================================================================
// DOMAIN-SPECIFIC ALIASES
// =============================================================================

/// Inline capacity of [`FaceVertexBuffer`]; triangles and quads stay inline.
pub const FACE_INLINE_CAPACITY: usize = 4;

/// Vertex list of a single mesh face.
pub type FaceVertexBuffer = SmallBuffer<VertexKey, FACE_INLINE_CAPACITY>;

/// Set of vertex keys.
pub type VertexKeySet = FastHashSet<VertexKey>;

/// Number of bad triangles that own each edge during cavity extraction.
pub type EdgeCountMap = FastHashMap<Edge, usize>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_collections_basic_operations() {
        let mut map: FastHashMap<u64, usize> = FastHashMap::default();
        assert!(map.is_empty());
        map.insert(123, 456);
        assert_eq!(map.get(&123), Some(&456));

        let mut set: FastHashSet<u64> = FastHashSet::default();
        set.insert(789);
        assert!(set.contains(&789));
        assert!(!set.contains(&999));
    }

    #[test]
    fn test_face_vertex_buffer_inline_for_triangles() {
        let mut storage: StorageMap<VertexKey, ()> = StorageMap::with_key();
        let mut buffer = FaceVertexBuffer::new();
        for _ in 0..3 {
            buffer.push(storage.insert(()));
        }
        assert_eq!(buffer.len(), 3);
        assert!(!buffer.spilled());
    }
}
