//! Delaunay empty-circumcircle property validation utilities.

#![forbid(unsafe_code)]

use crate::core::mesh::{FaceKey, Mesh, MeshError, PointLookup, VertexKey};
use crate::geometry::point::Point;
use crate::geometry::predicates::{InCircle, Orientation, in_circle, orientation_2d};
use crate::geometry::traits::coordinate::CoordinateScalar;
use thiserror::Error;

/// A face whose circumcircle strictly contains a vertex that is not one of
/// its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DelaunayViolation {
    /// The offending face.
    pub face: FaceKey,
    /// A vertex strictly inside the face's circumcircle.
    pub vertex: VertexKey,
}

/// Errors that can occur during Delaunay property validation.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::mesh::{FaceKey, VertexKey};
/// use delaunay2d::core::util::delaunay_validation::DelaunayValidationError;
/// use slotmap::KeyData;
///
/// let err = DelaunayValidationError::DelaunayViolation {
///     face: FaceKey::from(KeyData::from_ffi(1)),
///     vertex: VertexKey::from(KeyData::from_ffi(2)),
/// };
/// assert!(matches!(err, DelaunayValidationError::DelaunayViolation { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DelaunayValidationError {
    /// A face violates the Delaunay property.
    #[error("Face {face:?} violates the Delaunay property: vertex {vertex:?} is inside its circumcircle")]
    DelaunayViolation {
        /// The key of the face that violates the Delaunay property.
        face: FaceKey,
        /// The vertex found inside the circumcircle.
        vertex: VertexKey,
    },
    /// A face that is not a triangle.
    #[error("Face {face:?} has {vertices} vertices; only triangles can be validated")]
    NonTriangularFace {
        /// The key of the face.
        face: FaceKey,
        /// Its vertex count.
        vertices: usize,
    },
    /// A face references storage that can no longer be resolved.
    #[error("Mesh storage error: {0}")]
    Storage(#[from] MeshError),
}

/// Check a single face against every stored vertex.
///
/// Faces may be stored in either winding; the in-circle test is always
/// evaluated on the counter-clockwise order. Degenerate (zero-area) faces
/// have no finite circumcircle and are skipped.
fn face_violation<T>(
    mesh: &Mesh<T>,
    face_key: FaceKey,
) -> Result<Option<DelaunayViolation>, DelaunayValidationError>
where
    T: CoordinateScalar,
{
    let Some(face) = mesh.face(face_key) else {
        return Ok(None);
    };
    let &[a, b, c] = face.vertices() else {
        return Err(DelaunayValidationError::NonTriangularFace {
            face: face_key,
            vertices: face.len(),
        });
    };

    let (pa, pb, pc) = (mesh.point_of(a)?, mesh.point_of(b)?, mesh.point_of(c)?);
    let [p1, p2, p3]: [Point<T>; 3] = match orientation_2d(&pa, &pb, &pc) {
        Orientation::POSITIVE => [pa, pb, pc],
        Orientation::NEGATIVE => [pc, pb, pa],
        Orientation::DEGENERATE => {
            tracing::trace!(?face_key, "skipping degenerate face");
            return Ok(None);
        }
    };

    for (vertex, point) in mesh.vertices() {
        if face.contains_vertex(vertex) {
            continue;
        }
        if in_circle(&p1, &p2, &p3, point) == InCircle::INSIDE {
            return Ok(Some(DelaunayViolation {
                face: face_key,
                vertex,
            }));
        }
    }

    Ok(None)
}

/// Find faces that violate the Delaunay property.
///
/// Returns one [`DelaunayViolation`] per violating face (the first offending
/// vertex found). Keys in `faces_to_check` that are no longer stored are
/// skipped. Points exactly on a circumcircle are not violations.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::NonTriangularFace`] for polygonal faces
/// and [`DelaunayValidationError::Storage`] if a face references a vertex
/// that is gone.
///
/// # Examples
///
/// ```
/// use delaunay2d::prelude::*;
///
/// let points = vec![
///     point!(0.0, 0.0),
///     point!(1.0, 0.0),
///     point!(0.0, 1.0),
///     point!(1.0, 1.1),
/// ];
///
/// let dt = DelaunayTriangulation::new(&points).unwrap();
/// let violations = find_delaunay_violations(dt.mesh(), None).unwrap();
/// assert!(violations.is_empty());
/// ```
pub fn find_delaunay_violations<T>(
    mesh: &Mesh<T>,
    faces_to_check: Option<&[FaceKey]>,
) -> Result<Vec<DelaunayViolation>, DelaunayValidationError>
where
    T: CoordinateScalar,
{
    let mut violations = Vec::new();
    let mut check = |face_key: FaceKey| -> Result<(), DelaunayValidationError> {
        if let Some(violation) = face_violation(mesh, face_key)? {
            violations.push(violation);
        }
        Ok(())
    };

    match faces_to_check {
        Some(keys) => {
            for &face_key in keys {
                check(face_key)?;
            }
        }
        None => {
            for (face_key, _) in mesh.faces() {
                check(face_key)?;
            }
        }
    }

    tracing::debug!(
        faces = faces_to_check.map_or_else(|| mesh.number_of_faces(), <[FaceKey]>::len),
        violations = violations.len(),
        "checked Delaunay property"
    );
    Ok(violations)
}

/// Validate the Delaunay property of every face, stopping at the first
/// violation.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::DelaunayViolation`] for the first
/// violating face, or any error [`find_delaunay_violations`] can return.
pub fn validate_delaunay<T>(mesh: &Mesh<T>) -> Result<(), DelaunayValidationError>
where
    T: CoordinateScalar,
{
    for (face_key, _) in mesh.faces() {
        if let Some(DelaunayViolation { face, vertex }) = face_violation(mesh, face_key)? {
            tracing::warn!(?face, ?vertex, "Delaunay violation");
            return Err(DelaunayValidationError::DelaunayViolation { face, vertex });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mesh::MeshStorage;
    use crate::point;

    /// Unit square split along one diagonal, plus whatever extra points the
    /// caller adds.
    fn square(diagonal_ac: bool) -> (Mesh<f64>, [VertexKey; 4], [FaceKey; 2]) {
        let mut mesh = Mesh::new();
        let [a, b, c, d] = [
            point!(0.0, 0.0),
            point!(1.0, 0.0),
            point!(1.0, 1.0),
            point!(0.0, 1.0),
        ]
        .map(|p| mesh.add_point(p).unwrap());
        let faces = if diagonal_ac {
            [
                mesh.add_face(&[c, b, a]).unwrap(),
                mesh.add_face(&[d, c, a]).unwrap(),
            ]
        } else {
            [
                mesh.add_face(&[a, b, d]).unwrap(),
                mesh.add_face(&[b, c, d]).unwrap(),
            ]
        };
        (mesh, [a, b, c, d], faces)
    }

    #[test]
    fn cocircular_square_is_valid_in_either_winding() {
        for diagonal in [true, false] {
            let (mesh, _, _) = square(diagonal);
            assert!(validate_delaunay(&mesh).is_ok());
            assert!(find_delaunay_violations(&mesh, None).unwrap().is_empty());
        }
    }

    #[test]
    fn interior_point_is_reported() {
        let (mut mesh, [a, ..], faces) = square(true);
        let inside = mesh.add_point(point!(0.6, 0.4)).unwrap();

        let violations = find_delaunay_violations(&mesh, None).unwrap();
        assert!(!violations.is_empty());
        assert!(violations.iter().all(|v| v.vertex == inside));

        let err = validate_delaunay(&mesh).unwrap_err();
        assert!(matches!(
            err,
            DelaunayValidationError::DelaunayViolation { vertex, .. } if vertex == inside
        ));

        // Subset checks skip faces that are gone.
        mesh.request_vertex_status();
        mesh.delete_vertex(a).unwrap();
        mesh.compact();
        assert!(
            find_delaunay_violations(&mesh, Some(&faces))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn polygonal_faces_are_rejected() {
        let mut mesh: Mesh<f64> = Mesh::new();
        let keys: Vec<_> = [
            point!(0.0, 0.0),
            point!(1.0, 0.0),
            point!(1.0, 1.0),
            point!(0.0, 1.0),
        ]
        .into_iter()
        .map(|p| mesh.add_point(p).unwrap())
        .collect();
        let face = mesh.add_face(&keys).unwrap();

        assert_eq!(
            validate_delaunay(&mesh),
            Err(DelaunayValidationError::NonTriangularFace { face, vertices: 4 })
        );
    }

    #[test]
    fn degenerate_faces_are_skipped() {
        let mut mesh: Mesh<f64> = Mesh::new();
        let [a, b, c] = [point!(0.0, 0.0), point!(1.0, 0.0), point!(2.0, 0.0)]
            .map(|p| mesh.add_point(p).unwrap());
        mesh.add_face(&[a, b, c]).unwrap();
        mesh.add_point(point!(1.0, 0.1)).unwrap();

        assert!(validate_delaunay(&mesh).is_ok());
    }
}
