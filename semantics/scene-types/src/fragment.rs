//! Mesh fragments: locally indexed pieces of reconstructed surface.

use std::fmt;

use nalgebra::{Matrix4, Point3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Classification, Triangle};

/// Stable identity of a mesh fragment.
///
/// A fragment keeps its id for its whole lifetime, across transform and
/// geometry updates. Two fragments never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FragmentId(pub u64);

impl FragmentId {
    /// Wrap a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment#{}", self.0)
    }
}

/// A face of a fragment reduced to what a classification lookup needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassifiedFace {
    /// Face center in the owning fragment's local frame.
    pub local_centroid: Point3<f64>,
    /// Semantic label assigned by the reconstruction.
    pub classification: Classification,
}

impl ClassifiedFace {
    /// Create a face from a local centroid and a label.
    #[inline]
    #[must_use]
    pub const fn new(local_centroid: Point3<f64>, classification: Classification) -> Self {
        Self {
            local_centroid,
            classification,
        }
    }

    /// Create a face from a local-space triangle, using its centroid.
    #[inline]
    #[must_use]
    pub fn from_triangle(triangle: &Triangle, classification: Classification) -> Self {
        Self::new(triangle.centroid(), classification)
    }
}

/// A contiguous piece of reconstructed surface with its own local frame.
///
/// Faces are kept in the order the reconstruction delivered them. That order
/// carries no spatial meaning but is the scan order used by lookups.
///
/// # Example
///
/// ```
/// use scene_types::{Classification, FragmentId, MeshFragment, Point3, Triangle};
/// use nalgebra::{Matrix4, Vector3};
///
/// let floor = Triangle::from_arrays([0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [0.0, 0.0, 3.0]);
/// let fragment = MeshFragment::from_triangles(
///     FragmentId::new(1),
///     Matrix4::new_translation(&Vector3::new(0.0, -1.5, 0.0)),
///     &[(floor, Classification::Floor)],
/// );
///
/// let world = fragment.face_world_position(0).unwrap();
/// assert!((world - Point3::new(1.0, -1.5, 1.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshFragment {
    id: FragmentId,
    transform: Matrix4<f64>,
    faces: Vec<ClassifiedFace>,
}

impl MeshFragment {
    /// Create an empty fragment with the given local-to-world transform.
    #[must_use]
    pub const fn new(id: FragmentId, transform: Matrix4<f64>) -> Self {
        Self {
            id,
            transform,
            faces: Vec::new(),
        }
    }

    /// Create a fragment from local-space triangles and their labels.
    #[must_use]
    pub fn from_triangles(
        id: FragmentId,
        transform: Matrix4<f64>,
        triangles: &[(Triangle, Classification)],
    ) -> Self {
        let faces = triangles
            .iter()
            .map(|(tri, label)| ClassifiedFace::from_triangle(tri, *label))
            .collect();
        Self {
            id,
            transform,
            faces,
        }
    }

    /// Replace the face list (builder pattern).
    #[must_use]
    pub fn with_faces(mut self, faces: Vec<ClassifiedFace>) -> Self {
        self.faces = faces;
        self
    }

    /// Append a face at the end of the scan order.
    pub fn push_face(&mut self, face: ClassifiedFace) {
        self.faces.push(face);
    }

    /// Replace the local-to-world transform, keeping identity and faces.
    pub fn set_transform(&mut self, transform: Matrix4<f64>) {
        self.transform = transform;
    }

    /// The fragment's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> FragmentId {
        self.id
    }

    /// The local-to-world transform.
    #[inline]
    #[must_use]
    pub const fn transform(&self) -> &Matrix4<f64> {
        &self.transform
    }

    /// Faces in scan order.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[ClassifiedFace] {
        &self.faces
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the fragment has no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// World-space position of the fragment's local origin.
    ///
    /// This is the translation column of the transform.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Point3<f64> {
        Point3::new(
            self.transform[(0, 3)],
            self.transform[(1, 3)],
            self.transform[(2, 3)],
        )
    }

    /// Map a point from the fragment's local frame into world space.
    ///
    /// The homogeneous `w` component is dropped without division, so the
    /// transform is expected to be affine.
    #[inline]
    #[must_use]
    pub fn to_world(&self, local: &Point3<f64>) -> Point3<f64> {
        let h = self.transform * local.to_homogeneous();
        Point3::new(h.x, h.y, h.z)
    }

    /// World-space centroid of the face at `index`, or `None` if out of range.
    #[must_use]
    pub fn face_world_position(&self, index: usize) -> Option<Point3<f64>> {
        self.faces
            .get(index)
            .map(|face| self.to_world(&face.local_centroid))
    }

    /// Iterate faces paired with their world-space centroids, in scan order.
    pub fn world_faces(&self) -> impl Iterator<Item = (Point3<f64>, &ClassifiedFace)> + '_ {
        self.faces
            .iter()
            .map(|face| (self.to_world(&face.local_centroid), face))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Vector3};

    fn wall_at(x: f64, y: f64, z: f64) -> ClassifiedFace {
        ClassifiedFace::new(Point3::new(x, y, z), Classification::Wall)
    }

    #[test]
    fn identity_fragment_keeps_local_coordinates() {
        let fragment =
            MeshFragment::new(FragmentId::new(0), Matrix4::identity()).with_faces(vec![wall_at(
                0.25, 0.5, 0.75,
            )]);
        assert_eq!(fragment.origin(), Point3::origin());
        assert_eq!(
            fragment.face_world_position(0),
            Some(Point3::new(0.25, 0.5, 0.75))
        );
    }

    #[test]
    fn origin_is_translation_column() {
        let transform = Matrix4::new_translation(&Vector3::new(2.0, -1.0, 0.5));
        let fragment = MeshFragment::new(FragmentId::new(3), transform);
        assert_eq!(fragment.origin(), Point3::new(2.0, -1.0, 0.5));
    }

    #[test]
    fn rotation_scale_translation_applied_in_order() {
        // Rotate 90 degrees about Z, scale by 2, then translate.
        let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let transform = Matrix4::new_translation(&Vector3::new(1.0, 0.0, 0.0))
            * rotation.to_homogeneous()
            * Matrix4::new_scaling(2.0);
        let fragment = MeshFragment::new(FragmentId::new(1), transform);

        let world = fragment.to_world(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world, Point3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn set_transform_keeps_identity_and_faces() {
        let mut fragment = MeshFragment::new(FragmentId::new(9), Matrix4::identity());
        fragment.push_face(wall_at(0.0, 0.0, 0.0));
        fragment.set_transform(Matrix4::new_translation(&Vector3::new(0.0, 0.0, 4.0)));

        assert_eq!(fragment.id(), FragmentId::new(9));
        assert_eq!(fragment.face_count(), 1);
        assert_eq!(fragment.face_world_position(0), Some(Point3::new(0.0, 0.0, 4.0)));
    }

    #[test]
    fn face_lookup_out_of_range() {
        let fragment = MeshFragment::new(FragmentId::new(2), Matrix4::identity());
        assert!(fragment.is_empty());
        assert_eq!(fragment.face_world_position(0), None);
    }

    #[test]
    fn world_faces_preserve_scan_order() {
        let fragment = MeshFragment::new(
            FragmentId::new(4),
            Matrix4::new_translation(&Vector3::new(0.0, 1.0, 0.0)),
        )
        .with_faces(vec![wall_at(1.0, 0.0, 0.0), wall_at(2.0, 0.0, 0.0)]);

        let xs: Vec<f64> = fragment.world_faces().map(|(p, _)| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
        assert!(fragment.world_faces().all(|(p, _)| (p.y - 1.0).abs() < 1e-12));
    }

    #[test]
    fn from_triangles_uses_centroids() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [0.3, 0.0, 0.0], [0.0, 0.3, 0.0]);
        let fragment = MeshFragment::from_triangles(
            FragmentId::new(5),
            Matrix4::identity(),
            &[(tri, Classification::Table)],
        );
        let face = fragment.faces()[0];
        assert_eq!(face.classification, Classification::Table);
        assert_relative_eq!(face.local_centroid, Point3::new(0.1, 0.1, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn fragment_id_display() {
        assert_eq!(FragmentId::new(12).to_string(), "fragment#12");
        assert_eq!(FragmentId::new(12).get(), 12);
    }
}
