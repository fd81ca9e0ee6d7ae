//! Spatial description of an image volume: origin points, plane size,
//! voxel spacing, and orientation.
//!
//! The orientation matrix holds the row cosine, the column cosine and
//! their cross product (the plane normal) as its three rows, defaulting
//! to the identity. `world_to_index` is the exact inverse of
//! `index_to_world`.

use std::fmt;

/// A point in 3D patient space, in millimeters.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point3 {
    /// the x coordinate
    pub x: f64,
    /// the y coordinate
    pub y: f64,
    /// the z coordinate
    pub z: f64,
}

impl Point3 {
    /// Create a new point from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    /// The vector from `other` to this point.
    pub fn sub(&self, other: &Point3) -> Vector3 {
        Vector3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// The squared Euclidean distance to another point.
    pub fn distance_sq(&self, other: &Point3) -> f64 {
        let d = self.sub(other);
        d.dot(&d)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A direction or displacement in 3D patient space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vector3 {
    /// the x component
    pub x: f64,
    /// the y component
    pub y: f64,
    /// the z component
    pub z: f64,
}

impl Vector3 {
    /// Create a new vector from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// The dot product with another vector.
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// The cross product with another vector.
    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

/// A 3×3 row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix33 {
    values: [f64; 9],
}

impl Default for Matrix33 {
    fn default() -> Self {
        Matrix33::identity()
    }
}

impl Matrix33 {
    /// The identity matrix.
    pub fn identity() -> Self {
        Matrix33 {
            values: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Create a matrix from its three rows.
    pub fn from_rows(r0: Vector3, r1: Vector3, r2: Vector3) -> Self {
        Matrix33 {
            values: [r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z],
        }
    }

    /// Build an orientation matrix from the 6 direction cosines of an
    /// Image Orientation (Patient) value: the row cosine, the column
    /// cosine, and their cross product as the third row.
    pub fn from_direction_cosines(cosines: [f64; 6]) -> Self {
        let row = Vector3::new(cosines[0], cosines[1], cosines[2]);
        let col = Vector3::new(cosines[3], cosines[4], cosines[5]);
        let normal = row.cross(&col);
        Matrix33::from_rows(row, col, normal)
    }

    /// Fetch a row of the matrix as a vector.
    pub fn row(&self, index: usize) -> Vector3 {
        Vector3 {
            x: self.values[index * 3],
            y: self.values[index * 3 + 1],
            z: self.values[index * 3 + 2],
        }
    }
}

/// The in-plane size of an image: columns then rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// the number of columns
    pub columns: u32,
    /// the number of rows
    pub rows: u32,
}

impl Size {
    /// Create a new size.
    pub fn new(columns: u32, rows: u32) -> Self {
        Size { columns, rows }
    }

    /// The number of pixels in one plane.
    pub fn plane_len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// The voxel spacing in millimeters: column, row and slice directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// spacing between columns
    pub column: f64,
    /// spacing between rows
    pub row: f64,
    /// spacing between slices
    pub slice: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Spacing {
            column: 1.0,
            row: 1.0,
            slice: 1.0,
        }
    }
}

impl Spacing {
    /// Create a new spacing.
    pub fn new(column: f64, row: f64, slice: f64) -> Self {
        Spacing { column, row, slice }
    }
}

/// The spatial description of an image volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    origins: Vec<Point3>,
    size: Size,
    spacing: Spacing,
    orientation: Matrix33,
}

impl Geometry {
    /// Create a single-slice geometry.
    pub fn new(origin: Point3, size: Size, spacing: Spacing, orientation: Matrix33) -> Self {
        Geometry {
            origins: vec![origin],
            size,
            spacing,
            orientation,
        }
    }

    /// The origin of the first slice.
    pub fn origin(&self) -> Point3 {
        self.origins[0]
    }

    /// The origins of all slices, in slice order.
    pub fn origins(&self) -> &[Point3] {
        &self.origins
    }

    /// The in-plane size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The voxel spacing.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// The orientation matrix.
    pub fn orientation(&self) -> &Matrix33 {
        &self.orientation
    }

    /// The number of slices.
    pub fn slice_count(&self) -> usize {
        self.origins.len()
    }

    /// The plane normal: the cross product of the row and column cosines.
    pub fn normal(&self) -> Vector3 {
        self.orientation.row(2)
    }

    /// Find the slice insertion index for the given origin point:
    /// the position next to the closest known origin, after it if the
    /// point lies on the positive side of the plane normal, before it
    /// otherwise.
    pub fn slice_index(&self, point: Point3) -> usize {
        let closest = self
            .origins
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                point
                    .distance_sq(a)
                    .partial_cmp(&point.distance_sq(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(k, _)| k)
            .unwrap_or(0);

        let normal = self.normal();
        if normal.dot(&point.sub(&self.origins[closest])) > 0.0 {
            closest + 1
        } else {
            closest
        }
    }

    /// Insert a new slice origin at the given index.
    pub fn insert_origin(&mut self, index: usize, origin: Point3) {
        self.origins.insert(index, origin);
    }

    /// Map volume indices (column, row, slice) to a point
    /// in patient space.
    pub fn index_to_world(&self, i: f64, j: f64, k: f64) -> Point3 {
        let origin = self.origin();
        let r0 = self.orientation.row(0);
        let r1 = self.orientation.row(1);
        let r2 = self.orientation.row(2);
        let di = i * self.spacing.column;
        let dj = j * self.spacing.row;
        let dk = k * self.spacing.slice;
        Point3 {
            x: origin.x + r0.x * di + r1.x * dj + r2.x * dk,
            y: origin.y + r0.y * di + r1.y * dj + r2.y * dk,
            z: origin.z + r0.z * di + r1.z * dj + r2.z * dk,
        }
    }

    /// Map a point in patient space back to volume indices,
    /// as the exact inverse of [`index_to_world`](Self::index_to_world).
    pub fn world_to_index(&self, point: Point3) -> (f64, f64, f64) {
        let d = point.sub(&self.origin());
        let i = d.dot(&self.orientation.row(0)) / self.spacing.column;
        let j = d.dot(&self.orientation.row(1)) / self.spacing.row;
        let k = d.dot(&self.orientation.row(2)) / self.spacing.slice;
        (i, j, k)
    }
}
