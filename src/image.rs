use itertools::Itertools;
use ndarray::{array, Array1};

use crate::data::{DataPoint, DataSet};
use crate::error::{MlError, Result};
use crate::kmeans::Cluster;

/// One pixel of an [`Image`], clustered by its color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
    pub rgb: [u8; 3],
}

impl DataPoint for Pixel {
    fn features(&self) -> Array1<f64> {
        let [r, g, b] = self.rgb;
        array![r as f64, g as f64, b as f64]
    }
}

/// In-memory RGB raster stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Image {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(MlError::DimensionMismatch {
                what: "pixel buffer",
                expected: width * height,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let pixels = (0..height)
            .cartesian_product(0..width)
            .map(|(y, x)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn distinct_colors(&self) -> usize {
        self.pixels.iter().unique().count()
    }

    /// Copy of the image where each clustered pixel takes its cluster's centroid color.
    pub fn recolor(&self, clusters: &[Cluster<Pixel>]) -> Image {
        let mut out = self.clone();
        for cluster in clusters {
            let center = cluster.center();
            let color = [0, 1, 2].map(|c| center.get(c).map_or(0, |v| v.round().clamp(0.0, 255.0) as u8));
            for member in cluster.members() {
                if member.x < self.width && member.y < self.height {
                    out.pixels[member.y * self.width + member.x] = color;
                }
            }
        }
        out
    }
}

impl DataSet for Image {
    type Point = Pixel;

    fn data_points(&self) -> Vec<Pixel> {
        (0..self.width)
            .cartesian_product(0..self.height)
            .map(|(x, y)| Pixel {
                x,
                y,
                rgb: self.pixels[y * self.width + x],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KMeansConfig;
    use crate::kmeans::Model;

    fn two_tone() -> Image {
        Image::from_fn(4, 2, |x, _| if x < 2 { [10, 10, 10] } else { [200, 0, 0] })
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        assert!(matches!(
            Image::new(2, 2, vec![[0, 0, 0]; 3]),
            Err(MlError::DimensionMismatch { expected: 4, got: 3, .. })
        ));
    }

    #[test]
    fn data_points_cover_every_pixel() {
        let image = two_tone();
        let points = image.data_points();

        assert_eq!(points.len(), 8);
        assert!(points.iter().all(|p| image.get(p.x, p.y) == Some(p.rgb)));
        assert_eq!(points[0].features(), array![10., 10., 10.]);
    }

    #[test]
    fn recolor_with_one_cluster_uses_mean_color() {
        let image = two_tone();
        let clusters = Model::with_config(KMeansConfig::new(1).with_seed(0))
            .clustering(&image)
            .unwrap();
        let recolored = image.recolor(&clusters);

        assert_eq!(recolored.distinct_colors(), 1);
        assert_eq!(recolored.get(0, 0), Some([105, 5, 5]));
    }
}
