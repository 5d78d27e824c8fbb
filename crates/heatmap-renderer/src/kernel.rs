//! Gaussian splat template generation.

/// Immutable square Gaussian template, generated once per configuration
/// and reused for every fixation in every request.
///
/// Cell `(i, j)` holds `exp(-((i - size/2)^2 + (j - size/2)^2) / (2*stddev^2))`,
/// so values fall off monotonically with radial distance. For even side
/// lengths (the default is 200) the cell at `(size/2, size/2)` sits on
/// the analytic center and the peak is exactly 1.0; odd side lengths
/// have no such cell and peak half a cell off, just below 1.0.
#[derive(Debug, Clone)]
pub struct GaussianKernel {
    size: usize,
    values: Vec<f32>,
}

impl GaussianKernel {
    /// Build a `size x size` Gaussian with the given standard deviation.
    ///
    /// The 2-D Gaussian separates into the outer product of two identical
    /// 1-D profiles, so only `size` exponentials are evaluated instead of
    /// `size^2` per-cell calls.
    pub fn generate(size: usize, stddev: f32) -> Self {
        let center = size as f32 / 2.0;
        let denom = 2.0 * stddev * stddev;

        let profile: Vec<f32> = (0..size)
            .map(|i| {
                let d = i as f32 - center;
                (-(d * d) / denom).exp()
            })
            .collect();

        let mut values = Vec::with_capacity(size * size);
        for &row in &profile {
            for &col in &profile {
                values.push(row * col);
            }
        }

        Self { size, values }
    }

    /// Side length of the square template.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// One row of the template, for windowed writes.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.values[i * self.size..(i + 1) * self.size]
    }

    /// Total mass of the template.
    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_is_one_at_center() {
        let kernel = GaussianKernel::generate(200, 200.0 / 6.0);
        let center = kernel.row(100)[100];
        assert_eq!(center, 1.0);

        let max = kernel
            .values()
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_small_kernel_peak() {
        let kernel = GaussianKernel::generate(6, 1.0);
        assert_eq!(kernel.row(3)[3], 1.0);
    }

    #[test]
    fn test_odd_size_peaks_below_one() {
        // No cell sits on the analytic center, so the four cells around
        // it share the maximum, strictly below 1.0.
        let kernel = GaussianKernel::generate(7, 7.0 / 6.0);
        let max = kernel
            .values()
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);
        assert!(max < 1.0);
        assert_eq!(kernel.row(3)[3], max);
        assert_eq!(kernel.row(3)[3], kernel.row(4)[4]);
    }

    #[test]
    fn test_rotation_symmetry() {
        // The grid is offset half a cell from the analytic center, so 180
        // degree rotation only matches to within one cell of falloff per
        // axis. The center row is the 1-D profile itself (peak cell is
        // 1.0), so its steepest adjacent step bounds that error.
        let size = 200;
        let kernel = GaussianKernel::generate(size, size as f32 / 6.0);
        let center_row = kernel.row(size / 2);
        let max_step = center_row
            .windows(2)
            .map(|w| (w[1] - w[0]).abs())
            .fold(0.0f32, f32::max);
        let tolerance = 2.0 * max_step;
        for i in 0..size {
            for j in 0..size {
                let a = kernel.row(i)[j];
                let b = kernel.row(size - 1 - i)[size - 1 - j];
                assert!(
                    (a - b).abs() < tolerance,
                    "asymmetry at ({}, {}): {} vs {}",
                    i,
                    j,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_monotone_falloff_from_center() {
        let kernel = GaussianKernel::generate(200, 200.0 / 6.0);
        // Along the center row, values never increase moving away from the peak.
        let row = kernel.row(100);
        for x in 100..199 {
            assert!(row[x + 1] <= row[x]);
        }
        for x in 1..=100 {
            assert!(row[x - 1] <= row[x]);
        }
    }

    #[test]
    fn test_all_cells_positive() {
        let kernel = GaussianKernel::generate(50, 50.0 / 6.0);
        assert!(kernel.values().iter().all(|&v| v > 0.0));
        assert!(kernel.sum() > 0.0);
    }
}
