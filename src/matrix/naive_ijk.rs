/// Naive square matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple loop: each `C[i][j]` is the dot product of
/// row `i` of A and column `j` of B. The inner loop walks B with stride
/// `n`, so it is cache-hostile on purpose. It is the shared baseline every
/// language port of the benchmark runs, so keep it unoptimized.
///
/// Every cell of C is assigned (C = A * B). Whatever C held before is
/// discarded, which lets the driver reuse one output buffer across runs.
///
/// # Arguments
///
/// * `a` - Matrix A (n × n), row-major
/// * `b` - Matrix B (n × n), row-major
/// * `c` - Matrix C (n × n), row-major, overwritten
/// * `n` - Dimension of all three matrices
pub fn matmul_naive_ijk(a: &[f64], b: &[f64], c: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i * n + k] * b[k * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}
