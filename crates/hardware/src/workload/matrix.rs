//! Square matrices in the synthetic address space, and the drivers that walk them.

use super::{AddressSpace, Tracer};
use crate::common::{ConfigError, XorShift64};

/// Row-major `n x n` matrix of `f32` with a simulated base address.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    base: u64,
    element_bytes: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Allocates a zeroed `n x n` matrix in `space`.
    ///
    /// `element_bytes` is the simulated element stride; it need not match
    /// `size_of::<f32>()`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDimension`] for `n == 0` or a zero stride,
    /// and [`ConfigError::AddressOverflow`] if the buffer does not fit.
    pub fn new(space: &mut AddressSpace, n: usize, element_bytes: usize) -> Result<Self, ConfigError> {
        if n == 0 || element_bytes == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        let bytes = n
            .checked_mul(n)
            .and_then(|len| len.checked_mul(element_bytes))
            .ok_or(ConfigError::AddressOverflow)?;
        let base = space.alloc(bytes as u64)?;
        Ok(Self {
            n,
            base,
            element_bytes,
            data: vec![0.0; n * n],
        })
    }

    /// Dimension.
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Simulated address of element `(0, 0)`.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Simulated address of element `(i, j)`.
    #[inline]
    pub const fn addr(&self, i: usize, j: usize) -> u64 {
        self.base + ((i * self.n + j) * self.element_bytes) as u64
    }

    /// Value at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    /// Stores `value` at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        self.data[i * self.n + j] = value;
    }

    /// Row-major element values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Fills `m` with values uniformly distributed in `[0, 1)`.
///
/// The fill issues no cache references.
pub fn fill_random(m: &mut Matrix, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for v in &mut m.data {
        *v = rng.next_f32();
    }
}

/// Computes `c = a * b` with the naive `i, j, k` loop, tracing every reference.
///
/// Per output element the trace is `c[i][j]` (zeroing), then for each `k`:
/// `a[i][k]`, `b[k][j]`, `c[i][j]`.
///
/// # Panics
///
/// Panics if the three matrices differ in dimension.
// `mul_add` would round differently from the plain multiply-then-add.
#[allow(clippy::suboptimal_flops)]
pub fn multiply(tracer: &mut impl Tracer, a: &Matrix, b: &Matrix, c: &mut Matrix) {
    let n = a.n;
    assert!(b.n == n && c.n == n, "matrix dimensions differ");

    for i in 0..n {
        for j in 0..n {
            tracer.touch(c.addr(i, j));
            c.set(i, j, 0.0);
            for k in 0..n {
                tracer.touch(a.addr(i, k));
                tracer.touch(b.addr(k, j));
                tracer.touch(c.addr(i, j));
                let acc = c.get(i, j) + a.get(i, k) * b.get(k, j);
                c.set(i, j, acc);
            }
        }
    }
}

/// Swaps `a[i][j]` with `a[j][i]` over the full `i, j` range, tracing both
/// references per step.
///
/// Every off-diagonal pair is visited twice, so the values end where they
/// started; the point is the column-strided access pattern, `2 * n * n`
/// references in total.
pub fn transpose(tracer: &mut impl Tracer, a: &mut Matrix) {
    let n = a.n;
    for i in 0..n {
        for j in 0..n {
            tracer.touch(a.addr(i, j));
            tracer.touch(a.addr(j, i));
            let (x, y) = (a.get(i, j), a.get(j, i));
            a.set(i, j, y);
            a.set(j, i, x);
        }
    }
}
