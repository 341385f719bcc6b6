//! Exact count of connected labeled graphs.
//!
//! Fix one vertex. Every labeled graph on `m` vertices splits into the connected
//! component holding that vertex (size `k`, `C(m-1, k-1)` choices of companions,
//! `c[k]` ways to wire it) and an arbitrary graph on the other `m - k` vertices.
//! Subtracting every split with `k < m` from `2^C(m,2)` leaves the connected ones.

use num_bigint::BigUint;
use num_integer::binomial;
use num_traits::{One, Zero};

/// =============== helpers ===============

fn pairs(n: usize) -> usize {
  n * n.saturating_sub(1) / 2
}

fn pow2(exp: usize) -> BigUint {
  BigUint::one() << exp
}

/// Number of labeled simple graphs on `n` vertices, `2^C(n,2)`.
pub fn total_labeled_graphs(n: usize) -> BigUint {
  pow2(pairs(n))
}

/// =============== recurrence ===============

/// `c[1..=n]`, the connected labeled counts for every order up to `n`.
pub fn labeled_count_table(n: usize) -> Vec<BigUint> {
  // index 0 is a placeholder so that c[k] reads naturally
  let mut c: Vec<BigUint> = vec![BigUint::zero(); n + 1];
  if n == 0 {
    return Vec::new();
  }
  c[1] = BigUint::one();

  for m in 2..=n {
    let total = total_labeled_graphs(m);
    let mut excess = BigUint::zero();
    for k in 1..m {
      let companions: BigUint = binomial(BigUint::from(m - 1), BigUint::from(k - 1));
      excess += companions * &c[k] * total_labeled_graphs(m - k);
    }
    c[m] = total - excess;
  }

  c.remove(0);
  c
}

/// Connected labeled simple graphs on `n` vertices.
///
/// Returns 0 for `n < 1`: there is nothing to count, which is not an error.
pub fn connected_labeled_count(n: i64) -> BigUint {
  if n < 1 {
    return BigUint::zero();
  }
  labeled_count_table(n as usize)
    .pop()
    .unwrap_or_else(BigUint::zero)
}

/// Decimal rendering with `,` between groups of three digits.
pub fn group_thousands(value: &BigUint) -> String {
  let digits = value.to_str_radix(10);
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}
