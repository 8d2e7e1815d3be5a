// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sweep-and-prune kernels over x-sorted buckets.
//!
//! Both kernels report bucket-local index pairs whose AABBs overlap,
//! inclusive on faces. They rely on [`Bucket::xmins`] being ascending.

use crate::layer::Bucket;

/// Inclusive overlap of two `[ymin, ymax, zmin, zmax]` intervals.
///
/// The four separation tests are evaluated together so the compiler can
/// lower them to one 4-lane compare.
#[inline]
pub(crate) fn yz_overlap(a: &[f32; 4], b: &[f32; 4]) -> bool {
    let separated = [a[1] < b[0], b[1] < a[0], a[3] < b[2], b[3] < a[2]];
    !(separated[0] | separated[1] | separated[2] | separated[3])
}

/// Every overlapping pair `(i, j)` with `i < j` inside one bucket.
pub(crate) fn self_sweep(bucket: &Bucket, mut on_pair: impl FnMut(usize, usize)) {
    let xmins = bucket.xmins();
    let yz = bucket.yzminmaxs();
    for (i, (&xmax, current)) in bucket.xmaxs().iter().zip(yz).enumerate() {
        let rest = (i + 1)..xmins.len();
        for j in rest {
            if xmins[j] > xmax {
                break;
            }
            if yz_overlap(current, &yz[j]) {
                on_pair(i, j);
            }
        }
    }
}

/// Every overlapping pair `(i, j)` with `i` in `a` and `j` in `b`.
///
/// Pass one finds the pairs where `b`'s interval starts at or after `a`'s;
/// pass two the pairs where it starts strictly before. The split keeps each
/// pair in exactly one pass.
pub(crate) fn bipartite_sweep(a: &Bucket, b: &Bucket, mut on_pair: impl FnMut(usize, usize)) {
    let (a_xmins, a_xmaxs, a_yz) = (a.xmins(), a.xmaxs(), a.yzminmaxs());
    let (b_xmins, b_xmaxs, b_yz) = (b.xmins(), b.xmaxs(), b.yzminmaxs());

    let mut b_start = 0;
    for i in 0..a_xmins.len() {
        while b_start < b_xmins.len() && b_xmins[b_start] < a_xmins[i] {
            b_start += 1;
        }
        if b_start == b_xmins.len() {
            break;
        }
        for j in b_start..b_xmins.len() {
            if b_xmins[j] > a_xmaxs[i] {
                break;
            }
            if yz_overlap(&a_yz[i], &b_yz[j]) {
                on_pair(i, j);
            }
        }
    }

    let mut a_start = 0;
    for j in 0..b_xmins.len() {
        while a_start < a_xmins.len() && a_xmins[a_start] <= b_xmins[j] {
            a_start += 1;
        }
        if a_start == a_xmins.len() {
            break;
        }
        for i in a_start..a_xmins.len() {
            if a_xmins[i] > b_xmaxs[j] {
                break;
            }
            if yz_overlap(&a_yz[i], &b_yz[j]) {
                on_pair(i, j);
            }
        }
    }
}
