//! Improved gradient noise (Perlin 2002) over three dimensions.
//!
//! Uses the reference permutation table, the quintic fade curve and the
//! twelve cube-edge gradients, so values match other ports of the same
//! reference bit for bit (within `f64` rounding).

const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Permutation lookup over the doubled table (`p[i] == p[i & 255]`).
#[inline(always)]
fn perm(i: usize) -> usize {
    PERMUTATION[i & 255] as usize
}

#[inline(always)]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline(always)]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline(always)]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Sample 3D improved noise. Output lies roughly in `[-1, 1]` and is exactly
/// zero on integer lattice points.
pub fn noise3d(x: f64, y: f64, z: f64) -> f64 {
    let fx = x.floor();
    let fy = y.floor();
    let fz = z.floor();

    // Wrap the lattice cell into the table; `as i64 & 255` keeps negatives in range.
    let xi = (fx as i64 & 255) as usize;
    let yi = (fy as i64 & 255) as usize;
    let zi = (fz as i64 & 255) as usize;

    let x = x - fx;
    let y = y - fy;
    let z = z - fz;
    let x1 = x - 1.0;
    let y1 = y - 1.0;
    let z1 = z - 1.0;

    let u = fade(x);
    let v = fade(y);
    let w = fade(z);

    let a = perm(xi) + yi;
    let aa = perm(a) + zi;
    let ab = perm(a + 1) + zi;
    let b = perm(xi + 1) + yi;
    let ba = perm(b) + zi;
    let bb = perm(b + 1) + zi;

    lerp(
        w,
        lerp(
            v,
            lerp(u, grad(perm(aa), x, y, z), grad(perm(ba), x1, y, z)),
            lerp(u, grad(perm(ab), x, y1, z), grad(perm(bb), x1, y1, z)),
        ),
        lerp(
            v,
            lerp(u, grad(perm(aa + 1), x, y, z1), grad(perm(ba + 1), x1, y, z1)),
            lerp(u, grad(perm(ab + 1), x, y1, z1), grad(perm(bb + 1), x1, y1, z1)),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_is_a_bijection() {
        let mut seen = [false; 256];
        for &p in PERMUTATION.iter() {
            assert!(!seen[p as usize], "duplicate entry {p}");
            seen[p as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn matches_reference_value() {
        // Value published with the 2002 reference implementation.
        let n = noise3d(314.0 / 100.0, 42.0, 7.0);
        assert!((n - 0.136_919_958_784).abs() < 1e-9, "got {n}");
    }

    #[test]
    fn zero_on_lattice_points() {
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (1.0, 2.0, 3.0), (-4.0, 17.0, 99.0)] {
            assert_eq!(noise3d(x, y, z), 0.0);
        }
    }

    #[test]
    fn handles_negative_coordinates() {
        let n = noise3d(-1.25, 2.75, 0.3);
        assert!((n - -0.109_502_217_018_127_48).abs() < 1e-12, "got {n}");
    }

    #[test]
    fn stays_bounded() {
        let mut i = 0.0;
        while i < 50.0 {
            let n = noise3d(i * 0.37, i * 0.11, i * 0.53);
            assert!(n.abs() <= 1.1, "noise out of range: {n}");
            i += 0.25;
        }
    }
}
