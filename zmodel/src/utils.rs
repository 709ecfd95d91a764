/// 2 次元インデックス `(i, j)` を 1 次元インデックスに変換する。
/// 配列は `nx` を幅とする行優先で格納されていると仮定する（ゴースト層込み）。
#[inline]
pub fn idx(i: usize, j: usize, nx: usize) -> usize {
    j * nx + i
}

/// 周期境界条件を考慮したインデックス変換。
/// 負の値 `i` も許容し，`0..n-1` の範囲へラップする。
#[inline]
pub fn pid(i: isize, n: usize) -> usize {
    (i.rem_euclid(n as isize)) as usize
}

/// 長さ `n` の FFT における bin `m` の符号付き波数。
#[inline]
pub fn mode(m: usize, n: usize) -> f64 {
    if m <= n / 2 {
        m as f64
    } else {
        m as f64 - n as f64
    }
}

#[inline]
pub fn dot(u: &[f64; 3], v: &[f64; 3]) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

#[inline]
pub fn cross(u: &[f64; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}
