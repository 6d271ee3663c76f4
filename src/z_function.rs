/// Compute the Z-array of `s`.
///
/// `z[i]` is the length of the longest common prefix of `s` and `s[i..]`,
/// with `z[0] = len(s)` by convention. Positions are characters, not bytes.
/// Runs in linear time by reusing the rightmost match window `[l, r]`.
pub fn z_function(s: &str) -> Vec<usize> {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    let mut z = vec![0usize; n];
    if n == 0 {
        return z;
    }

    // Window is empty until the first match extends it.
    let (mut l, mut r) = (0usize, 0usize);
    for i in 1..n {
        if i <= r {
            z[i] = (r - i + 1).min(z[i - l]);
        }
        while i + z[i] < n && chars[z[i]] == chars[i + z[i]] {
            z[i] += 1;
        }
        if i + z[i] > r + 1 {
            l = i;
            r = i + z[i] - 1;
        }
    }
    z[0] = n;
    z
}
