//! All-pairs windowed homology scan.
//!
//! Every position of a circular sequence anchors a window of `homology_len`
//! characters. Two windows at least `homology_len` apart form a candidate
//! recombination site when the number of identical positions reaches
//! `homology_len * match_percent`.

use crate::libs::error::{RecombError, Result};
use crate::libs::window::CircularSeq;
use rayon::prelude::*;
use std::fmt;

/// Parameters of one scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOpts {
    pub homology_len: usize,
    pub match_percent: f64,
}

impl ScanOpts {
    pub fn new(homology_len: usize, match_percent: f64) -> Self {
        Self {
            homology_len,
            match_percent,
        }
    }

    /// Minimum number of identical positions, not rounded.
    ///
    /// ```
    /// use recomb::libs::homology::ScanOpts;
    ///
    /// assert_eq!(ScanOpts::new(10, 0.75).threshold(), 7.5);
    /// ```
    pub fn threshold(&self) -> f64 {
        self.homology_len as f64 * self.match_percent
    }

    pub fn is_hit(&self, matches: usize) -> bool {
        matches as f64 >= self.threshold()
    }
}

/// A pair of window anchors, `left < right`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Site {
    pub left: usize,
    pub right: usize,
}

impl Site {
    pub fn new(left: usize, right: usize) -> Self {
        debug_assert!(left < right, "site anchors out of order: {} >= {}", left, right);
        Self { left, right }
    }

    /// Separation of the two anchors
    pub fn distance(&self) -> usize {
        self.right.abs_diff(self.left)
    }
}

impl From<(usize, usize)> for Site {
    fn from((left, right): (usize, usize)) -> Self {
        Self { left, right }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.left, self.right)
    }
}

/// Number of positions where `a` and `b` carry the same character
///
/// ```
/// let a: Vec<char> = "acgt".chars().collect();
/// let b: Vec<char> = "aggt".chars().collect();
/// assert_eq!(recomb::libs::homology::matches(&a, &b), 3);
/// ```
pub fn matches(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x == y).count()
}

/// Scans `seq` for candidate recombination sites.
///
/// Sites come out ordered by `left`, then by `right`.
///
/// ```
/// use recomb::libs::homology::{scan, Site};
///
/// let sites = scan("acgtacgt", 4, 1.0).unwrap();
/// assert_eq!(sites, vec![Site::new(0, 4), Site::new(1, 5), Site::new(2, 6), Site::new(3, 7)]);
/// ```
pub fn scan(seq: &str, homology_len: usize, match_percent: f64) -> Result<Vec<Site>> {
    scan_circular(
        &CircularSeq::new(seq),
        ScanOpts::new(homology_len, match_percent),
    )
}

/// Single-threaded scan over an already prepared sequence
pub fn scan_circular(circ: &CircularSeq, opts: ScanOpts) -> Result<Vec<Site>> {
    let windows = windows_of(circ, opts)?;

    let sites = (0..windows.len())
        .flat_map(|i| hits_at(&windows, i, opts))
        .collect();

    Ok(sites)
}

/// Splits the outer loop over the current rayon pool.
///
/// Returns the same sites in the same order as [`scan_circular`].
pub fn scan_parallel(circ: &CircularSeq, opts: ScanOpts) -> Result<Vec<Site>> {
    let windows = windows_of(circ, opts)?;

    let sites = (0..windows.len())
        .into_par_iter()
        .flat_map_iter(|i| hits_at(&windows, i, opts))
        .collect();

    Ok(sites)
}

// Window cache indexed by anchor position
fn windows_of(circ: &CircularSeq, opts: ScanOpts) -> Result<Vec<&[char]>> {
    if opts.homology_len == 0 {
        return Err(RecombError::invalid_argument(
            "homology length must be at least 1",
        ));
    }

    let windows = (0..circ.len())
        .map(|pos| circ.window(pos, opts.homology_len))
        .collect::<Result<Vec<_>>>()?;
    log::debug!(
        "Cached {} windows of length {}",
        windows.len(),
        opts.homology_len
    );

    Ok(windows)
}

fn hits_at<'a>(
    windows: &'a [&'a [char]],
    i: usize,
    opts: ScanOpts,
) -> impl Iterator<Item = Site> + 'a {
    (i + opts.homology_len..windows.len())
        .filter(move |&j| opts.is_hit(matches(windows[i], windows[j])))
        .map(move |j| Site::new(i, j))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Straightforward rendition: rebuild every window on demand
    fn brute_force(seq: &str, h: usize, p: f64) -> Vec<(usize, usize)> {
        let lower: Vec<char> = seq.to_lowercase().chars().collect();
        let n = lower.len();
        let win = |s: usize| -> Vec<char> { (s..s + h).map(|k| lower[k % n]).collect() };

        let mut pairs = vec![];
        for i in 0..n {
            for j in (i + h)..n {
                let counter = win(i).iter().zip(win(j)).filter(|(a, b)| **a == *b).count();
                if counter as f64 >= h as f64 * p {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn as_tuples(sites: &[Site]) -> Vec<(usize, usize)> {
        sites.iter().map(|s| (s.left, s.right)).collect()
    }

    const PLASMID: &str = "ATGACCATGATTACGGATTCACTGGCCGTCGTTTTACAACGTCGTGACTGGGAAAACCCTGGCG";

    #[test]
    fn test_scan_exact_repeat() {
        let sites = scan("acgtacgt", 4, 1.0).unwrap();
        assert!(sites.contains(&Site::new(0, 4)));
        assert!(sites.iter().all(|s| s.distance() >= 4));
        assert_eq!(as_tuples(&sites), vec![(0, 4), (1, 5), (2, 6), (3, 7)]);
    }

    #[test]
    fn test_scan_uniform() {
        let sites = scan("aaaaaaaa", 4, 0.5).unwrap();
        let expected: Vec<(usize, usize)> = (0..8)
            .flat_map(|i| ((i + 4)..8).map(move |j| (i, j)))
            .collect();
        assert_eq!(as_tuples(&sites), expected);
        assert_eq!(sites.len(), 10);
    }

    #[test]
    fn test_scan_single_mismatch() {
        // windows at 0 and 4 differ at one base, windows at 0 and 8 are identical
        let seq = "aaaaaaataaaa";
        let sites = scan(seq, 4, 1.0).unwrap();
        assert!(!sites.contains(&Site::new(0, 4)));
        assert!(sites.contains(&Site::new(0, 8)));

        let relaxed = scan(seq, 4, 0.75).unwrap();
        assert!(relaxed.contains(&Site::new(0, 4)));
    }

    #[test]
    fn test_scan_empty_result() {
        assert!(scan("acgtn", 2, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_scan_case_insensitive() {
        assert_eq!(
            scan("ACGTacgt", 4, 1.0).unwrap(),
            scan("acgtACGT", 4, 1.0).unwrap()
        );
    }

    #[test]
    fn test_scan_wrapped_windows() {
        // the window at 5 wraps to "aga", same as the window at 1
        let sites = scan("gagaca", 3, 1.0).unwrap();
        assert_eq!(as_tuples(&sites), brute_force("gagaca", 3, 1.0));
        assert!(sites.contains(&Site::new(1, 5)));
    }

    #[test]
    fn test_scan_thresholds() {
        for p in [0.0, 0.25, 0.5, 0.6, 0.8, 1.0, 1.5, -1.0] {
            for h in [1, 3, 5, 8] {
                let sites = scan(PLASMID, h, p).unwrap();
                assert_eq!(as_tuples(&sites), brute_force(PLASMID, h, p), "h={} p={}", h, p);
            }
        }
    }

    #[test]
    fn test_scan_properties() {
        let h = 6;
        let p = 0.5;
        let circ = CircularSeq::new(PLASMID);
        let opts = ScanOpts::new(h, p);
        let sites = scan_circular(&circ, opts).unwrap();

        // domain
        for s in &sites {
            assert!(s.left < s.right);
            assert!(s.right < circ.len());
            assert!(s.right - s.left >= h);
        }
        // ordering
        let mut sorted = sites.clone();
        sorted.sort();
        assert_eq!(sites, sorted);
        // threshold, both directions
        for i in 0..circ.len() {
            for j in (i + h)..circ.len() {
                let m = matches(circ.window(i, h).unwrap(), circ.window(j, h).unwrap());
                assert_eq!(sites.contains(&Site::new(i, j)), m as f64 >= h as f64 * p);
            }
        }
        // determinism
        assert_eq!(sites, scan_circular(&circ, opts).unwrap());
    }

    #[test]
    fn test_scan_out_of_range_percent() {
        assert!(scan(PLASMID, 4, 1.01).unwrap().is_empty());
        let n = PLASMID.len();
        let all = scan(PLASMID, 4, 0.0).unwrap();
        assert_eq!(all.len(), (n - 4) * (n - 3) / 2);
        assert!(scan(PLASMID, 4, f64::NAN).unwrap().is_empty());
    }

    #[test]
    fn test_scan_invalid() {
        assert!(matches!(
            scan("acgt", 5, 1.0),
            Err(RecombError::InvalidArgument(_))
        ));
        assert!(matches!(
            scan("acgt", 0, 1.0),
            Err(RecombError::InvalidArgument(_))
        ));
        assert!(scan("", 3, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_scan_parallel_same_order() {
        let circ = CircularSeq::new(PLASMID);
        for h in [2, 4, 7] {
            let opts = ScanOpts::new(h, 0.5);
            assert_eq!(
                scan_parallel(&circ, opts).unwrap(),
                scan_circular(&circ, opts).unwrap()
            );
        }
        assert!(scan_parallel(&circ, ScanOpts::new(0, 1.0)).is_err());
    }

    #[test]
    fn test_site() {
        let site = Site::from((3, 10));
        assert_eq!(site, Site::new(3, 10));
        assert_eq!(site.distance(), 7);
        assert_eq!(site.to_string(), "3\t10");
    }

    #[test]
    fn test_site_distance_unordered() {
        // From bypasses the ordering check in new
        let site = Site::from((9, 4));
        assert_eq!(site.distance(), 5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of order")]
    fn test_site_new_out_of_order() {
        Site::new(5, 2);
    }
}
