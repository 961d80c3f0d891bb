// # Doubled: Original Array Reconstruction
//
// Given an array that is claimed to contain every value of some original array
// together with its double, this crate recovers one such original array. The
// `reconstruct` binary is the stdin/stdout driver; `generate`, `import` and
// `tester` build case folders and check solutions against them.

/// The reconstruction algorithm.
pub mod reconstruct;

/// Parsing of the stdin format and formatting of results.
pub mod io;

/// Answer checkers: exact comparison and multiset witness validation.
pub mod judge;

/// Test-case folders, example-text conversion and bundled samples.
pub mod cases;

/// Running solution commands against case folders.
pub mod runner;

/// Tools for generating instances.
pub mod casegen {
    /// Random solvable and unsolvable instances.
    pub mod random;
}
