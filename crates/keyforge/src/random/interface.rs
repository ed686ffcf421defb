/// A trait for uniform random sources.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests.
///
/// # Example
/// ```
/// use keyforge::RandSource;
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn random_below(&self, bound: u64) -> u64 {
///         1234 % bound
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.random_below(1000), 234);
/// ```
pub trait RandSource {
    /// Returns a uniformly distributed integer in `0..bound`.
    ///
    /// `bound` is never zero when called by this crate.
    fn random_below(&self, bound: u64) -> u64;
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn random_below(&self, bound: u64) -> u64 {
        (**self).random_below(bound)
    }
}
