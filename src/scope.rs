use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Variable bindings consulted while evaluating a formula.
///
/// Implement this trait to feed values from your own storage. Implementations are
/// provided for string-keyed `HashMap` (any hasher, so `foldhash::HashMap` works too),
/// `BTreeMap`, and slices or arrays of `(&str, f64)` pairs. Wrap a closure with
/// [`from_fn`] to resolve names lazily.
pub trait Scope {
    /// Returns the value bound to `name`, or `None` if it is unbound.
    fn get(&self, name: &str) -> Option<f64>;
}

impl<T: Scope + ?Sized> Scope for &T {
    fn get(&self, name: &str) -> Option<f64> {
        (**self).get(name)
    }
}

impl<S: BuildHasher> Scope for HashMap<String, f64, S> {
    fn get(&self, name: &str) -> Option<f64> {
        HashMap::get(self, name).copied()
    }
}

impl<S: BuildHasher> Scope for HashMap<&str, f64, S> {
    fn get(&self, name: &str) -> Option<f64> {
        HashMap::get(self, name).copied()
    }
}

impl Scope for BTreeMap<String, f64> {
    fn get(&self, name: &str) -> Option<f64> {
        BTreeMap::get(self, name).copied()
    }
}

impl Scope for [(&str, f64)] {
    fn get(&self, name: &str) -> Option<f64> {
        // Last binding wins, like inserting into a map in order.
        self.iter().rev().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> Scope for [(&str, f64); N] {
    fn get(&self, name: &str) -> Option<f64> {
        Scope::get(self.as_slice(), name)
    }
}

/// A scope with no bindings.
impl Scope for () {
    fn get(&self, _name: &str) -> Option<f64> {
        None
    }
}

/// Scope backed by a closure. See [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnScope<F>(F);

impl<F> Scope for FnScope<F>
where
    F: Fn(&str) -> Option<f64>,
{
    fn get(&self, name: &str) -> Option<f64> {
        (self.0)(name)
    }
}

/// Resolves variables by calling `f` with each name the formula reads.
pub fn from_fn<F>(f: F) -> FnScope<F>
where
    F: Fn(&str) -> Option<f64>,
{
    FnScope(f)
}
