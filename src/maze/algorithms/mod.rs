mod recursive_backtracker;

pub use recursive_backtracker::{RecursiveBacktracker, State, Step};

use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng as _};

/// Source of the random choices made while carving.
pub trait Chooser {
    /// Returns an index in `0..len`, uniformly distributed. `len` is never zero.
    fn choose_index(&mut self, len: usize) -> usize;

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            items.get(self.choose_index(items.len()))
        }
    }
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

/// [`Chooser`] backed by any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RandomChooser<R>(pub R);

impl RandomChooser<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomChooser(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::seeded(thread_rng().gen())
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Always takes the first candidate, carving the same maze every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{Chooser, FirstChooser, RandomChooser};

    #[test]
    fn first_chooser() {
        let mut chooser = FirstChooser;
        assert_eq!(chooser.choose(&[3, 2, 1]), Some(&3));
        assert_eq!(chooser.choose::<u8>(&[]), None);
    }

    #[test]
    fn seeded_chooser_is_reproducible() {
        let mut a = RandomChooser::seeded(42);
        let mut b = RandomChooser::seeded(42);
        let a: Vec<_> = (0..32).map(|_| a.choose_index(4)).collect();
        let b: Vec<_> = (0..32).map(|_| b.choose_index(4)).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|&i| i < 4));
    }

    #[test]
    fn random_chooser_hits_every_index() {
        let mut chooser = RandomChooser::seeded(7);
        let mut hits = [0usize; 3];
        for _ in 0..3000 {
            hits[chooser.choose_index(3)] += 1;
        }
        assert!(hits.iter().all(|&h| h > 800), "{hits:?}");
    }
}
