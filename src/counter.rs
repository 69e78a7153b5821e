use std::collections::HashMap;
use std::hash::Hash;

/// A multiset of the tokens currently inside a sliding window.
pub struct WindowCounter<'a, T: ?Sized> {
    counts: HashMap<&'a T, usize>,
}

impl<'a, T> WindowCounter<'a, T>
where
    T: Eq + Hash + ?Sized,
{
    pub fn new() -> Self {
        WindowCounter {
            counts: HashMap::new(),
        }
    }

    pub fn add(&mut self, token: &'a T) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    pub fn remove(&mut self, token: &'a T) {
        match self.counts.get_mut(token) {
            None => panic!("removing a token that is not in the window"),
            Some(c) if *c == 1 => {
                self.counts.remove(token);
            }
            Some(c) => *c -= 1,
        }
    }

    /// Number of distinct tokens in the window.
    pub fn types(&self) -> usize {
        self.counts.len()
    }
}

/// Number of distinct tokens.
pub fn count_types<S: AsRef<str>>(tokens: &[S]) -> usize {
    let mut counter = WindowCounter::new();
    for t in tokens {
        counter.add(t.as_ref());
    }
    counter.types()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_remove() {
        let mut c = WindowCounter::new();
        c.add("a");
        c.add("b");
        c.add("a");
        assert_eq!(c.types(), 2);
        c.remove("a");
        assert_eq!(c.types(), 2);
        c.remove("a");
        assert_eq!(c.types(), 1);
        c.remove("b");
        assert_eq!(c.types(), 0);
    }

    #[test]
    #[should_panic]
    fn remove_missing() {
        let mut c: WindowCounter<str> = WindowCounter::new();
        c.remove("a");
    }

    #[test]
    fn count_types_basic() {
        assert_eq!(count_types::<&str>(&[]), 0);
        assert_eq!(count_types(&["the", "cat", "the"]), 2);
    }
}
